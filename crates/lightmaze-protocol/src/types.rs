//! Core wire types for the lightmaze protocol.
//!
//! Everything in this module gets serialized, sent over the network, and
//! deserialized on the other side. The JSON shapes are fixed by the browser
//! client: event tags are kebab-case (`"join-as"`, `"game-state"`), payload
//! fields are camelCase (`"playerPosition"`, `"yPositions"`), and a maze is
//! a 2-D array of bare cell codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for a connected client.
///
/// Newtype wrapper over `u64` so a client id can't be handed to something
/// expecting a stage index or any other counter. `#[serde(transparent)]`
/// keeps the wire form a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// The fixed set of claimable roles.
///
/// A role is an exclusively held capability token: it grants either a
/// visibility mode ([`Role::Guide`], [`Role::Admin`]) or a single movement
/// direction (the mover roles and [`Role::Jumper`]). The split is the whole
/// game: the guide sees the walls but cannot act, the movers act but cannot
/// see the walls, so the group has to talk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Full visibility, no movement.
    Guide,
    /// Bound to [`Direction::Left`].
    MoverLeft,
    /// Bound to [`Direction::Right`].
    MoverRight,
    /// Bound to [`Direction::Down`].
    MoverDown,
    /// Bound to [`Direction::Up`].
    MoverUp,
    /// Bound to [`Direction::Jump`], which resolves through the configured
    /// jump offset.
    Jumper,
    /// Full visibility plus stage metadata; may set the stage index
    /// directly.
    Admin,
}

impl Role {
    /// Every role, in claim-screen order.
    pub const ALL: [Role; 7] = [
        Role::Guide,
        Role::MoverLeft,
        Role::MoverRight,
        Role::MoverDown,
        Role::MoverUp,
        Role::Jumper,
        Role::Admin,
    ];

    /// Parses a wire identifier (e.g. `"mover-left"`).
    ///
    /// Role names arrive as raw strings in `join-as`/`leave-role` so an
    /// unrecognized name can surface as the `UnknownRole` condition instead
    /// of a blanket decode failure.
    pub fn from_wire(s: &str) -> Option<Role> {
        match s {
            "guide" => Some(Role::Guide),
            "mover-left" => Some(Role::MoverLeft),
            "mover-right" => Some(Role::MoverRight),
            "mover-down" => Some(Role::MoverDown),
            "mover-up" => Some(Role::MoverUp),
            "jumper" => Some(Role::Jumper),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// The wire identifier for this role.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Guide => "guide",
            Role::MoverLeft => "mover-left",
            Role::MoverRight => "mover-right",
            Role::MoverDown => "mover-down",
            Role::MoverUp => "mover-up",
            Role::Jumper => "jumper",
            Role::Admin => "admin",
        }
    }

    /// The single direction this role may issue, if it is movement-capable.
    ///
    /// The binding is fixed, not negotiated: a mover role is permanently
    /// wired to one direction.
    pub fn bound_direction(&self) -> Option<Direction> {
        match self {
            Role::MoverLeft => Some(Direction::Left),
            Role::MoverRight => Some(Direction::Right),
            Role::MoverDown => Some(Direction::Down),
            Role::MoverUp => Some(Direction::Up),
            Role::Jumper => Some(Direction::Jump),
            Role::Guide | Role::Admin => None,
        }
    }

    /// Whether this role's projected view includes wall structure.
    pub fn sees_walls(&self) -> bool {
        matches!(self, Role::Guide | Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// A movement action identifier.
///
/// The four compass directions move one cell; `jump` resolves to whatever
/// offset the server is configured with. Each value is issuable by exactly
/// one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Jump,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Jump => "jump",
        };
        f.write_str(s)
    }
}

/// A grid coordinate. `x` indexes columns, `y` indexes rows; `(0, 0)` is the
/// top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Cells
// ---------------------------------------------------------------------------

/// One cell of a maze grid.
///
/// On the wire a maze is a 2-D array of the raw codes the client renders:
/// `0` floor, `1` wall, `2` exit, `3` goal. `Exit` and `Goal` are both
/// terminal; `Goal` is the brighter variant stage authors tend to place on
/// the final gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Cell {
    Floor,
    Wall,
    Exit,
    Goal,
}

impl Cell {
    /// Whether stepping onto this cell completes the stage.
    pub fn is_exit(&self) -> bool {
        matches!(self, Cell::Exit | Cell::Goal)
    }

    /// The wire code for this cell.
    pub fn code(self) -> u8 {
        self.into()
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        match cell {
            Cell::Floor => 0,
            Cell::Wall => 1,
            Cell::Exit => 2,
            Cell::Goal => 3,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Cell, ProtocolError> {
        match code {
            0 => Ok(Cell::Floor),
            1 => Ok(Cell::Wall),
            2 => Ok(Cell::Exit),
            3 => Ok(Cell::Goal),
            other => Err(ProtocolError::InvalidCell(other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Client events
// ---------------------------------------------------------------------------

/// Messages clients send to the server.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON, so a move
/// intent looks like `{ "type": "move", "direction": "right" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Attempt to claim a role. The identifier stays a raw string here so
    /// an unknown name is an `UnknownRole` report, not a dropped frame.
    JoinAs { role: String },

    /// Release a held role back to the unclaimed pool.
    LeaveRole { role: String },

    /// A movement intent. The server resolves the sender's bound role; the
    /// direction must match it.
    Move { direction: Direction },

    /// Reset the session to the first stage. Honored from the guide and
    /// the admin.
    RestartFirstMaze,

    /// Jump the session directly to the given stage. Admin only.
    AdminSetMaze { index: usize },
}

// ---------------------------------------------------------------------------
// Server events
// ---------------------------------------------------------------------------

/// Messages the server sends to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// The requester's claim succeeded.
    RoleAssigned { role: Role },

    /// The requested role is already held by someone else. This is the
    /// user-visible notice naming the contested role.
    RoleTaken { role: Role },

    /// Seeds a newly assigned client's view. The maze is already projected
    /// for the claiming role, so a mover never receives wall data here.
    InitMaze { maze: Vec<Vec<Cell>> },

    /// Full snapshot after a mutating transition, sent to every
    /// role-holding client with the maze projected per recipient.
    #[serde(rename_all = "camelCase")]
    GameState {
        player_position: Position,
        y_positions: Vec<Position>,
        maze: Vec<Vec<Cell>>,
        maze_index: usize,
        /// Stage-template count; present only in the admin projection.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        maze_count: Option<usize>,
    },

    /// Sent once when the final stage is exited.
    GameClear,

    /// A recoverable error, reported to the originating client only.
    /// `code` follows HTTP-style conventions (400 bad request, 403 not
    /// permitted, 409 conflict).
    Error { code: u16, message: String },
}

// =========================================================================
// Tests
// =========================================================================
