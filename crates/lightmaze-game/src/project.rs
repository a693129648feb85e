//! The role projection engine: one shared session state, different
//! observable views per role.
//!
//! The asymmetry is the game design: the guide sees structure but cannot
//! move, movers can move but see no structure, so the group must talk. The
//! projection is a single pure function returning a tagged variant per
//! capability class; call sites match on the variant instead of branching
//! on roles.

use lightmaze_protocol::{Cell, Direction, Position, Role};

use crate::{Grid, SessionState};

/// The unmasked view: full wall structure, exits, player, hazards.
/// Produced for the guide, who observes but holds no movement action.
#[derive(Debug, Clone, PartialEq)]
pub struct FullView {
    pub maze: Vec<Vec<Cell>>,
    pub player: Position,
    pub hazards: Vec<Position>,
}

/// A mover's view: exits, player, and hazards are visible, but every wall
/// is reported as floor. Carries the one direction this role may issue.
#[derive(Debug, Clone, PartialEq)]
pub struct MoverView {
    pub maze: Vec<Vec<Cell>>,
    pub player: Position,
    pub hazards: Vec<Position>,
    pub direction: Direction,
}

/// The admin's view: unmasked like the guide's, plus the raw stage index
/// and template count backing the direct stage-jump controls.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminView {
    pub maze: Vec<Vec<Cell>>,
    pub player: Position,
    pub hazards: Vec<Position>,
    pub stage_index: usize,
    pub stage_count: usize,
}

/// A role's observable slice of the session, tagged by capability class.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Full(FullView),
    Mover(MoverView),
    Admin(AdminView),
}

impl View {
    /// The maze rows as this role sees them.
    pub fn maze(&self) -> &[Vec<Cell>] {
        match self {
            View::Full(v) => &v.maze,
            View::Mover(v) => &v.maze,
            View::Admin(v) => &v.maze,
        }
    }

    /// Consumes the view, keeping only the maze rows (the `init-maze`
    /// payload).
    pub fn into_maze(self) -> Vec<Vec<Cell>> {
        match self {
            View::Full(v) => v.maze,
            View::Mover(v) => v.maze,
            View::Admin(v) => v.maze,
        }
    }

    pub fn player(&self) -> Position {
        match self {
            View::Full(v) => v.player,
            View::Mover(v) => v.player,
            View::Admin(v) => v.player,
        }
    }

    pub fn hazards(&self) -> &[Position] {
        match self {
            View::Full(v) => &v.hazards,
            View::Mover(v) => &v.hazards,
            View::Admin(v) => &v.hazards,
        }
    }
}

/// Projects the session state into what `role` is allowed to observe.
///
/// Pure: the same state and role always produce the same view, and the
/// state is never touched. Role identifiers are parsed at the protocol
/// boundary, so by the time a `Role` exists projection cannot fail.
pub fn project(state: &SessionState, role: Role) -> View {
    match role {
        Role::Guide => View::Full(FullView {
            maze: state.grid().to_rows(),
            player: state.player(),
            hazards: state.hazards().to_vec(),
        }),
        Role::Admin => View::Admin(AdminView {
            maze: state.grid().to_rows(),
            player: state.player(),
            hazards: state.hazards().to_vec(),
            stage_index: state.stage_index(),
            stage_count: state.stage_count(),
        }),
        mover => View::Mover(MoverView {
            maze: mask_walls(state.grid()),
            player: state.player(),
            hazards: state.hazards().to_vec(),
            direction: mover
                .bound_direction()
                .expect("non-guide, non-admin roles are movement-capable"),
        }),
    }
}

/// Rewrites every wall cell as floor. Exits survive; player and hazards are
/// carried as positions, not cells, so masking never touches them.
fn mask_walls(grid: &Grid) -> Vec<Vec<Cell>> {
    grid.rows()
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Wall => Cell::Floor,
                    other => *other,
                })
                .collect()
        })
        .collect()
}

// =========================================================================
// Tests
// =========================================================================
