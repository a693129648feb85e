//! Error types for the game layer.

use lightmaze_protocol::Position;

/// Errors produced while validating or applying a client intent.
///
/// All of these are recoverable: the session state is left unchanged and
/// the condition is reported to the originating client only. A blocked
/// move is NOT an error; it is a legal attempt with a no-op outcome
/// (see [`MoveOutcome::Blocked`](crate::MoveOutcome::Blocked)).
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// The role identifier is not one of the known wire names. The caller
    /// must deny all actions and put the client back on role selection.
    #[error("unknown role {0:?}")]
    UnknownRole(String),

    /// The requester's role (or lack of one) does not permit the action:
    /// a direction the role is not bound to, a move from a role with no
    /// movement capability, or an admin command from a non-admin.
    #[error("action not permitted: {0}")]
    ActionNotPermitted(String),

    /// A stage-jump target outside `0..stage_count`.
    #[error("stage index {index} out of range ({count} stages)")]
    InvalidStageIndex { index: usize, count: usize },
}

/// Errors produced while constructing stage content.
///
/// These only exist at startup (or in tests building fixtures); a running
/// session never sees them because templates are validated before the
/// session is created.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The grid has no rows or a zero-width row.
    #[error("grid is empty")]
    EmptyGrid,

    /// The grid is not rectangular.
    #[error("grid row {row} has length {len}, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A cell code outside the known set.
    #[error("invalid cell code {code} at row {row}")]
    InvalidCell { row: usize, code: u8 },

    /// Every stage needs at least one exit cell to be winnable.
    #[error("grid has no exit cell")]
    NoExit,

    /// The designated start cell is outside the grid.
    #[error("start {0} is out of bounds")]
    StartOutOfBounds(Position),

    /// The designated start cell is a wall.
    #[error("start {0} is a wall cell")]
    StartOnWall(Position),

    /// A hazard placed outside the grid.
    #[error("hazard {0} is out of bounds")]
    HazardOutOfBounds(Position),

    /// A stage set must contain at least one stage.
    #[error("stage set is empty")]
    EmptyStageSet,
}
