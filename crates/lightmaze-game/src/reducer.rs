//! The movement/progression reducer: validates a role's intent against the
//! grid and advances the session.
//!
//! Every function here takes `&mut SessionState` and either applies a
//! complete transition or leaves the state untouched. Callers run them
//! inside [`SessionStore::apply`](crate::SessionStore::apply), so no two
//! transitions ever interleave.

use lightmaze_protocol::{Cell, Direction, Position, Role};

use crate::state::SessionState;
use crate::{GameError, HazardPolicy, Offset};

/// What a validated movement intent did to the session.
///
/// `Blocked` is a legal attempt with a no-op outcome, not a failure; the
/// error cases (wrong role, no movement capability) never reach an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player position advanced by the move's offset.
    Moved,

    /// The candidate cell was out of bounds, a wall, a hazard under the
    /// blocking policy, or the session is already cleared. State unchanged.
    Blocked,

    /// The move landed on a hazard under the reset policy; the current
    /// stage template was reloaded and the player is back at its start.
    HazardReset,

    /// The move reached an exit on a non-final stage; the session advanced
    /// to the next stage's template.
    StageCleared,

    /// The move reached an exit on the final stage; `cleared` is now set
    /// and movement is frozen until a restart.
    GameCleared,
}

/// Applies a movement intent from `role`.
///
/// The role must be movement-capable and `direction` must be the one it is
/// bound to; the binding is fixed, so a mismatch is an
/// [`GameError::ActionNotPermitted`] and the state is untouched. Everything
/// past that gate resolves to a [`MoveOutcome`].
pub fn apply_move(
    state: &mut SessionState,
    role: Role,
    direction: Direction,
) -> Result<MoveOutcome, GameError> {
    let Some(bound) = role.bound_direction() else {
        return Err(GameError::ActionNotPermitted(format!(
            "role {role} has no movement capability"
        )));
    };
    if bound != direction {
        return Err(GameError::ActionNotPermitted(format!(
            "role {role} is bound to {bound}, not {direction}"
        )));
    }

    // Terminal state: after the final exit, the maze is frozen until an
    // explicit restart.
    if state.cleared {
        return Ok(MoveOutcome::Blocked);
    }

    let offset = state.config.offset_for(direction);
    let Some(candidate) = shifted(state.player, offset, state) else {
        return Ok(MoveOutcome::Blocked);
    };
    let cell = state
        .grid
        .cell(candidate)
        .expect("shifted() returns in-bounds positions");
    if cell == Cell::Wall {
        return Ok(MoveOutcome::Blocked);
    }

    if state.hazards.contains(&candidate) {
        match state.config.hazard_policy {
            HazardPolicy::Blocking => return Ok(MoveOutcome::Blocked),
            HazardPolicy::Reset => {
                let current = state.stage_index;
                state.load_stage(current);
                return Ok(MoveOutcome::HazardReset);
            }
            HazardPolicy::Passive => {}
        }
    }

    if cell.is_exit() {
        if state.on_last_stage() {
            state.player = candidate;
            state.cleared = true;
            return Ok(MoveOutcome::GameCleared);
        }
        let next = state.stage_index + 1;
        state.load_stage(next);
        return Ok(MoveOutcome::StageCleared);
    }

    state.player = candidate;
    Ok(MoveOutcome::Moved)
}

/// Jumps the session directly to `index`: the admin override.
///
/// Unguarded by current stage or clear status, and idempotent; the target
/// template is loaded and `cleared` drops unconditionally.
///
/// # Errors
/// [`GameError::InvalidStageIndex`] when `index >= stage_count`; state
/// unchanged.
pub fn set_stage(
    state: &mut SessionState,
    index: usize,
) -> Result<(), GameError> {
    if index >= state.stage_count() {
        return Err(GameError::InvalidStageIndex {
            index,
            count: state.stage_count(),
        });
    }
    state.load_stage(index);
    state.cleared = false;
    Ok(())
}

/// Resets the session to the first stage and clears the terminal flag: the
/// `restart-first-maze` path out of the cleared state.
pub fn restart(state: &mut SessionState) {
    state.load_stage(0);
    state.cleared = false;
}

/// `pos + offset`, or `None` when the result leaves the grid.
fn shifted(
    pos: Position,
    offset: Offset,
    state: &SessionState,
) -> Option<Position> {
    let x = pos.x as i64 + offset.dx as i64;
    let y = pos.y as i64 + offset.dy as i64;
    if x < 0
        || y < 0
        || x >= state.grid.width() as i64
        || y >= state.grid.height() as i64
    {
        return None;
    }
    Some(Position::new(x as usize, y as usize))
}

// =========================================================================
// Tests
// =========================================================================
