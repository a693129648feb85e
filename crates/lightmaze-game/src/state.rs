//! The session aggregate and the store that owns it.

use lightmaze_protocol::Position;

use crate::{GameConfig, Grid, StageSet};

/// The single authoritative session: current stage, live grid, player and
/// hazard positions, and the cleared flag.
///
/// Created once at server start and mutated in place for the life of the
/// process. Fields are crate-private; the reducer mutates them and
/// everything else reads through the accessors.
#[derive(Debug)]
pub struct SessionState {
    pub(crate) stages: StageSet,
    pub(crate) config: GameConfig,
    pub(crate) stage_index: usize,
    pub(crate) grid: Grid,
    pub(crate) player: Position,
    pub(crate) hazards: Vec<Position>,
    pub(crate) cleared: bool,
}

impl SessionState {
    /// Builds the session at `Playing(stage = 0)`.
    pub fn new(stages: StageSet, config: GameConfig) -> Self {
        let first = stages.get(0).expect("stage set is non-empty");
        let grid = first.grid().clone();
        let player = first.start();
        let hazards = first.hazards().to_vec();
        Self {
            stages,
            config,
            stage_index: 0,
            grid,
            player,
            hazards,
            cleared: false,
        }
    }

    /// Replaces grid, player, and hazards wholesale from the template at
    /// `index`. Callers validate the index first.
    pub(crate) fn load_stage(&mut self, index: usize) {
        let template = self.stages.get(index).expect("validated stage index");
        self.stage_index = index;
        self.grid = template.grid().clone();
        self.player = template.start();
        self.hazards = template.hazards().to_vec();
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Whether the current stage is the final one.
    pub fn on_last_stage(&self) -> bool {
        self.stage_index == self.stages.last_index()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn hazards(&self) -> &[Position] {
        &self.hazards
    }

    pub fn cleared(&self) -> bool {
        self.cleared
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

/// Single owner of the [`SessionState`].
///
/// Every write funnels through [`apply`](SessionStore::apply); readers get
/// an immutable snapshot from [`snapshot`](SessionStore::snapshot) and can
/// never observe a half-applied transition. The store itself is owned by
/// exactly one task (the session actor), which is what serializes
/// transitions against each other.
#[derive(Debug)]
pub struct SessionStore {
    state: SessionState,
}

impl SessionStore {
    pub fn new(stages: StageSet, config: GameConfig) -> Self {
        Self {
            state: SessionState::new(stages, config),
        }
    }

    /// The current state, read-only.
    pub fn snapshot(&self) -> &SessionState {
        &self.state
    }

    /// Runs a transition with exclusive access to the state and returns
    /// whatever it produces. Transitions are bounded synchronous
    /// computations; nothing suspends while one is in flight.
    pub fn apply<T>(
        &mut self,
        transition: impl FnOnce(&mut SessionState) -> T,
    ) -> T {
        transition(&mut self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_at_stage_zero() {
        let state =
            SessionState::new(StageSet::builtin(), GameConfig::default());

        assert_eq!(state.stage_index(), 0);
        assert!(!state.cleared());
        // Player starts on the first template's start cell.
        assert_eq!(state.player(), Position::new(1, 1));
    }

    #[test]
    fn test_load_stage_replaces_grid_player_and_hazards() {
        let mut state =
            SessionState::new(StageSet::builtin(), GameConfig::default());

        state.load_stage(1);

        assert_eq!(state.stage_index(), 1);
        // Builtin stage 1 is wider than stage 0 and carries hazards; the
        // wholesale replacement is what makes dimension changes safe.
        assert_eq!(state.grid().width(), 9);
        assert!(!state.hazards().is_empty());
    }

    #[test]
    fn test_store_apply_funnels_writes() {
        let mut store =
            SessionStore::new(StageSet::builtin(), GameConfig::default());

        let index = store.apply(|state| {
            state.load_stage(2);
            state.stage_index()
        });

        assert_eq!(index, 2);
        assert_eq!(store.snapshot().stage_index(), 2);
    }
}
