//! Game configuration: hazard policy and the jump offset.

use lightmaze_protocol::Direction;

/// A signed cell offset applied to the player position by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// What contact with a hazard cell does to a move that lands on one.
///
/// The observed client renders hazards to every role but never shows them
/// affecting movement, so the rule is a deployment choice rather than a
/// fixed behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HazardPolicy {
    /// Hazards are rendered only; movement is unaffected. The default,
    /// matching observed behavior.
    #[default]
    Passive,

    /// Hazard cells behave like walls: landing on one is a blocked no-op.
    Blocking,

    /// Contact reloads the current stage template, sending the player back
    /// to the stage start.
    Reset,
}

/// Per-session rule configuration.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub hazard_policy: HazardPolicy,

    /// The offset the jump-capable role moves by. Validated exactly like a
    /// compass move: only the landing cell is checked, cells jumped over
    /// are not.
    pub jump_offset: Offset,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hazard_policy: HazardPolicy::default(),
            // Two cells up: clears a single wall row.
            jump_offset: Offset::new(0, -2),
        }
    }
}

impl GameConfig {
    /// The cell offset a direction resolves to under this configuration.
    pub fn offset_for(&self, direction: Direction) -> Offset {
        match direction {
            Direction::Left => Offset::new(-1, 0),
            Direction::Right => Offset::new(1, 0),
            Direction::Up => Offset::new(0, -1),
            Direction::Down => Offset::new(0, 1),
            Direction::Jump => self.jump_offset,
        }
    }
}
