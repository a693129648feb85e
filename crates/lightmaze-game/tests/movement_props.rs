//! Property-based tests for the movement reducer.
//!
//! The invariant under test: no sequence of movement intents, over any
//! grid, ever leaves the player out of bounds or standing on a wall.

use lightmaze_game::{
    GameConfig, Grid, HazardPolicy, MoveOutcome, Offset, SessionState,
    StageSet, StageTemplate, apply_move,
};
use lightmaze_protocol::{Cell, Direction, Position, Role};
use proptest::prelude::*;

/// The role bound to a direction; every direction has exactly one.
fn role_for(direction: Direction) -> Role {
    match direction {
        Direction::Left => Role::MoverLeft,
        Direction::Right => Role::MoverRight,
        Direction::Up => Role::MoverUp,
        Direction::Down => Role::MoverDown,
        Direction::Jump => Role::Jumper,
    }
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Left),
        Just(Direction::Right),
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Jump),
    ]
}

fn arb_policy() -> impl Strategy<Value = HazardPolicy> {
    prop_oneof![
        Just(HazardPolicy::Passive),
        Just(HazardPolicy::Blocking),
        Just(HazardPolicy::Reset),
    ]
}

/// A random single-stage session: random rectangular grid of floor/wall
/// cells with one forced exit and a floor start cell, random hazards, a
/// random jump offset, and a random hazard policy.
fn arb_session() -> impl Strategy<Value = SessionState> {
    (2usize..10, 2usize..10)
        .prop_flat_map(|(width, height)| {
            let cells = proptest::collection::vec(
                proptest::collection::vec(0u8..2, width),
                height,
            );
            let exit_at = (0..width, 0..height);
            let start_at = (0..width, 0..height);
            let hazards = proptest::collection::vec(
                (0..width, 0..height),
                0..4,
            );
            let jump = (-3i32..4, -3i32..4);
            (cells, exit_at, start_at, hazards, jump, arb_policy())
        })
        .prop_map(|(mut cells, exit_at, start_at, hazards, jump, policy)| {
            // Force the invariants the generator can't express directly:
            // one exit somewhere, and a non-wall start.
            cells[exit_at.1][exit_at.0] = 2;
            if (start_at.0, start_at.1) != exit_at {
                cells[start_at.1][start_at.0] = 0;
            }

            let codes: Vec<Vec<u8>> = cells;
            let rows: Vec<&[u8]> =
                codes.iter().map(|row| row.as_slice()).collect();
            let grid = Grid::from_codes(&rows).expect("generated grid");

            let start = Position::new(start_at.0, start_at.1);
            let hazards = hazards
                .into_iter()
                .map(|(x, y)| Position::new(x, y))
                .collect();
            let template = StageTemplate::new(grid, start, hazards)
                .expect("generated template");

            let config = GameConfig {
                hazard_policy: policy,
                jump_offset: Offset::new(jump.0, jump.1),
            };
            SessionState::new(
                StageSet::new(vec![template]).unwrap(),
                config,
            )
        })
}

proptest! {
    /// The player never ends up out of bounds or on a wall, whatever the
    /// grid, policy, jump offset, or intent sequence.
    #[test]
    fn player_stays_in_bounds_and_off_walls(
        mut state in arb_session(),
        directions in proptest::collection::vec(arb_direction(), 1..40),
    ) {
        for direction in directions {
            let role = role_for(direction);
            apply_move(&mut state, role, direction)
                .expect("bound role/direction pairs are always legal");

            let player = state.player();
            prop_assert!(state.grid().contains(player));
            prop_assert_ne!(
                state.grid().cell(player),
                Some(Cell::Wall)
            );
        }
    }

    /// A blocked move really is a no-op: identical position, stage, and
    /// cleared flag.
    #[test]
    fn blocked_moves_change_nothing(
        mut state in arb_session(),
        directions in proptest::collection::vec(arb_direction(), 1..40),
    ) {
        for direction in directions {
            let before = (
                state.player(),
                state.stage_index(),
                state.cleared(),
            );
            let outcome =
                apply_move(&mut state, role_for(direction), direction)
                    .expect("bound role/direction pairs are always legal");
            if outcome == MoveOutcome::Blocked {
                prop_assert_eq!(state.player(), before.0);
                prop_assert_eq!(state.stage_index(), before.1);
                prop_assert_eq!(state.cleared(), before.2);
            }
        }
    }

    /// Mismatched role/direction pairs are rejected without touching
    /// state, for every combination.
    #[test]
    fn mismatched_role_direction_never_mutates(
        mut state in arb_session(),
        direction in arb_direction(),
    ) {
        let before = state.player();
        for role in Role::ALL {
            if role.bound_direction() == Some(direction) {
                continue;
            }
            let result = apply_move(&mut state, role, direction);
            prop_assert!(result.is_err());
            prop_assert_eq!(state.player(), before);
        }
    }
}
