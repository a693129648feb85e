//! Stage templates and the ordered stage set a session progresses through.

use lightmaze_protocol::Position;

use crate::{Grid, TemplateError};

/// One maze template: the grid, the player start cell, and the hazard
/// placements. A stage transition replaces the live session fields
/// wholesale from a template, never patches them, so grids of different
/// sizes can follow each other without stale cells.
#[derive(Debug, Clone)]
pub struct StageTemplate {
    grid: Grid,
    start: Position,
    hazards: Vec<Position>,
}

impl StageTemplate {
    /// Validates and builds a template.
    ///
    /// # Errors
    /// The start must be an in-bounds, non-wall cell and every hazard must
    /// be in bounds.
    pub fn new(
        grid: Grid,
        start: Position,
        hazards: Vec<Position>,
    ) -> Result<Self, TemplateError> {
        let start_cell = grid
            .cell(start)
            .ok_or(TemplateError::StartOutOfBounds(start))?;
        if start_cell == lightmaze_protocol::Cell::Wall {
            return Err(TemplateError::StartOnWall(start));
        }
        if let Some(bad) = hazards.iter().find(|h| !grid.contains(**h)) {
            return Err(TemplateError::HazardOutOfBounds(*bad));
        }
        Ok(Self {
            grid,
            start,
            hazards,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn hazards(&self) -> &[Position] {
        &self.hazards
    }
}

/// The ordered, non-empty sequence of stages. The session's stage index
/// always selects a member of this set.
#[derive(Debug, Clone)]
pub struct StageSet {
    stages: Vec<StageTemplate>,
}

impl StageSet {
    /// Builds a stage set from templates, in play order.
    ///
    /// # Errors
    /// Returns [`TemplateError::EmptyStageSet`] for an empty sequence.
    pub fn new(stages: Vec<StageTemplate>) -> Result<Self, TemplateError> {
        if stages.is_empty() {
            return Err(TemplateError::EmptyStageSet);
        }
        Ok(Self { stages })
    }

    /// The stage content that ships with the server: three hand-authored
    /// mazes of rising size. Every layout is solvable under every hazard
    /// policy (no hazard sits on the only path).
    pub fn builtin() -> StageSet {
        let first = builtin_stage(
            &[
                &[1, 1, 1, 1, 1, 1, 1],
                &[1, 0, 0, 0, 0, 0, 1],
                &[1, 1, 1, 1, 1, 0, 1],
                &[1, 0, 0, 0, 0, 0, 1],
                &[1, 0, 1, 1, 1, 1, 1],
                &[1, 0, 0, 0, 0, 2, 1],
                &[1, 1, 1, 1, 1, 1, 1],
            ],
            (1, 1),
            &[],
        );

        let second = builtin_stage(
            &[
                &[1, 1, 1, 1, 1, 1, 1, 1, 1],
                &[1, 0, 0, 0, 0, 0, 0, 0, 1],
                &[1, 0, 1, 1, 1, 1, 1, 0, 1],
                &[1, 0, 1, 0, 0, 0, 1, 0, 1],
                &[1, 0, 1, 0, 1, 0, 1, 0, 1],
                &[1, 0, 0, 0, 1, 0, 0, 2, 1],
                &[1, 1, 1, 1, 1, 1, 1, 1, 1],
            ],
            (1, 1),
            &[(2, 5), (5, 4)],
        );

        let last = builtin_stage(
            &[
                &[1, 1, 1, 1, 1, 1, 1, 1, 1],
                &[1, 0, 0, 0, 0, 0, 0, 0, 1],
                &[1, 0, 1, 0, 1, 0, 1, 0, 1],
                &[1, 0, 1, 0, 1, 0, 1, 0, 1],
                &[1, 0, 1, 0, 1, 0, 1, 0, 1],
                &[1, 0, 0, 0, 1, 0, 0, 3, 1],
                &[1, 1, 1, 1, 1, 1, 1, 1, 1],
            ],
            (1, 1),
            &[(3, 3), (7, 3)],
        );

        StageSet::new(vec![first, second, last])
            .expect("builtin stage set is non-empty")
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The template at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&StageTemplate> {
        self.stages.get(index)
    }

    /// Index of the final stage.
    pub fn last_index(&self) -> usize {
        self.stages.len() - 1
    }
}

/// Builds one builtin stage from authored codes. The `expect`s are safe:
/// the layouts are static data covered by tests.
fn builtin_stage(
    codes: &[&[u8]],
    start: (usize, usize),
    hazards: &[(usize, usize)],
) -> StageTemplate {
    let grid = Grid::from_codes(codes).expect("builtin grid is valid");
    let hazards = hazards
        .iter()
        .map(|(x, y)| Position::new(*x, *y))
        .collect();
    StageTemplate::new(grid, Position::new(start.0, start.1), hazards)
        .expect("builtin stage is valid")
}

// =========================================================================
// Tests
// =========================================================================
