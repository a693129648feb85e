//! The maze grid: a rectangular field of cells behind an invariant-checked
//! constructor.

use lightmaze_protocol::{Cell, Position};

use crate::TemplateError;

/// A rectangular maze grid.
///
/// Invariants, enforced at construction and never re-checked after:
/// - at least one row, every row non-empty and the same length
/// - at least one exit cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Grid {
    /// Builds a grid from rows of cells, validating the invariants.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, TemplateError> {
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(TemplateError::EmptyGrid),
        };
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(TemplateError::RaggedRow {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
        }
        if !rows.iter().flatten().any(Cell::is_exit) {
            return Err(TemplateError::NoExit);
        }
        Ok(Self { rows, width })
    }

    /// Builds a grid from raw cell codes (`0` floor, `1` wall, `2`/`3`
    /// exit), the form stage layouts are authored in.
    pub fn from_codes(codes: &[&[u8]]) -> Result<Self, TemplateError> {
        let mut rows = Vec::with_capacity(codes.len());
        for (y, line) in codes.iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for code in *line {
                let cell = Cell::try_from(*code).map_err(|_| {
                    TemplateError::InvalidCell {
                        row: y,
                        code: *code,
                    }
                })?;
                row.push(cell);
            }
            rows.push(row);
        }
        Self::new(rows)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.rows.len()
    }

    /// The cell at `pos`, or `None` when out of bounds.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.rows.get(pos.y)?.get(pos.x).copied()
    }

    /// Borrowed rows, top to bottom.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Owned copy of the rows, the wire form of a maze.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows.clone()
    }
}

// =========================================================================
// Tests
// =========================================================================
