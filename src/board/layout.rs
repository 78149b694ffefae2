//! Grid cells and world positions.

use serde::{Deserialize, Serialize};

use crate::core::{GridSize, Spacing};

/// A cell on the board grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

/// World-space position of a card center.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// The board center.
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };
}

/// Position of a cell on a grid centered at the origin.
///
/// Column 0 sits at the positive-x edge and row 0 at the positive-y edge.
#[must_use]
pub fn cell_position(grid: GridSize, spacing: Spacing, cell: GridCell) -> Position {
    let center_x = grid.cols as f32 / 2.0;
    let center_y = grid.rows as f32 / 2.0;
    Position {
        x: (center_x - cell.col as f32 - 0.5) * spacing.x,
        y: (center_y - cell.row as f32 - 0.5) * spacing.y,
    }
}

/// Cells in dealing order: column by column, top to bottom.
pub fn cells(grid: GridSize) -> impl Iterator<Item = GridCell> {
    (0..grid.cols).flat_map(move |col| (0..grid.rows).map(move |row| GridCell { row, col }))
}
