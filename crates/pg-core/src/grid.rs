//! Dense grid derivation and statistics over the sparse cell map.
//!
//! Pure functions of project state, recomputed in full on demand. No caching
//! or dependency tracking: a full O(rows·cols) pass is the contract.

use crate::id::ColorId;
use crate::model::{CellKey, Project};

/// One resolved cell of the dense grid view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
    /// `None` = unpainted.
    pub color: Option<ColorId>,
}

/// Enumerate every cell of the grid in row-major order. Length is always
/// exactly `rows * cols`; keys absent from the sparse map come out `None`.
pub fn dense_cells(project: &Project) -> Vec<GridCell> {
    let mut out = Vec::with_capacity((project.rows * project.cols) as usize);
    for row in 0..project.rows {
        for col in 0..project.cols {
            out.push(GridCell {
                row,
                col,
                color: project.cells.get(&CellKey::new(row, col)).copied(),
            });
        }
    }
    out
}

/// Number of painted cells inside the current grid bounds. Stale keys left
/// behind by a grid shrink are not counted.
pub fn painted_count(project: &Project) -> usize {
    project
        .cells
        .keys()
        .filter(|key| key.row < project.rows && key.col < project.cols)
        .count()
}

/// Per-color usage counts, in palette (display) order.
pub fn color_usage(project: &Project) -> Vec<(ColorId, usize)> {
    project
        .colors
        .iter()
        .map(|color| {
            let count = project
                .cells
                .iter()
                .filter(|(key, painted)| {
                    **painted == color.id && key.row < project.rows && key.col < project.cols
                })
                .count();
            (color.id, count)
        })
        .collect()
}
