//! Peyote row numbering.
//!
//! Peyote is counted outward from a centre row. Beads in even columns take
//! the odd row numbers (1, 3, 5, 7, 9, 1, …) and beads in odd columns the
//! even ones (2, 4, 6, 8, 0, 2, …), so the two interleaved sequences each
//! repeat every five rows and every label is a single digit.

use serde::{Deserialize, Serialize};

use crate::bead::Bead;
use crate::position::position_of;

/// Index of the row numbered `starting_offset`. For a 50×50 grid this is 24.
pub fn center_row_index(grid_size: usize) -> i64 {
    (grid_size / 2) as i64 - 1
}

/// Row number shown on the bead at `(col, row)`.
pub fn peyote_row_number(col: usize, row: usize, grid_size: usize, starting_offset: i32) -> i32 {
    let center = center_row_index(grid_size);
    let distance = (row as i64 - center).unsigned_abs();
    if distance == 0 {
        return starting_offset;
    }
    let base = if col % 2 == 0 {
        (2 * distance - 1) % 10
    } else {
        (2 * distance) % 10
    };
    base as i32 + starting_offset
}

/// A row-number label anchored at a bead's centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowLabel {
    pub bead: usize,
    pub x: f64,
    pub y: f64,
    pub number: i32,
}

/// One label per grid bead, for hosts that draw row numbers over the pattern.
pub fn peyote_row_labels(beads: &[Bead], grid_size: usize, starting_offset: i32) -> Vec<RowLabel> {
    beads
        .iter()
        .filter_map(|bead| {
            let id = bead.id.grid_index()?;
            let pos = position_of(id, grid_size);
            let (x, y) = bead.center();
            Some(RowLabel {
                bead: id,
                x,
                y,
                number: peyote_row_number(pos.col, pos.row, grid_size, starting_offset),
            })
        })
        .collect()
}
