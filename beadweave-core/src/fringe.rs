use serde::{Deserialize, Serialize};

use crate::bead::{Bead, BeadId, BeadShape, FringeLink};
use crate::error::CoreError;

/// First fringe id; fringe ids never collide with grid ids.
pub const FRINGE_ID_BASE: usize = 10_000;

pub const FRINGE_MIN_LENGTH: usize = 1;
pub const FRINGE_MAX_LENGTH: usize = 20;
pub const FRINGE_DEFAULT_LENGTH: usize = 3;

/// Whether fringe is shown and how many beads hang from each bottom bead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FringeSettings {
    #[serde(default)]
    pub visible: bool,
    #[serde(default = "default_fringe_length")]
    pub length: usize,
}

fn default_fringe_length() -> usize {
    FRINGE_DEFAULT_LENGTH
}

impl Default for FringeSettings {
    fn default() -> Self {
        Self {
            visible: false,
            length: FRINGE_DEFAULT_LENGTH,
        }
    }
}

impl FringeSettings {
    pub fn new(visible: bool, length: usize) -> crate::Result<Self> {
        if !(FRINGE_MIN_LENGTH..=FRINGE_MAX_LENGTH).contains(&length) {
            return Err(CoreError::InvalidFringeLength(length));
        }
        Ok(Self { visible, length })
    }
}

/// Ids of the bottom grid row, left to right.
pub fn bottom_row_ids(size: usize) -> impl Iterator<Item = usize> {
    let start = size.saturating_sub(1) * size;
    start..start + size
}

/// Hang `length` beads below every bottom-row bead.
///
/// Each strand starts at its parent's bottom centre and steps down by the
/// bead width. Ids run `fringe_10000, fringe_10001, …` across the whole set,
/// not per strand. Bottom-row ids with no bead in `main_beads` are skipped.
pub fn fringe_beads(
    visible: bool,
    length: usize,
    main_beads: &[Bead],
    size: usize,
    h: f64,
    w: f64,
) -> Vec<Bead> {
    if !visible || length == 0 {
        return Vec::new();
    }

    let mut fringe = Vec::with_capacity(size * length);
    let mut next_id = FRINGE_ID_BASE;

    for parent in bottom_row_ids(size).map(BeadId::Grid) {
        let Some(main) = main_beads.iter().find(|b| b.id == parent) else {
            continue;
        };
        let start_x = main.x + main.width / 2.0;
        let start_y = main.y + main.height;

        for index in 0..length {
            fringe.push(Bead {
                id: BeadId::Fringe(next_id),
                x: start_x - w / 2.0,
                y: start_y + index as f64 * w,
                width: w,
                height: h,
                shape: BeadShape::Rect,
                fringe: Some(FringeLink { parent, index }),
            });
            next_id += 1;
        }
    }
    fringe
}
