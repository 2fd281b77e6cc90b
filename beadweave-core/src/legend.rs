use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::canvas::{CanvasColors, ColorId};
use crate::palette::{Palette, PaletteColor};

/// One legend row: a color in use and how many beads carry it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color_id: ColorId,
    pub color: PaletteColor,
    pub count: usize,
}

/// Count every color used on the grid and the fringe, in ascending color id
/// order. Ids the palette does not know are left out.
pub fn compute_legend(canvas: &CanvasColors, fringe: &CanvasColors, palette: &Palette) -> Vec<LegendEntry> {
    let mut counts: BTreeMap<ColorId, usize> = BTreeMap::new();
    for color in canvas.colors().chain(fringe.colors()) {
        *counts.entry(color).or_default() += 1;
    }

    counts
        .into_iter()
        .filter_map(|(color_id, count)| {
            palette.get(color_id).map(|&color| LegendEntry {
                color_id,
                color,
                count,
            })
        })
        .collect()
}
