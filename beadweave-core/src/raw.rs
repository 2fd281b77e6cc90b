//! Right-angle weave: a lattice of 4-bead diamond units where neighbouring
//! units share the bead on their common edge.

use std::collections::HashMap;

use crate::bead::{Bead, BeadId, BeadShape};

/// Bead diameter relative to the bead width.
pub const RAW_BEAD_RATIO: f64 = 0.4;

/// Unit-relative positions in half steps, in emission order:
/// top, right, bottom, left.
const UNIT_SLOTS: [(i64, i64); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// Generate right-angle weave beads for a `size × size` grid of units.
///
/// Unit `(i, j)` is centred on column `j`, row `i`, and contributes one bead
/// half a unit away on each side. Positions are keyed in doubled integer
/// coordinates so shared positions deduplicate exactly; ids are assigned in
/// first-encounter order. The result holds `2 · size · (size + 1)` beads.
///
/// The lattice is symmetric under quarter turns, so there is no rotation
/// parameter.
pub fn generate_raw_beads(size: usize, w: f64, total_h: f64, total_w: f64) -> Vec<Bead> {
    let spacing = w;
    let diameter = w * RAW_BEAD_RATIO;
    let extent = size as f64 * spacing;
    let start_x = (total_w - extent) / 2.0;
    let start_y = (total_h - extent) / 2.0;

    let mut ids: HashMap<(i64, i64), usize> = HashMap::with_capacity(2 * size * (size + 1));
    let mut beads = Vec::with_capacity(2 * size * (size + 1));

    for i in 0..size as i64 {
        for j in 0..size as i64 {
            for (dx, dy) in UNIT_SLOTS {
                let key = (2 * j + dx, 2 * i + dy);
                if ids.contains_key(&key) {
                    continue;
                }
                let id = beads.len();
                ids.insert(key, id);

                // Half-step coordinates span -1..=2*size-1; shift to bead centres.
                let cx = start_x + spacing * (key.0 as f64 / 2.0 + 0.5);
                let cy = start_y + spacing * (key.1 as f64 / 2.0 + 0.5);
                beads.push(Bead {
                    id: BeadId::Grid(id),
                    x: cx - diameter / 2.0,
                    y: cy - diameter / 2.0,
                    width: diameter,
                    height: diameter,
                    shape: BeadShape::Circle,
                    fringe: None,
                });
            }
        }
    }
    beads
}
