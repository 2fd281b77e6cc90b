//! Mapping between row-major bead ids and grid positions, and the move
//! operation built on it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::bead::{Bead, BeadId};
use crate::canvas::CanvasColors;

/// Row and column of a grid bead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

/// Whole-bead displacement of a selection: `dx` columns, `dy` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveOffset {
    pub dx: i64,
    pub dy: i64,
}

impl MoveOffset {
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    pub fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

#[inline]
pub fn position_of(id: usize, grid_size: usize) -> GridPosition {
    GridPosition {
        row: id / grid_size,
        col: id % grid_size,
    }
}

/// Row-major id at `(row, col)`, or `None` off the grid.
#[inline]
pub fn id_of(row: i64, col: i64, grid_size: usize) -> Option<usize> {
    let n = grid_size as i64;
    if (0..n).contains(&row) && (0..n).contains(&col) {
        Some((row * n + col) as usize)
    } else {
        None
    }
}

/// Where bead `id` lands after moving by `offset`. Off-grid is `None`;
/// positions never wrap or clamp.
pub fn move_destination(id: usize, offset: MoveOffset, grid_size: usize) -> Option<usize> {
    let pos = position_of(id, grid_size);
    let row = (pos.row as i64).checked_add(offset.dy)?;
    let col = (pos.col as i64).checked_add(offset.dx)?;
    id_of(row, col, grid_size)
}

/// Ghost beads showing where a colored selection would land.
///
/// Each selected bead that is painted and has an on-grid destination yields
/// a copy of the destination bead's geometry with id `preview_<original>`.
/// Nothing is mutated; callers recompute this on every pointer move.
pub fn preview_beads(
    selected: &BTreeSet<usize>,
    offset: MoveOffset,
    beads: &[Bead],
    colors: &CanvasColors,
    grid_size: usize,
) -> Vec<Bead> {
    if selected.is_empty() || offset.is_zero() {
        return Vec::new();
    }

    // Layouts store grid beads in id order; fall back to a scan otherwise.
    let find = |id: usize| {
        let key = BeadId::Grid(id);
        beads
            .get(id)
            .filter(|b| b.id == key)
            .or_else(|| beads.iter().find(|b| b.id == key))
    };

    selected
        .iter()
        .filter(|&&id| find(id).is_some() && colors.contains(BeadId::Grid(id)))
        .filter_map(|&id| {
            let target = move_destination(id, offset, grid_size)?;
            find(target).map(|b| b.with_id(BeadId::Preview(id)))
        })
        .collect()
}

/// Commit a move: clear every selected bead, then repaint the colored ones
/// at their destinations.
///
/// A selected bead whose destination is off the grid is erased, not kept in
/// place.
pub fn apply_move(
    selected: &BTreeSet<usize>,
    offset: MoveOffset,
    colors: &CanvasColors,
    grid_size: usize,
) -> CanvasColors {
    if selected.is_empty() || offset.is_zero() {
        return colors.clone();
    }

    let moves: Vec<_> = selected
        .iter()
        .filter_map(|&id| {
            let color = colors.get(BeadId::Grid(id))?;
            let target = move_destination(id, offset, grid_size)?;
            Some((BeadId::Grid(target), color))
        })
        .collect();

    let mut moved = colors.clone();
    for &id in selected {
        moved.remove(BeadId::Grid(id));
    }
    moved.extend(moves);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_beads, BEAD_HEIGHT, BEAD_WIDTH};
    use crate::stitch::{Rotation, StitchType};

    fn set(ids: &[usize]) -> BTreeSet<usize> {
        ids.iter().copied().collect()
    }

    fn canvas(pairs: &[(usize, usize)]) -> CanvasColors {
        pairs.iter().map(|&(id, c)| (BeadId::Grid(id), c)).collect()
    }

    #[test]
    fn position_round_trip() {
        for id in 0..25 {
            let p = position_of(id, 5);
            assert_eq!(id_of(p.row as i64, p.col as i64, 5), Some(id));
        }
        assert_eq!(position_of(6, 5), GridPosition { row: 1, col: 1 });
    }

    #[test]
    fn off_grid_has_no_id() {
        assert_eq!(id_of(-1, 0, 5), None);
        assert_eq!(id_of(0, -1, 5), None);
        assert_eq!(id_of(5, 0, 5), None);
        assert_eq!(id_of(0, 5, 5), None);
    }

    #[test]
    fn destinations() {
        assert_eq!(move_destination(0, MoveOffset::new(-1, 0), 5), None);
        assert_eq!(move_destination(6, MoveOffset::new(1, 0), 5), Some(7));
        assert_eq!(move_destination(6, MoveOffset::new(0, 1), 5), Some(11));
        // Moving right off the end of a row does not wrap to the next row.
        assert_eq!(move_destination(4, MoveOffset::new(1, 0), 5), None);
    }

    #[test]
    fn move_relocates_colors() {
        let colors = canvas(&[(6, 2), (12, 4)]);
        let moved = apply_move(&set(&[6]), MoveOffset::new(1, 0), &colors, 5);
        assert_eq!(moved, canvas(&[(7, 2), (12, 4)]));
    }

    #[test]
    fn move_off_grid_erases() {
        let colors = canvas(&[(0, 1), (1, 3)]);
        let moved = apply_move(&set(&[0, 1]), MoveOffset::new(-1, 0), &colors, 5);
        assert_eq!(moved, canvas(&[(0, 3)]));
    }

    #[test]
    fn overlapping_move_keeps_every_bead() {
        // Shifting a horizontal run by one: targets overlap the sources.
        let colors = canvas(&[(0, 1), (1, 2), (2, 3)]);
        let moved = apply_move(&set(&[0, 1, 2]), MoveOffset::new(1, 0), &colors, 5);
        assert_eq!(moved, canvas(&[(1, 1), (2, 2), (3, 3)]));
    }

    #[test]
    fn move_overwrites_unselected_target() {
        let colors = canvas(&[(6, 2), (7, 9)]);
        let moved = apply_move(&set(&[6]), MoveOffset::new(1, 0), &colors, 5);
        assert_eq!(moved, canvas(&[(7, 2)]));
    }

    #[test]
    fn unpainted_selection_is_cleared_only() {
        let colors = canvas(&[(3, 1)]);
        let moved = apply_move(&set(&[3, 8]), MoveOffset::new(0, 1), &colors, 5);
        assert_eq!(moved, canvas(&[(8, 1)]));
    }

    #[test]
    fn empty_selection_or_zero_offset_is_noop() {
        let colors = canvas(&[(3, 1)]);
        assert_eq!(apply_move(&set(&[]), MoveOffset::new(1, 1), &colors, 5), colors);
        assert_eq!(apply_move(&set(&[3]), MoveOffset::ZERO, &colors, 5), colors);
    }

    #[test]
    fn previews_use_destination_geometry() {
        let beads = compute_beads(5, BEAD_HEIGHT, BEAD_WIDTH, 20.0, 20.0, Rotation::Deg0, StitchType::Peyote);
        let colors = canvas(&[(6, 2), (0, 1)]);
        let previews = preview_beads(&set(&[0, 6, 9]), MoveOffset::new(1, 0), &beads, &colors, 5);
        // 0 -> 1 and 6 -> 7; 9 is unpainted.
        assert_eq!(previews.len(), 2);
        assert_eq!(previews[0].id, BeadId::Preview(0));
        assert_eq!((previews[0].x, previews[0].y), (beads[1].x, beads[1].y));
        assert_eq!(previews[1].id.to_string(), "preview_6");
        assert_eq!((previews[1].x, previews[1].y), (beads[7].x, beads[7].y));
    }

    #[test]
    fn previews_drop_off_grid() {
        let beads = compute_beads(5, BEAD_HEIGHT, BEAD_WIDTH, 20.0, 20.0, Rotation::Deg0, StitchType::Square);
        let colors = canvas(&[(0, 1)]);
        assert!(preview_beads(&set(&[0]), MoveOffset::new(-1, 0), &beads, &colors, 5).is_empty());
        assert!(preview_beads(&set(&[0]), MoveOffset::ZERO, &beads, &colors, 5).is_empty());
    }

    #[test]
    fn previews_from_unordered_beads() {
        let mut beads = compute_beads(5, BEAD_HEIGHT, BEAD_WIDTH, 20.0, 20.0, Rotation::Deg0, StitchType::Square);
        let expected = beads[7];
        beads.reverse();
        let colors = canvas(&[(6, 2)]);
        let previews = preview_beads(&set(&[6]), MoveOffset::new(1, 0), &beads, &colors, 5);
        assert_eq!(previews.len(), 1);
        assert_eq!((previews[0].x, previews[0].y), (expected.x, expected.y));
    }

    #[test]
    fn extreme_offsets_leave_the_grid() {
        assert_eq!(move_destination(24, MoveOffset::new(i64::MAX, 0), 5), None);
        assert_eq!(move_destination(24, MoveOffset::new(0, i64::MAX), 5), None);
        assert_eq!(move_destination(0, MoveOffset::new(i64::MIN, i64::MIN), 5), None);
        let colors = canvas(&[(24, 1)]);
        let moved = apply_move(&set(&[24]), MoveOffset::new(i64::MAX, 0), &colors, 5);
        assert!(moved.is_empty());
    }
}
