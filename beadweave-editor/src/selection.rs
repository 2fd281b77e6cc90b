use std::collections::BTreeSet;

use beadweave_core::{id_of, position_of, MoveOffset};

/// Selected grid beads plus the pending, uncommitted move offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    beads: BTreeSet<usize>,
    offset: MoveOffset,
}

impl Selection {
    pub fn beads(&self) -> &BTreeSet<usize> {
        &self.beads
    }

    pub fn contains(&self, id: usize) -> bool {
        self.beads.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.beads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }

    /// Returns `true` if the bead was newly selected.
    pub fn add(&mut self, id: usize) -> bool {
        self.beads.insert(id)
    }

    pub fn remove(&mut self, id: usize) -> bool {
        self.beads.remove(&id)
    }

    /// Flip membership; returns whether the bead is now selected.
    pub fn toggle(&mut self, id: usize) -> bool {
        if self.beads.remove(&id) {
            false
        } else {
            self.beads.insert(id);
            true
        }
    }

    /// Add every bead in the rectangle spanned by two corner beads.
    pub fn add_rect(&mut self, corner_a: usize, corner_b: usize, grid_size: usize) {
        let (a, b) = (position_of(corner_a, grid_size), position_of(corner_b, grid_size));
        for row in a.row.min(b.row)..=a.row.max(b.row) {
            for col in a.col.min(b.col)..=a.col.max(b.col) {
                if let Some(id) = id_of(row as i64, col as i64, grid_size) {
                    self.beads.insert(id);
                }
            }
        }
    }

    /// Drop the selection and any pending move.
    pub fn clear(&mut self) {
        self.beads.clear();
        self.offset = MoveOffset::ZERO;
    }

    pub(crate) fn replace(&mut self, beads: BTreeSet<usize>) {
        self.beads = beads;
    }

    pub fn offset(&self) -> MoveOffset {
        self.offset
    }

    pub fn set_offset(&mut self, offset: MoveOffset) {
        self.offset = offset;
    }

    /// Shift the pending move by `(dx, dy)` beads. Saturates at the `i64`
    /// range; such offsets land off the grid anyway.
    pub fn nudge(&mut self, dx: i64, dy: i64) {
        self.offset.dx = self.offset.dx.saturating_add(dx);
        self.offset.dy = self.offset.dy.saturating_add(dy);
    }

    pub fn reset_offset(&mut self) {
        self.offset = MoveOffset::ZERO;
    }
}
