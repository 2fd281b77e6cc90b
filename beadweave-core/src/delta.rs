use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bead::BeadId;
use crate::canvas::{CanvasColors, ColorId};

/// Old and new color of a repainted bead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorChange {
    pub old: ColorId,
    pub new: ColorId,
}

/// A bead erased by a delta, with the color needed to restore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovedBead {
    pub id: BeadId,
    pub color: ColorId,
}

/// Minimal difference between two canvas snapshots.
///
/// The three parts cover disjoint bead sets, so applying them in any order
/// gives the same result. Forward application turns the source snapshot into
/// the target; [`revert`](Self::revert) turns the target back into the
/// source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub added: BTreeMap<BeadId, ColorId>,
    pub modified: BTreeMap<BeadId, ColorChange>,
    pub removed: Vec<RemovedBead>,
}

impl Delta {
    /// Diff `old` against `new`.
    pub fn between(old: &CanvasColors, new: &CanvasColors) -> Self {
        let mut delta = Self::default();

        for (id, color) in new.iter() {
            match old.get(id) {
                None => {
                    delta.added.insert(id, color);
                }
                Some(prev) if prev != color => {
                    delta.modified.insert(id, ColorChange { old: prev, new: color });
                }
                Some(_) => {}
            }
        }

        delta.removed = old
            .iter()
            .filter(|&(id, _)| !new.contains(id))
            .map(|(id, color)| RemovedBead { id, color })
            .collect();

        delta
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty()
    }

    /// Number of beads this delta touches.
    pub fn len(&self) -> usize {
        self.added.len() + self.modified.len() + self.removed.len()
    }

    /// Redo direction: add, modify, then delete.
    pub fn apply(&self, canvas: &mut CanvasColors) {
        canvas.extend(self.added.iter().map(|(&id, &color)| (id, color)));
        for (&id, change) in &self.modified {
            canvas.set(id, change.new);
        }
        for removed in &self.removed {
            canvas.remove(removed.id);
        }
    }

    /// Undo direction: drop added beads, restore old colors, re-insert
    /// removed beads.
    pub fn revert(&self, canvas: &mut CanvasColors) {
        for &id in self.added.keys() {
            canvas.remove(id);
        }
        for (&id, change) in &self.modified {
            canvas.set(id, change.old);
        }
        for removed in &self.removed {
            canvas.set(removed.id, removed.color);
        }
    }

    /// Owned variant of [`apply`](Self::apply) / [`revert`](Self::revert).
    pub fn applied_to(&self, canvas: &CanvasColors, reverse: bool) -> CanvasColors {
        let mut out = canvas.clone();
        if reverse {
            self.revert(&mut out);
        } else {
            self.apply(&mut out);
        }
        out
    }
}
