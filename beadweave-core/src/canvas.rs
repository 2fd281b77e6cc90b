use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bead::BeadId;

/// Index into the color palette.
pub type ColorId = usize;

/// Sparse map from bead to palette color. Absent beads are unpainted.
///
/// Iteration is ordered by bead id, so diffs, legends and serialized output
/// are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanvasColors(BTreeMap<BeadId, ColorId>);

impl CanvasColors {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, id: BeadId) -> Option<ColorId> {
        self.0.get(&id).copied()
    }

    #[inline]
    pub fn contains(&self, id: BeadId) -> bool {
        self.0.contains_key(&id)
    }

    /// Paint a bead, returning its previous color.
    pub fn set(&mut self, id: BeadId, color: ColorId) -> Option<ColorId> {
        self.0.insert(id, color)
    }

    /// Erase a bead, returning its previous color.
    pub fn remove(&mut self, id: BeadId) -> Option<ColorId> {
        self.0.remove(&id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BeadId, ColorId)> + '_ {
        self.0.iter().map(|(&id, &color)| (id, color))
    }

    pub fn ids(&self) -> impl Iterator<Item = BeadId> + '_ {
        self.0.keys().copied()
    }

    pub fn colors(&self) -> impl Iterator<Item = ColorId> + '_ {
        self.0.values().copied()
    }
}

impl FromIterator<(BeadId, ColorId)> for CanvasColors {
    fn from_iter<I: IntoIterator<Item = (BeadId, ColorId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<(BeadId, ColorId)> for CanvasColors {
    fn extend<I: IntoIterator<Item = (BeadId, ColorId)>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for CanvasColors {
    type Item = (BeadId, ColorId);
    type IntoIter = btree_map::IntoIter<BeadId, ColorId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
