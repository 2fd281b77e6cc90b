use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

const FRINGE_PREFIX: &str = "fringe_";
const PREVIEW_PREFIX: &str = "preview_";

/// Identifier of a single bead.
///
/// Grid beads are numbered row-major (`row * grid_size + col`), except in
/// right-angle weave where ids are sequential in first-encounter order.
/// Fringe and preview beads live in their own namespaces so they can never
/// collide with grid ids.
///
/// The string form (`"42"`, `"fringe_10000"`, `"preview_7"`) is used for
/// display and serialization, so color maps keyed by `BeadId` serialize as
/// plain JSON objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BeadId {
    Grid(usize),
    Fringe(usize),
    /// Ghost of the grid bead with the given id, drawn at its move destination.
    Preview(usize),
}

impl BeadId {
    /// The row-major grid index, if this is a grid bead.
    #[inline]
    pub fn grid_index(self) -> Option<usize> {
        match self {
            Self::Grid(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_fringe(self) -> bool {
        matches!(self, Self::Fringe(_))
    }
}

impl From<usize> for BeadId {
    fn from(id: usize) -> Self {
        Self::Grid(id)
    }
}

impl fmt::Display for BeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(id) => write!(f, "{id}"),
            Self::Fringe(id) => write!(f, "{FRINGE_PREFIX}{id}"),
            Self::Preview(id) => write!(f, "{PREVIEW_PREFIX}{id}"),
        }
    }
}

impl FromStr for BeadId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |digits: &str| {
            digits
                .parse::<usize>()
                .map_err(|_| CoreError::InvalidBeadId(s.to_owned()))
        };
        if let Some(rest) = s.strip_prefix(FRINGE_PREFIX) {
            parse(rest).map(Self::Fringe)
        } else if let Some(rest) = s.strip_prefix(PREVIEW_PREFIX) {
            parse(rest).map(Self::Preview)
        } else {
            parse(s).map(Self::Grid)
        }
    }
}

impl Serialize for BeadId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BeadId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// How a bead is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeadShape {
    #[default]
    Rect,
    Circle,
}

/// Link from a fringe bead back to the bottom-row bead it hangs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FringeLink {
    pub parent: BeadId,
    /// Position along the strand, 0 = closest to the parent.
    pub index: usize,
}

/// Screen geometry of one bead.
///
/// Beads are immutable for a given configuration and are regenerated
/// wholesale when the grid size, stitch or rotation changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bead {
    pub id: BeadId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub shape: BeadShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fringe: Option<FringeLink>,
}

impl Bead {
    /// A rectangular grid bead.
    pub fn rect(id: usize, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: BeadId::Grid(id),
            x,
            y,
            width,
            height,
            shape: BeadShape::Rect,
            fringe: None,
        }
    }

    pub fn is_fringe(&self) -> bool {
        self.fringe.is_some()
    }

    /// Centre point `(x, y)`.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The same geometry under a different id.
    pub fn with_id(self, id: BeadId) -> Self {
        Self { id, ..self }
    }
}
