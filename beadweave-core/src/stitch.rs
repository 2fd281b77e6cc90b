use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// The geometric family governing a bead layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StitchType {
    Square,
    #[default]
    Peyote,
    Brick,
    /// Right-angle weave.
    Raw,
    /// Legacy combined peyote/brick layout, also the fallback for unknown names.
    Offset,
}

impl StitchType {
    pub const ALL: [StitchType; 5] = [
        Self::Square,
        Self::Peyote,
        Self::Brick,
        Self::Raw,
        Self::Offset,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Peyote => "peyote",
            Self::Brick => "brick",
            Self::Raw => "raw",
            Self::Offset => "offset",
        }
    }

    /// Parse a stitch name. Unknown names map to [`StitchType::Offset`] so
    /// that configurations saved before peyote and brick were split keep
    /// their layout.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "square" => Self::Square,
            "peyote" => Self::Peyote,
            "brick" => Self::Brick,
            "raw" => Self::Raw,
            _ => Self::Offset,
        }
    }

    /// Whether grid ids are row-major, so position arithmetic applies.
    pub fn is_row_major(self) -> bool {
        !matches!(self, Self::Raw)
    }
}

impl fmt::Display for StitchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StitchType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl<'de> Deserialize<'de> for StitchType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name(&raw))
    }
}

/// Layout rotation in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: i32) -> crate::Result<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(CoreError::InvalidRotation(degrees)),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// 90° and 270° lay the grid out horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl TryFrom<i32> for Rotation {
    type Error = CoreError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}
