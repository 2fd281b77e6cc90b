//! Editor configuration: what the host hands over when it mounts an editor.
//!
//! Accepted either as JSON or as the data attributes of the container
//! element (`data-grid-size="30"`, `data-stitch-type="brick"`, …).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use beadweave_core::layout::GRID_DEFAULT_SIZE;
use beadweave_core::{FringeSettings, LayoutParams, Rotation, StitchType};

// ---------------------------------------------------------------------------
// Canvas size
// ---------------------------------------------------------------------------

/// Explicit canvas dimensions, overriding the size derived from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

// ---------------------------------------------------------------------------
// EditorConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default = "default_grid_size", alias = "gridSize")]
    pub grid_size: usize,
    #[serde(default, alias = "stitch_type", alias = "stitchType")]
    pub stitch: StitchType,
    #[serde(
        default = "default_rotation",
        alias = "layout_rotation",
        alias = "layoutRotation"
    )]
    pub rotation: Rotation,
    #[serde(default)]
    pub fringe: FringeSettings,
    /// Number shown on the centre row of a peyote pattern.
    #[serde(default, alias = "peyoteStartingRow")]
    pub peyote_starting_row: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasSize>,
}

fn default_grid_size() -> usize {
    GRID_DEFAULT_SIZE
}
fn default_rotation() -> Rotation {
    Rotation::Deg90
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            stitch: StitchType::default(),
            rotation: default_rotation(),
            fringe: FringeSettings::default(),
            peyote_starting_row: 0,
            canvas: None,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read configuration from a container element's data attributes.
    ///
    /// Keys may be written as `data-grid-size`, `grid-size`, `gridSize` or
    /// `grid_size`. Values that fail to parse are logged and replaced by the
    /// default, so a half-broken embed still mounts; the result is then
    /// validated as a whole.
    pub fn from_data_attributes<'a>(
        attrs: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> crate::Result<Self> {
        let mut config = Self::default();
        for (key, value) in attrs {
            let value = value.trim();
            match normalize_key(key).as_str() {
                "gridsize" => config.grid_size = parse_or(key, value, config.grid_size),
                "stitchtype" | "stitch" => config.stitch = StitchType::from_name(value),
                "layoutrotation" | "rotation" => {
                    let degrees = parse_or(key, value, config.rotation.degrees());
                    match Rotation::from_degrees(degrees) {
                        Ok(r) => config.rotation = r,
                        Err(e) => warn!("Ignoring {key}: {e}"),
                    }
                }
                "fringevisible" => config.fringe.visible = parse_or(key, value, config.fringe.visible),
                "fringelength" => config.fringe.length = parse_or(key, value, config.fringe.length),
                "peyotestartingrow" => {
                    config.peyote_starting_row = parse_or(key, value, config.peyote_starting_row)
                }
                _ => debug!("Ignoring unknown data attribute {key}"),
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the host-supplied values the core relies on.
    pub fn validate(&self) -> crate::Result<()> {
        self.layout_params()?;
        FringeSettings::new(self.fringe.visible, self.fringe.length)?;
        Ok(())
    }

    /// Layout parameters for this configuration.
    pub fn layout_params(&self) -> crate::Result<LayoutParams> {
        let params = LayoutParams::new(self.grid_size, self.stitch, self.rotation)?;
        Ok(match self.canvas {
            Some(size) => params.with_canvas(size.width, size.height)?,
            None => params,
        })
    }
}

/// `data-grid-size`, `gridSize` and `grid_size` all become `gridsize`.
fn normalize_key(key: &str) -> String {
    let key = key.strip_prefix("data-").unwrap_or(key);
    key.chars()
        .filter(|c| *c != '-' && *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn parse_or<T: std::str::FromStr>(key: &str, value: &str, fallback: T) -> T {
    match value.parse() {
        Ok(v) => v,
        Err(_) => {
            warn!("Could not parse {key}={value:?}, using default");
            fallback
        }
    }
}
