use serde::{Deserialize, Serialize};

pub const ZOOM_MIN: f64 = 0.2;
pub const ZOOM_MAX: f64 = 5.0;
/// Multiplicative zoom step per zoom-in / zoom-out.
pub const ZOOM_STEP: f64 = 1.2;

/// What a pointer press on a bead does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMode {
    #[default]
    Paint,
    Eraser,
    Selection,
    /// Grid editing: pointer input adjusts the view, not the beads.
    Grid,
}

/// Whether the host is still collecting configuration or the user is painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppStep {
    #[default]
    Configuring,
    Painting,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanOffset {
    pub x: f64,
    pub y: f64,
}

/// Presentation state that does not affect the pattern itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    zoom: f64,
    pub pan: PanOffset,
    pub panning: bool,
    pub grid_visible: bool,
    pub legend_visible: bool,
    pub row_numbers_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: PanOffset::default(),
            panning: false,
            grid_visible: true,
            legend_visible: true,
            row_numbers_visible: false,
        }
    }
}

impl ViewState {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(ZOOM_MIN);
    }

    /// Set the zoom level, clamped to `[ZOOM_MIN, ZOOM_MAX]`. Non-finite
    /// values are ignored.
    pub fn set_zoom(&mut self, level: f64) {
        if level.is_finite() {
            self.zoom = level.clamp(ZOOM_MIN, ZOOM_MAX);
        }
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan.x += dx;
        self.pan.y += dy;
    }

    /// Back to 100 % zoom, centred, keeping visibility toggles.
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan = PanOffset::default();
        self.panning = false;
    }
}
