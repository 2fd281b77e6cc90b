use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bead::{Bead, BeadId};
use crate::error::CoreError;
use crate::fringe::{fringe_beads, FringeSettings, FRINGE_ID_BASE};
use crate::raw::generate_raw_beads;
use crate::stitch::{Rotation, StitchType};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Width of a bead relative to its height.
pub const BEAD_SIZE_RATIO: f64 = 0.82;
pub const BEAD_WIDTH: f64 = 2.0 * BEAD_SIZE_RATIO;
pub const BEAD_HEIGHT: f64 = 2.0;

pub const GRID_MIN_SIZE: usize = 5;
pub const GRID_MAX_SIZE: usize = 50;
pub const GRID_DEFAULT_SIZE: usize = 20;

/// Margin around the grid, in bead heights, when the canvas size is derived.
const CANVAS_MARGIN_BEADS: f64 = 1.0;

// ---------------------------------------------------------------------------
// Layout parameters
// ---------------------------------------------------------------------------

/// Everything the layout engine needs to place beads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub grid_size: usize,
    pub bead_height: f64,
    pub bead_width: f64,
    pub total_height: f64,
    pub total_width: f64,
    pub rotation: Rotation,
    pub stitch: StitchType,
}

impl LayoutParams {
    /// Standard bead dimensions on a square canvas with a one-bead margin.
    pub fn new(grid_size: usize, stitch: StitchType, rotation: Rotation) -> crate::Result<Self> {
        if !(GRID_MIN_SIZE..=GRID_MAX_SIZE).contains(&grid_size) {
            return Err(CoreError::InvalidGridSize(grid_size));
        }
        let side = (grid_size as f64 + 2.0 * CANVAS_MARGIN_BEADS) * BEAD_HEIGHT;
        Ok(Self {
            grid_size,
            bead_height: BEAD_HEIGHT,
            bead_width: BEAD_WIDTH,
            total_height: side,
            total_width: side,
            rotation,
            stitch,
        })
    }

    /// Replace the derived canvas size with explicit dimensions.
    pub fn with_canvas(self, total_width: f64, total_height: f64) -> crate::Result<Self> {
        for (name, v) in [("width", total_width), ("height", total_height)] {
            if v <= 0.0 || !v.is_finite() {
                return Err(CoreError::InvalidCanvas {
                    reason: format!("{name} must be positive and finite, got {v}"),
                });
            }
        }
        Ok(Self {
            total_width,
            total_height,
            ..self
        })
    }

    /// Generate the grid beads for these parameters.
    pub fn beads(&self) -> Vec<Bead> {
        compute_beads(
            self.grid_size,
            self.bead_height,
            self.bead_width,
            self.total_height,
            self.total_width,
            self.rotation,
            self.stitch,
        )
    }

    /// Number of grid beads these parameters produce.
    pub fn bead_count(&self) -> usize {
        match self.stitch {
            StitchType::Raw => 2 * self.grid_size * (self.grid_size + 1),
            _ => self.grid_size * self.grid_size,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Place every grid bead for the given stitch.
///
/// Returns `grid_size²` beads in row-major order (`id = i * grid_size + j`)
/// for all stitches except right-angle weave, whose count depends on how
/// many positions neighbouring units share.
pub fn compute_beads(
    grid_size: usize,
    bead_height: f64,
    bead_width: f64,
    total_height: f64,
    total_width: f64,
    rotation: Rotation,
    stitch: StitchType,
) -> Vec<Bead> {
    let (size, h, w, th, tw) = (grid_size, bead_height, bead_width, total_height, total_width);
    let beads = match stitch {
        StitchType::Square => generate_square_beads(size, h, w, th, tw, rotation),
        StitchType::Peyote => generate_peyote_beads(size, h, w, th, tw, rotation),
        StitchType::Brick => generate_brick_beads(size, h, w, th, tw, rotation),
        StitchType::Raw => generate_raw_beads(size, w, th, tw),
        StitchType::Offset => generate_offset_beads(size, h, w, th, tw, rotation),
    };
    debug!(
        %stitch,
        %rotation,
        grid_size,
        count = beads.len(),
        "Generated bead layout"
    );
    beads
}

/// Staggered coordinate shared by peyote, brick and offset: odd rows sit a
/// full bead down, even rows a bead and a half.
#[inline]
fn stagger(i: usize, j: usize, h: f64) -> f64 {
    if i % 2 == 1 {
        h * (j as f64 + 1.0)
    } else {
        h * (j as f64 + 1.5)
    }
}

/// Row-major grid traversal.
fn grid(size: usize, mut place: impl FnMut(usize, usize, usize) -> Bead) -> Vec<Bead> {
    let mut beads = Vec::with_capacity(size * size);
    for i in 0..size {
        for j in 0..size {
            beads.push(place(i * size + j, i, j));
        }
    }
    beads
}

// ---------------------------------------------------------------------------
// Square
// ---------------------------------------------------------------------------

/// Orthogonal grid centred in the canvas.
///
/// At 90°/270° the grid is laid out horizontally with the bead dimensions
/// as given. At 0°/180° it is transposed and the bead width and height swap.
pub fn generate_square_beads(
    size: usize,
    h: f64,
    w: f64,
    total_h: f64,
    total_w: f64,
    rotation: Rotation,
) -> Vec<Bead> {
    let grid_width = size as f64 * w;
    let grid_height = size as f64 * h;

    if rotation.is_horizontal() {
        let start_x = (total_w - grid_width) / 2.0;
        let start_y = (total_h - grid_height) / 2.0;
        grid(size, |id, i, j| {
            Bead::rect(id, start_x + w * j as f64, start_y + h * i as f64, w, h)
        })
    } else {
        let start_x = (total_w - grid_height) / 2.0;
        let start_y = (total_h - grid_width) / 2.0;
        grid(size, |id, i, j| {
            Bead::rect(id, start_x + h * i as f64, start_y + w * j as f64, h, w)
        })
    }
}

// ---------------------------------------------------------------------------
// Peyote / brick / offset
// ---------------------------------------------------------------------------

/// Peyote: staggered columns with vertical flow. Only 180° differs from the
/// default orientation.
pub fn generate_peyote_beads(
    size: usize,
    h: f64,
    w: f64,
    total_h: f64,
    total_w: f64,
    rotation: Rotation,
) -> Vec<Bead> {
    match rotation {
        Rotation::Deg180 => grid(size, |id, i, j| peyote_180(id, i, j, h, w, total_h, total_w)),
        _ => grid(size, |id, i, j| peyote_0(id, i, j, h, w)),
    }
}

/// Brick: staggered rows with horizontal flow. 90° has its own formula,
/// every other angle uses the 270° one.
pub fn generate_brick_beads(
    size: usize,
    h: f64,
    w: f64,
    total_h: f64,
    total_w: f64,
    rotation: Rotation,
) -> Vec<Bead> {
    match rotation {
        Rotation::Deg90 => grid(size, |id, i, j| brick_90(id, i, j, h, w, total_h)),
        _ => grid(size, |id, i, j| brick_270(id, i, j, h, w, total_w, h, w)),
    }
}

/// Legacy layout from before peyote and brick were separate stitches.
///
/// Saved patterns depend on these exact positions, including the 270° case
/// keeping the unswapped bead dimensions.
pub fn generate_offset_beads(
    size: usize,
    h: f64,
    w: f64,
    total_h: f64,
    total_w: f64,
    rotation: Rotation,
) -> Vec<Bead> {
    match rotation {
        Rotation::Deg90 => grid(size, |id, i, j| brick_90(id, i, j, h, w, total_h)),
        Rotation::Deg180 => grid(size, |id, i, j| peyote_180(id, i, j, h, w, total_h, total_w)),
        Rotation::Deg270 => grid(size, |id, i, j| brick_270(id, i, j, h, w, total_w, w, h)),
        Rotation::Deg0 => grid(size, |id, i, j| peyote_0(id, i, j, h, w)),
    }
}

#[inline]
fn peyote_0(id: usize, i: usize, j: usize, h: f64, w: f64) -> Bead {
    Bead::rect(id, w * (i as f64 + 1.5) + 2.0, stagger(i, j, h), w, h)
}

#[inline]
fn peyote_180(id: usize, i: usize, j: usize, h: f64, w: f64, total_h: f64, total_w: f64) -> Bead {
    Bead::rect(
        id,
        total_w - w * (i as f64 + 1.5) - 6.0,
        total_h - stagger(i, j, h) + 1.0,
        w,
        h,
    )
}

#[inline]
fn brick_90(id: usize, i: usize, j: usize, h: f64, w: f64, total_h: f64) -> Bead {
    Bead::rect(
        id,
        total_h - stagger(i, j, h),
        w * (i as f64 + 1.5) + 3.0,
        h,
        w,
    )
}

#[allow(clippy::too_many_arguments)]
#[inline]
fn brick_270(
    id: usize,
    i: usize,
    j: usize,
    h: f64,
    w: f64,
    total_w: f64,
    width: f64,
    height: f64,
) -> Bead {
    // The -2 nudge only applies to even rows.
    let x = if i % 2 == 1 {
        h * (j as f64 + 1.0)
    } else {
        h * (j as f64 + 1.5) - 2.0
    };
    Bead::rect(id, x, total_w - (w * (i as f64 + 1.5) + 3.0) - 2.0, width, height)
}

// ---------------------------------------------------------------------------
// Canvas offsets and bounds
// ---------------------------------------------------------------------------

/// Fixed nudge the staggered layouts bake into their coordinates, for hosts
/// computing a view box.
pub fn canvas_offset(stitch: StitchType, rotation: Rotation) -> (f64, f64) {
    match (stitch, rotation) {
        (StitchType::Peyote, Rotation::Deg180) => (-6.0, 1.0),
        (StitchType::Peyote, _) => (2.0, 0.0),
        (StitchType::Brick, Rotation::Deg90) => (0.0, 3.0),
        (StitchType::Brick, _) => (-2.0, -2.0),
        (StitchType::Offset, Rotation::Deg90) => (0.0, 3.0),
        (StitchType::Offset, Rotation::Deg180) => (-6.0, 1.0),
        (StitchType::Offset, Rotation::Deg270) => (-2.0, -2.0),
        (StitchType::Offset, Rotation::Deg0) => (2.0, 0.0),
        (StitchType::Square | StitchType::Raw, _) => (0.0, 0.0),
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Smallest box containing every bead, or `None` for an empty set.
    pub fn of<'a>(beads: impl IntoIterator<Item = &'a Bead>) -> Option<Self> {
        beads.into_iter().fold(None, |acc, b| {
            let (x1, y1) = (b.x + b.width, b.y + b.height);
            Some(match acc {
                None => Self {
                    min_x: b.x,
                    min_y: b.y,
                    max_x: x1,
                    max_y: y1,
                },
                Some(r) => Self {
                    min_x: r.min_x.min(b.x),
                    min_y: r.min_y.min(b.y),
                    max_x: r.max_x.max(x1),
                    max_y: r.max_y.max(y1),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// The static geometry for one configuration: grid beads plus fringe.
///
/// Painting never changes the layout; it is rebuilt only when the
/// configuration changes.
#[derive(Debug, Clone)]
pub struct Layout {
    params: LayoutParams,
    beads: Vec<Bead>,
    fringe: Vec<Bead>,
}

impl Layout {
    /// Generate grid beads and, for brick stitch, the fringe.
    pub fn build(params: LayoutParams, fringe: FringeSettings) -> Self {
        let beads = params.beads();
        let fringe = if params.stitch == StitchType::Brick {
            fringe_beads(
                fringe.visible,
                fringe.length,
                &beads,
                params.grid_size,
                params.bead_height,
                params.bead_width,
            )
        } else {
            Vec::new()
        };
        Self {
            params,
            beads,
            fringe,
        }
    }

    pub fn params(&self) -> &LayoutParams {
        &self.params
    }

    pub fn beads(&self) -> &[Bead] {
        &self.beads
    }

    pub fn fringe(&self) -> &[Bead] {
        &self.fringe
    }

    /// Grid beads followed by fringe beads.
    pub fn all_beads(&self) -> impl Iterator<Item = &Bead> {
        self.beads.iter().chain(self.fringe.iter())
    }

    /// Look up a bead by id. Preview ids never resolve.
    pub fn bead(&self, id: BeadId) -> Option<&Bead> {
        // Grid and fringe beads are stored in id order.
        let found = match id {
            BeadId::Grid(n) => self.beads.get(n),
            BeadId::Fringe(n) => n
                .checked_sub(FRINGE_ID_BASE)
                .and_then(|k| self.fringe.get(k)),
            BeadId::Preview(_) => None,
        };
        found.filter(|b| b.id == id)
    }

    pub fn contains(&self, id: BeadId) -> bool {
        self.bead(id).is_some()
    }

    /// Bounding box of every bead, fringe included.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of(self.all_beads())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-10;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn beads(size: usize, angle: i32, stitch: StitchType) -> Vec<Bead> {
        let rotation = Rotation::from_degrees(angle).unwrap();
        compute_beads(size, BEAD_HEIGHT, BEAD_WIDTH, 100.0, 100.0, rotation, stitch)
    }

    #[test]
    fn square_vertical_orientation() {
        let b = compute_beads(2, 2.0, 1.64, 100.0, 100.0, Rotation::Deg0, StitchType::Square);
        assert_eq!(b.len(), 4);
        // startX = (100 - 2*2) / 2, startY = (100 - 2*1.64) / 2
        let (start_x, start_y) = (48.0, 48.36);
        for bead in &b {
            let id = bead.id.grid_index().unwrap();
            let (i, j) = ((id / 2) as f64, (id % 2) as f64);
            assert!(close(bead.x, start_x + 2.0 * i));
            assert!(close(bead.y, start_y + 1.64 * j));
            assert!(close(bead.width, 2.0));
            assert!(close(bead.height, 1.64));
        }
    }

    #[test]
    fn square_horizontal_orientation() {
        let b = compute_beads(2, 2.0, 1.64, 100.0, 100.0, Rotation::Deg90, StitchType::Square);
        let start_x = (100.0 - 2.0 * 1.64) / 2.0;
        let start_y = (100.0 - 2.0 * 2.0) / 2.0;
        // id 1 is row 0, col 1
        assert!(close(b[1].x, start_x + 1.64));
        assert!(close(b[1].y, start_y));
        assert!(close(b[1].width, 1.64));
        assert!(close(b[1].height, 2.0));
        // id 2 is row 1, col 0
        assert!(close(b[2].x, start_x));
        assert!(close(b[2].y, start_y + 2.0));
    }

    #[test]
    fn square_grid_is_centred() {
        for angle in [0, 90, 180, 270] {
            let b = beads(10, angle, StitchType::Square);
            let bounds = Bounds::of(&b).unwrap();
            assert!(close(bounds.min_x, 100.0 - bounds.max_x), "angle {angle}");
            assert!(close(bounds.min_y, 100.0 - bounds.max_y), "angle {angle}");
        }
    }

    #[test]
    fn peyote_default_formula() {
        let (h, w) = (BEAD_HEIGHT, BEAD_WIDTH);
        let b = beads(5, 0, StitchType::Peyote);
        // row 1 (odd), col 2
        let bead = b[5 + 2];
        assert!(close(bead.x, w * 2.5 + 2.0));
        assert!(close(bead.y, h * 3.0));
        // row 2 (even), col 2
        let bead = b[10 + 2];
        assert!(close(bead.x, w * 3.5 + 2.0));
        assert!(close(bead.y, h * 3.5));
        assert!(close(bead.width, w));
        assert!(close(bead.height, h));
    }

    #[test]
    fn peyote_180_mirrors() {
        let (h, w) = (BEAD_HEIGHT, BEAD_WIDTH);
        let b = beads(5, 180, StitchType::Peyote);
        let bead = b[0];
        assert!(close(bead.x, 100.0 - w * 1.5 - 6.0));
        assert!(close(bead.y, 100.0 - h * 1.5 + 1.0));
        let bead = b[6];
        assert!(close(bead.x, 100.0 - w * 2.5 - 6.0));
        assert!(close(bead.y, 100.0 - h * 2.0 + 1.0));
    }

    #[test]
    fn peyote_other_angles_use_default() {
        assert_eq!(beads(6, 90, StitchType::Peyote), beads(6, 0, StitchType::Peyote));
        assert_eq!(beads(6, 270, StitchType::Peyote), beads(6, 0, StitchType::Peyote));
    }

    #[test]
    fn brick_90_formula() {
        let (h, w) = (BEAD_HEIGHT, BEAD_WIDTH);
        let b = beads(5, 90, StitchType::Brick);
        let bead = b[5 + 3];
        assert!(close(bead.x, 100.0 - h * 4.0));
        assert!(close(bead.y, w * 2.5 + 3.0));
        assert!(close(bead.width, h));
        assert!(close(bead.height, w));
    }

    #[test]
    fn brick_270_nudges_even_rows_only() {
        let (h, w) = (BEAD_HEIGHT, BEAD_WIDTH);
        let b = beads(5, 270, StitchType::Brick);
        // even row 0, col 1
        assert!(close(b[1].x, h * 2.5 - 2.0));
        assert!(close(b[1].y, 100.0 - (w * 1.5 + 3.0) - 2.0));
        // odd row 1, col 1
        assert!(close(b[6].x, h * 2.0));
        assert!(close(b[6].y, 100.0 - (w * 2.5 + 3.0) - 2.0));
        assert!(close(b[6].width, h));
        assert!(close(b[6].height, w));
    }

    #[test]
    fn brick_non_90_angles_match_270() {
        assert_eq!(beads(7, 0, StitchType::Brick), beads(7, 270, StitchType::Brick));
        assert_eq!(beads(7, 180, StitchType::Brick), beads(7, 270, StitchType::Brick));
    }

    #[test]
    fn offset_matches_split_stitches() {
        assert_eq!(beads(6, 0, StitchType::Offset), beads(6, 0, StitchType::Peyote));
        assert_eq!(beads(6, 180, StitchType::Offset), beads(6, 180, StitchType::Peyote));
        assert_eq!(beads(6, 90, StitchType::Offset), beads(6, 90, StitchType::Brick));
    }

    #[test]
    fn offset_270_keeps_unswapped_dimensions() {
        let offset = beads(6, 270, StitchType::Offset);
        let brick = beads(6, 270, StitchType::Brick);
        for (o, b) in offset.iter().zip(&brick) {
            assert!(close(o.x, b.x));
            assert!(close(o.y, b.y));
            assert!(close(o.width, BEAD_WIDTH));
            assert!(close(o.height, BEAD_HEIGHT));
        }
    }

    #[test]
    fn params_validate_grid_size() {
        assert!(LayoutParams::new(4, StitchType::Square, Rotation::Deg0).is_err());
        assert!(LayoutParams::new(51, StitchType::Square, Rotation::Deg0).is_err());
        let p = LayoutParams::new(5, StitchType::Square, Rotation::Deg0).unwrap();
        assert!(close(p.total_width, 14.0));
        assert_eq!(p.beads().len(), p.bead_count());
    }

    #[test]
    fn params_validate_canvas() {
        let p = LayoutParams::new(10, StitchType::Brick, Rotation::Deg90).unwrap();
        assert!(p.with_canvas(0.0, 10.0).is_err());
        assert!(p.with_canvas(10.0, f64::NAN).is_err());
        let p = p.with_canvas(120.0, 80.0).unwrap();
        assert!(close(p.total_width, 120.0));
        assert!(close(p.total_height, 80.0));
    }

    #[test]
    fn raw_bead_count_prediction() {
        let p = LayoutParams::new(7, StitchType::Raw, Rotation::Deg0).unwrap();
        assert_eq!(p.beads().len(), p.bead_count());
    }

    #[test]
    fn canvas_offsets() {
        assert_eq!(canvas_offset(StitchType::Peyote, Rotation::Deg180), (-6.0, 1.0));
        assert_eq!(canvas_offset(StitchType::Peyote, Rotation::Deg90), (2.0, 0.0));
        assert_eq!(canvas_offset(StitchType::Brick, Rotation::Deg0), (-2.0, -2.0));
        assert_eq!(canvas_offset(StitchType::Offset, Rotation::Deg90), (0.0, 3.0));
        assert_eq!(canvas_offset(StitchType::Square, Rotation::Deg270), (0.0, 0.0));
    }

    #[test]
    fn layout_lookup_by_id() {
        let p = LayoutParams::new(5, StitchType::Brick, Rotation::Deg90).unwrap();
        let layout = Layout::build(p, FringeSettings { visible: true, length: 2 });
        assert_eq!(layout.fringe().len(), 10);
        assert_eq!(layout.bead(BeadId::Grid(7)).unwrap().id, BeadId::Grid(7));
        assert!(layout.bead(BeadId::Grid(25)).is_none());
        let f = layout.bead(BeadId::Fringe(10003)).unwrap();
        assert_eq!(f.id, BeadId::Fringe(10003));
        assert!(layout.bead(BeadId::Fringe(3)).is_none());
        assert!(layout.bead(BeadId::Preview(7)).is_none());
        assert_eq!(layout.all_beads().count(), 35);
    }

    #[test]
    fn fringe_only_for_brick() {
        let fringe = FringeSettings { visible: true, length: 3 };
        for stitch in [StitchType::Square, StitchType::Peyote, StitchType::Offset, StitchType::Raw] {
            let p = LayoutParams::new(5, stitch, Rotation::Deg0).unwrap();
            assert!(Layout::build(p, fringe).fringe().is_empty(), "{stitch}");
        }
    }

    #[test]
    fn bounds_include_fringe() {
        let p = LayoutParams::new(5, StitchType::Brick, Rotation::Deg90).unwrap();
        let plain = Layout::build(p, FringeSettings::default()).bounds().unwrap();
        let fringed = Layout::build(p, FringeSettings { visible: true, length: 4 })
            .bounds()
            .unwrap();
        assert!(fringed.max_y > plain.max_y);
        assert!(fringed.height() > plain.height());
    }
}
