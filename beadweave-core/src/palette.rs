use serde::{Deserialize, Serialize};

use crate::canvas::ColorId;

/// Symbols assigned to palette entries by index, for printed charts.
pub const SYMBOL_POOL: [char; 51] = [
    '▲', '▼', '♥', '♦', '■', '●', '★', '◆', '▲', '▼', //
    '◄', '►', '◊', '○', '□', '△', '▽', '◈', '◉', '◐', //
    '◑', '◒', '◓', '◔', '◕', '◖', '◗', '◘', '◙', '◚', //
    '◛', '◜', '◝', '◞', '◟', '◠', '◡', '◢', '◣', '◤', //
    '◥', '◦', '◧', '◨', '◩', '◪', '◫', '◬', '◭', '◮', //
    '◯',
];

/// Default palette as `(hue, saturation %, lightness %)`. Entries past the
/// first five start out white for the user to fill in.
const DEFAULT_HSL: [(u16, u8, u8); 12] = [
    (175, 65, 35),
    (150, 74, 72),
    (50, 91, 70),
    (11, 100, 85),
    (16, 95, 65),
    (0, 100, 100),
    (0, 100, 100),
    (0, 100, 100),
    (0, 100, 100),
    (0, 100, 100),
    (0, 100, 100),
    (0, 100, 100),
];

/// One palette color. `s` and `l` are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    pub h: u16,
    pub s: u8,
    pub l: u8,
    pub id: ColorId,
    pub symbol: char,
}

impl PaletteColor {
    /// CSS `hsl()` notation.
    pub fn to_css(&self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }

    /// Opaque RGBA for raster hosts.
    pub fn to_rgba(&self) -> [u8; 4] {
        let h = f64::from(self.h % 360) / 360.0;
        let s = f64::from(self.s.min(100)) / 100.0;
        let l = f64::from(self.l.min(100)) / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return [v, v, v, 255];
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |t: f64| (hue_to_rgb(p, q, t) * 255.0).round() as u8;
        [
            channel(h + 1.0 / 3.0),
            channel(h),
            channel(h - 1.0 / 3.0),
            255,
        ]
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Fixed-size, index-addressable color palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: Vec<PaletteColor>,
}

impl Palette {
    /// Build a palette from HSL triples. Ids follow position and symbols come
    /// from [`SYMBOL_POOL`], wrapping if the palette is larger than the pool.
    pub fn from_hsl(hsl: impl IntoIterator<Item = (u16, u8, u8)>) -> Self {
        let colors = hsl
            .into_iter()
            .enumerate()
            .map(|(id, (h, s, l))| PaletteColor {
                h,
                s,
                l,
                id,
                symbol: SYMBOL_POOL[id % SYMBOL_POOL.len()],
            })
            .collect();
        Self { colors }
    }

    #[inline]
    pub fn get(&self, id: ColorId) -> Option<&PaletteColor> {
        self.colors.get(id)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteColor> {
        self.colors.iter()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_hsl(DEFAULT_HSL)
    }
}
