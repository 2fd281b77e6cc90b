pub mod bead;
pub mod canvas;
pub mod delta;
pub mod error;
pub mod fringe;
pub mod history;
pub mod layout;
pub mod legend;
pub mod palette;
pub mod position;
pub mod raw;
pub mod rows;
pub mod stitch;

// Re-export primary types for convenience.
pub use bead::{Bead, BeadId, BeadShape, FringeLink};
pub use canvas::{CanvasColors, ColorId};
pub use delta::{ColorChange, Delta, RemovedBead};
pub use error::CoreError;
pub use fringe::{fringe_beads, FringeSettings};
pub use history::{History, MAX_HISTORY};
pub use layout::{compute_beads, Bounds, Layout, LayoutParams};
pub use legend::{compute_legend, LegendEntry};
pub use palette::{Palette, PaletteColor};
pub use position::{apply_move, id_of, move_destination, position_of, preview_beads, GridPosition, MoveOffset};
pub use rows::{peyote_row_labels, peyote_row_number, RowLabel};
pub use stitch::{Rotation, StitchType};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
