pub mod config;
pub mod error;
pub mod events;
pub mod selection;
pub mod session;
pub mod view;

pub use config::{CanvasSize, EditorConfig};
pub use error::EditorError;
pub use events::{EventKind, HistoryStatus, SessionEvent, SubscriptionId};
pub use selection::Selection;
pub use session::EditorSession;
pub use view::{AppStep, PanOffset, ToolMode, ViewState};

/// Convenience result type for the editor crate.
pub type Result<T> = std::result::Result<T, EditorError>;
