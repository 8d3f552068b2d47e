//! Review session state for a single analysed document.
//!
//! A [`ReviewSession`] owns the original and edited text, the reported risks,
//! the current selection and the highlight segments derived from them. Timers
//! (analysis progress, toast dismissal) run as Tokio tasks owned by the
//! session and are torn down with it.

pub mod analysis;
pub mod error;
pub mod notify;
pub mod progress;
pub mod segments;
pub mod selection;
pub mod session;
pub mod surface;

pub use analysis::{AnalysisGate, AnalysisRun};
pub use error::SessionError;
pub use notify::{Notifications, Toast, TOAST_DURATION};
pub use progress::{estimate_for_file, estimate_for_text, format_elapsed, ProgressTicker};
pub use segments::SegmentCache;
pub use selection::{Selection, SelectionChange, SelectionStore};
pub use session::{Document, ReviewSession, REPLACED_MESSAGE};
pub use surface::{RevealTarget, ScrollSurface, SurfaceKind, SurfaceRegistry};
