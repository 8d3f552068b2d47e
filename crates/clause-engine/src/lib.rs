//! Client-side clause reconciliation for analysed documents.
//!
//! The backend reports risky clauses as literal excerpts rather than offsets.
//! [`locator`] maps those excerpts back onto the document text as a
//! partition of highlight segments, and [`substitution`] writes rewrites
//! back into an editable buffer. Both are pure and synchronous.

pub mod locator;
pub mod preview;
pub mod substitution;
pub mod suggestions;

pub use locator::{locate, Segment};
pub use preview::{clause_preview, SeverityCounts};
pub use substitution::{locate_in_buffer, replace, try_replace, ClauseLocation};
pub use suggestions::{suggestions_for, Suggestion, SuggestionKind, FALLBACK_REWRITE};
