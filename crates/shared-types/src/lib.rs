pub mod timestamp;
pub mod types;

pub use types::{
    AnalysisResult, DocumentRecord, DocumentSummary, DocumentUpdate, Risk, Severity,
    SeverityParseError,
};
