use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("An analysis is already in progress")]
    AnalysisInFlight,

    #[error("No document is loaded")]
    NoDocument,

    #[error("Risk index {index} out of range ({len} risks)")]
    RiskOutOfRange { index: usize, len: usize },
}
