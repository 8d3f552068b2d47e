use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Unsupported document format")]
    UnsupportedFormat,

    #[error("No text to analyze")]
    EmptyText,

    #[error("Request failed with status {status}")]
    Failed { status: u16, detail: Option<String> },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Decode a non-success response.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            413 => ApiError::PayloadTooLarge,
            422 => ApiError::UnsupportedFormat,
            _ => ApiError::Failed {
                status,
                detail: detail_from_body(body),
            },
        }
    }

    /// Message suitable for showing to the reviewer.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => {
                "Authentication required. Please log in to analyze documents.".to_string()
            }
            ApiError::PayloadTooLarge => {
                "File too large. Please upload a file smaller than 10MB.".to_string()
            }
            ApiError::UnsupportedFormat => {
                "Invalid file format. Please upload a PDF, DOCX, or TXT file.".to_string()
            }
            ApiError::EmptyText => "Please enter some text to analyze".to_string(),
            ApiError::Failed {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Io(e) => format!("Could not read the document: {}", e),
            ApiError::Config(msg) => format!("Client misconfigured: {}", msg),
            ApiError::Failed { detail: None, .. }
            | ApiError::Transport(_)
            | ApiError::Decode(_) => "Failed to analyze document. Please try again.".to_string(),
        }
    }
}

/// FastAPI-style `{"detail": "..."}` bodies. Structured details are ignored.
fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .filter(|detail| !detail.is_empty())
        .map(str::to_string)
}
