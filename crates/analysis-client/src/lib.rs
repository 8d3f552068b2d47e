//! Client for the DocIQ analysis backend.
//!
//! Network failures are decoded once, here, into [`ApiError`]; callers never
//! inspect HTTP responses themselves.

pub mod client;
pub mod config;
pub mod error;
pub mod upload;

pub use client::{AnalysisApi, HttpAnalysisClient};
pub use config::ClientConfig;
pub use error::ApiError;
pub use upload::{DocumentKind, UploadFile, MAX_UPLOAD_BYTES};
