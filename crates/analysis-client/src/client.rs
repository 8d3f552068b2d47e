//! HTTP access to the analysis and document history endpoints.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::upload::UploadFile;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared_types::{AnalysisResult, DocumentRecord, DocumentSummary, DocumentUpdate};
use std::time::Duration;

const ANALYZE_DOCUMENT: &str = "/api/analyze-document";
const ANALYZE_DOCUMENT_DEMO: &str = "/api/demo/analyze-document";
const ANALYZE_TEXT: &str = "/api/analyze-text";
const ANALYZE_TEXT_DEMO: &str = "/api/demo/analyze-text";
const DOCUMENTS: &str = "/api/documents";

/// Operations the review front-end needs from the backend.
#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn analyze_document(&self, file: &UploadFile) -> Result<AnalysisResult, ApiError>;

    async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, ApiError>;

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, ApiError>;

    async fn get_document(&self, id: i64) -> Result<DocumentRecord, ApiError>;

    async fn update_document(&self, id: i64, edited_text: &str) -> Result<(), ApiError>;
}

pub struct HttpAnalysisClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpAnalysisClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("invalid base_url {:?}: {}", config.base_url, e)))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.config.endpoint(path));
        match &self.config.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// POST an analysis form, retrying once on the demo endpoint after a 401.
    async fn submit<F>(&self, path: &str, demo_path: &str, form: F) -> Result<AnalysisResult, ApiError>
    where
        F: Fn() -> Result<Form, ApiError> + Send + Sync,
    {
        tracing::info!(path, "submitting analysis");
        match self.post_form(path, form()?).await {
            Err(ApiError::Unauthorized) if self.config.demo_fallback => {
                tracing::warn!(path = demo_path, "not authorized, retrying on demo endpoint");
                self.post_form(demo_path, form()?).await
            }
            other => other,
        }
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<AnalysisResult, ApiError> {
        let response = self.request(Method::POST, path).multipart(form).send().await?;
        decode(response).await
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn analyze_document(&self, file: &UploadFile) -> Result<AnalysisResult, ApiError> {
        self.submit(ANALYZE_DOCUMENT, ANALYZE_DOCUMENT_DEMO, || {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.filename.clone())
                .mime_str(file.kind.mime())?;
            Ok(Form::new().part("file", part))
        })
        .await
    }

    async fn analyze_text(&self, text: &str) -> Result<AnalysisResult, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::EmptyText);
        }
        self.submit(ANALYZE_TEXT, ANALYZE_TEXT_DEMO, || {
            Ok(Form::new().text("text", text.to_string()))
        })
        .await
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, ApiError> {
        let response = self.request(Method::GET, DOCUMENTS).send().await?;
        decode(response).await
    }

    async fn get_document(&self, id: i64) -> Result<DocumentRecord, ApiError> {
        let path = format!("{}/{}", DOCUMENTS, id);
        let response = self.request(Method::GET, &path).send().await?;
        decode(response).await
    }

    async fn update_document(&self, id: i64, edited_text: &str) -> Result<(), ApiError> {
        let path = format!("{}/{}", DOCUMENTS, id);
        let body = DocumentUpdate {
            edited_text: edited_text.to_string(),
        };
        let response = self.request(Method::PUT, &path).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        tracing::info!(document_id = id, "document saved");
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "request rejected");
        return Err(ApiError::from_status(status.as_u16(), &body));
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
