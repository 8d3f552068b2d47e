//! Client-side checks on documents before they are uploaded.

use crate::error::ApiError;
use std::path::Path;

/// Largest accepted upload (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Txt,
}

impl DocumentKind {
    pub const fn mime(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentKind::Txt => "text/plain",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        // Ignore parameters such as `; charset=utf-8`.
        let essence = mime.split(';').next().unwrap_or_default().trim();
        [DocumentKind::Pdf, DocumentKind::Docx, DocumentKind::Txt]
            .into_iter()
            .find(|kind| kind.mime().eq_ignore_ascii_case(essence))
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let extension = Path::new(filename).extension()?.to_str()?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Txt),
            _ => None,
        }
    }
}

/// A validated document ready for `analyze_document`.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub filename: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Validate type and size. The MIME type wins over the extension when both are known.
    pub fn new(
        filename: impl Into<String>,
        mime: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<Self, ApiError> {
        let filename = filename.into();
        let kind = mime
            .and_then(DocumentKind::from_mime)
            .or_else(|| DocumentKind::from_filename(&filename))
            .ok_or(ApiError::UnsupportedFormat)?;
        check_size(bytes.len() as u64)?;
        Ok(Self {
            filename,
            kind,
            bytes,
        })
    }

    /// Read and validate a document from disk, checking its size before reading.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document")
            .to_string();
        DocumentKind::from_filename(&filename).ok_or(ApiError::UnsupportedFormat)?;

        let metadata = tokio::fs::metadata(path).await?;
        check_size(metadata.len())?;

        let bytes = tokio::fs::read(path).await?;
        tracing::debug!(%filename, size = bytes.len(), "read document for upload");
        Self::new(filename, None, bytes)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

fn check_size(size: u64) -> Result<(), ApiError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ApiError::PayloadTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(DocumentKind::from_mime("application/pdf"), Some(DocumentKind::Pdf));
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            Some(DocumentKind::Txt)
        );
        assert_eq!(DocumentKind::from_mime("image/png"), None);
    }

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("Lease.DOCX"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("notes.md"), None);
        assert_eq!(DocumentKind::from_filename("README"), None);
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let err = UploadFile::new("scan.png", Some("image/png"), vec![0; 10]).unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedFormat));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let at_limit = vec![0; MAX_UPLOAD_BYTES as usize];
        assert!(UploadFile::new("big.txt", None, at_limit).is_ok());

        let over = vec![0; MAX_UPLOAD_BYTES as usize + 1];
        let err = UploadFile::new("big.txt", None, over).unwrap_err();
        assert!(matches!(err, ApiError::PayloadTooLarge));
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("dociq-upload-{}.txt", std::process::id()));
        tokio::fs::write(&path, b"Tenant waives all rights.").await.unwrap();

        let upload = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(upload.kind, DocumentKind::Txt);
        assert_eq!(upload.size(), 25);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = UploadFile::from_path("/definitely/not/here.pdf").await.unwrap_err();
        assert!(matches!(err, ApiError::Io(_)));
    }
}
