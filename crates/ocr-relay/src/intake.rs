use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;

use crate::error::OcrError;

/// Form field that carries the document.
pub const UPLOAD_FIELD: &str = "file";

const PDF_MEDIA_TYPE: &str = "application/pdf";

/// A document received from the browser, held in memory until it is
/// written to scratch space.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Declared as a PDF either by media type or by file extension.
    pub fn is_pdf(&self) -> bool {
        let by_type = self
            .content_type
            .as_deref()
            .map(|ct| ct.eq_ignore_ascii_case(PDF_MEDIA_TYPE))
            .unwrap_or(false);
        let by_name = self
            .file_name
            .as_deref()
            .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
            .unwrap_or(false);
        by_type || by_name
    }

    fn validate(self) -> Result<Self, OcrError> {
        if self.bytes.is_empty() {
            return Err(OcrError::InvalidUpload(
                "the uploaded file is empty".to_string(),
            ));
        }
        if !self.is_pdf() {
            return Err(OcrError::InvalidUpload(format!(
                "'{}' is not a PDF document",
                self.file_name.as_deref().unwrap_or("upload")
            )));
        }
        Ok(self)
    }
}

fn upload_error(e: MultipartError, action: &str, limit_bytes: usize) -> OcrError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        OcrError::UploadTooLarge { limit_bytes }
    } else {
        OcrError::InvalidUpload(format!("{}: {}", action, e.body_text()))
    }
}

/// Pull the single PDF out of a multipart form. Other fields are ignored.
///
/// `limit_bytes` is the body limit the router enforces; it is only used to
/// explain a refusal.
pub async fn read_upload(
    mut multipart: Multipart,
    limit_bytes: usize,
) -> Result<UploadedDocument, OcrError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error(e, "malformed upload", limit_bytes))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| upload_error(e, "failed to read upload", limit_bytes))?;

        tracing::info!(
            file_name = file_name.as_deref().unwrap_or("-"),
            size = bytes.len(),
            "received upload"
        );

        return UploadedDocument {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }
        .validate();
    }

    Err(OcrError::InvalidUpload(
        "no file was uploaded; choose a PDF first".to_string(),
    ))
}
