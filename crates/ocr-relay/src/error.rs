use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// JSON body returned by the API route on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Errors from intake and OCR processing.
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    /// Nothing usable was uploaded.
    #[error("{0}")]
    InvalidUpload(String),

    /// The upload is bigger than the configured limit.
    #[error("the uploaded file exceeds the {} upload limit", describe_size(.limit_bytes))]
    UploadTooLarge { limit_bytes: usize },

    /// The engine executable could not be started.
    #[error("OCR engine '{program}' could not be started: {source}")]
    EngineUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran and reported failure.
    #[error("OCR engine exited with code {code}: {stderr}")]
    EngineFailed { code: i32, stderr: String },

    /// The engine reported success but left no usable output.
    #[error("OCR engine produced no output document")]
    OutputMissing,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl OcrError {
    pub fn code(&self) -> &'static str {
        match self {
            OcrError::InvalidUpload(_) => "INVALID_UPLOAD",
            OcrError::UploadTooLarge { .. } => "UPLOAD_TOO_LARGE",
            OcrError::EngineUnavailable { .. } => "ENGINE_UNAVAILABLE",
            OcrError::EngineFailed { .. } => "ENGINE_FAILED",
            OcrError::OutputMissing => "OUTPUT_MISSING",
            OcrError::Io(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            OcrError::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            OcrError::UploadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            OcrError::EngineFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            OcrError::EngineUnavailable { .. } | OcrError::OutputMissing => {
                StatusCode::BAD_GATEWAY
            }
            OcrError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn describe_size(bytes: &usize) -> String {
    const MB: usize = 1024 * 1024;
    let bytes = *bytes;
    if bytes >= MB && bytes % MB == 0 {
        format!("{} MB", bytes / MB)
    } else {
        format!("{} byte", bytes)
    }
}

impl IntoResponse for OcrError {
    fn into_response(self) -> Response {
        if let OcrError::Io(e) = &self {
            tracing::error!(error = %e, "internal error while processing upload");
        }
        let body = ApiErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
