use axum::http::header;
use axum::response::{IntoResponse, Response};
use base64::Engine as _;

use crate::invoker::OcrResult;

/// Name the processed document is always offered under.
pub const RESULT_FILE_NAME: &str = "ocr_processed_document.pdf";
pub const RESULT_MEDIA_TYPE: &str = "application/pdf";

/// Raw attachment response for programmatic clients.
pub fn attachment_response(result: OcrResult) -> Response {
    (
        [
            (header::CONTENT_TYPE, RESULT_MEDIA_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", RESULT_FILE_NAME),
            ),
        ],
        result.bytes,
    )
        .into_response()
}

/// Self-contained `data:` URI so the page can offer the download without
/// keeping the result anywhere on the server.
pub fn download_href(result: &OcrResult) -> String {
    format!(
        "data:{};base64,{}",
        RESULT_MEDIA_TYPE,
        base64::engine::general_purpose::STANDARD.encode(&result.bytes)
    )
}
