use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::Engine as _;
use tower::ServiceExt;

use ocr_relay::error::ApiErrorResponse;
use ocr_relay::{router, AppState, OcrEngine, OcrError, OcrInvoker, OcrOptions};

const BOUNDARY: &str = "relay-test-boundary";

/// Engine double: prefixes the input, or fails with a fixed message.
struct FakeEngine {
    fail_with: Option<String>,
    inputs: Mutex<Vec<PathBuf>>,
}

impl FakeEngine {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail_with: None,
            inputs: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(message.to_string()),
            inputs: Mutex::new(Vec::new()),
        })
    }

    fn seen_inputs(&self) -> Vec<PathBuf> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl OcrEngine for FakeEngine {
    async fn ocr(
        &self,
        input: &Path,
        output: &Path,
        _options: &OcrOptions,
    ) -> Result<(), OcrError> {
        self.inputs.lock().unwrap().push(input.to_path_buf());
        if let Some(message) = &self.fail_with {
            return Err(OcrError::EngineFailed {
                code: 2,
                stderr: message.clone(),
            });
        }
        let bytes = tokio::fs::read(input).await?;
        tokio::fs::write(output, [b"OCR:".as_slice(), &bytes].concat()).await?;
        Ok(())
    }
}

fn app(engine: Arc<FakeEngine>, scratch: &Path) -> Router {
    let invoker = OcrInvoker::new(engine).with_scratch_root(scratch);
    router(AppState::new(invoker, 1024 * 1024))
}

fn multipart_body(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_text(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn index_renders_upload_form() {
    let scratch = tempfile::tempdir().unwrap();
    let resp = app(FakeEngine::ok(), scratch.path())
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("PDF OCR Converter"));
    assert!(html.contains("type=\"file\""));
    assert!(!html.contains("OCR Complete!"));
}

#[tokio::test]
async fn health_reports_ok() {
    let scratch = tempfile::tempdir().unwrap();
    let resp = app(FakeEngine::ok(), scratch.path())
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "ok");
}

#[tokio::test]
async fn form_success_offers_processed_document_under_fixed_name() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = FakeEngine::ok();
    let body = multipart_body("file", "invoice scan.pdf", "application/pdf", b"%PDF-1.4 scan");

    let resp = app(engine.clone(), scratch.path())
        .oneshot(upload_request("/", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("OCR Complete!"));
    assert!(html.contains("download=\"ocr_processed_document.pdf\""));
    let expected = base64::engine::general_purpose::STANDARD.encode(b"OCR:%PDF-1.4 scan");
    assert!(html.contains(&format!("data:application/pdf;base64,{}", expected)));
    assert_eq!(engine.seen_inputs().len(), 1);
}

#[tokio::test]
async fn api_success_returns_attachment() {
    let scratch = tempfile::tempdir().unwrap();
    let body = multipart_body("file", "a.pdf", "application/pdf", b"%PDF-1.7");

    let resp = app(FakeEngine::ok(), scratch.path())
        .oneshot(upload_request("/api/ocr", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        resp.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"ocr_processed_document.pdf\""
    );
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"OCR:%PDF-1.7");
}

#[tokio::test]
async fn engine_failure_shows_message_and_no_download() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = FakeEngine::failing("page 1: image too small");
    let body = multipart_body("file", "broken.pdf", "application/pdf", b"not really a pdf");

    let resp = app(engine, scratch.path())
        .oneshot(upload_request("/", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let html = body_text(resp).await;
    assert!(html.contains("An error occurred: "));
    assert!(html.contains("page 1: image too small"));
    assert!(!html.contains("OCR Complete!"));
    assert!(!html.contains("download="));
}

#[tokio::test]
async fn api_failure_is_json() {
    let scratch = tempfile::tempdir().unwrap();
    let body = multipart_body("file", "broken.pdf", "application/pdf", b"x");

    let resp = app(FakeEngine::failing("boom"), scratch.path())
        .oneshot(upload_request("/api/ocr", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: ApiErrorResponse = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(body.error, "ENGINE_FAILED");
    assert!(body.message.contains("boom"));
}

#[tokio::test]
async fn non_pdf_upload_never_reaches_engine() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = FakeEngine::ok();
    let body = multipart_body("file", "photo.png", "image/png", b"\x89PNG");

    let resp = app(engine.clone(), scratch.path())
        .oneshot(upload_request("/", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(resp).await.contains("not a PDF"));
    assert!(engine.seen_inputs().is_empty());
}

#[tokio::test]
async fn missing_file_field_is_rejected() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = FakeEngine::ok();
    let body = multipart_body("attachment", "a.pdf", "application/pdf", b"%PDF");

    let resp = app(engine.clone(), scratch.path())
        .oneshot(upload_request("/api/ocr", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(engine.seen_inputs().is_empty());
}

#[tokio::test]
async fn scratch_directories_are_removed_on_success_and_failure() {
    let scratch = tempfile::tempdir().unwrap();

    let ok = FakeEngine::ok();
    app(ok.clone(), scratch.path())
        .oneshot(upload_request(
            "/",
            multipart_body("file", "a.pdf", "application/pdf", b"%PDF a"),
        ))
        .await
        .unwrap();

    let failing = FakeEngine::failing("nope");
    app(failing.clone(), scratch.path())
        .oneshot(upload_request(
            "/",
            multipart_body("file", "b.pdf", "application/pdf", b"%PDF b"),
        ))
        .await
        .unwrap();

    for input in ok.seen_inputs().into_iter().chain(failing.seen_inputs()) {
        assert!(input.starts_with(scratch.path()));
        assert!(!input.parent().unwrap().exists());
    }
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn oversized_upload_is_refused_with_size_message() {
    let scratch = tempfile::tempdir().unwrap();
    let engine = FakeEngine::ok();
    let invoker = OcrInvoker::new(engine.clone()).with_scratch_root(scratch.path());
    let app = router(AppState::new(invoker, 1024));

    let body = multipart_body("file", "big.pdf", "application/pdf", &[b'x'; 8192]);
    let resp = app
        .clone()
        .oneshot(upload_request("/api/ocr", body.clone()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let error: ApiErrorResponse = serde_json::from_str(&body_text(resp).await).unwrap();
    assert_eq!(error.error, "UPLOAD_TOO_LARGE");
    assert!(error.message.contains("1024 byte upload limit"));

    let resp = app.oneshot(upload_request("/", body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let html = body_text(resp).await;
    assert!(html.contains("An error occurred: the uploaded file exceeds"));
    assert!(!html.contains("download="));

    assert!(engine.seen_inputs().is_empty());
}
