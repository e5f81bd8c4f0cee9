//! HTTP surface: the upload page, a raw API endpoint, and a health check.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::OcrError;
use crate::intake::read_upload;
use crate::invoker::{OcrInvoker, OcrResult};
use crate::page::{self, PageState};
use crate::relay;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub invoker: Arc<OcrInvoker>,
    /// Largest request body the upload routes accept.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(invoker: OcrInvoker, max_upload_bytes: usize) -> Self {
        Self {
            invoker: Arc::new(invoker),
            max_upload_bytes,
        }
    }
}

/// Build the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;

    Router::new()
        .route("/", get(index).post(submit_form))
        .route("/api/ocr", post(submit_api))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &Request| {
                tracing::info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %req.method(),
                    uri = %req.uri(),
                )
            }),
        )
        .with_state(state)
}

async fn run(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<OcrResult, OcrError> {
    let multipart =
        multipart.map_err(|e| OcrError::InvalidUpload(format!("malformed upload: {}", e)))?;
    let document = read_upload(multipart, state.max_upload_bytes).await?;
    state.invoker.process(&document).await
}

async fn index() -> Html<String> {
    Html(page::render(&PageState::Idle))
}

async fn submit_form(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    match run(&state, multipart).await {
        Ok(result) => Html(page::render(&PageState::Complete {
            href: relay::download_href(&result),
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "OCR request failed");
            let body = page::render(&PageState::Failed {
                message: e.to_string(),
            });
            (e.status(), Html(body)).into_response()
        }
    }
}

async fn submit_api(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, OcrError> {
    let result = run(&state, multipart).await.inspect_err(|e| {
        tracing::warn!(error = %e, "OCR request failed");
    })?;
    Ok(relay::attachment_response(result))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
