//! OCR relay server entry point.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ocr_relay::{router, AppState, OcrInvoker, OcrMyPdf, RelayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RelayConfig::parse();

    let mut invoker = OcrInvoker::new(Arc::new(OcrMyPdf::new(&config.engine)));
    if let Some(root) = &config.scratch_dir {
        invoker = invoker.with_scratch_root(root);
    }
    let app = router(AppState::new(invoker, config.max_upload_bytes()));

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    tracing::info!(
        addr = %config.bind,
        engine = %config.engine.display(),
        max_upload_mb = config.max_upload_mb,
        "OCR relay listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("OCR relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
