use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Serve a single-page form that adds a searchable text layer to uploaded PDFs.
#[derive(Debug, Clone, Parser)]
#[command(name = "ocr-relay", version, about, long_about = None)]
pub struct RelayConfig {
    /// Address to listen on
    #[arg(long, env = "OCR_RELAY_BIND", default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,

    /// OCR engine executable
    #[arg(long, env = "OCR_RELAY_ENGINE", default_value = "ocrmypdf")]
    pub engine: PathBuf,

    /// Largest accepted upload, in megabytes
    #[arg(long, env = "OCR_RELAY_MAX_UPLOAD_MB", default_value_t = 200)]
    pub max_upload_mb: usize,

    /// Parent directory for per-request scratch directories (system temp dir if unset)
    #[arg(long, env = "OCR_RELAY_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,
}

impl RelayConfig {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
