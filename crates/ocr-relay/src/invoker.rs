use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use crate::engine::{OcrEngine, OcrOptions};
use crate::error::OcrError;
use crate::intake::UploadedDocument;

const INPUT_NAME: &str = "input.pdf";
const OUTPUT_NAME: &str = "output_ocr.pdf";

/// The processed document, fully read back into memory.
#[derive(Debug, Clone)]
pub struct OcrResult {
    pub bytes: Vec<u8>,
}

/// Runs one document through the engine inside a private scratch directory.
///
/// The directory lives exactly as long as a single [`OcrInvoker::process`]
/// call and is removed on every exit path.
pub struct OcrInvoker {
    engine: Arc<dyn OcrEngine>,
    scratch_root: Option<PathBuf>,
    options: OcrOptions,
}

impl OcrInvoker {
    pub fn new(engine: Arc<dyn OcrEngine>) -> Self {
        Self {
            engine,
            scratch_root: None,
            options: OcrOptions::RELAY,
        }
    }

    /// Create scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.scratch_root = Some(root.into());
        self
    }

    fn scratch(&self) -> Result<TempDir, OcrError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("ocr-relay-");
        let dir = match &self.scratch_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        Ok(dir)
    }

    pub async fn process(&self, document: &UploadedDocument) -> Result<OcrResult, OcrError> {
        let scratch = self.scratch()?;
        let input = scratch.path().join(INPUT_NAME);
        let output = scratch.path().join(OUTPUT_NAME);

        tokio::fs::write(&input, &document.bytes).await?;
        tracing::debug!(scratch = %scratch.path().display(), "wrote input document");

        self.engine.ocr(&input, &output, &self.options).await?;

        let bytes = match tokio::fs::read(&output).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(OcrError::OutputMissing)
            }
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Err(OcrError::OutputMissing);
        }

        tracing::info!(size = bytes.len(), "OCR complete");
        Ok(OcrResult { bytes })
    }
}
