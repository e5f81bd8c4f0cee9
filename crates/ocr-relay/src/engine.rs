use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::error::OcrError;

/// Flags passed to the engine for every document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcrOptions {
    /// Leave pages that already carry text untouched.
    pub skip_text: bool,
    /// Straighten skewed scans before recognition.
    pub deskew: bool,
}

impl OcrOptions {
    /// The only configuration the relay ever uses.
    pub const RELAY: OcrOptions = OcrOptions {
        skip_text: true,
        deskew: true,
    };
}

impl Default for OcrOptions {
    fn default() -> Self {
        Self::RELAY
    }
}

/// Something that turns an input PDF on disk into an OCR'd PDF on disk.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    async fn ocr(&self, input: &Path, output: &Path, options: &OcrOptions)
        -> Result<(), OcrError>;
}

/// Runs the `ocrmypdf` executable.
#[derive(Debug, Clone)]
pub struct OcrMyPdf {
    program: PathBuf,
}

impl OcrMyPdf {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command_args(input: &Path, output: &Path, options: &OcrOptions) -> Vec<OsString> {
        let mut args = Vec::with_capacity(4);
        if options.skip_text {
            args.push(OsString::from("--skip-text"));
        }
        if options.deskew {
            args.push(OsString::from("--deskew"));
        }
        args.push(input.as_os_str().to_owned());
        args.push(output.as_os_str().to_owned());
        args
    }
}

impl Default for OcrMyPdf {
    fn default() -> Self {
        Self::new("ocrmypdf")
    }
}

#[async_trait]
impl OcrEngine for OcrMyPdf {
    async fn ocr(
        &self,
        input: &Path,
        output: &Path,
        options: &OcrOptions,
    ) -> Result<(), OcrError> {
        let args = Self::command_args(input, output, options);
        tracing::debug!(program = %self.program.display(), ?args, "starting OCR engine");

        let result = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| OcrError::EngineUnavailable {
                program: self.program.display().to_string(),
                source,
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            let code = result.status.code().unwrap_or(-1);
            tracing::warn!(code, %stderr, "OCR engine failed");
            return Err(OcrError::EngineFailed { code, stderr });
        }

        Ok(())
    }
}
