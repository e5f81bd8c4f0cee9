//! Single-page PDF OCR relay.
//!
//! Accepts one uploaded PDF, runs it through an external OCR engine in a
//! scratch directory that is removed when the request ends, and hands the
//! processed document back for download.

pub mod config;
pub mod engine;
pub mod error;
pub mod intake;
pub mod invoker;
pub mod page;
pub mod relay;
pub mod routes;

pub use config::RelayConfig;
pub use engine::{OcrEngine, OcrMyPdf, OcrOptions};
pub use error::OcrError;
pub use intake::UploadedDocument;
pub use invoker::{OcrInvoker, OcrResult};
pub use routes::{router, AppState};
