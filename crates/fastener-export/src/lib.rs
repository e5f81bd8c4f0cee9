pub mod errors;
pub mod export;
pub mod stl;

pub use errors::{ExportError, StlError};
pub use export::{export_solid, ExportArtifactPair, ExportOptions, DEFAULT_TOLERANCE};
pub use stl::StlFormat;
