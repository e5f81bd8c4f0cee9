use std::path::PathBuf;

/// Errors while encoding a mesh as STL.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StlError {
    #[error("mesh has no triangles")]
    EmptyMesh,

    #[error("index {index} out of range (vertex count = {vertex_count})")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}

/// Errors during STEP/STL export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("kernel error: {0}")]
    Kernel(#[from] fastener_kernel::KernelError),

    #[error("STL encoding failed: {0}")]
    Stl(#[from] StlError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
