use fastener_kernel::{Kernel, KernelSolidHandle};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::ExportError;
use crate::stl::{self, StlFormat};

/// Chordal tolerance for STL tessellation, in millimetres.
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// The two files one export produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifactPair {
    pub step: PathBuf,
    pub stl: PathBuf,
}

impl ExportArtifactPair {
    /// `<dir>/<basename>.step` and `<dir>/<basename>.stl`.
    pub fn new(output_dir: &Path, basename: &str) -> Self {
        Self {
            step: output_dir.join(format!("{}.step", basename)),
            stl: output_dir.join(format!("{}.stl", basename)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub stl_format: StlFormat,
    pub tolerance: f64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            stl_format: StlFormat::Binary,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    fs::write(path, contents).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Export a solid as a STEP file and an STL file under `output_dir`.
///
/// Creates the directory if needed and overwrites existing files. Both
/// payloads are produced before anything is written, so a kernel failure
/// leaves the directory untouched; an I/O failure part way through does not
/// roll back the file already written.
pub fn export_solid(
    kernel: &mut dyn Kernel,
    solid: &KernelSolidHandle,
    output_dir: &Path,
    basename: &str,
    options: &ExportOptions,
) -> Result<ExportArtifactPair, ExportError> {
    let paths = ExportArtifactPair::new(output_dir, basename);

    let step_name = format!("{}.step", basename);
    let step = kernel.export_step(solid, &step_name)?;
    let mesh = kernel.tessellate(solid, options.tolerance)?;
    let stl_bytes = stl::encode(&mesh, basename, options.stl_format)?;

    fs::create_dir_all(output_dir).map_err(|source| ExportError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;
    write_file(&paths.step, step.as_bytes())?;
    write_file(&paths.stl, &stl_bytes)?;

    tracing::info!(
        step = %paths.step.display(),
        stl = %paths.stl.display(),
        triangles = mesh.triangle_count(),
        format = ?options.stl_format,
        "exported {}",
        basename
    );

    Ok(paths)
}
