use clap::Parser;
use std::path::PathBuf;

use fastener_export::{ExportOptions, StlFormat, DEFAULT_TOLERANCE};
use fastener_ops::{
    FastenerKind, ParameterSet, DEFAULT_DIAMETER, DEFAULT_GRIP, DEFAULT_LENGTH, DEFAULT_OUTER,
    DEFAULT_THICKNESS,
};

/// Generate simple parametric fastener solids and export them as STEP and STL.
///
/// All dimensions are in millimetres.
#[derive(Debug, Parser)]
#[command(name = "fastener-export", version, about, long_about = None)]
pub struct Cli {
    /// Fastener to build
    #[arg(long, value_enum, required_unless_present = "catalog")]
    pub fastener: Option<FastenerKind>,

    /// Destination directory for generated files
    #[arg(long, default_value = "exports")]
    pub output_dir: PathBuf,

    /// Major diameter
    #[arg(long, default_value_t = DEFAULT_DIAMETER)]
    pub diameter: f64,

    /// Shank length (bolts and screws)
    #[arg(long, default_value_t = DEFAULT_LENGTH)]
    pub length: f64,

    /// Override head height for bolts and screws
    #[arg(long)]
    pub head_height: Option<f64>,

    /// Override across flats / head diameter
    #[arg(long)]
    pub head_width: Option<f64>,

    /// Outer diameter for washers
    #[arg(long, default_value_t = DEFAULT_OUTER)]
    pub outer: f64,

    /// Thickness for nuts and washers
    #[arg(long, default_value_t = DEFAULT_THICKNESS)]
    pub thickness: f64,

    /// Grip range for blind rivets
    #[arg(long, default_value_t = DEFAULT_GRIP)]
    pub grip: f64,

    /// STL encoding
    #[arg(long, value_enum, default_value_t = StlFormat::Binary)]
    pub stl_format: StlFormat,

    /// Chordal tolerance used to tessellate the STL mesh
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: f64,

    /// Print the fastener catalog and exit
    #[arg(long)]
    pub catalog: bool,
}

impl Cli {
    /// Parameter set for the selected fastener, or `None` in catalog mode.
    pub fn parameter_set(&self) -> Option<ParameterSet> {
        let kind = self.fastener?;
        Some(ParameterSet {
            kind,
            diameter: self.diameter,
            length: self.length,
            head_height: self.head_height,
            head_width: self.head_width,
            outer: self.outer,
            thickness: Some(self.thickness),
            grip: self.grip,
        })
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            stl_format: self.stl_format,
            tolerance: self.tolerance,
        }
    }
}
