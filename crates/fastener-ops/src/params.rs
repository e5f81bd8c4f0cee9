//! Fastener parameters and their resolution into per-kind dimension records.
//!
//! `ParameterSet` mirrors the command line: a kind plus loose numeric inputs,
//! some optional. `ParameterSet::resolve` applies every ratio default and
//! validates the fields the selected kind uses, producing an immutable
//! `FastenerSpec` that the builders consume.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_DIAMETER: f64 = 12.0;
pub const DEFAULT_LENGTH: f64 = 40.0;
pub const DEFAULT_OUTER: f64 = 24.0;
pub const DEFAULT_THICKNESS: f64 = 4.0;
pub const DEFAULT_GRIP: f64 = 6.0;

/// The five supported fastener kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "clap", value(rename_all = "snake_case"))]
pub enum FastenerKind {
    HexBolt,
    SocketCap,
    HexNut,
    FlatWasher,
    BlindRivet,
}

impl FastenerKind {
    pub const ALL: [FastenerKind; 5] = [
        FastenerKind::HexBolt,
        FastenerKind::SocketCap,
        FastenerKind::HexNut,
        FastenerKind::FlatWasher,
        FastenerKind::BlindRivet,
    ];

    /// Snake-case name, also used as the export base name.
    pub fn name(&self) -> &'static str {
        match self {
            FastenerKind::HexBolt => "hex_bolt",
            FastenerKind::SocketCap => "socket_cap",
            FastenerKind::HexNut => "hex_nut",
            FastenerKind::FlatWasher => "flat_washer",
            FastenerKind::BlindRivet => "blind_rivet",
        }
    }
}

impl fmt::Display for FastenerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FastenerKind {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FastenerKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ParamError::UnknownKind(s.to_string()))
    }
}

/// Errors from parameter resolution.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("unknown fastener kind: {0}")]
    UnknownKind(String),

    #[error("{field} must be a positive finite number of millimetres, got {value}")]
    NonPositive { field: &'static str, value: f64 },
}

/// Raw fastener inputs in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub kind: FastenerKind,
    /// Major (shank) diameter.
    pub diameter: f64,
    /// Shank length for bolts and screws.
    pub length: f64,
    /// Head height override for bolts and screws.
    pub head_height: Option<f64>,
    /// Across-flats width (hex) or head diameter (socket cap) override.
    pub head_width: Option<f64>,
    /// Washer outer diameter.
    pub outer: f64,
    /// Nut or washer thickness.
    pub thickness: Option<f64>,
    /// Rivet grip length.
    pub grip: f64,
}

impl ParameterSet {
    /// Parameters with the command-line defaults and no overrides.
    pub fn new(kind: FastenerKind) -> Self {
        Self {
            kind,
            diameter: DEFAULT_DIAMETER,
            length: DEFAULT_LENGTH,
            head_height: None,
            head_width: None,
            outer: DEFAULT_OUTER,
            thickness: None,
            grip: DEFAULT_GRIP,
        }
    }

    /// Apply ratio defaults and validate every dimension the kind uses.
    ///
    /// Fields irrelevant to the selected kind are ignored. Cross-field
    /// problems such as a head narrower than the shank are logged and
    /// built as given.
    pub fn resolve(&self) -> Result<FastenerSpec, ParamError> {
        let d = positive("diameter", self.diameter)?;

        let spec = match self.kind {
            FastenerKind::HexBolt => FastenerSpec::HexBolt(HexBoltDims {
                diameter: d,
                length: positive("length", self.length)?,
                head_height: or_ratio("head_height", self.head_height, d, 0.7)?,
                head_width: or_ratio("head_width", self.head_width, d, 1.5)?,
            }),
            FastenerKind::SocketCap => FastenerSpec::SocketCap(SocketCapDims {
                diameter: d,
                length: positive("length", self.length)?,
                head_height: or_ratio("head_height", self.head_height, d, 0.8)?,
                head_diameter: or_ratio("head_width", self.head_width, d, 1.6)?,
                recess_diameter: d * 0.6,
            }),
            FastenerKind::HexNut => FastenerSpec::HexNut(HexNutDims {
                diameter: d,
                thickness: or_ratio("thickness", self.thickness, d, 0.8)?,
                width: or_ratio("head_width", self.head_width, d, 1.8)?,
            }),
            FastenerKind::FlatWasher => FastenerSpec::FlatWasher(FlatWasherDims {
                inner_diameter: d,
                outer_diameter: positive("outer", self.outer)?,
                thickness: match self.thickness {
                    Some(t) => positive("thickness", t)?,
                    None => DEFAULT_THICKNESS,
                },
            }),
            FastenerKind::BlindRivet => FastenerSpec::BlindRivet(BlindRivetDims {
                diameter: d,
                grip: positive("grip", self.grip)?,
            }),
        };

        spec.warn_if_degenerate();
        Ok(spec)
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ParamError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParamError::NonPositive { field, value })
    }
}

fn or_ratio(
    field: &'static str,
    value: Option<f64>,
    diameter: f64,
    ratio: f64,
) -> Result<f64, ParamError> {
    match value {
        Some(v) => positive(field, v),
        None => Ok(diameter * ratio),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexBoltDims {
    pub diameter: f64,
    pub length: f64,
    pub head_height: f64,
    /// Across flats.
    pub head_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocketCapDims {
    pub diameter: f64,
    pub length: f64,
    pub head_height: f64,
    pub head_diameter: f64,
    pub recess_diameter: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HexNutDims {
    /// Bore diameter.
    pub diameter: f64,
    pub thickness: f64,
    /// Across flats.
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatWasherDims {
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub thickness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlindRivetDims {
    pub diameter: f64,
    pub grip: f64,
}

/// Fully resolved fastener description. Every dimension is finite and positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FastenerSpec {
    HexBolt(HexBoltDims),
    SocketCap(SocketCapDims),
    HexNut(HexNutDims),
    FlatWasher(FlatWasherDims),
    BlindRivet(BlindRivetDims),
}

impl FastenerSpec {
    pub fn kind(&self) -> FastenerKind {
        match self {
            FastenerSpec::HexBolt(_) => FastenerKind::HexBolt,
            FastenerSpec::SocketCap(_) => FastenerKind::SocketCap,
            FastenerSpec::HexNut(_) => FastenerKind::HexNut,
            FastenerSpec::FlatWasher(_) => FastenerKind::FlatWasher,
            FastenerSpec::BlindRivet(_) => FastenerKind::BlindRivet,
        }
    }

    /// The requested size along the shank axis: length for bolts and
    /// screws, thickness for nuts and washers, grip for rivets.
    pub fn nominal_axial_length(&self) -> f64 {
        match self {
            FastenerSpec::HexBolt(d) => d.length,
            FastenerSpec::SocketCap(d) => d.length,
            FastenerSpec::HexNut(d) => d.thickness,
            FastenerSpec::FlatWasher(d) => d.thickness,
            FastenerSpec::BlindRivet(d) => d.grip,
        }
    }

    fn warn_if_degenerate(&self) {
        let (outer_name, outer, inner) = match self {
            FastenerSpec::HexBolt(d) => ("head_width", d.head_width, d.diameter),
            FastenerSpec::SocketCap(d) => ("head_width", d.head_diameter, d.diameter),
            FastenerSpec::HexNut(d) => ("head_width", d.width, d.diameter),
            FastenerSpec::FlatWasher(d) => ("outer", d.outer_diameter, d.inner_diameter),
            FastenerSpec::BlindRivet(_) => return,
        };
        if outer <= inner {
            tracing::warn!(
                kind = %self.kind(),
                field = outer_name,
                value = outer,
                diameter = inner,
                "dimension does not exceed the shank diameter; geometry may be degenerate"
            );
        }
    }
}
