//! One construction sequence per fastener kind.
//!
//! Every builder places the fastener on the Z axis. Bolts and screws have the
//! underside of the head at z = 0 with the shank hanging below; nuts, washers
//! and rivet bodies start at z = 0 and grow upward. Parts that are fused
//! overlap, and cutters overshoot every face they pass through.

use fastener_kernel::{Kernel, KernelSolidHandle};

use crate::params::*;
use crate::profile::hexagon_points;
use crate::types::OpError;

const UP: [f64; 3] = [0.0, 0.0, 1.0];

/// Fraction of the cut height a cutting tool overshoots each face by, so a
/// through-cut never shares a face with the body it cuts.
const CUT_OVERSHOOT: f64 = 0.1;

/// Shank hanging below z = 0 whose top is buried halfway into the head.
///
/// truck's booleans fail on solids that only touch along a shared planar
/// face, so fused parts always overlap. The union is the same point set.
fn embedded_shank(
    kernel: &mut dyn Kernel,
    diameter: f64,
    length: f64,
    head_height: f64,
) -> Result<KernelSolidHandle, OpError> {
    Ok(kernel.make_cylinder(
        diameter / 2.0,
        length + head_height / 2.0,
        [0.0, 0.0, -length],
    )?)
}

/// Build the solid for a resolved fastener.
pub fn build_fastener(
    kernel: &mut dyn Kernel,
    spec: &FastenerSpec,
) -> Result<KernelSolidHandle, OpError> {
    tracing::debug!(kind = %spec.kind(), ?spec, "building fastener");
    let handle = match spec {
        FastenerSpec::HexBolt(d) => build_hex_bolt(kernel, d)?,
        FastenerSpec::SocketCap(d) => build_socket_cap(kernel, d)?,
        FastenerSpec::HexNut(d) => build_hex_nut(kernel, d)?,
        FastenerSpec::FlatWasher(d) => build_flat_washer(kernel, d)?,
        FastenerSpec::BlindRivet(d) => build_blind_rivet(kernel, d)?,
    };
    Ok(handle)
}

/// Hexagonal prism of the given across-flats width, base at `z`.
fn hex_prism(
    kernel: &mut dyn Kernel,
    width: f64,
    z: f64,
    height: f64,
) -> Result<KernelSolidHandle, OpError> {
    let face = kernel.make_planar_face(&hexagon_points(width, z))?;
    Ok(kernel.extrude_face(face, UP, height)?)
}

/// Cylinder that overshoots `[z0, z0 + height]` on both ends.
fn through_cutter(
    kernel: &mut dyn Kernel,
    radius: f64,
    z0: f64,
    height: f64,
) -> Result<KernelSolidHandle, OpError> {
    let overshoot = height * CUT_OVERSHOOT;
    Ok(kernel.make_cylinder(
        radius,
        height + 2.0 * overshoot,
        [0.0, 0.0, z0 - overshoot],
    )?)
}

pub fn build_hex_bolt(
    kernel: &mut dyn Kernel,
    d: &HexBoltDims,
) -> Result<KernelSolidHandle, OpError> {
    let head = hex_prism(kernel, d.head_width, 0.0, d.head_height)?;
    let shank = embedded_shank(kernel, d.diameter, d.length, d.head_height)?;
    Ok(kernel.boolean_union(&head, &shank)?)
}

pub fn build_socket_cap(
    kernel: &mut dyn Kernel,
    d: &SocketCapDims,
) -> Result<KernelSolidHandle, OpError> {
    let head = kernel.make_cylinder(d.head_diameter / 2.0, d.head_height, [0.0, 0.0, 0.0])?;
    let shank = embedded_shank(kernel, d.diameter, d.length, d.head_height)?;
    let body = kernel.boolean_union(&head, &shank)?;
    // Cut after fusing so the recess floor sits inside the shank instead of
    // on the head's underside plane.
    let recess = through_cutter(kernel, d.recess_diameter / 2.0, 0.0, d.head_height)?;
    Ok(kernel.boolean_subtract(&body, &recess)?)
}

pub fn build_hex_nut(
    kernel: &mut dyn Kernel,
    d: &HexNutDims,
) -> Result<KernelSolidHandle, OpError> {
    let body = hex_prism(kernel, d.width, 0.0, d.thickness)?;
    let bore = through_cutter(kernel, d.diameter / 2.0, 0.0, d.thickness)?;
    Ok(kernel.boolean_subtract(&body, &bore)?)
}

pub fn build_flat_washer(
    kernel: &mut dyn Kernel,
    d: &FlatWasherDims,
) -> Result<KernelSolidHandle, OpError> {
    let outer = kernel.make_cylinder(d.outer_diameter / 2.0, d.thickness, [0.0, 0.0, 0.0])?;
    let inner = through_cutter(kernel, d.inner_diameter / 2.0, 0.0, d.thickness)?;
    Ok(kernel.boolean_subtract(&outer, &inner)?)
}

pub fn build_blind_rivet(
    kernel: &mut dyn Kernel,
    d: &BlindRivetDims,
) -> Result<KernelSolidHandle, OpError> {
    let head_height = d.diameter * 0.25;
    // The body runs halfway up into the head; its top face is inside the cone.
    let body = kernel.make_cylinder(
        d.diameter / 2.0,
        d.grip + head_height / 2.0,
        [0.0, 0.0, 0.0],
    )?;
    let head = kernel.make_frustum(d.diameter, d.diameter * 1.6, head_height, [0.0, 0.0, d.grip])?;
    // The mandrel starts below the body and runs out past the head.
    let mandrel = kernel.make_cylinder(
        d.diameter * 0.35,
        d.grip + d.diameter * 1.2,
        [0.0, 0.0, -d.grip * 0.2],
    )?;
    let body = kernel.boolean_union(&body, &head)?;
    Ok(kernel.boolean_union(&body, &mandrel)?)
}
