//! Higher-level primitive builders on top of truck's sweep API.
//!
//! truck has no built-in box, cylinder or cone, so everything is built from successive sweeps.

use std::f64::consts::PI;
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Face, Shell, Solid, Wire};
use truck_modeling::{Point3, Rad, Vector3};

use crate::types::KernelError;

/// Create a box solid via successive translational sweeps.
/// Origin at (0,0,0), extends to (w,h,d).
pub fn make_box(w: f64, h: f64, d: f64) -> Solid {
    let v = builder::vertex(Point3::new(0.0, 0.0, 0.0));
    let edge = builder::tsweep(&v, Vector3::new(w, 0.0, 0.0));
    let face = builder::tsweep(&edge, Vector3::new(0.0, h, 0.0));
    builder::tsweep(&face, Vector3::new(0.0, 0.0, d))
}

/// Create a planar face bounded by a closed polygon.
/// Vertices are shared between consecutive edges so the wire is closed.
pub fn make_polygon_face(points: &[[f64; 3]]) -> Result<Face, KernelError> {
    if points.len() < 3 {
        return Err(KernelError::InvalidInput {
            reason: format!("polygon needs at least 3 points, got {}", points.len()),
        });
    }

    let vertices: Vec<_> = points
        .iter()
        .map(|p| builder::vertex(Point3::new(p[0], p[1], p[2])))
        .collect();
    let n = vertices.len();
    let edges: Vec<Edge> = (0..n)
        .map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]))
        .collect();
    let wire = Wire::from(edges);

    builder::try_attach_plane(&[wire]).map_err(|e| KernelError::InvalidInput {
        reason: format!("failed to create planar face: {}", e),
    })
}

/// Create a cylinder solid: circle wire → face → translational sweep.
/// Bottom cap centered at `base` in a plane parallel to XY, extending along +Z.
pub fn make_cylinder(radius: f64, height: f64, base: [f64; 3]) -> Result<Solid, KernelError> {
    let center = Point3::new(base[0], base[1], base[2]);
    let v = builder::vertex(Point3::new(base[0] + radius, base[1], base[2]));
    let wire = builder::rsweep(&v, center, Vector3::unit_z(), Rad(2.0 * PI));
    let face = builder::try_attach_plane(&[wire]).map_err(|e| KernelError::InvalidInput {
        reason: format!("failed to create circular face: {}", e),
    })?;
    Ok(builder::tsweep(&face, Vector3::new(0.0, 0.0, height)))
}

/// Create a truncated cone by revolving its half cross-section around Z.
///
/// The open wire runs from the top of the axis, out along the top rim, down
/// the slanted side and back to the axis, which is the shape `builder::cone`
/// expects. The result is then moved so the bottom cap sits at `base`.
pub fn make_frustum(
    bottom_radius: f64,
    top_radius: f64,
    height: f64,
    base: [f64; 3],
) -> Solid {
    let top_axis = builder::vertex(Point3::new(0.0, 0.0, height));
    let top_rim = builder::vertex(Point3::new(top_radius, 0.0, height));
    let bottom_rim = builder::vertex(Point3::new(bottom_radius, 0.0, 0.0));
    let bottom_axis = builder::vertex(Point3::new(0.0, 0.0, 0.0));

    let wire: Wire = vec![
        builder::line(&top_axis, &top_rim),
        builder::line(&top_rim, &bottom_rim),
        builder::line(&bottom_rim, &bottom_axis),
    ]
    .into();

    let shell: Shell = builder::cone(&wire, Vector3::unit_z(), Rad(2.0 * PI));
    let solid = Solid::new(vec![shell]);
    builder::translated(&solid, Vector3::new(base[0], base[1], base[2]))
}
