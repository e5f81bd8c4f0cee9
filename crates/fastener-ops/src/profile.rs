//! Hexagon profile shared by hex heads and nuts.

use std::f64::consts::PI;

/// Circumscribed radius of a regular hexagon with the given across-flats width.
pub fn hex_circumradius(width: f64) -> f64 {
    width / (2.0 * (PI / 6.0).cos())
}

/// Six vertices of a regular hexagon centered on the Z axis at height `z`,
/// counter-clockwise from 30° in 60° steps. The polygon closes back to the
/// first point implicitly.
pub fn hexagon_points(width: f64, z: f64) -> [[f64; 3]; 6] {
    let radius = hex_circumradius(width);
    std::array::from_fn(|i| {
        let angle = PI / 6.0 + i as f64 * PI / 3.0;
        [radius * angle.cos(), radius * angle.sin(), z]
    })
}
