//! Tessellation wrapper.
//!
//! Wraps truck-meshalgo to turn a B-rep solid into a flat RenderMesh
//! suitable for STL output and bounds queries.

use crate::types::*;
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::MeshableShape;

type TruckSolid = truck_modeling::Solid;

/// Tessellate a truck Solid into a RenderMesh.
///
/// Faces are meshed one at a time so inverted faces can be flipped before
/// their triangles are appended; the STL writer derives facet normals from
/// winding order.
pub fn tessellate_solid(
    solid: &TruckSolid,
    tolerance: f64,
) -> std::result::Result<RenderMesh, KernelError> {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return Err(KernelError::TessellationFailed {
            reason: format!("tolerance must be positive, got {}", tolerance),
        });
    }

    let meshed_solid = solid.triangulation(tolerance);

    let mut vertices: Vec<f32> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();
    let mut skipped = 0usize;

    for shell in meshed_solid.boundaries().iter() {
        for face in shell.face_iter() {
            let maybe_mesh: Option<PolygonMesh> = face.surface();
            let Some(face_mesh) = maybe_mesh else {
                skipped += 1;
                continue;
            };

            let face_mesh = if !face.orientation() {
                let mut m = face_mesh;
                m.invert();
                m
            } else {
                face_mesh
            };

            let base_vertex = (vertices.len() / 3) as u32;

            for pos in face_mesh.positions() {
                vertices.push(pos[0] as f32);
                vertices.push(pos[1] as f32);
                vertices.push(pos[2] as f32);
            }

            for tri in face_mesh.tri_faces() {
                for v in tri.iter() {
                    indices.push(v.pos as u32 + base_vertex);
                }
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "some faces could not be meshed");
    }

    if indices.is_empty() {
        return Err(KernelError::TessellationFailed {
            reason: "solid produced no triangles".to_string(),
        });
    }

    tracing::debug!(
        triangles = indices.len() / 3,
        vertices = vertices.len() / 3,
        tolerance,
        "tessellated solid"
    );

    Ok(RenderMesh { vertices, indices })
}
