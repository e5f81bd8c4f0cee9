//! Binary and ASCII STL encoding of a RenderMesh.

use fastener_kernel::RenderMesh;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::errors::StlError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

type Triangle = ([f32; 3], [[f32; 3]; 3]);

/// Validate indices and resolve every triangle to (facet normal, vertices).
/// The normal follows the right-hand rule over the winding order.
fn triangles(mesh: &RenderMesh) -> Result<Vec<Triangle>, StlError> {
    if mesh.triangle_count() == 0 {
        return Err(StlError::EmptyMesh);
    }

    let vertex_count = mesh.vertices.len() / 3;
    if let Some(&index) = mesh.indices.iter().find(|&&i| i as usize >= vertex_count) {
        return Err(StlError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }

    let point = |i: u32| {
        let vi = i as usize * 3;
        [
            mesh.vertices[vi],
            mesh.vertices[vi + 1],
            mesh.vertices[vi + 2],
        ]
    };

    Ok(mesh
        .indices
        .chunks_exact(3)
        .map(|tri| {
            let (v0, v1, v2) = (point(tri[0]), point(tri[1]), point(tri[2]));
            let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
            let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            let normal = if len > 1e-12 {
                [n[0] / len, n[1] / len, n[2] / len]
            } else {
                [0.0, 0.0, 0.0]
            };
            (normal, [v0, v1, v2])
        })
        .collect())
}

/// Encode a mesh in the requested STL flavour.
pub fn encode(mesh: &RenderMesh, name: &str, format: StlFormat) -> Result<Vec<u8>, StlError> {
    match format {
        StlFormat::Binary => encode_binary(mesh, name),
        StlFormat::Ascii => encode_ascii(mesh, name).map(String::into_bytes),
    }
}

/// Binary STL layout:
/// - 80 bytes: header
/// - 4 bytes: u32 LE triangle count
/// - Per triangle (50 bytes each): normal (3 × f32 LE), 3 vertices
///   (9 × f32 LE), attribute byte count (0u16)
pub fn encode_binary(mesh: &RenderMesh, name: &str) -> Result<Vec<u8>, StlError> {
    let tris = triangles(mesh)?;
    let mut buf = Vec::with_capacity(84 + tris.len() * 50);

    let header = format!("binary STL: {}", name);
    let header_bytes = header.as_bytes();
    buf.extend_from_slice(&header_bytes[..header_bytes.len().min(80)]);
    buf.resize(80, 0u8);

    buf.extend_from_slice(&(tris.len() as u32).to_le_bytes());

    for (normal, verts) in &tris {
        for c in normal {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        for v in verts {
            for c in v {
                buf.extend_from_slice(&c.to_le_bytes());
            }
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }

    Ok(buf)
}

pub fn encode_ascii(mesh: &RenderMesh, name: &str) -> Result<String, StlError> {
    let tris = triangles(mesh)?;
    let mut out = String::with_capacity(tris.len() * 256);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "solid {}", name);
    for (n, verts) in &tris {
        let _ = writeln!(out, "  facet normal {} {} {}", n[0], n[1], n[2]);
        out.push_str("    outer loop\n");
        for v in verts {
            let _ = writeln!(out, "      vertex {} {} {}", v[0], v[1], v[2]);
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {}", name);

    Ok(out)
}
