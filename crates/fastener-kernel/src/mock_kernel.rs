//! Deterministic test double implementing Kernel.
//!
//! Records every primitive and boolean as a CSG tree and tracks axis-aligned
//! bounds, so builder tests can inspect how a fastener was assembled without
//! running the real B-rep kernel.

use crate::traits::{require_positive, Kernel};
use crate::types::*;
use std::collections::HashMap;

/// Recorded construction of a mock solid.
#[derive(Debug, Clone, PartialEq)]
pub enum MockShape {
    /// Planar polygon swept along a direction.
    Prism {
        profile: Vec<[f64; 3]>,
        direction: [f64; 3],
        depth: f64,
    },
    Cylinder {
        radius: f64,
        height: f64,
        base: [f64; 3],
    },
    Frustum {
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
        base: [f64; 3],
    },
    Union(Box<MockShape>, Box<MockShape>),
    Subtract(Box<MockShape>, Box<MockShape>),
}

impl MockShape {
    /// Count the leaf primitives in this tree.
    pub fn primitive_count(&self) -> usize {
        match self {
            MockShape::Union(a, b) | MockShape::Subtract(a, b) => {
                a.primitive_count() + b.primitive_count()
            }
            _ => 1,
        }
    }
}

#[derive(Debug, Clone)]
struct MockSolid {
    shape: MockShape,
    bounds: BoundingBox,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    /// Faces created by make_planar_face, awaiting extrude.
    standalone_faces: HashMap<u64, Vec<[f64; 3]>>,
    fail_booleans: bool,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            solids: HashMap::new(),
            standalone_faces: HashMap::new(),
            fail_booleans: false,
        }
    }

    /// A kernel whose boolean operations always fail, for error-path tests.
    pub fn failing_booleans() -> Self {
        Self {
            fail_booleans: true,
            ..Self::new()
        }
    }

    /// The recorded construction tree of a solid.
    pub fn shape(&self, handle: &KernelSolidHandle) -> Option<&MockShape> {
        self.solids.get(&handle.id()).map(|s| &s.shape)
    }

    /// Number of solids created so far, including intermediates.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    fn store(&mut self, shape: MockShape, bounds: BoundingBox) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(h.id(), MockSolid { shape, bounds });
        h
    }

    fn get(&self, handle: &KernelSolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(handle.id()),
            })
    }

    fn check_boolean(&self) -> Result<(), KernelError> {
        if self.fail_booleans {
            return Err(KernelError::BooleanFailed {
                reason: "mock kernel configured to fail booleans".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn round_bounds(radius: f64, bottom_z: f64, top_z: f64, base: [f64; 3]) -> BoundingBox {
    BoundingBox {
        min: [base[0] - radius, base[1] - radius, bottom_z],
        max: [base[0] + radius, base[1] + radius, top_z],
    }
}

impl Kernel for MockKernel {
    fn make_planar_face(&mut self, points: &[[f64; 3]]) -> Result<KernelId, KernelError> {
        if points.len() < 3 {
            return Err(KernelError::InvalidInput {
                reason: format!("polygon needs at least 3 points, got {}", points.len()),
            });
        }
        let id = self.alloc_id();
        self.standalone_faces.insert(id.0, points.to_vec());
        Ok(id)
    }

    fn extrude_face(
        &mut self,
        face: KernelId,
        direction: [f64; 3],
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        require_positive("extrude depth", depth)?;
        let profile = self
            .standalone_faces
            .remove(&face.0)
            .ok_or(KernelError::EntityNotFound { id: face })?;

        let len = (direction[0].powi(2) + direction[1].powi(2) + direction[2].powi(2)).sqrt();
        if len < 1e-12 {
            return Err(KernelError::InvalidInput {
                reason: "extrude direction has zero length".to_string(),
            });
        }
        let offset = [
            direction[0] / len * depth,
            direction[1] / len * depth,
            direction[2] / len * depth,
        ];

        let mut bounds = BoundingBox::point(profile[0]);
        for p in &profile {
            bounds = bounds
                .including(*p)
                .including([p[0] + offset[0], p[1] + offset[1], p[2] + offset[2]]);
        }

        let shape = MockShape::Prism {
            profile,
            direction,
            depth,
        };
        Ok(self.store(shape, bounds))
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
        base: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        require_positive("cylinder radius", radius)?;
        require_positive("cylinder height", height)?;
        let bounds = round_bounds(radius, base[2], base[2] + height, base);
        Ok(self.store(
            MockShape::Cylinder {
                radius,
                height,
                base,
            },
            bounds,
        ))
    }

    fn make_frustum(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
        base: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        require_positive("frustum bottom radius", bottom_radius)?;
        require_positive("frustum top radius", top_radius)?;
        require_positive("frustum height", height)?;
        let bounds = round_bounds(
            bottom_radius.max(top_radius),
            base[2],
            base[2] + height,
            base,
        );
        Ok(self.store(
            MockShape::Frustum {
                bottom_radius,
                top_radius,
                height,
                base,
            },
            bounds,
        ))
    }

    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.check_boolean()?;
        let sa = self.get(a)?.clone();
        let sb = self.get(b)?.clone();
        let bounds = sa.bounds.union(&sb.bounds);
        Ok(self.store(
            MockShape::Union(Box::new(sa.shape), Box::new(sb.shape)),
            bounds,
        ))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        self.check_boolean()?;
        let sa = self.get(a)?.clone();
        let sb = self.get(b)?.clone();
        // A cut never grows the body; keep A's bounds.
        Ok(self.store(
            MockShape::Subtract(Box::new(sa.shape), Box::new(sb.shape)),
            sa.bounds,
        ))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        _tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let bb = self.get(solid)?.bounds;
        let (lo, hi) = (bb.min, bb.max);
        let corners = [
            [lo[0], lo[1], lo[2]],
            [hi[0], lo[1], lo[2]],
            [hi[0], hi[1], lo[2]],
            [lo[0], hi[1], lo[2]],
            [lo[0], lo[1], hi[2]],
            [hi[0], lo[1], hi[2]],
            [hi[0], hi[1], hi[2]],
            [lo[0], hi[1], hi[2]],
        ];
        let vertices = corners
            .iter()
            .flat_map(|c| c.iter().map(|&v| v as f32))
            .collect();
        // Bounding box as 12 outward-wound triangles.
        let indices = vec![
            0, 2, 1, 0, 3, 2, // bottom
            4, 5, 6, 4, 6, 7, // top
            0, 1, 5, 0, 5, 4, // front
            2, 3, 7, 2, 7, 6, // back
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ];
        Ok(RenderMesh { vertices, indices })
    }

    fn export_step(
        &self,
        solid: &KernelSolidHandle,
        file_name: &str,
    ) -> Result<String, KernelError> {
        let s = self.get(solid)?;
        Ok(format!(
            "ISO-10303-21;\nHEADER;\nFILE_NAME('{}');\nENDSEC;\nDATA;\n/* mock solid with {} primitives */\nENDSEC;\nEND-ISO-10303-21;\n",
            file_name,
            s.shape.primitive_count()
        ))
    }

    fn bounding_box(&mut self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError> {
        Ok(self.get(solid)?.bounds)
    }
}
