use serde::{Deserialize, Serialize};

/// Opaque handle to a solid in the geometry kernel.
/// NEVER persisted. Valid only for the current kernel session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KernelSolidHandle(pub(crate) u64);

impl KernelSolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Transient identifier for a standalone planar face awaiting extrusion.
/// Consumed by the extrude call that uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KernelId(pub u64);

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("tessellation failed: {reason}")]
    TessellationFailed { reason: String },

    #[error("STEP export failed: {reason}")]
    StepExportFailed { reason: String },

    #[error("entity not found: {id:?}")]
    EntityNotFound { id: KernelId },

    #[error("invalid geometry input: {reason}")]
    InvalidInput { reason: String },

    #[error("kernel self-check failed: {reason}")]
    SelfCheckFailed { reason: String },
}

/// Tessellated triangle mesh of a solid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderMesh {
    /// Flat array of vertex positions [x0, y0, z0, x1, y1, z1, ...].
    pub vertices: Vec<f32>,
    /// Triangle indices into the vertex array, three per triangle.
    pub indices: Vec<u32>,
}

impl RenderMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounds of all vertex positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<BoundingBox> {
        let mut points = self
            .vertices
            .chunks_exact(3)
            .map(|p| [p[0] as f64, p[1] as f64, p[2] as f64]);
        let first = points.next()?;
        Some(points.fold(BoundingBox::point(first), |bb, p| bb.including(p)))
    }
}

/// Axis-aligned bounding box in model units (millimetres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn point(p: [f64; 3]) -> Self {
        Self { min: p, max: p }
    }

    pub fn including(mut self, p: [f64; 3]) -> Self {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
        self
    }

    pub fn union(self, other: &BoundingBox) -> Self {
        self.including(other.min).including(other.max)
    }

    /// Extent along one axis (0 = X, 1 = Y, 2 = Z).
    pub fn extent(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    pub fn size(&self) -> [f64; 3] {
        [self.extent(0), self.extent(1), self.extent(2)]
    }
}
