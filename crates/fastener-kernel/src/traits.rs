use crate::types::*;

/// Core geometry kernel trait. Provides the shape construction, boolean and
/// export operations the fastener builders need.
/// Implemented by TruckKernel (wraps real truck) and MockKernel (deterministic test double).
///
/// All primitives are built along +Z.
pub trait Kernel {
    /// Create a planar face from a closed polygon (the last point connects back to the first).
    fn make_planar_face(&mut self, points: &[[f64; 3]]) -> Result<KernelId, KernelError>;

    /// Extrude a planar face along a direction vector. Consumes the face.
    fn extrude_face(
        &mut self,
        face: KernelId,
        direction: [f64; 3],
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Right circular cylinder whose bottom cap is centered at `base`.
    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
        base: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Truncated cone whose bottom cap is centered at `base`.
    fn make_frustum(
        &mut self,
        bottom_radius: f64,
        top_radius: f64,
        height: f64,
        base: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean union of two solids.
    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError>;

    /// Tessellate a solid to a triangle mesh.
    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError>;

    /// Serialize a solid as a STEP (ISO 10303-21) document.
    fn export_step(&self, solid: &KernelSolidHandle, file_name: &str)
        -> Result<String, KernelError>;

    /// Axis-aligned bounds of a solid.
    fn bounding_box(&mut self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError>;
}

/// Reject non-finite or non-positive scalar inputs before they reach the kernel.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<(), KernelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::InvalidInput {
            reason: format!("{} must be positive, got {}", name, value),
        })
    }
}
