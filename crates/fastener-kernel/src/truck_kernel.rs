//! Real geometry kernel wrapping truck.

use crate::primitives;
use crate::tessellation;
use crate::traits::{require_positive, Kernel};
use crate::types::*;
use std::collections::HashMap;

use truck_modeling::builder;
use truck_modeling::topology::{Face, Solid};
use truck_modeling::{InnerSpace, Vector3};
use truck_stepio::out;

/// Tolerance handed to truck's boolean operations.
const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Tolerance used when a bounds query has to tessellate.
const BOUNDS_TOLERANCE: f64 = 0.01;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    next_id: u64,
    solids: HashMap<u64, Solid>,
    /// Standalone faces created by make_planar_face, awaiting extrude.
    standalone_faces: HashMap<u64, Face>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            next_id: 1,
            solids: HashMap::new(),
            standalone_faces: HashMap::new(),
        }
    }

    /// Prove the kernel is usable before any real work starts: mesh a unit
    /// cube, then fuse and cut it against an offset copy.
    pub fn self_check() -> Result<(), KernelError> {
        Self::run_self_check().map_err(|e| match e {
            KernelError::SelfCheckFailed { .. } => e,
            other => KernelError::SelfCheckFailed {
                reason: other.to_string(),
            },
        })
    }

    fn run_self_check() -> Result<(), KernelError> {
        let mut kernel = Self::new();
        let cube = kernel.store_solid(primitives::make_box(1.0, 1.0, 1.0));
        let mesh = kernel.tessellate(&cube, 0.1)?;
        if mesh.triangle_count() < 12 {
            return Err(KernelError::SelfCheckFailed {
                reason: format!(
                    "unit cube meshed to {} triangles, expected at least 12",
                    mesh.triangle_count()
                ),
            });
        }

        let offset = kernel.store_solid(builder::translated(
            &primitives::make_box(1.0, 1.0, 1.0),
            Vector3::new(0.5, 0.5, 0.5),
        ));
        let fused = kernel.boolean_union(&cube, &offset)?;
        let fused_bb = kernel.bounding_box(&fused)?;
        let cut = kernel.boolean_subtract(&cube, &offset)?;
        let cut_bb = kernel.bounding_box(&cut)?;
        if (fused_bb.extent(0) - 1.5).abs() > 1e-3 || (cut_bb.extent(0) - 1.0).abs() > 1e-3 {
            return Err(KernelError::SelfCheckFailed {
                reason: format!(
                    "overlapping cubes gave extents {:.3} (union) and {:.3} (difference)",
                    fused_bb.extent(0),
                    cut_bb.extent(0)
                ),
            });
        }
        Ok(())
    }

    fn alloc_handle(&mut self) -> KernelSolidHandle {
        let h = KernelSolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn alloc_id(&mut self) -> KernelId {
        let id = KernelId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn store_solid(&mut self, solid: Solid) -> KernelSolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), solid);
        handle
    }

    pub(crate) fn get_solid(&self, handle: &KernelSolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or(KernelError::EntityNotFound {
                id: KernelId(handle.id()),
            })
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for TruckKernel {
    fn make_planar_face(&mut self, points: &[[f64; 3]]) -> Result<KernelId, KernelError> {
        let face = primitives::make_polygon_face(points)?;
        let face_id = self.alloc_id();
        self.standalone_faces.insert(face_id.0, face);
        Ok(face_id)
    }

    fn extrude_face(
        &mut self,
        face: KernelId,
        direction: [f64; 3],
        depth: f64,
    ) -> Result<KernelSolidHandle, KernelError> {
        require_positive("extrude depth", depth)?;
        let truck_face = self
            .standalone_faces
            .remove(&face.0)
            .ok_or(KernelError::EntityNotFound { id: face })?;

        let dir = Vector3::new(direction[0], direction[1], direction[2]);
        if dir.magnitude() < 1e-12 {
            return Err(KernelError::InvalidInput {
                reason: "extrude direction has zero length".to_string(),
            });
        }
        let sweep_vec = dir.normalize() * depth;

        let solid = builder::tsweep(&truck_face, sweep_vec);
        Ok(self.store_solid(solid))
    }

    fn make_cylinder(
        &mut self,
        radius: f64,
        height: f64,
        base: [f64; 3],
    ) -> Result<KernelSolidHandle, KernelError> {
        require_positive("cylinder radius", radius)?;
        require_positive("cylinder height", height)?;
        let solid = primitives::make_cylinder(radius, height, base)?;
        Ok(self.store_solid(solid))
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
        let solid = primitives::make_frustum(bottom_radius, top_radius, height, base);
        Ok(self.store_solid(solid))
    }

    fn boolean_union(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?.clone();
        let solid_b = self.get_solid(b)?.clone();

        let result = truck_shapeops::or(&solid_a, &solid_b, BOOLEAN_TOLERANCE).ok_or_else(|| {
            KernelError::BooleanFailed {
                reason: "truck or() returned None".to_string(),
            }
        })?;
        Ok(self.store_solid(result))
    }

    fn boolean_subtract(
        &mut self,
        a: &KernelSolidHandle,
        b: &KernelSolidHandle,
    ) -> Result<KernelSolidHandle, KernelError> {
        let solid_a = self.get_solid(a)?.clone();
        let mut solid_b = self.get_solid(b)?.clone();

        // Subtraction = A ∩ ¬B. not() mutates in place.
        solid_b.not();
        let result =
            truck_shapeops::and(&solid_a, &solid_b, BOOLEAN_TOLERANCE).ok_or_else(|| {
                KernelError::BooleanFailed {
                    reason: "truck and() returned None for subtraction".to_string(),
                }
            })?;
        Ok(self.store_solid(result))
    }

    fn tessellate(
        &mut self,
        solid: &KernelSolidHandle,
        tolerance: f64,
    ) -> Result<RenderMesh, KernelError> {
        let truck_solid = self.get_solid(solid)?;
        tessellation::tessellate_solid(truck_solid, tolerance)
    }

    fn export_step(
        &self,
        solid: &KernelSolidHandle,
        file_name: &str,
    ) -> Result<String, KernelError> {
        let truck_solid = self.get_solid(solid)?;
        let compressed = truck_solid.compress();
        let display = out::CompleteStepDisplay::new(
            out::StepModel::from(&compressed),
            out::StepHeaderDescriptor {
                file_name: file_name.to_string(),
                organization_system: "fastener-export".to_string(),
                ..Default::default()
            },
        );
        let step = display.to_string();
        if step.trim().is_empty() {
            return Err(KernelError::StepExportFailed {
                reason: "STEP writer produced no output".to_string(),
            });
        }
        Ok(step)
    }

    fn bounding_box(&mut self, solid: &KernelSolidHandle) -> Result<BoundingBox, KernelError> {
        // Vertex positions alone miss the bulge of curved faces, so bound the mesh.
        let mesh = self.tessellate(solid, BOUNDS_TOLERANCE)?;
        mesh.bounds().ok_or_else(|| KernelError::TessellationFailed {
            reason: "empty mesh has no bounds".to_string(),
        })
    }
}
