use fastener_kernel::{Kernel, KernelError, MockKernel, MockShape};
use fastener_ops::builders::build_fastener;
use fastener_ops::params::{FastenerKind, FastenerSpec, ParameterSet};
use fastener_ops::profile::hex_circumradius;
use fastener_ops::types::OpError;

/// Helper: resolve and build with the mock kernel.
fn build(params: &ParameterSet) -> (MockKernel, fastener_kernel::KernelSolidHandle, FastenerSpec) {
    let spec = params.resolve().unwrap();
    let mut kernel = MockKernel::new();
    let handle = build_fastener(&mut kernel, &spec).unwrap();
    (kernel, handle, spec)
}

fn cylinder_z_range(shape: &MockShape) -> (f64, f64, f64) {
    match shape {
        MockShape::Cylinder {
            radius,
            height,
            base,
        } => (*radius, base[2], base[2] + height),
        other => panic!("expected cylinder, got {:?}", other),
    }
}

// ── Axial extent ───────────────────────────────────────────────────────────

#[test]
fn every_kind_spans_at_least_its_nominal_length() {
    let samples = [
        (3.0, 10.0, 1.0, 2.0),
        (12.0, 40.0, 4.0, 6.0),
        (24.0, 150.0, 20.0, 12.7),
    ];
    for kind in FastenerKind::ALL {
        for &(diameter, length, thickness, grip) in &samples {
            let mut params = ParameterSet::new(kind);
            params.diameter = diameter;
            params.length = length;
            params.thickness = Some(thickness);
            params.grip = grip;
            params.outer = diameter * 2.0;

            let (mut kernel, handle, spec) = build(&params);
            let bb = kernel.bounding_box(&handle).unwrap();
            assert!(
                bb.extent(2) >= spec.nominal_axial_length(),
                "{} with {:?}: z extent {} < {}",
                kind,
                params,
                bb.extent(2),
                spec.nominal_axial_length()
            );
            assert!(kernel.tessellate(&handle, 0.1).unwrap().triangle_count() > 0);
        }
    }
}

// ── Hex bolt ───────────────────────────────────────────────────────────────

#[test]
fn hex_bolt_is_head_fused_with_shank_below() {
    let mut params = ParameterSet::new(FastenerKind::HexBolt);
    params.diameter = 12.0;
    params.length = 45.0;
    let (mut kernel, handle, _) = build(&params);

    let Some(MockShape::Union(head, shank)) = kernel.shape(&handle) else {
        panic!("bolt should be a union");
    };
    let MockShape::Prism { profile, depth, .. } = head.as_ref() else {
        panic!("head should be a prism, got {:?}", head);
    };
    assert_eq!(profile.len(), 6);
    assert!((depth - 8.4).abs() < 1e-12, "default head height is 0.7 × d");

    let (radius, bottom, top) = cylinder_z_range(shank);
    assert_eq!(radius, 6.0);
    assert_eq!(bottom, -45.0);
    assert!((top - 4.2).abs() < 1e-12, "shank top is buried halfway into the head");

    let bb = kernel.bounding_box(&handle).unwrap();
    assert!((bb.extent(2) - (45.0 + 8.4)).abs() < 1e-9);
}

#[test]
fn hex_bolt_head_width_override_sets_flats() {
    let mut params = ParameterSet::new(FastenerKind::HexBolt);
    params.head_width = Some(20.0);
    let (mut kernel, handle, _) = build(&params);

    let bb = kernel.bounding_box(&handle).unwrap();
    // Flats face ±X, corners point along ±Y.
    assert!((bb.extent(0) - 20.0).abs() < 1e-9);
    assert!((bb.extent(1) - 2.0 * hex_circumradius(20.0)).abs() < 1e-9);
}

// ── Socket cap ─────────────────────────────────────────────────────────────

#[test]
fn socket_cap_recess_is_cut_after_shank_is_fused() {
    let mut params = ParameterSet::new(FastenerKind::SocketCap);
    params.diameter = 8.0;
    params.length = 30.0;
    let (mut kernel, handle, _) = build(&params);

    let Some(MockShape::Subtract(body, recess)) = kernel.shape(&handle) else {
        panic!("socket cap should end with the recess cut");
    };
    let MockShape::Union(cap, shank) = body.as_ref() else {
        panic!("head and shank should be fused first, got {:?}", body);
    };

    let (cap_r, cap_bottom, cap_top) = cylinder_z_range(cap);
    assert!((cap_r - 8.0 * 1.6 / 2.0).abs() < 1e-12);
    assert_eq!(cap_bottom, 0.0);
    assert!((cap_top - 6.4).abs() < 1e-12);

    let (shank_r, shank_bottom, shank_top) = cylinder_z_range(shank);
    assert_eq!(shank_r, 4.0);
    assert_eq!(shank_bottom, -30.0);
    assert!(shank_top > cap_bottom && shank_top < cap_top);

    let (recess_r, recess_bottom, recess_top) = cylinder_z_range(recess);
    assert!((recess_r - 8.0 * 0.6 / 2.0).abs() < 1e-12);
    assert!(recess_bottom < cap_bottom, "recess floor must sit inside the shank");
    assert!(recess_bottom > shank_bottom);
    assert!(recess_top > cap_top, "recess must break through the top face");

    let bb = kernel.bounding_box(&handle).unwrap();
    assert!((bb.extent(2) - (30.0 + 6.4)).abs() < 1e-9);
}

// ── Hex nut ────────────────────────────────────────────────────────────────

#[test]
fn hex_nut_scenario_has_clean_through_bore() {
    let mut params = ParameterSet::new(FastenerKind::HexNut);
    params.diameter = 10.0;
    params.thickness = Some(6.0);
    params.head_width = Some(18.0);
    let (mut kernel, handle, _) = build(&params);

    let Some(MockShape::Subtract(body, bore)) = kernel.shape(&handle) else {
        panic!("nut should be a subtraction");
    };

    let MockShape::Prism {
        profile,
        direction,
        depth,
    } = body.as_ref()
    else {
        panic!("nut body should be a prism");
    };
    assert_eq!(*depth, 6.0);
    assert_eq!(*direction, [0.0, 0.0, 1.0]);
    let flat_x = profile.iter().map(|p| p[0]).fold(f64::MIN, f64::max);
    assert!((flat_x - 9.0).abs() < 1e-12, "flat-to-flat should be 18");

    let (bore_r, bore_bottom, bore_top) = cylinder_z_range(bore);
    assert_eq!(bore_r, 5.0);
    assert!(bore_bottom < 0.0, "bore must start below the bottom face");
    assert!(bore_top > 6.0, "bore must end above the top face");

    let bb = kernel.bounding_box(&handle).unwrap();
    assert_eq!(bb.min[2], 0.0);
    assert_eq!(bb.max[2], 6.0);
}

// ── Flat washer ────────────────────────────────────────────────────────────

#[test]
fn flat_washer_inner_cut_overshoots_both_faces() {
    let mut params = ParameterSet::new(FastenerKind::FlatWasher);
    params.diameter = 12.0;
    params.outer = 24.0;
    params.thickness = Some(2.5);
    let (kernel, handle, _) = build(&params);

    let Some(MockShape::Subtract(outer, inner)) = kernel.shape(&handle) else {
        panic!("washer should be a subtraction");
    };
    let (outer_r, outer_bottom, outer_top) = cylinder_z_range(outer);
    assert_eq!(outer_r, 12.0);
    assert_eq!((outer_bottom, outer_top), (0.0, 2.5));

    let (inner_r, inner_bottom, inner_top) = cylinder_z_range(inner);
    assert_eq!(inner_r, 6.0);
    assert!((inner_bottom + 0.25).abs() < 1e-12);
    assert!((inner_top - 2.75).abs() < 1e-12);
}

#[test]
fn flat_washer_without_thickness_uses_default() {
    let (mut kernel, handle, _) = build(&ParameterSet::new(FastenerKind::FlatWasher));
    let bb = kernel.bounding_box(&handle).unwrap();
    assert_eq!(bb.extent(2), 4.0);
}

// ── Blind rivet ────────────────────────────────────────────────────────────

#[test]
fn blind_rivet_mandrel_protrudes_past_both_ends() {
    let mut params = ParameterSet::new(FastenerKind::BlindRivet);
    params.diameter = 4.8;
    params.grip = 6.0;
    let (mut kernel, handle, _) = build(&params);

    let Some(MockShape::Union(body_and_head, mandrel)) = kernel.shape(&handle) else {
        panic!("rivet should be a union");
    };
    let MockShape::Union(body, head) = body_and_head.as_ref() else {
        panic!("body and head should be fused first");
    };

    let (body_r, body_bottom, body_top) = cylinder_z_range(body);
    assert_eq!(body_r, 2.4);
    assert_eq!(body_bottom, 0.0);
    assert!(body_top > 6.0 && body_top < 6.0 + 1.2, "body top is inside the head");

    let MockShape::Frustum {
        bottom_radius,
        top_radius,
        height,
        base,
    } = head.as_ref()
    else {
        panic!("head should be a frustum");
    };
    assert_eq!(*bottom_radius, 4.8);
    assert!((top_radius - 4.8 * 1.6).abs() < 1e-12);
    assert!((height - 1.2).abs() < 1e-12);
    assert_eq!(base[2], 6.0);

    let (mandrel_r, mandrel_bottom, mandrel_top) = cylinder_z_range(mandrel);
    assert!((mandrel_r - 4.8 * 0.35).abs() < 1e-12);
    assert!(mandrel_bottom < body_bottom);
    assert!(mandrel_top > base[2] + height);

    let bb = kernel.bounding_box(&handle).unwrap();
    assert!((bb.min[2] + 1.2).abs() < 1e-12);
}

// ── Error propagation ──────────────────────────────────────────────────────

#[test]
fn kernel_boolean_failure_propagates() {
    let spec = ParameterSet::new(FastenerKind::HexNut).resolve().unwrap();
    let mut kernel = MockKernel::failing_booleans();
    let err = build_fastener(&mut kernel, &spec).unwrap_err();
    assert!(matches!(
        err,
        OpError::Kernel(KernelError::BooleanFailed { .. })
    ));
}
