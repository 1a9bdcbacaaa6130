use approx::assert_relative_eq;
use quickcheck_macros::quickcheck;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use sighting::camera::{CalibratedCamera, CalibrationAnchor, CameraIntrinsics};
use sighting::nalgebra::{Rotation3, Vector3};
use sighting::{
    AnchorIndex, CameraIndex, CameraModel, KeyPoint, PendingPair, SightingError, Track, Triangulator,
    WorldPoint,
};

const EPSILON_APPROX: f64 = 1e-9;

fn intrinsics() -> CameraIntrinsics {
    CameraIntrinsics::from_parameters(1000.0, 1000.0, 500.0, 500.0)
}

/// Both cameras share the intrinsics `fx = fy = 1000, cx = cy = 500`. The anchors are a unit step
/// along x and y from each camera, picked at `(1500, 500)` and `(500, 1500)`.
fn reference_rig() -> Triangulator {
    let first = CalibratedCamera::new(
        intrinsics(),
        WorldPoint::origin(),
        [
            CalibrationAnchor::new([1.0, 0.0, 0.0], [1500.0, 500.0]),
            CalibrationAnchor::new([0.0, 1.0, 0.0], [500.0, 1500.0]),
        ],
    )
    .unwrap();
    let second = CalibratedCamera::new(
        intrinsics(),
        WorldPoint::new(10.0, 0.0, 0.0),
        [
            CalibrationAnchor::new([9.0, 0.0, 0.0], [1500.0, 500.0]),
            CalibrationAnchor::new([10.0, 1.0, 0.0], [500.0, 1500.0]),
        ],
    )
    .unwrap();
    Triangulator::new(first, second)
}

/// A camera whose anchors agree with a real rotation, so its derived rotation is orthonormal.
fn consistent_camera(center: WorldPoint, rotation: Rotation3<f64>) -> CalibratedCamera {
    let pixels = [KeyPoint::new(250.0, 300.0), KeyPoint::new(800.0, 700.0)];
    let anchors = pixels.map(|pixel| {
        let direction = rotation * intrinsics().bearing(pixel).into_inner();
        CalibrationAnchor::new(WorldPoint(center.0 + direction * 40.0), pixel)
    });
    CalibratedCamera::new(intrinsics(), center, anchors).unwrap()
}

#[test]
fn reference_rig_crosses_at_five_five() {
    let rig = reference_rig();
    let sighting = rig
        .triangulate_detailed(KeyPoint::new(1000.0, 1000.0), KeyPoint::new(1000.0, 1000.0))
        .unwrap();
    assert_relative_eq!(sighting.point.0, WorldPoint::new(5.0, 5.0, 0.0).0, epsilon = EPSILON_APPROX);
    assert!(sighting.gap() < EPSILON_APPROX);
}

#[test]
fn reprojected_points_triangulate_back() {
    let rig = reference_rig();
    for point in [
        WorldPoint::new(5.0, 5.0, 0.0),
        WorldPoint::new(3.0, 8.0, 0.5),
        WorldPoint::new(7.5, 2.0, -1.0),
    ] {
        let first = rig.camera(CameraIndex::First).project(point).unwrap();
        let second = rig.camera(CameraIndex::Second).project(point).unwrap();
        let triangulated = rig.triangulate(first, second).unwrap();
        assert_relative_eq!(triangulated.0, point.0, epsilon = 1e-6);
    }
}

#[quickcheck]
fn random_rigs_recover_points(seed: u64) -> bool {
    let mut rng = SmallRng::seed_from_u64(seed);
    let small_rotation = |rng: &mut SmallRng| {
        Rotation3::from_euler_angles(
            rng.gen_range(-0.1..0.1),
            rng.gen_range(-0.1..0.1),
            rng.gen_range(-0.1..0.1),
        )
    };
    let first = consistent_camera(WorldPoint::origin(), small_rotation(&mut rng));
    let second = consistent_camera(
        WorldPoint::new(rng.gen_range(2.0..10.0), rng.gen_range(-1.0..1.0), 0.0),
        small_rotation(&mut rng),
    );
    let rig = Triangulator::new(first, second);

    let point = WorldPoint::new(
        rng.gen_range(-2.0..2.0),
        rng.gen_range(-2.0..2.0),
        rng.gen_range(10.0..30.0),
    );
    let (first, second) = match (
        rig.camera(CameraIndex::First).project(point),
        rig.camera(CameraIndex::Second).project(point),
    ) {
        (Some(first), Some(second)) => (first, second),
        _ => return false,
    };
    match rig.triangulate(first, second) {
        Ok(triangulated) => triangulated.distance(point) < 1e-6,
        Err(_) => false,
    }
}

#[test]
fn pixel_noise_gives_skew_rays() {
    let rig = reference_rig();
    let sighting = rig
        .triangulate_detailed(KeyPoint::new(1000.0, 1000.0), KeyPoint::new(1000.0, 1003.0))
        .unwrap();
    assert!(sighting.gap() > 0.0);
    assert!(sighting.point.distance(WorldPoint::new(5.0, 5.0, 0.0)) < 0.1);
    assert_relative_eq!(
        sighting.point.0,
        sighting.closest[0].midpoint(sighting.closest[1]).0,
        epsilon = EPSILON_APPROX
    );
}

#[test]
fn baseline_point_is_rejected() {
    let rig = reference_rig();
    let result = rig.triangulate(KeyPoint::new(1500.0, 500.0), KeyPoint::new(1500.0, 500.0));
    assert!(matches!(result, Err(SightingError::ParallelRays { .. })));
}

#[test]
fn anchor_update_is_isolated() {
    let mut rig = reference_rig();
    let camera = rig.camera(CameraIndex::First).clone();
    let second_anchor = *camera.anchor(AnchorIndex::Second);
    let rotation_before = *camera.rotation_cam_to_world();
    let new_pixel = KeyPoint::new(1480.0, 520.0);

    rig.update_anchor(CameraIndex::First, AnchorIndex::First, new_pixel)
        .unwrap();
    let camera = rig.camera(CameraIndex::First);

    assert_ne!(*camera.rotation_cam_to_world(), rotation_before);
    assert_eq!(*camera.anchor(AnchorIndex::Second), second_anchor);
    assert_relative_eq!(
        camera.direction_in_world(new_pixel),
        Vector3::x(),
        epsilon = EPSILON_APPROX
    );
    assert_relative_eq!(
        camera.direction_in_world(second_anchor.pixel),
        Vector3::y(),
        epsilon = EPSILON_APPROX
    );
    // The second camera is not affected at all.
    assert_eq!(
        rig.camera(CameraIndex::Second),
        reference_rig().camera(CameraIndex::Second)
    );
}

#[test]
fn collinear_recalibration_is_rejected() {
    let mut rig = reference_rig();
    let before = rig.clone();
    let result = rig.update_anchor(CameraIndex::Second, AnchorIndex::Second, [1500.0, 500.0]);
    assert!(matches!(result, Err(SightingError::SingularBasis { .. })));
    assert_eq!(rig, before);
}

#[test]
fn clicks_become_a_track() {
    let rig = reference_rig();
    let mut pending = PendingPair::new();
    let mut track = Track::new();

    let clicks = [
        (CameraIndex::First, 2u32, WorldPoint::new(4.0, 6.0, 0.0)),
        (CameraIndex::Second, 2, WorldPoint::new(4.0, 6.0, 0.0)),
        (CameraIndex::Second, 1, WorldPoint::new(5.0, 5.0, 0.0)),
        (CameraIndex::First, 1, WorldPoint::new(5.0, 5.0, 0.0)),
    ];
    for (camera, key, point) in clicks {
        let pixel = rig.camera(camera).project(point).unwrap();
        if let Some(observation) = pending.insert(camera, key, pixel) {
            track.record(&rig, observation).unwrap();
        }
    }

    let points: Vec<(u32, WorldPoint)> = track.iter().map(|(&key, &point)| (key, point)).collect();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].0, 1);
    assert_relative_eq!(points[0].1 .0, WorldPoint::new(5.0, 5.0, 0.0).0, epsilon = 1e-6);
    assert_eq!(points[1].0, 2);
    assert_relative_eq!(points[1].1 .0, WorldPoint::new(4.0, 6.0, 0.0).0, epsilon = 1e-6);
}
