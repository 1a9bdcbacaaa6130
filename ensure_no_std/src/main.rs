#![no_std]
#![no_main]

use core::panic::PanicInfo;
use sighting_core::{KeyPoint, TriangulatorRays, WorldPoint};
use sighting_geom::MidpointTriangulator;
use sighting_pinhole::{CalibratedCamera, CalibrationAnchor, CameraIntrinsics};

/// This function is called on panic.
#[panic_handler]
fn panic(_info: &PanicInfo) -> ! {
    loop {}
}

#[no_mangle]
pub extern "C" fn _start() -> ! {
    let camera = CalibratedCamera::new(
        CameraIntrinsics::from_parameters(1000.0, 1000.0, 500.0, 500.0),
        WorldPoint::origin(),
        [
            CalibrationAnchor::new([1.0, 0.0, 0.0], [1500.0, 500.0]),
            CalibrationAnchor::new([0.0, 1.0, 0.0], [500.0, 1500.0]),
        ],
    );
    if let Ok(camera) = camera {
        let ray = camera.ray(KeyPoint::new(1000.0, 1000.0));
        let _ = MidpointTriangulator::new().triangulate_rays(ray, ray);
    }
    loop {}
}
