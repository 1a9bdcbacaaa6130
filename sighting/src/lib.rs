//! # `sighting`
//!
//! Locate a point in 3d from two fixed cameras, each calibrated from only two anchors.
//!
//! Each camera sits at a known position in a shared local Cartesian frame and sees two anchors
//! whose world positions are known. That is enough to recover how the camera is rotated, so a
//! pixel picked in each image can be turned into a world ray. The point is estimated where the two
//! rays pass closest.
//!
//! This crate gathers the `sighting` crates in one place and adds what an application around them
//! needs: the two-camera [`Triangulator`], a [`RigConfig`] that can be loaded from JSON, a
//! [`PendingPair`] that waits for both pixels of an observation, and a [`Track`] to keep the results.
//!
//! ## Modules
//! * [`camera`] - pinhole cameras oriented by two anchors
//! * [`geom`] - attitude determination and skew-line triangulation
//!
//! ```
//! use sighting::{RigConfig, KeyPoint, WorldPoint};
//!
//! let config = RigConfig::from_json(r#"{
//!     "cameras": [
//!         {
//!             "fx": 1000.0, "fy": 1000.0, "cx": 500.0, "cy": 500.0,
//!             "position": [0.0, 0.0, 0.0],
//!             "anchors": [
//!                 { "world": [1.0, 0.0, 0.0], "pixel": [1500.0, 500.0] },
//!                 { "world": [0.0, 1.0, 0.0], "pixel": [500.0, 1500.0] }
//!             ]
//!         },
//!         {
//!             "fx": 1000.0, "fy": 1000.0, "cx": 500.0, "cy": 500.0,
//!             "position": [10.0, 0.0, 0.0],
//!             "anchors": [
//!                 { "world": [9.0, 0.0, 0.0], "pixel": [1500.0, 500.0] },
//!                 { "world": [10.0, 1.0, 0.0], "pixel": [500.0, 1500.0] }
//!             ]
//!         }
//!     ]
//! }"#).unwrap();
//! let triangulator = config.build().unwrap();
//! let point = triangulator
//!     .triangulate(KeyPoint::new(1000.0, 1000.0), KeyPoint::new(1000.0, 1000.0))
//!     .unwrap();
//! assert!(point.distance(WorldPoint::new(5.0, 5.0, 0.0)) < 1e-9);
//! ```

mod config;
mod error;
mod pairing;
mod rig;
mod track;

pub use config::*;
pub use error::*;
pub use pairing::*;
pub use rig::*;
pub use sighting_core::*;
pub use track::*;

/// Camera models
pub mod camera {
    /// The pinhole camera model with two-anchor orientation
    pub use sighting_pinhole as pinhole;
    pub use sighting_pinhole::{CalibratedCamera, CalibrationAnchor, CameraIntrinsics};
}

/// Computational geometry
pub mod geom {
    pub use sighting_geom::*;
}
