//! # Sighting Core
//!
//! This library provides the common abstractions and types shared by the `sighting` crates.
//! It contains the pixel and world point types, the ray type that ties them together, the
//! camera model and ray triangulator traits, and the error type every fallible operation returns.
//! The crate is designed to be very small so that it adds negligible build time.
//!
//! The crate is designed to work with `#![no_std]`, even without an allocator. `libm` is used
//! (indirectly through [`nalgebra`]) for all math algorithms that aren't present in `core`.
//!
//! ## Triangulation from two fixed cameras
//!
//! Two cameras are mounted at known positions in a shared local Cartesian frame (for instance an
//! East-North-Up tangent plane). Each camera only knows its orientation through two anchors:
//! points whose world position is known and whose pixel location has been picked in that camera's
//! image. Once a camera knows how to rotate its own viewing directions into the world frame, a
//! pixel observed by both cameras can be turned into two [`Ray`]s, one out of each optical center.
//!
//! In an ideal world these rays would intersect exactly at the observed point. In practice they are
//! skew, so the point is estimated as the midpoint of the shortest segment joining them.
//!
//! - `p` the point we are trying to triangulate
//! - `a` the pixel observed on camera A
//! - `b` the pixel observed on camera B
//! - `O` the optical center of a camera
//! - `@` the virtual image plane
//!
//! ```text
//!                        @
//!                        @
//!               p--------b--------O
//!              /         @
//!             /          @
//!            /           @
//!           /            @
//!   @@@@@@@a@@@@@
//!         /
//!        /
//!       /
//!      O
//! ```

#![no_std]

mod anchor;
mod camera;
mod error;
mod keypoint;
mod point;
mod triangulation;

pub use anchor::*;
pub use camera::*;
pub use error::*;
pub use keypoint::*;
pub use nalgebra;
pub use point::*;
pub use triangulation::*;
