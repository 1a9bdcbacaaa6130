//! This crate contains the computational geometry behind anchor-calibrated two-camera triangulation.
//!
//! ## Attitude
//!
//! A camera that sees two anchors knows the direction to each of them in its own frame, and the
//! world positions of the anchors give the same two directions in the world frame.
//! [`TwoVectorAttitude`] solves for the matrix that carries camera-frame directions into the world.
//!
//! ## Triangulation
//!
//! In this problem we know the optical center of each camera and the world direction of the same
//! feature observed by each camera. We want to find the point of intersection of the two rays.
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
//!
//! [`SkewLineIntersector`] finds where the two rays pass closest and [`MidpointTriangulator`]
//! takes the midpoint of that segment.

#![no_std]

pub mod attitude;
pub mod triangulation;

pub use attitude::*;
pub use triangulation::*;
