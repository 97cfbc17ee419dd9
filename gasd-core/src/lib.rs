//! Core data structures and traits for gasd
//!
//! This crate provides the point types, point cloud container, rigid transforms
//! and error type shared by the GASD descriptor estimator.

pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod transform;
pub mod color;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use transform::*;
pub use color::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix3, Matrix4};

// Type aliases for easier imports
pub type Point = Point3f;
