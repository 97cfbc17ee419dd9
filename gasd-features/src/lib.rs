//! # GASD Features
//!
//! Globally aligned spatial distribution descriptors for 3D point clouds.
//!
//! This crate estimates a canonical reference frame for a whole cloud and
//! builds fixed-length shape and color histograms in that frame, suitable for
//! object recognition and pose estimation.

pub mod config;
pub mod histogram;
pub mod alignment;
pub mod shape;
pub mod color;
pub mod gasd;

// Re-export commonly used items
pub use config::*;
pub use histogram::{GridHistogram, AxisBoundary};
pub use alignment::{estimate_alignment, Alignment};
pub use shape::{shape_histogram, CanonicalCloud};
pub use color::{color_histogram, hue_coord};
pub use gasd::*;
