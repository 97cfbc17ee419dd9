//! # GASD
//!
//! Globally aligned spatial distribution descriptors for 3D point clouds.
//!
//! This is the umbrella crate that provides convenient access to the point
//! cloud types and the descriptor estimator. You can use this crate to get
//! everything in one place, or depend on `gasd-core` and `gasd-features`
//! directly.
//!
//! ## Quick Start
//!
//! ```rust
//! use gasd::prelude::*;
//!
//! let cloud = PointCloud::from_points(vec![
//!     Point3f::new(0.0, 0.0, 0.0),
//!     Point3f::new(2.0, 0.0, 0.0),
//!     Point3f::new(0.0, 1.0, 0.0),
//!     Point3f::new(0.0, 0.0, 0.5),
//! ]);
//!
//! let descriptor = cloud.gasd(&GasdConfig::shape_only()).unwrap();
//! assert_eq!(descriptor.len(), 512);
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables `features`
//! - `features`: Alignment and descriptor estimation

// Re-export core functionality
pub use gasd_core::*;

// Re-export sub-crates
#[cfg(feature = "features")]
pub use gasd_features as features;

/// Convenient imports for common use cases
pub mod prelude {
    pub use gasd_core::*;

    #[cfg(feature = "features")]
    pub use gasd_features::{
        AxisDisambiguation, GasdConfig, GasdDescriptor, GasdEstimator, GlobalDescriptor,
        HistogramConfig, Interpolation,
    };
}
