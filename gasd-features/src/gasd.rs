//! Globally Aligned Spatial Distribution (GASD) descriptor
//!
//! A GASD descriptor summarizes a whole point cloud. The cloud is first moved
//! into a canonical frame (see [`crate::alignment`]), then its points are
//! binned on a cubic grid. The shape block counts points per cell and radial
//! shell; the optional color block counts hues per cell. Both blocks are
//! rescaled to a fixed sum, which makes the descriptor independent of the
//! number of points.

use crate::alignment::{estimate_alignment, Alignment};
use crate::color::color_histogram;
use crate::config::GasdConfig;
use crate::shape::{shape_histogram, CanonicalCloud};
use gasd_core::{Error, PointCloud, PointSample, Result, Transform3D};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A computed GASD descriptor together with the alignment it was built in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GasdDescriptor {
    histogram: Vec<f32>,
    shape_len: usize,
    transform: Transform3D,
    degenerate: bool,
}

impl GasdDescriptor {
    /// Full descriptor: shape block followed by the color block if any
    pub fn histogram(&self) -> &[f32] {
        &self.histogram
    }

    pub fn shape_histogram(&self) -> &[f32] {
        &self.histogram[..self.shape_len]
    }

    /// Color block, `None` when the descriptor was computed without color
    pub fn color_histogram(&self) -> Option<&[f32]> {
        if self.histogram.len() > self.shape_len {
            Some(&self.histogram[self.shape_len..])
        } else {
            None
        }
    }

    /// World to canonical frame transform
    pub fn transform(&self) -> &Transform3D {
        &self.transform
    }

    /// Whether the alignment fell back to the identity rotation
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn len(&self) -> usize {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.is_empty()
    }

    /// L1 distance to another descriptor of the same layout
    pub fn distance(&self, other: &GasdDescriptor) -> Result<f32> {
        if self.len() != other.len() || self.shape_len != other.shape_len {
            return Err(Error::InvalidData(format!(
                "descriptor layouts differ: {} (shape {}) vs {} (shape {})",
                self.len(),
                self.shape_len,
                other.len(),
                other.shape_len
            )));
        }

        Ok(self
            .histogram
            .iter()
            .zip(&other.histogram)
            .map(|(a, b)| (a - b).abs())
            .sum())
    }

    /// Consume the descriptor, returning the histogram values
    pub fn into_vec(self) -> Vec<f32> {
        self.histogram
    }
}

/// GASD descriptor estimator
///
/// Holds only its configuration, so one estimator can be shared between
/// threads and reused for any number of clouds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GasdEstimator {
    config: GasdConfig,
}

impl GasdEstimator {
    pub fn new(config: GasdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GasdConfig {
        &self.config
    }

    /// Number of values every descriptor from this estimator holds
    pub fn descriptor_len(&self) -> usize {
        self.config.descriptor_len()
    }

    /// Estimate the canonical alignment `compute` would use for `points`
    pub fn estimate_transform<P: PointSample>(&self, points: &[P]) -> Result<Alignment> {
        self.config.validate()?;
        estimate_alignment(points, &self.config.disambiguation)
    }

    /// Compute the descriptor of a point set
    ///
    /// # Arguments
    /// * `points` - Input samples; they must carry colors when the color block
    ///   is enabled
    ///
    /// # Returns
    /// * `Result<GasdDescriptor>` - Descriptor of length `descriptor_len()`,
    ///   `EmptyInput` for an empty set, `InvalidConfiguration` for invalid
    ///   settings or missing colors
    pub fn compute<P: PointSample>(&self, points: &[P]) -> Result<GasdDescriptor> {
        self.config.validate()?;
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.config.color.is_some() {
            if let Some(index) = points.iter().position(|p| p.color().is_none()) {
                return Err(Error::InvalidConfiguration(format!(
                    "color descriptor requested but point {} has no color",
                    index
                )));
            }
        }

        let alignment = estimate_alignment(points, &self.config.disambiguation)?;
        let cloud = CanonicalCloud::new(&alignment, points);

        let mut histogram = Vec::with_capacity(self.descriptor_len());
        histogram.extend(shape_histogram(&cloud, &self.config.shape, self.config.normalization).into_vec());
        let shape_len = histogram.len();

        if let Some(color) = &self.config.color {
            let block = color_histogram(&cloud, points, color, self.config.normalization)?;
            histogram.extend(block.into_vec());
        }

        log::debug!(
            "GASD descriptor: {} points, {} values, degenerate: {}",
            points.len(),
            histogram.len(),
            alignment.degenerate
        );

        Ok(GasdDescriptor {
            histogram,
            shape_len,
            transform: alignment.transform,
            degenerate: alignment.degenerate,
        })
    }

    /// Compute the descriptor of a point cloud
    pub fn compute_cloud<P: PointSample>(&self, cloud: &PointCloud<P>) -> Result<GasdDescriptor> {
        self.compute(cloud.as_slice())
    }

    /// Compute descriptors of independent clouds in parallel
    ///
    /// Results keep the order of `clouds`; a failure for one cloud does not
    /// affect the others.
    pub fn compute_batch<P: PointSample + Sync>(&self, clouds: &[PointCloud<P>]) -> Vec<Result<GasdDescriptor>> {
        clouds
            .par_iter()
            .map(|cloud| self.compute_cloud(cloud))
            .collect()
    }
}

/// Global descriptor computation for point clouds
pub trait GlobalDescriptor {
    /// Compute the GASD descriptor of this cloud with `config`
    fn gasd(&self, config: &GasdConfig) -> Result<GasdDescriptor>;
}

impl<P: PointSample> GlobalDescriptor for PointCloud<P> {
    fn gasd(&self, config: &GasdConfig) -> Result<GasdDescriptor> {
        GasdEstimator::new(config.clone()).compute_cloud(self)
    }
}
