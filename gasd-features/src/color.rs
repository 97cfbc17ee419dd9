//! Color histogram of an aligned point cloud
//!
//! Uses the same origin-centred grid as the shape block, usually coarser, with
//! a hue histogram in every cell. The hue axis is circular: a hue just below
//! 360 degrees and one just above 0 share weight across the wrap.

use crate::config::HistogramConfig;
use crate::histogram::{AxisBoundary, GridHistogram};
use crate::shape::CanonicalCloud;
use gasd_core::{rgb_to_hue, Error, PointSample, Result};

/// Continuous hue bin coordinate in `[0, hue_bins)`
#[inline]
pub fn hue_coord(rgb: [u8; 3], hue_bins: usize) -> f32 {
    rgb_to_hue(rgb) / 360.0 * hue_bins as f32
}

/// Build the color histogram block
///
/// `points` are the input samples in the same order as `cloud`. Every sample
/// must carry a color.
///
/// # Returns
/// * `Result<GridHistogram>` - Histogram with dimensions `[x, y, z, hue]`
///   rescaled to `normalization`, or `InvalidConfiguration` when a sample has
///   no color
pub fn color_histogram<P: PointSample>(
    cloud: &CanonicalCloud,
    points: &[P],
    config: &HistogramConfig,
    normalization: f32,
) -> Result<GridHistogram> {
    if points.len() != cloud.len() {
        return Err(Error::InvalidData(format!(
            "{} colored samples for {} canonical points",
            points.len(),
            cloud.len()
        )));
    }

    let mut histogram = GridHistogram::new(&config.dims()).with_boundary(3, AxisBoundary::Wrap);
    let spatial = cloud.has_extent() && config.interpolation.spatial();
    let interpolate = [spatial, spatial, spatial, config.interpolation.extra_axis()];

    for (index, (point, sample)) in cloud.points().iter().zip(points).enumerate() {
        let rgb = sample.color().ok_or_else(|| {
            Error::InvalidConfiguration(format!(
                "color descriptor requested but point {} has no color",
                index
            ))
        })?;

        let [x, y, z] = cloud.grid_coords(point, config.half_grid_size);
        let hue = hue_coord(rgb, config.hists_size);
        histogram.add(&[x, y, z, hue], &interpolate, 1.0);
    }

    histogram.normalize(normalization);
    log::debug!(
        "Color histogram: {} samples into {} bins ({:?})",
        cloud.len(),
        histogram.len(),
        config.interpolation
    );

    Ok(histogram)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Interpolation;
    use approx::assert_relative_eq;
    use gasd_core::{ColoredPoint3f, Point3f};

    fn colored(points: &[([f32; 3], [u8; 3])]) -> (CanonicalCloud, Vec<ColoredPoint3f>) {
        let samples: Vec<ColoredPoint3f> = points
            .iter()
            .map(|&([x, y, z], c)| ColoredPoint3f::new(x, y, z, c))
            .collect();
        let cloud = CanonicalCloud::from_canonical(samples.iter().map(|p| p.position).collect());
        (cloud, samples)
    }

    #[test]
    fn test_hue_coord() {
        assert_eq!(hue_coord([255, 0, 0], 12), 0.0);
        assert_relative_eq!(hue_coord([0, 255, 0], 12), 4.0);
        assert_relative_eq!(hue_coord([0, 0, 255], 12), 8.0);
        assert_relative_eq!(hue_coord([0, 255, 255], 4), 2.0);
    }

    #[test]
    fn test_hues_land_in_their_bins() {
        let (cloud, samples) = colored(&[
            ([-1.0, -1.0, -1.0], [255, 0, 0]),
            ([1.0, 1.0, 1.0], [0, 0, 255]),
        ]);
        let config = HistogramConfig::new(1, 12, Interpolation::None);
        let h = color_histogram(&cloud, &samples, &config, 100.0).unwrap();

        assert_eq!(h.len(), 8 * 12);
        assert_relative_eq!(h.get(&[0, 0, 0, 0]), 50.0, epsilon = 1e-4);
        assert_relative_eq!(h.get(&[1, 1, 1, 8]), 50.0, epsilon = 1e-4);
        assert_relative_eq!(h.total(), 100.0, epsilon = 1e-4);
    }

    #[test]
    fn test_hue_axis_wraps() {
        // pure red sits at hue coordinate 0, half a bin before the first
        // centre, so interpolation shares its weight with the last hue bin
        let (cloud, samples) = colored(&[([0.5, 0.5, 0.5], [255, 0, 0]), ([-0.5, -0.5, -0.5], [255, 0, 0])]);
        let config = HistogramConfig::new(1, 6, Interpolation::Quadrilinear);
        let h = color_histogram(&cloud, &samples, &config, 2.0).unwrap();

        let hue_mass = |bin: usize| -> f32 {
            let mut sum = 0.0;
            for i in 0..2 {
                for j in 0..2 {
                    for k in 0..2 {
                        sum += h.get(&[i, j, k, bin]);
                    }
                }
            }
            sum
        };
        assert_relative_eq!(hue_mass(0), 1.0, epsilon = 1e-5);
        assert_relative_eq!(hue_mass(5), 1.0, epsilon = 1e-5);
        assert_relative_eq!(h.total(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_collapsed_cloud_keeps_single_spatial_cell() {
        let (cloud, samples) = colored(&[([0.0, 0.0, 0.0], [0, 255, 0]), ([0.0, 0.0, 0.0], [0, 255, 0])]);
        let config = HistogramConfig::new(2, 12, Interpolation::Trilinear);
        let h = color_histogram(&cloud, &samples, &config, 100.0).unwrap();
        assert_relative_eq!(h.get(&[2, 2, 2, 4]), 100.0, epsilon = 1e-4);
        assert_eq!(h.bins().iter().filter(|&&v| v != 0.0).count(), 1);
    }

    #[test]
    fn test_missing_color_is_rejected() {
        let points = vec![Point3f::new(0.0, 0.0, 0.0), Point3f::new(1.0, 0.0, 0.0)];
        let cloud = CanonicalCloud::from_canonical(points.clone());
        let config = HistogramConfig::new(2, 12, Interpolation::None);
        let result = color_histogram(&cloud, &points, &config, 100.0);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let (cloud, samples) = colored(&[([0.0, 0.0, 1.0], [10, 20, 30])]);
        let config = HistogramConfig::new(2, 12, Interpolation::None);
        let result = color_histogram(&cloud, &samples[..0], &config, 100.0);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
