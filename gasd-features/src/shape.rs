//! Shape histogram of an aligned point cloud
//!
//! Canonical points are binned on a cubic grid centred on the origin. The cube
//! half edge is the largest absolute canonical coordinate, so the whole cloud
//! spans the grid regardless of its scale. Each grid cell additionally holds a
//! small histogram of the sample distance to the origin, taken modulo one grid
//! step.

use crate::alignment::Alignment;
use crate::config::HistogramConfig;
use crate::histogram::GridHistogram;
use gasd_core::{Point3f, PointSample};

/// A point cloud expressed in its canonical frame together with the extents
/// used to normalize bin coordinates
#[derive(Debug, Clone)]
pub struct CanonicalCloud {
    points: Vec<Point3f>,
    max_coord: f32,
    max_distance: f32,
}

impl CanonicalCloud {
    /// Transform every point into the canonical frame of `alignment`
    pub fn new<P: PointSample>(alignment: &Alignment, points: &[P]) -> Self {
        let points: Vec<Point3f> = points
            .iter()
            .map(|p| alignment.apply(&p.position()))
            .collect();
        Self::from_canonical(points)
    }

    /// Wrap points that are already in a canonical frame
    pub fn from_canonical(points: Vec<Point3f>) -> Self {
        let max_coord = points.iter().map(|p| p.coords.amax()).fold(0.0f32, f32::max);
        let max_distance = points
            .iter()
            .map(|p| p.coords.norm())
            .fold(0.0f32, f32::max);

        Self {
            points,
            max_coord,
            max_distance,
        }
    }

    pub fn points(&self) -> &[Point3f] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Half edge of the origin-centred cube enclosing the cloud
    pub fn max_coord(&self) -> f32 {
        self.max_coord
    }

    /// Largest distance of a point to the origin
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Whether the points span any volume around the origin
    ///
    /// Without an extent every point sits on the grid centre, which is a cell
    /// corner; accumulation then uses the nearest bin so the mass lands in a
    /// single cell.
    pub fn has_extent(&self) -> bool {
        self.max_coord > 0.0
    }

    /// Continuous grid coordinates of a canonical point, each in
    /// `[0, 2 * half_grid_size]`
    pub fn grid_coords(&self, point: &Point3f, half_grid_size: usize) -> [f32; 3] {
        let h = half_grid_size as f32;
        if self.max_coord <= 0.0 {
            return [h; 3];
        }
        let scale = h / self.max_coord;
        [point.x * scale + h, point.y * scale + h, point.z * scale + h]
    }

    /// Continuous radial bin coordinate of a canonical point in
    /// `[0, hists_size)`
    ///
    /// The distance to the origin is measured in grid steps and only its
    /// fractional part is kept, so the radial bins describe where the sample
    /// sits between two grid-step shells.
    pub fn radial_coord(&self, point: &Point3f, half_grid_size: usize, hists_size: usize) -> f32 {
        if self.max_distance <= 0.0 {
            return 0.0;
        }
        let grid_step = self.max_distance / half_grid_size as f32;
        let steps = point.coords.norm() / grid_step;
        steps.fract() * hists_size as f32
    }
}

/// Build the shape histogram block
///
/// Every canonical point contributes a unit weight spread according to the
/// configured interpolation; the block is then rescaled to `normalization`.
/// Dimensions are `[x, y, z, radial]`, flattened with the radial bin varying
/// fastest.
pub fn shape_histogram(cloud: &CanonicalCloud, config: &HistogramConfig, normalization: f32) -> GridHistogram {
    let mut histogram = GridHistogram::new(&config.dims());
    let spread = cloud.has_extent();
    let spatial = spread && config.interpolation.spatial();
    let interpolate = [spatial, spatial, spatial, spread && config.interpolation.extra_axis()];

    for point in cloud.points() {
        let [x, y, z] = cloud.grid_coords(point, config.half_grid_size);
        let r = cloud.radial_coord(point, config.half_grid_size, config.hists_size);
        histogram.add(&[x, y, z, r], &interpolate, 1.0);
    }

    histogram.normalize(normalization);
    log::debug!(
        "Shape histogram: {} samples into {} bins ({:?})",
        cloud.len(),
        histogram.len(),
        config.interpolation
    );

    histogram
}
