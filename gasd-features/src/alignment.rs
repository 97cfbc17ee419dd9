//! Reference frame estimation for global descriptors
//!
//! The frame is centred on the cloud centroid with axes along the principal
//! directions of the scatter matrix, ordered by decreasing variance. Signs are
//! fixed by [`AxisDisambiguation`] so the same shape always lands in the same
//! canonical pose.

use crate::config::AxisDisambiguation;
use gasd_core::{Error, Point3f, PointSample, Result, Transform3D};
use nalgebra::{Matrix3, Point3, Vector3};

/// Smallest/largest eigenvalue ratio below which the scatter matrix is
/// treated as rank deficient
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Rigid alignment of a point cloud onto its canonical frame
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// World to canonical frame transform
    pub transform: Transform3D,
    /// Cloud centroid in world coordinates
    pub centroid: Point3f,
    /// Scatter matrix eigenvalues in decreasing order
    pub eigenvalues: [f64; 3],
    /// Set when the principal axes are ill-defined and the rotation fell back
    /// to identity
    pub degenerate: bool,
    rotation: Matrix3<f64>,
    center: Point3<f64>,
}

impl Alignment {
    /// Rotation block of the transform; rows are the canonical axes in world
    /// coordinates
    pub fn rotation(&self) -> Matrix3<f32> {
        self.rotation.cast::<f32>()
    }

    /// Map a world point into the canonical frame
    ///
    /// Computed in double precision; agrees with `transform` up to `f32`
    /// rounding.
    pub fn apply(&self, point: &Point3f) -> Point3f {
        let p = self.rotation * (point.cast::<f64>() - self.center);
        Point3f::new(p.x as f32, p.y as f32, p.z as f32)
    }

    fn new(rotation: Matrix3<f64>, center: Point3<f64>, eigenvalues: [f64; 3], degenerate: bool) -> Self {
        let translation = -(rotation * center.coords);
        let transform =
            Transform3D::from_rotation_matrix(&rotation.cast::<f32>(), &translation.cast::<f32>());

        Self {
            transform,
            centroid: center.cast::<f32>(),
            eigenvalues,
            degenerate,
            rotation,
            center,
        }
    }
}

/// Centroid of the point positions, accumulated in double precision
pub(crate) fn centroid<P: PointSample>(points: &[P]) -> Point3<f64> {
    let sum = points
        .iter()
        .fold(Vector3::<f64>::zeros(), |acc, p| acc + p.position().coords.cast::<f64>());
    Point3::from(sum / points.len() as f64)
}

/// Scatter matrix `sum (p - c)(p - c)^T` of the point positions
pub(crate) fn scatter_matrix<P: PointSample>(points: &[P], centroid: &Point3<f64>) -> Matrix3<f64> {
    let mut scatter = Matrix3::zeros();
    for point in points {
        let d = point.position().cast::<f64>() - centroid;
        scatter += d * d.transpose();
    }
    scatter
}

/// Third moment of the cloud projected on `axis`
fn projected_skewness<P: PointSample>(points: &[P], centroid: &Point3<f64>, axis: &Vector3<f64>) -> f64 {
    points
        .iter()
        .map(|p| {
            let t = (p.position().cast::<f64>() - centroid).dot(axis);
            t * t * t
        })
        .sum()
}

/// Estimate the canonical frame of a point cloud
///
/// # Arguments
/// * `points` - Input points, at least one
/// * `disambiguation` - How the signs of the principal axes are chosen
///
/// # Returns
/// * `Result<Alignment>` - The world to canonical transform; `degenerate` is
///   set (and the rotation is the identity) when the cloud has fewer than two
///   points or its scatter matrix is rank deficient
pub fn estimate_alignment<P: PointSample>(
    points: &[P],
    disambiguation: &AxisDisambiguation,
) -> Result<Alignment> {
    if points.is_empty() {
        return Err(Error::EmptyInput);
    }

    let center = centroid(points);
    if points.len() < 2 {
        log::warn!("Degenerate alignment: a single point has no principal axes");
        return Ok(Alignment::new(Matrix3::identity(), center, [0.0; 3], true));
    }

    let scatter = scatter_matrix(points, &center);
    let eigen = scatter.symmetric_eigen();

    // order eigenpairs by decreasing eigenvalue
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));
    let eigenvalues = order.map(|i| eigen.eigenvalues[i]);

    let largest = eigenvalues[0];
    let smallest = eigenvalues[2];
    if largest <= 0.0 || smallest <= RANK_TOLERANCE * largest {
        log::warn!(
            "Degenerate alignment: rank deficient scatter matrix (eigenvalues {:?}), using identity rotation",
            eigenvalues
        );
        return Ok(Alignment::new(Matrix3::identity(), center, eigenvalues, true));
    }

    let mut axes = order.map(|i| eigen.eigenvectors.column(i).normalize());

    match disambiguation {
        AxisDisambiguation::Skewness => {
            let mut moments = [0.0f64; 3];
            for (axis, moment) in axes.iter_mut().zip(moments.iter_mut()) {
                *moment = projected_skewness(points, &center, axis);
                if *moment < 0.0 {
                    *axis = -*axis;
                }
            }

            // restore a right-handed frame by flipping the axis whose sign
            // decision is least reliable (smallest normalized third moment)
            if axes[0].dot(&axes[1].cross(&axes[2])) < 0.0 {
                let reliability = |k: usize| moments[k].abs() / eigenvalues[k].powf(1.5);
                let mut weakest = 2;
                for k in (0..2).rev() {
                    if reliability(k) < reliability(weakest) {
                        weakest = k;
                    }
                }
                axes[weakest] = -axes[weakest];
            }
        }
        AxisDisambiguation::ViewDirection { direction } => {
            let view = Vector3::new(direction[0] as f64, direction[1] as f64, direction[2] as f64);
            if axes[2].dot(&view) > 0.0 {
                axes[2] = -axes[2];
            }
            if projected_skewness(points, &center, &axes[0]) < 0.0 {
                axes[0] = -axes[0];
            }
            axes[1] = axes[2].cross(&axes[0]);
        }
    }

    let rotation = Matrix3::from_rows(&[axes[0].transpose(), axes[1].transpose(), axes[2].transpose()]);
    log::debug!(
        "Alignment estimated from {} points, eigenvalues {:?}",
        points.len(),
        eigenvalues
    );

    Ok(Alignment::new(rotation, center, eigenvalues, false))
}
