//! 3D rigid transformation utilities

use nalgebra::{Isometry3, Matrix3, Matrix4, Point3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// A 4x4 homogeneous transformation applied to points and point clouds
///
/// Descriptor alignment always produces a rigid transform: the upper-left 3x3
/// block is a rotation and the bottom row is `[0, 0, 0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub matrix: Matrix4<f32>,
}

impl Transform3D {
    /// Create an identity transformation
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a transformation from translation and rotation
    pub fn from_translation_rotation(
        translation: Vector3<f32>,
        rotation: UnitQuaternion<f32>,
    ) -> Self {
        let isometry = Isometry3::from_parts(translation.into(), rotation);
        Self {
            matrix: isometry.to_homogeneous(),
        }
    }

    /// Create a transformation from a rotation matrix and a translation vector
    ///
    /// Points are mapped as `p' = R p + t`.
    pub fn from_rotation_matrix(rotation: &Matrix3<f32>, translation: &Vector3<f32>) -> Self {
        let mut matrix = Matrix4::identity();
        matrix.fixed_view_mut::<3, 3>(0, 0).copy_from(rotation);
        matrix.fixed_view_mut::<3, 1>(0, 3).copy_from(translation);
        Self { matrix }
    }

    /// Upper-left 3x3 block
    pub fn rotation_matrix(&self) -> Matrix3<f32> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }

    /// Translation column
    pub fn translation_vector(&self) -> Vector3<f32> {
        self.matrix.fixed_view::<3, 1>(0, 3).into_owned()
    }

    /// Apply the transformation to a point
    pub fn transform_point(&self, point: &Point3<f32>) -> Point3<f32> {
        let homogeneous = self.matrix * point.to_homogeneous();
        Point3::from_homogeneous(homogeneous).unwrap_or(*point)
    }

    /// Check that the rotation block is orthonormal, right handed, and the
    /// bottom row is `[0, 0, 0, 1]`
    pub fn is_rigid(&self, epsilon: f32) -> bool {
        let r = self.rotation_matrix();
        let orthonormal = (r * r.transpose() - Matrix3::identity()).amax() <= epsilon;
        let right_handed = (r.determinant() - 1.0).abs() <= epsilon;
        let bottom = self.matrix.row(3);
        let affine = bottom[0] == 0.0 && bottom[1] == 0.0 && bottom[2] == 0.0 && bottom[3] == 1.0;
        orthonormal && right_handed && affine
    }

    /// The 16 entries in row-major order
    pub fn to_row_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, row) in self.matrix.row_iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                out[i * 4 + j] = *value;
            }
        }
        out
    }
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_row_major_layout() {
        let t = Transform3D::from_rotation_matrix(&Matrix3::identity(), &Vector3::new(1.0, 2.0, 3.0));
        let m = t.to_row_major();
        assert_eq!(m[3], 1.0);
        assert_eq!(m[7], 2.0);
        assert_eq!(m[11], 3.0);
        assert_eq!(&m[12..], &[0.0f32, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_from_rotation_matrix_parts() {
        let q = UnitQuaternion::from_euler_angles(0.3, -0.2, 1.1);
        let r = *q.to_rotation_matrix().matrix();
        let t = Vector3::new(0.5, -1.0, 2.0);
        let transform = Transform3D::from_rotation_matrix(&r, &t);

        assert_eq!(transform.rotation_matrix(), r);
        assert_eq!(transform.translation_vector(), t);
        assert!(transform.is_rigid(1e-5));
        assert_relative_eq!(
            transform.matrix,
            Transform3D::from_translation_rotation(t, q).matrix,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_transform_point() {
        let q = UnitQuaternion::from_euler_angles(0.0, 0.0, std::f32::consts::FRAC_PI_2);
        let transform = Transform3D::from_translation_rotation(Vector3::new(0.0, 0.0, 1.0), q);
        let p = transform.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_identity_is_rigid() {
        assert!(Transform3D::default().is_rigid(0.0));
        assert_eq!(Transform3D::default(), Transform3D::identity());
    }

    #[test]
    fn test_non_rigid_blocks() {
        let mut reflection = Matrix3::identity();
        reflection[(2, 2)] = -1.0;
        assert!(!Transform3D::from_rotation_matrix(&reflection, &Vector3::zeros()).is_rigid(1e-5));

        let scaling = Matrix3::identity() * 2.0;
        assert!(!Transform3D::from_rotation_matrix(&scaling, &Vector3::zeros()).is_rigid(1e-5));
    }
}
