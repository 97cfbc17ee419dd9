//! Core traits for gasd

use crate::point::*;

/// Read-only access to the attributes a global descriptor needs from a point
///
/// Any point representation can feed the estimators by exposing its position
/// and, optionally, an RGB color.
pub trait PointSample {
    /// Position of the point
    fn position(&self) -> Point3f;

    /// RGB color of the point, if the representation carries one
    fn color(&self) -> Option<[u8; 3]> {
        None
    }
}

impl PointSample for Point3f {
    #[inline]
    fn position(&self) -> Point3f {
        *self
    }
}

impl PointSample for ColoredPoint3f {
    #[inline]
    fn position(&self) -> Point3f {
        self.position
    }

    #[inline]
    fn color(&self) -> Option<[u8; 3]> {
        Some(self.color)
    }
}

impl PointSample for [f32; 3] {
    #[inline]
    fn position(&self) -> Point3f {
        Point3f::new(self[0], self[1], self[2])
    }
}

impl<T: PointSample> PointSample for &T {
    #[inline]
    fn position(&self) -> Point3f {
        (**self).position()
    }

    #[inline]
    fn color(&self) -> Option<[u8; 3]> {
        (**self).color()
    }
}
