use serde::{Deserialize, Serialize};

use crate::cartesian::CartesianPoint2d;

/// Absolute value of [`Orientation::signed_area`] below which three points are considered collinear.
///
/// Every collinearity and winding decision on point triplets must go through [`Orientation`] so that the two never
/// disagree for near-degenerate input.
pub const COLLINEARITY_TOLERANCE: f64 = 1e-12;

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Signed area of the triangle `p0, p1, p2` in trapezoid form.
    ///
    /// Negative for clockwise triplets, positive for counterclockwise ones.
    pub fn signed_area(
        p0: &impl CartesianPoint2d<Num = f64>,
        p1: &impl CartesianPoint2d<Num = f64>,
        p2: &impl CartesianPoint2d<Num = f64>,
    ) -> f64 {
        (p2.x() - p0.x()) * ((p2.y() + p0.y()) / 2.0)
            + (p1.x() - p2.x()) * ((p1.y() + p2.y()) / 2.0)
            + (p0.x() - p1.x()) * ((p0.y() + p1.y()) / 2.0)
    }

    /// Classifies a value returned by [`Orientation::signed_area`].
    pub fn from_signed_area(area: f64) -> Self {
        if area.abs() < COLLINEARITY_TOLERANCE {
            Self::Collinear
        } else if area < 0.0 {
            Self::Clockwise
        } else {
            Self::Counterclockwise
        }
    }

    /// Determines orientation of a triplet of points.
    pub fn triplet(
        p0: &impl CartesianPoint2d<Num = f64>,
        p1: &impl CartesianPoint2d<Num = f64>,
        p2: &impl CartesianPoint2d<Num = f64>,
    ) -> Self {
        Self::from_signed_area(Self::signed_area(p0, p1, p2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn triplet() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);

        assert_eq!(Orientation::triplet(&a, &b, &c), Orientation::Counterclockwise);
        assert_eq!(Orientation::triplet(&a, &c, &b), Orientation::Clockwise);
        assert_eq!(
            Orientation::triplet(&a, &Point2::new(1.0, 1.0), &Point2::new(2.0, 2.0)),
            Orientation::Collinear
        );
    }

    #[test]
    fn signed_area_is_the_triangle_area() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        let c = Point2::new(0.0, 2.0);

        assert_eq!(Orientation::signed_area(&a, &b, &c), 2.0);
        assert_eq!(Orientation::signed_area(&a, &c, &b), -2.0);
    }

    #[test]
    fn tolerance_boundary() {
        assert_eq!(Orientation::from_signed_area(5e-13), Orientation::Collinear);
        assert_eq!(Orientation::from_signed_area(-5e-13), Orientation::Collinear);
        assert_eq!(
            Orientation::from_signed_area(2e-12),
            Orientation::Counterclockwise
        );
        assert_eq!(Orientation::from_signed_area(-2e-12), Orientation::Clockwise);
    }
}
