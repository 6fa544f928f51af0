use nalgebra::{Point2, Scalar};
use num_traits::{FromPrimitive, Num};
use serde::{Deserialize, Serialize};

use crate::cartesian::CartesianPoint2d;

/// Axis aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect<N = f64> {
    /// Minimum x
    pub x_min: N,
    /// Minimum y
    pub y_min: N,
    /// Maximum x
    pub x_max: N,
    /// Maximum y
    pub y_max: N,
}

impl<N: Num + Copy + PartialOrd + Scalar + FromPrimitive> Rect<N> {
    /// Creates a new rectangle.
    pub fn new(x_min: N, y_min: N, x_max: N, y_max: N) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Bounding rectangle of the points. Returns `None` for an empty iterator.
    pub fn from_points<'a, P: CartesianPoint2d<Num = N> + 'a>(
        mut points: impl Iterator<Item = &'a P>,
    ) -> Option<Self> {
        let first = points.next()?;
        let mut x_min = first.x();
        let mut y_min = first.y();
        let mut x_max = first.x();
        let mut y_max = first.y();

        for p in points {
            if x_min > p.x() {
                x_min = p.x();
            }
            if y_min > p.y() {
                y_min = p.y();
            }
            if x_max < p.x() {
                x_max = p.x();
            }
            if y_max < p.y() {
                y_max = p.y();
            }
        }

        Some(Self {
            x_min,
            y_min,
            x_max,
            y_max,
        })
    }

    /// Whether the point is inside the rectangle or on its border.
    pub fn contains(&self, point: &impl CartesianPoint2d<Num = N>) -> bool {
        self.x_min <= point.x()
            && self.x_max >= point.x()
            && self.y_min <= point.y()
            && self.y_max >= point.y()
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point2<N> {
        let two = N::one() + N::one();
        Point2::new(
            (self.x_min + self.x_max) / two,
            (self.y_min + self.y_max) / two,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points() {
        let points = [
            Point2::new(1.0, 5.0),
            Point2::new(-3.0, 2.0),
            Point2::new(4.0, -1.0),
        ];
        let rect = Rect::from_points(points.iter()).unwrap();
        assert_eq!(rect, Rect::new(-3.0, -1.0, 4.0, 5.0));
        assert_eq!(rect.center(), Point2::new(0.5, 2.0));
        assert!(rect.contains(&Point2::new(4.0, 5.0)));
        assert!(!rect.contains(&Point2::new(4.1, 5.0)));

        assert_eq!(Rect::<f64>::from_points(Vec::<Point2<f64>>::new().iter()), None);
    }
}
