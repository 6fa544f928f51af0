//! Immutable 2d/3d point with an optional CRS tag.

use approx::AbsDiffEq;
use nalgebra::{Point2, Point3};

use crate::cartesian::CartesianPoint2d;
use crate::error::GeometryError;
use crate::geo::CrsRef;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Ordinates {
    Xy(Point2<f64>),
    Xyz(Point3<f64>),
}

/// A position given by 2 or 3 ordinates, optionally tagged with the CRS the ordinates are expressed in.
///
/// The number of ordinates (coordinate dimension) is fixed at construction. Points are never mutated, operations
/// that need a different point produce a new one.
///
/// Equality compares the ordinates and the CRS tags. Comparing two differently spelled CRS references may trigger
/// their resolution, see [`CrsRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    ordinates: Ordinates,
    crs: Option<CrsRef>,
}

impl Point {
    /// Creates a 2d point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            ordinates: Ordinates::Xy(Point2::new(x, y)),
            crs: None,
        }
    }

    /// Creates a 3d point.
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            ordinates: Ordinates::Xyz(Point3::new(x, y, z)),
            crs: None,
        }
    }

    /// Creates a point from a slice of 2 or 3 ordinates.
    pub fn from_ordinates(ordinates: &[f64]) -> Result<Self, GeometryError> {
        match *ordinates {
            [x, y] => Ok(Self::new(x, y)),
            [x, y, z] => Ok(Self::new_3d(x, y, z)),
            _ => Err(GeometryError::OrdinateCount(ordinates.len())),
        }
    }

    /// Returns the same position tagged with the given CRS.
    pub fn with_crs(self, crs: CrsRef) -> Self {
        Self {
            crs: Some(crs),
            ..self
        }
    }

    /// Returns the same position tagged with the given optional CRS.
    pub fn with_optional_crs(self, crs: Option<CrsRef>) -> Self {
        Self { crs, ..self }
    }

    /// CRS the ordinates are expressed in, if known.
    pub fn crs(&self) -> Option<&CrsRef> {
        self.crs.as_ref()
    }

    /// Number of ordinates, 2 or 3.
    pub fn coordinate_dimension(&self) -> usize {
        match self.ordinates {
            Ordinates::Xy(_) => 2,
            Ordinates::Xyz(_) => 3,
        }
    }

    /// First ordinate.
    pub fn x(&self) -> f64 {
        match &self.ordinates {
            Ordinates::Xy(p) => p.x,
            Ordinates::Xyz(p) => p.x,
        }
    }

    /// Second ordinate.
    pub fn y(&self) -> f64 {
        match &self.ordinates {
            Ordinates::Xy(p) => p.y,
            Ordinates::Xyz(p) => p.y,
        }
    }

    /// Third ordinate of a 3d point.
    pub fn z(&self) -> Option<f64> {
        match &self.ordinates {
            Ordinates::Xy(_) => None,
            Ordinates::Xyz(p) => Some(p.z),
        }
    }

    /// Ordinate with the given index.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.ordinates().get(index).copied()
    }

    /// All ordinates in axis order.
    pub fn ordinates(&self) -> &[f64] {
        match &self.ordinates {
            Ordinates::Xy(p) => p.coords.as_slice(),
            Ordinates::Xyz(p) => p.coords.as_slice(),
        }
    }

    /// Planar part of the position.
    pub fn xy(&self) -> Point2<f64> {
        Point2::new(self.x(), self.y())
    }

    /// Whether all ordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.ordinates().iter().all(|v| v.is_finite())
    }

    /// Whether both points have exactly the same ordinates, ignoring the CRS tags.
    pub fn same_position(&self, other: &Point) -> bool {
        self.ordinates == other.ordinates
    }
}

impl CartesianPoint2d for Point {
    type Num = f64;

    fn x(&self) -> f64 {
        Point::x(self)
    }

    fn y(&self) -> f64 {
        Point::y(self)
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.coordinate_dimension() == other.coordinate_dimension()
            && self
                .ordinates()
                .iter()
                .zip(other.ordinates())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

/// Creates a new [`Point`] from 2 or 3 ordinates.
///
/// ```
/// use orbis_types::pt;
///
/// let point = pt!(1.0, 2.0);
/// assert_eq!(point.coordinate_dimension(), 2);
///
/// let point = pt!(1.0, 2.0, 3.0);
/// assert_eq!(point.z(), Some(3.0));
/// ```
#[macro_export]
macro_rules! pt {
    ($x:expr, $y:expr) => {
        $crate::Point::new($x, $y)
    };
    ($x:expr, $y:expr, $z:expr) => {
        $crate::Point::new_3d($x, $y, $z)
    };
}
