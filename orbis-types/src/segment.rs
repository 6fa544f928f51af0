//! Curve segments: the typed pieces a [`Curve`](crate::Curve) is made of.
//!
//! Only straight line strings and three point arcs (including full circles and strings of arcs) have dedicated
//! variants. Every other interpolation known to GML is carried as [`CurveSegment::Unsupported`] so that consumers
//! have to reject it explicitly instead of silently approximating it.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::cartesian::Rect;
use crate::error::GeometryError;
use crate::point::Point;

/// Interpolation type of a curve segment.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentType {
    /// Straight lines between consecutive control points.
    LineStringSegment,
    /// Circular arc through three control points.
    Arc,
    /// Full circle through three control points.
    Circle,
    /// Sequence of circular arcs sharing their end points.
    ArcString,
    /// Arc given by end points and bulge.
    ArcByBulge,
    /// Arc given by center, radius and angles.
    ArcByCenterPoint,
    /// Sequence of arcs given by bulges.
    ArcStringByBulge,
    /// Bezier curve.
    Bezier,
    /// B-spline.
    BSpline,
    /// Circle given by center and radius.
    CircleByCenterPoint,
    /// Clothoid.
    Clothoid,
    /// Cubic spline.
    CubicSpline,
    /// Geodesic between two points.
    Geodesic,
    /// Sequence of geodesics.
    GeodesicString,
    /// Curve at a constant distance from a base curve.
    OffsetCurve,
}

impl SegmentType {
    /// Whether the type has a dedicated [`CurveSegment`] variant.
    pub fn is_supported(&self) -> bool {
        matches!(
            self,
            Self::LineStringSegment | Self::Arc | Self::Circle | Self::ArcString
        )
    }

    /// GML name of the interpolation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LineStringSegment => "LineStringSegment",
            Self::Arc => "Arc",
            Self::Circle => "Circle",
            Self::ArcString => "ArcString",
            Self::ArcByBulge => "ArcByBulge",
            Self::ArcByCenterPoint => "ArcByCenterPoint",
            Self::ArcStringByBulge => "ArcStringByBulge",
            Self::Bezier => "Bezier",
            Self::BSpline => "BSpline",
            Self::CircleByCenterPoint => "CircleByCenterPoint",
            Self::Clothoid => "Clothoid",
            Self::CubicSpline => "CubicSpline",
            Self::Geodesic => "Geodesic",
            Self::GeodesicString => "GeodesicString",
            Self::OffsetCurve => "OffsetCurve",
        }
    }
}

impl Display for SegmentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the common coordinate dimension of the points.
fn common_dimension(points: &[Point]) -> Result<usize, GeometryError> {
    let Some(first) = points.first() else {
        return Ok(0);
    };

    let expected = first.coordinate_dimension();
    match points
        .iter()
        .map(Point::coordinate_dimension)
        .find(|dim| *dim != expected)
    {
        Some(actual) => Err(GeometryError::DimensionMismatch { expected, actual }),
        None => Ok(expected),
    }
}

/// Already linear segment of two or more points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineStringSegment {
    points: Vec<Point>,
}

impl LineStringSegment {
    /// Creates a new segment. At least two points of the same dimension are required.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::ControlPoints {
                segment_type: SegmentType::LineStringSegment,
                expected: "at least 2",
                actual: points.len(),
            });
        }

        common_dimension(&points)?;
        Ok(Self { points })
    }

    /// Points of the segment.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Consumes the segment returning its points.
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// First point.
    pub fn start_point(&self) -> &Point {
        &self.points[0]
    }

    /// Last point.
    pub fn end_point(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a segment has at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding rectangle of the points.
    pub fn bounding_rect(&self) -> Option<Rect> {
        Rect::from_points(self.points.iter())
    }
}

macro_rules! three_point_segment {
    ($name:ident, $segment_type:expr, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            points: [Point; 3],
        }

        impl $name {
            /// Creates a new segment from three control points of the same dimension.
            pub fn new(p0: Point, p1: Point, p2: Point) -> Result<Self, GeometryError> {
                let points = [p0, p1, p2];
                common_dimension(&points)?;
                Ok(Self { points })
            }

            /// Creates a segment from a list of exactly three control points.
            pub fn from_points(points: Vec<Point>) -> Result<Self, GeometryError> {
                let actual = points.len();
                let points: [Point; 3] =
                    points
                        .try_into()
                        .map_err(|_| GeometryError::ControlPoints {
                            segment_type: $segment_type,
                            expected: "exactly 3",
                            actual,
                        })?;
                common_dimension(&points)?;
                Ok(Self { points })
            }

            /// First control point.
            pub fn p0(&self) -> &Point {
                &self.points[0]
            }

            /// Second control point.
            pub fn p1(&self) -> &Point {
                &self.points[1]
            }

            /// Third control point.
            pub fn p2(&self) -> &Point {
                &self.points[2]
            }

            /// All three control points.
            pub fn control_points(&self) -> &[Point; 3] {
                &self.points
            }
        }
    };
}

three_point_segment!(
    Arc,
    SegmentType::Arc,
    "Circular arc starting at `p0`, passing through `p1` and ending at `p2`."
);

three_point_segment!(
    Circle,
    SegmentType::Circle,
    "Full circle through the three control points. It starts and ends at `p0`."
);

/// Sequence of `2k + 1` control points forming `k` consecutive arcs.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcString {
    points: Vec<Point>,
}

impl ArcString {
    /// Creates a new arc string. The number of control points must be odd and at least 3.
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 3 || points.len() % 2 == 0 {
            return Err(GeometryError::ControlPoints {
                segment_type: SegmentType::ArcString,
                expected: "an odd number of at least 3",
                actual: points.len(),
            });
        }

        common_dimension(&points)?;
        Ok(Self { points })
    }

    /// Control points of the arc string.
    pub fn control_points(&self) -> &[Point] {
        &self.points
    }

    /// Number of arcs.
    pub fn num_arcs(&self) -> usize {
        self.points.len() / 2
    }

    /// Iterates over the control point triplets of the individual arcs.
    pub fn arcs(&self) -> impl Iterator<Item = (&Point, &Point, &Point)> {
        self.points
            .windows(3)
            .step_by(2)
            .map(|w| (&w[0], &w[1], &w[2]))
    }
}

/// Segment of a type that has no dedicated representation. Only the raw control points are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedSegment {
    segment_type: SegmentType,
    control_points: Vec<Point>,
}

impl UnsupportedSegment {
    /// Wraps the control points of a segment of the given type.
    pub fn new(segment_type: SegmentType, control_points: Vec<Point>) -> Result<Self, GeometryError> {
        if segment_type.is_supported() {
            return Err(GeometryError::NotUnsupported(segment_type));
        }

        if control_points.is_empty() {
            return Err(GeometryError::ControlPoints {
                segment_type,
                expected: "at least 1",
                actual: 0,
            });
        }

        common_dimension(&control_points)?;
        Ok(Self {
            segment_type,
            control_points,
        })
    }

    /// Interpolation type of the segment.
    pub fn segment_type(&self) -> SegmentType {
        self.segment_type
    }

    /// Raw control points.
    pub fn control_points(&self) -> &[Point] {
        &self.control_points
    }
}

/// A typed piece of a curve.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    /// Linear segment.
    LineString(LineStringSegment),
    /// Three point arc.
    Arc(Arc),
    /// Three point circle.
    Circle(Circle),
    /// String of three point arcs.
    ArcString(ArcString),
    /// Any other interpolation.
    Unsupported(UnsupportedSegment),
}

impl CurveSegment {
    /// Interpolation type of the segment.
    pub fn segment_type(&self) -> SegmentType {
        match self {
            Self::LineString(_) => SegmentType::LineStringSegment,
            Self::Arc(_) => SegmentType::Arc,
            Self::Circle(_) => SegmentType::Circle,
            Self::ArcString(_) => SegmentType::ArcString,
            Self::Unsupported(v) => v.segment_type(),
        }
    }

    /// Control points of the segment in order.
    pub fn control_points(&self) -> &[Point] {
        match self {
            Self::LineString(v) => v.points(),
            Self::Arc(v) => v.control_points(),
            Self::Circle(v) => v.control_points(),
            Self::ArcString(v) => v.control_points(),
            Self::Unsupported(v) => v.control_points(),
        }
    }

    /// Point the segment starts at.
    pub fn start_point(&self) -> &Point {
        &self.control_points()[0]
    }

    /// Point the segment ends at. For a circle this is its first control point.
    pub fn end_point(&self) -> &Point {
        match self {
            Self::Circle(v) => v.p0(),
            _ => {
                let points = self.control_points();
                &points[points.len() - 1]
            }
        }
    }

    /// Coordinate dimension shared by all control points.
    pub fn coordinate_dimension(&self) -> usize {
        self.start_point().coordinate_dimension()
    }

    /// Whether the segment is already a line string.
    pub fn is_linear(&self) -> bool {
        matches!(self, Self::LineString(_))
    }
}

impl From<LineStringSegment> for CurveSegment {
    fn from(value: LineStringSegment) -> Self {
        Self::LineString(value)
    }
}

impl From<Arc> for CurveSegment {
    fn from(value: Arc) -> Self {
        Self::Arc(value)
    }
}

impl From<Circle> for CurveSegment {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<ArcString> for CurveSegment {
    fn from(value: ArcString) -> Self {
        Self::ArcString(value)
    }
}

impl From<UnsupportedSegment> for CurveSegment {
    fn from(value: UnsupportedSegment) -> Self {
        Self::Unsupported(value)
    }
}
