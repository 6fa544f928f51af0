//! Curves made of segments, and rings made of curves.

use crate::error::GeometryError;
use crate::geo::CrsRef;
use crate::point::Point;
use crate::segment::CurveSegment;

/// Ordered non-empty list of contiguous curve segments.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedCurve {
    segments: Vec<CurveSegment>,
    crs: Option<CrsRef>,
}

impl SegmentedCurve {
    /// Creates a new curve. At least one segment is required.
    pub fn new(segments: Vec<CurveSegment>, crs: Option<CrsRef>) -> Result<Self, GeometryError> {
        if segments.is_empty() {
            return Err(GeometryError::Empty("curve"));
        }

        Ok(Self { segments, crs })
    }

    /// Segments of the curve.
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// CRS of the curve.
    pub fn crs(&self) -> Option<&CrsRef> {
        self.crs.as_ref()
    }
}

/// Closed loop of contiguous member curves.
///
/// The first point of each member is expected to equal the last point of the previous one, and the last point of the
/// last member to equal the first point of the first member. This is not validated on construction, use
/// [`Ring::is_closed`] to check it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    members: Vec<Curve>,
    crs: Option<CrsRef>,
}

impl Ring {
    /// Creates a new ring. At least one member is required.
    pub fn new(members: Vec<Curve>, crs: Option<CrsRef>) -> Result<Self, GeometryError> {
        if members.is_empty() {
            return Err(GeometryError::Empty("ring"));
        }

        Ok(Self { members, crs })
    }

    /// Member curves of the ring.
    pub fn members(&self) -> &[Curve] {
        &self.members
    }

    /// CRS of the ring.
    pub fn crs(&self) -> Option<&CrsRef> {
        self.crs.as_ref()
    }

    /// Whether the members are contiguous and the ring ends where it starts.
    pub fn is_closed(&self) -> bool {
        let contiguous = self
            .members
            .windows(2)
            .all(|w| w[0].end_point().same_position(w[1].start_point()));

        contiguous && self.end_point().same_position(self.start_point())
    }

    fn start_point(&self) -> &Point {
        self.members[0].start_point()
    }

    fn end_point(&self) -> &Point {
        self.members[self.members.len() - 1].end_point()
    }
}

/// A curve: either a plain list of segments or a ring.
///
/// The two variants are semantically different: operations transforming a curve are expected to return a ring for a
/// ring input.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    /// Plain curve.
    Segmented(SegmentedCurve),
    /// Closed ring.
    Ring(Ring),
}

impl Curve {
    /// Creates a plain curve from segments.
    pub fn from_segments(segments: Vec<CurveSegment>) -> Result<Self, GeometryError> {
        Ok(Self::Segmented(SegmentedCurve::new(segments, None)?))
    }

    /// Point the curve starts at.
    pub fn start_point(&self) -> &Point {
        match self {
            Self::Segmented(v) => v.segments[0].start_point(),
            Self::Ring(v) => v.start_point(),
        }
    }

    /// Point the curve ends at.
    pub fn end_point(&self) -> &Point {
        match self {
            Self::Segmented(v) => v.segments[v.segments.len() - 1].end_point(),
            Self::Ring(v) => v.end_point(),
        }
    }

    /// Coordinate dimension of the first point.
    pub fn coordinate_dimension(&self) -> usize {
        self.start_point().coordinate_dimension()
    }

    /// CRS of the curve.
    pub fn crs(&self) -> Option<&CrsRef> {
        match self {
            Self::Segmented(v) => v.crs(),
            Self::Ring(v) => v.crs(),
        }
    }

    /// Whether every segment (of every member, for a ring) is a line string.
    pub fn is_linear(&self) -> bool {
        match self {
            Self::Segmented(v) => v.segments.iter().all(CurveSegment::is_linear),
            Self::Ring(v) => v.members.iter().all(Curve::is_linear),
        }
    }

    /// Whether the curve is a ring.
    pub fn is_ring(&self) -> bool {
        matches!(self, Self::Ring(_))
    }

    /// Iterates over all segments in order, descending into ring members.
    pub fn iter_segments(&self) -> Box<dyn Iterator<Item = &CurveSegment> + '_> {
        match self {
            Self::Segmented(v) => Box::new(v.segments.iter()),
            Self::Ring(v) => Box::new(v.members.iter().flat_map(Curve::iter_segments)),
        }
    }
}

impl From<SegmentedCurve> for Curve {
    fn from(value: SegmentedCurve) -> Self {
        Self::Segmented(value)
    }
}

impl From<Ring> for Curve {
    fn from(value: Ring) -> Self {
        Self::Ring(value)
    }
}
