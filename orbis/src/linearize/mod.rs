//! Approximation of curved geometries with line strings.
//!
//! [`CurveLinearizer`] replaces every arc, circle and arc string of a curve with a [`LineStringSegment`]. Line
//! strings pass through unchanged and rings stay rings. Segment types without a linearization are rejected with
//! [`LinearizationError::UnsupportedSegment`] instead of being approximated.
//!
//! ```
//! use orbis::linearize::{CurveLinearizer, LinearizationCriterion};
//! use orbis::orbis_types::{pt, Circle, CurveSegment};
//!
//! let circle = Circle::new(pt!(1.0, 0.0), pt!(0.0, 1.0), pt!(-1.0, 0.0)).unwrap();
//! let line = CurveLinearizer::new()
//!     .linearize_segment(&CurveSegment::Circle(circle), &LinearizationCriterion::NumPoints(33))
//!     .unwrap();
//!
//! assert_eq!(line.len(), 33);
//! assert_eq!(line.start_point(), line.end_point());
//! ```

use log::{debug, trace};
use orbis_types::{
    Arc, ArcString, Circle, Curve, CurveSegment, LineStringSegment, Point, Polygon, Ring,
    SegmentedCurve,
};

use crate::error::LinearizationError;

mod arc;
mod criterion;

pub use arc::circle_center;
pub use criterion::{LinearizationCriterion, DEFAULT_NUM_POINTS, MAX_NUM_POINTS};

/// Converts curves into polygonal approximations.
///
/// The linearizer holds no state, a single instance can be shared between any number of threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct CurveLinearizer {}

impl CurveLinearizer {
    /// Creates a new linearizer.
    pub fn new() -> Self {
        Self {}
    }

    /// Returns a copy of the curve with every segment replaced by a line string.
    ///
    /// Rings are linearized member by member and are returned as rings. The CRS tags of the curve are kept.
    pub fn linearize(
        &self,
        curve: &Curve,
        criterion: &LinearizationCriterion,
    ) -> Result<Curve, LinearizationError> {
        let num_points = criterion.num_points()?;
        self.linearize_curve(curve, num_points)
    }

    fn linearize_curve(&self, curve: &Curve, num_points: usize) -> Result<Curve, LinearizationError> {
        match curve {
            Curve::Segmented(curve) => {
                let segments = curve
                    .segments()
                    .iter()
                    .map(|segment| {
                        self.segment_to_line(segment, num_points)
                            .map(CurveSegment::LineString)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SegmentedCurve::new(segments, curve.crs().cloned())?.into())
            }
            Curve::Ring(ring) => Ok(self.linearize_ring(ring, num_points)?.into()),
        }
    }

    fn linearize_ring(&self, ring: &Ring, num_points: usize) -> Result<Ring, LinearizationError> {
        let members = ring
            .members()
            .iter()
            .map(|member| self.linearize_curve(member, num_points))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Ring::new(members, ring.crs().cloned())?)
    }

    /// Linearizes the exterior and all interior rings of the polygon.
    pub fn linearize_polygon(
        &self,
        polygon: &Polygon,
        criterion: &LinearizationCriterion,
    ) -> Result<Polygon, LinearizationError> {
        let num_points = criterion.num_points()?;
        let exterior = self.linearize_ring(polygon.exterior(), num_points)?;
        let interiors = polygon
            .interiors()
            .iter()
            .map(|ring| self.linearize_ring(ring, num_points))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Polygon::new(exterior, interiors))
    }

    /// Linearizes a single segment.
    ///
    /// Line strings are returned as they are.
    pub fn linearize_segment(
        &self,
        segment: &CurveSegment,
        criterion: &LinearizationCriterion,
    ) -> Result<LineStringSegment, LinearizationError> {
        let num_points = criterion.num_points()?;
        self.segment_to_line(segment, num_points)
    }

    fn segment_to_line(
        &self,
        segment: &CurveSegment,
        num_points: usize,
    ) -> Result<LineStringSegment, LinearizationError> {
        let line = match segment {
            CurveSegment::LineString(line) => return Ok(line.clone()),
            CurveSegment::Arc(arc) => self.arc_to_line(arc, num_points)?,
            CurveSegment::Circle(circle) => self.circle_to_line(circle, num_points)?,
            CurveSegment::ArcString(arc_string) => {
                self.arc_string_to_line(arc_string, num_points)?
            }
            CurveSegment::Unsupported(unsupported) => {
                debug!(
                    "Cannot linearize {} segment with {} control points",
                    unsupported.segment_type(),
                    unsupported.control_points().len()
                );
                return Err(LinearizationError::UnsupportedSegment(
                    unsupported.segment_type(),
                ));
            }
        };

        debug!(
            "Linearized {} segment into {} points",
            segment.segment_type(),
            line.len()
        );
        Ok(line)
    }

    /// Linearizes an arc.
    ///
    /// The output starts exactly at `p0` and ends exactly at `p2`. Collinear control points produce the straight
    /// line `[p0, p2]`.
    pub fn linearize_arc(
        &self,
        arc: &Arc,
        criterion: &LinearizationCriterion,
    ) -> Result<LineStringSegment, LinearizationError> {
        self.arc_to_line(arc, criterion.num_points()?)
    }

    fn arc_to_line(&self, arc: &Arc, num_points: usize) -> Result<LineStringSegment, LinearizationError> {
        let points = match arc::interpolate(arc.p0(), arc.p1(), arc.p2(), false, num_points)? {
            Some(points) => points,
            None => {
                trace!("Arc control points are collinear");
                vec![arc.p0().clone(), arc.p2().clone()]
            }
        };

        Ok(LineStringSegment::new(points)?)
    }

    /// Linearizes a full circle.
    ///
    /// The output starts and ends exactly at `p0`. Collinear control points produce `[p0, p1, p0]`.
    pub fn linearize_circle(
        &self,
        circle: &Circle,
        criterion: &LinearizationCriterion,
    ) -> Result<LineStringSegment, LinearizationError> {
        self.circle_to_line(circle, criterion.num_points()?)
    }

    fn circle_to_line(
        &self,
        circle: &Circle,
        num_points: usize,
    ) -> Result<LineStringSegment, LinearizationError> {
        let points = match arc::interpolate(circle.p0(), circle.p1(), circle.p2(), true, num_points)? {
            Some(points) => points,
            None => {
                trace!("Circle control points are collinear");
                vec![circle.p0().clone(), circle.p1().clone(), circle.p0().clone()]
            }
        };

        Ok(LineStringSegment::new(points)?)
    }

    /// Linearizes an arc string.
    ///
    /// Every arc is linearized with the criterion, the point shared by two neighbouring arcs appears in the
    /// output once. Arcs with collinear control points contribute all three points.
    pub fn linearize_arc_string(
        &self,
        arc_string: &ArcString,
        criterion: &LinearizationCriterion,
    ) -> Result<LineStringSegment, LinearizationError> {
        self.arc_string_to_line(arc_string, criterion.num_points()?)
    }

    fn arc_string_to_line(
        &self,
        arc_string: &ArcString,
        num_points: usize,
    ) -> Result<LineStringSegment, LinearizationError> {
        let mut points: Vec<Point> = Vec::with_capacity(
            arc_string
                .num_arcs()
                .saturating_mul(num_points - 1)
                .saturating_add(1),
        );
        for (a, b, c) in arc_string.arcs() {
            let arc_points = match arc::interpolate(a, b, c, false, num_points)? {
                Some(arc_points) => arc_points,
                None => vec![a.clone(), b.clone(), c.clone()],
            };

            let skip = if points.is_empty() { 0 } else { 1 };
            points.extend(arc_points.into_iter().skip(skip));
        }

        Ok(LineStringSegment::new(points)?)
    }
}
