//! Error types used by the crate.

use thiserror::Error;

use crate::geo::CrsType;
use crate::segment::SegmentType;

/// Violation of a structural invariant of a geometric primitive.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GeometryError {
    /// A point can only have 2 or 3 ordinates.
    #[error("point must have 2 or 3 ordinates, got {0}")]
    OrdinateCount(usize),
    /// Not enough control points for the segment type.
    #[error("{segment_type} needs {expected} control points, got {actual}")]
    ControlPoints {
        /// Segment type being constructed.
        segment_type: SegmentType,
        /// Human readable requirement, e.g. `at least 2`.
        expected: &'static str,
        /// Number of points given.
        actual: usize,
    },
    /// Points of one primitive have different coordinate dimensions.
    #[error("mixed coordinate dimensions: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimension of the first point.
        expected: usize,
        /// Dimension of the offending point.
        actual: usize,
    },
    /// A curve without segments or a ring without members.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// `CurveSegment::Unsupported` was given a segment type that has a dedicated variant.
    #[error("segment type {0} is supported and cannot be wrapped as unsupported")]
    NotUnsupported(SegmentType),
}

/// Failure to turn a CRS reference into a concrete definition.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CrsError {
    /// Reference created with an empty identifier.
    #[error("CRS reference has an empty uri")]
    EmptyUri,
    /// The resolver does not know the identifier.
    #[error("CRS '{0}' not found")]
    NotFound(String),
    /// The chain of references did not end in a definition within the hop limit.
    #[error("reference chain starting at '{uri}' did not terminate after {hops} hops")]
    UnterminatedChain {
        /// Identifier of the reference resolution started at.
        uri: String,
        /// Number of hops followed.
        hops: usize,
    },
    /// An unresolved reference without a resolver was encountered.
    #[error("no resolver available for CRS '{0}'")]
    NoResolver(String),
    /// The resolver itself failed (registry unavailable etc).
    #[error("resolver failed: {0}")]
    Resolver(String),
    /// The resolved definition is not of the shape the reference asserts.
    #[error("expected {expected} CRS, resolved to {actual}")]
    ShapeMismatch {
        /// Asserted shape.
        expected: CrsType,
        /// Actual shape of the resolved definition.
        actual: CrsType,
    },
    /// Identifier cannot be interpreted as a CRS code.
    #[error("invalid CRS code '{0}'")]
    InvalidCode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeometryError::ControlPoints {
            segment_type: SegmentType::Arc,
            expected: "exactly 3",
            actual: 2,
        };
        assert_eq!(err.to_string(), "Arc needs exactly 3 control points, got 2");

        let err = CrsError::ShapeMismatch {
            expected: CrsType::Compound,
            actual: CrsType::Geographic,
        };
        assert_eq!(err.to_string(), "expected Compound CRS, resolved to Geographic");
    }
}
