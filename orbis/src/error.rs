//! Error types used by the crate.

use orbis_types::error::GeometryError;
use orbis_types::segment::SegmentType;
use thiserror::Error;

/// Failure to linearize a curve.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum LinearizationError {
    /// The curve contains a segment type that has no linearization.
    #[error("linearization of {0} segments is not supported")]
    UnsupportedSegment(SegmentType),
    /// The criterion is recognized, but not supported.
    #[error("linearization criterion {0} is not supported")]
    UnsupportedCriterion(String),
    /// Parameters of the criterion are out of range.
    #[error("invalid linearization criterion: {0}")]
    InvalidCriterion(String),
    /// The control points do not define a circle.
    #[error("illegal geometry: {0}")]
    IllegalGeometry(String),
    /// Linearized output violates a structural invariant.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
