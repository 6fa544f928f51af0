//! Geometry primitives for curved geometries and lazily resolved coordinate reference systems.
//!
//! The crate defines the data model the `orbis` linearizer works on:
//!
//! * [`Point`] - immutable 2d/3d position with an optional [`CrsRef`](geo::CrsRef) tag.
//! * [`CurveSegment`] - closed set of segment types: line strings, three point arcs, circles, arc strings and an
//!   explicit [`Unsupported`](CurveSegment::Unsupported) variant for every other GML interpolation.
//! * [`Curve`] - either a [`SegmentedCurve`] or a [`Ring`] of member curves.
//! * [`geo`] - CRS definitions and references that are resolved on first use.

pub mod cartesian;
pub mod curve;
pub mod error;
pub mod geo;
pub mod polygon;
pub mod segment;

mod point;

pub use curve::{Curve, Ring, SegmentedCurve};
pub use error::{CrsError, GeometryError};
pub use point::Point;
pub use polygon::Polygon;
pub use segment::{
    Arc, ArcString, Circle, CurveSegment, LineStringSegment, SegmentType, UnsupportedSegment,
};
