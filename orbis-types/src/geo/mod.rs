//! Coordinate reference systems and lazily resolved references to them.

mod code;
mod crs;
mod datum;
mod reference;
mod typed;

pub use code::CrsCode;
pub use crs::{Axis, AxisOrientation, Crs, CrsKind, CrsType, Projection};
pub use datum::Datum;
pub use reference::{CrsObject, CrsRef, CrsResolver, MAX_REFERENCE_HOPS};
pub use typed::{CompoundCrsRef, ProjectedCrsRef};
