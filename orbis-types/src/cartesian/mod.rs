//! Planar helpers shared by the primitives and the linearization engine.

mod orient;
mod point;
mod rect;

pub use orient::{Orientation, COLLINEARITY_TOLERANCE};
pub use point::{CartesianPoint2d, CartesianPoint2dFloat};
pub use rect::Rect;
