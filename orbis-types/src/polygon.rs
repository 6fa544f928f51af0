//! Planar surface bounded by rings.

use crate::curve::Ring;

/// Surface patch with one exterior and any number of interior boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: Ring,
    interiors: Vec<Ring>,
}

impl Polygon {
    /// Creates a new polygon.
    pub fn new(exterior: Ring, interiors: Vec<Ring>) -> Self {
        Self {
            exterior,
            interiors,
        }
    }

    /// Outer boundary.
    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    /// Holes.
    pub fn interiors(&self) -> &[Ring] {
        &self.interiors
    }
}
