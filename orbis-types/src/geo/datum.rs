use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Reference ellipsoid of a geodetic datum.
///
/// Parameters are compared bitwise so that equality and hashing agree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Datum {
    semimajor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// World Geodetic System 1984.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257223563,
    };

    /// Geodetic Reference System 1980, used by ETRS89.
    pub const GRS80: Self = Datum {
        semimajor: 6_378_137.0,
        inv_flattening: 298.257222101,
    };

    /// Creates a datum from its ellipsoid parameters.
    pub fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            inv_flattening,
        }
    }

    /// Semimajor axis in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Inverse flattening.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        self.semimajor.to_bits() == other.semimajor.to_bits()
            && self.inv_flattening.to_bits() == other.inv_flattening.to_bits()
    }
}

impl Eq for Datum {}

impl Hash for Datum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.semimajor.to_bits().hash(state);
        self.inv_flattening.to_bits().hash(state);
    }
}
