use serde::{Deserialize, Serialize};

use crate::error::LinearizationError;

/// Number of points per arc used by [`LinearizationCriterion::default`].
pub const DEFAULT_NUM_POINTS: usize = 20;

/// Largest number of points per arc accepted by [`LinearizationCriterion::NumPoints`].
pub const MAX_NUM_POINTS: usize = 1_000_000;

/// Controls how closely the linearized output follows the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LinearizationCriterion {
    /// Every arc is replaced by exactly this many points, at least 3 and at most [`MAX_NUM_POINTS`].
    NumPoints(usize),
    /// Number of points chosen so that the chord never deviates from the arc by more than `max_error`.
    ///
    /// Not supported by [`CurveLinearizer`](super::CurveLinearizer) yet, it fails with
    /// [`LinearizationError::UnsupportedCriterion`].
    MaxError {
        /// Maximum deviation of a chord from the arc, in units of the CRS.
        max_error: f64,
        /// Upper bound on the number of points per arc.
        max_num_points: usize,
    },
}

impl LinearizationCriterion {
    pub(crate) fn num_points(&self) -> Result<usize, LinearizationError> {
        match *self {
            Self::NumPoints(n) if n < 3 => Err(LinearizationError::InvalidCriterion(format!(
                "at least 3 points per arc are required, got {n}"
            ))),
            Self::NumPoints(n) if n > MAX_NUM_POINTS => Err(LinearizationError::InvalidCriterion(
                format!("at most {MAX_NUM_POINTS} points per arc are allowed, got {n}"),
            )),
            Self::NumPoints(n) => Ok(n),
            Self::MaxError { .. } => Err(LinearizationError::UnsupportedCriterion(
                "MaxError".to_string(),
            )),
        }
    }
}

impl Default for LinearizationCriterion {
    fn default() -> Self {
        Self::NumPoints(DEFAULT_NUM_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn num_points_validation() {
        assert_eq!(LinearizationCriterion::NumPoints(3).num_points(), Ok(3));
        assert_eq!(
            LinearizationCriterion::default().num_points(),
            Ok(DEFAULT_NUM_POINTS)
        );
        assert_matches!(
            LinearizationCriterion::NumPoints(2).num_points(),
            Err(LinearizationError::InvalidCriterion(_))
        );
        assert_eq!(
            LinearizationCriterion::NumPoints(MAX_NUM_POINTS).num_points(),
            Ok(MAX_NUM_POINTS)
        );
        assert_matches!(
            LinearizationCriterion::NumPoints(MAX_NUM_POINTS + 1).num_points(),
            Err(LinearizationError::InvalidCriterion(_))
        );
        assert_matches!(
            LinearizationCriterion::NumPoints(usize::MAX).num_points(),
            Err(LinearizationError::InvalidCriterion(_))
        );
        assert_matches!(
            LinearizationCriterion::MaxError {
                max_error: 0.01,
                max_num_points: 100
            }
            .num_points(),
            Err(LinearizationError::UnsupportedCriterion(_))
        );
    }

    #[test]
    fn deserialize() {
        let criterion: LinearizationCriterion =
            serde_json::from_str(r#"{"NumPoints": 64}"#).unwrap();
        assert_eq!(criterion, LinearizationCriterion::NumPoints(64));

        let criterion: LinearizationCriterion =
            serde_json::from_str(r#"{"MaxError": {"max_error": 0.5, "max_num_points": 10}}"#)
                .unwrap();
        assert_eq!(
            criterion,
            LinearizationCriterion::MaxError {
                max_error: 0.5,
                max_num_points: 10
            }
        );
    }
}
