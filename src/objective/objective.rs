//! Objective values with an optimization sense
//!
//! Objectives carry the direction in which they are optimized. Comparing two
//! objectives of different sense is a contract violation and fails with
//! [`EvolutionError::TypeMismatch`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};

/// Direction of optimization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sense {
    /// Smaller values are better
    Minimize,
    /// Larger values are better
    Maximize,
    /// Output of [`Objective::normalize`]; smaller is better
    Normalized,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Minimize => "minimize",
            Self::Maximize => "maximize",
            Self::Normalized => "normalized",
        };
        f.write_str(name)
    }
}

/// A single objective value
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    value: f64,
    sense: Sense,
}

impl Objective {
    /// Unevaluated minimized objective
    pub fn minimize() -> Self {
        Self {
            value: f64::NAN,
            sense: Sense::Minimize,
        }
    }

    /// Unevaluated maximized objective
    pub fn maximize() -> Self {
        Self {
            value: f64::NAN,
            sense: Sense::Maximize,
        }
    }

    /// Return a copy holding `value`
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Whether a value has been assigned
    pub fn is_evaluated(&self) -> bool {
        !self.value.is_nan()
    }

    /// Value in minimization form: maximized objectives are negated
    pub fn canonical_value(&self) -> f64 {
        match self.sense {
            Sense::Minimize | Sense::Normalized => self.value,
            Sense::Maximize => -self.value,
        }
    }

    fn ensure_same_sense(&self, other: &Self) -> EvoResult<()> {
        if self.sense != other.sense {
            return Err(EvolutionError::type_mismatch(self.sense, other.sense));
        }
        Ok(())
    }

    /// Compare two objectives; `Less` means `self` is better
    ///
    /// Incomparable values (NaN) compare as equal.
    pub fn compare(&self, other: &Self) -> EvoResult<Ordering> {
        self.ensure_same_sense(other)?;
        Ok(self
            .canonical_value()
            .partial_cmp(&other.canonical_value())
            .unwrap_or(Ordering::Equal))
    }

    /// Absolute difference between two objectives of the same sense
    pub fn distance(&self, other: &Self) -> EvoResult<f64> {
        self.ensure_same_sense(other)?;
        Ok((self.value - other.value).abs())
    }

    /// Scale into `[0, 1]` given the observed range of this objective
    ///
    /// The result is a [`Sense::Normalized`] objective where 0 is the best
    /// observed value. Normalizing an already-normalized objective fails.
    pub fn normalize(&self, minimum: f64, maximum: f64) -> EvoResult<Objective> {
        let range = maximum - minimum;
        if !(range > 0.0) || !range.is_finite() {
            return Err(EvolutionError::Configuration(format!(
                "normalization range [{}, {}] is empty",
                minimum, maximum
            )));
        }

        let value = match self.sense {
            Sense::Minimize => (self.value - minimum) / range,
            Sense::Maximize => (maximum - self.value) / range,
            Sense::Normalized => {
                return Err(EvolutionError::UnsupportedOperation(
                    "objective is already normalized".to_string(),
                ))
            }
        };

        Ok(Objective {
            value,
            sense: Sense::Normalized,
        })
    }

    /// Index of the epsilon box containing this objective
    pub fn epsilon_index(&self, epsilon: f64) -> EvoResult<i64> {
        match self.sense {
            Sense::Minimize | Sense::Maximize => {
                Ok((self.canonical_value() / epsilon).floor() as i64)
            }
            Sense::Normalized => Err(EvolutionError::UnsupportedOperation(
                "epsilon index of a normalized objective".to_string(),
            )),
        }
    }

    /// Distance from the lower corner of this objective's epsilon box
    pub fn epsilon_distance(&self, epsilon: f64) -> EvoResult<f64> {
        match self.sense {
            Sense::Minimize | Sense::Maximize => {
                let canonical = self.canonical_value();
                Ok(canonical - (canonical / epsilon).floor() * epsilon)
            }
            Sense::Normalized => Err(EvolutionError::UnsupportedOperation(
                "epsilon distance of a normalized objective".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_minimize_ordering() {
        let a = Objective::minimize().with_value(1.0);
        let b = Objective::minimize().with_value(2.0);
        assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
        assert_eq!(b.compare(&a).unwrap(), Ordering::Greater);
        assert_eq!(a.compare(&a).unwrap(), Ordering::Equal);
    }

    #[test]
    fn test_maximize_ordering() {
        let a = Objective::maximize().with_value(1.0);
        let b = Objective::maximize().with_value(2.0);
        assert_eq!(b.compare(&a).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_mismatched_sense_is_type_mismatch() {
        let a = Objective::minimize().with_value(1.0);
        let b = Objective::maximize().with_value(1.0);
        assert!(matches!(
            a.compare(&b),
            Err(EvolutionError::TypeMismatch { .. })
        ));
        assert!(a.distance(&b).is_err());
    }

    #[test]
    fn test_unevaluated() {
        let mut objective = Objective::minimize();
        assert!(!objective.is_evaluated());
        objective.set_value(3.0);
        assert!(objective.is_evaluated());
        assert_eq!(objective.value(), 3.0);
    }

    #[test]
    fn test_normalize() {
        let min = Objective::minimize().with_value(2.5);
        let normalized = min.normalize(0.0, 10.0).unwrap();
        assert_eq!(normalized.sense(), Sense::Normalized);
        assert_relative_eq!(normalized.value(), 0.25);

        let max = Objective::maximize().with_value(7.5);
        assert_relative_eq!(max.normalize(0.0, 10.0).unwrap().value(), 0.25);

        assert!(min.normalize(1.0, 1.0).is_err());
    }

    #[test]
    fn test_normalized_rejects_epsilon_operations() {
        let normalized = Objective::minimize()
            .with_value(0.3)
            .normalize(0.0, 1.0)
            .unwrap();

        assert!(matches!(
            normalized.epsilon_index(0.1),
            Err(EvolutionError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            normalized.epsilon_distance(0.1),
            Err(EvolutionError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            normalized.normalize(0.0, 1.0),
            Err(EvolutionError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_epsilon_index_and_distance() {
        let objective = Objective::minimize().with_value(0.74);
        assert_eq!(objective.epsilon_index(0.5).unwrap(), 1);
        assert_relative_eq!(objective.epsilon_distance(0.5).unwrap(), 0.24, epsilon = 1e-12);

        let negative = Objective::minimize().with_value(-0.01);
        assert_eq!(negative.epsilon_index(0.1).unwrap(), -1);

        let maximized = Objective::maximize().with_value(0.74);
        assert_eq!(maximized.epsilon_index(0.5).unwrap(), -2);
    }
}
