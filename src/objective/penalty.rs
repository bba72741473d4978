//! Penalty functions
//!
//! A penalty function condenses constraint violation into a scalar. The
//! value is recorded in the solution's [`PENALTY`] attribute; objectives and
//! constraints are left untouched.

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::population::solution::{Solution, PENALTY};

/// Maps constraint violation to a penalty
pub trait PenaltyFunction: Send + Sync {
    /// Compute the penalty, store it on the solution, and return it
    fn calculate(&self, solution: &mut Solution) -> f64;
}

/// Penalty of zero for every solution
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct NoPenaltyFunction;

impl PenaltyFunction for NoPenaltyFunction {
    fn calculate(&self, solution: &mut Solution) -> f64 {
        solution.set_attribute(PENALTY, 0.0);
        0.0
    }
}

/// `offset + Σ|c|` for infeasible solutions, zero otherwise
///
/// The offset keeps every infeasible solution strictly worse than every
/// feasible one even when the violation is tiny.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SumOfConstraintsPenaltyFunction {
    offset: f64,
}

impl SumOfConstraintsPenaltyFunction {
    pub fn new(offset: f64) -> EvoResult<Self> {
        if !(offset.is_finite() && offset >= 0.0) {
            return Err(EvolutionError::Configuration(format!(
                "penalty offset must be finite and non-negative, got {}",
                offset
            )));
        }
        Ok(Self { offset })
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Default for SumOfConstraintsPenaltyFunction {
    fn default() -> Self {
        Self { offset: 0.0 }
    }
}

impl PenaltyFunction for SumOfConstraintsPenaltyFunction {
    fn calculate(&self, solution: &mut Solution) -> f64 {
        let penalty = if solution.violates_constraints() {
            self.offset + solution.aggregate_violation()
        } else {
            0.0
        };
        solution.set_attribute(PENALTY, penalty);
        penalty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::objective::Objective;
    use approx::assert_relative_eq;

    fn with_constraints(values: &[f64]) -> Solution {
        let mut solution = Solution::new(
            vec![],
            vec![Objective::minimize().with_value(1.0)],
            values.len(),
        );
        solution.set_constraints(values).unwrap();
        solution
    }

    #[test]
    fn test_feasible_has_no_penalty() {
        let penalty = SumOfConstraintsPenaltyFunction::new(100.0).unwrap();
        let mut solution = with_constraints(&[0.0, 0.0]);
        assert_eq!(penalty.calculate(&mut solution), 0.0);
        assert_eq!(solution.attribute(PENALTY), Some(0.0));
    }

    #[test]
    fn test_infeasible_sums_magnitudes() {
        let penalty = SumOfConstraintsPenaltyFunction::new(10.0).unwrap();
        let mut solution = with_constraints(&[-1.5, 0.0, 2.0]);
        let before = solution.clone();

        assert_relative_eq!(penalty.calculate(&mut solution), 13.5);
        assert_relative_eq!(solution.attribute(PENALTY).unwrap(), 13.5);
        assert_eq!(solution.objectives(), before.objectives());
        assert_eq!(solution.constraints(), before.constraints());
    }

    #[test]
    fn test_invalid_offset() {
        assert!(SumOfConstraintsPenaltyFunction::new(-1.0).is_err());
        assert!(SumOfConstraintsPenaltyFunction::new(f64::NAN).is_err());
        assert!(SumOfConstraintsPenaltyFunction::new(0.0).is_ok());
    }

    #[test]
    fn test_no_penalty() {
        let mut solution = with_constraints(&[5.0]);
        assert_eq!(NoPenaltyFunction.calculate(&mut solution), 0.0);
        assert_eq!(solution.attribute(PENALTY), Some(0.0));
    }
}
