//! Operator traits
//!
//! This module defines the variation trait and the shared plumbing used by
//! mutation and crossover operators.

use rand::Rng;

use crate::error::{EvoResult, OperatorError};
use crate::population::solution::Solution;
use crate::variable::Variable;

/// Variation operator trait
///
/// Produces offspring from a fixed number of parents. Parents are never
/// modified; offspring start as clones of their parents.
pub trait Variation: Send + Sync {
    /// Number of parents consumed per call
    fn arity(&self) -> usize;

    /// Produce offspring from `parents`
    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>>;
}

/// Validate a probability at construction time
pub(crate) fn check_probability(name: &str, probability: f64) -> Result<f64, OperatorError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(OperatorError::InvalidConfiguration(format!(
            "{} must be in [0, 1], got {}",
            name, probability
        )));
    }
    Ok(probability)
}

/// Validate a distribution index at construction time
pub(crate) fn check_distribution_index(eta: f64) -> Result<f64, OperatorError> {
    if !(eta.is_finite() && eta >= 0.0) {
        return Err(OperatorError::InvalidConfiguration(format!(
            "distribution index must be finite and non-negative, got {}",
            eta
        )));
    }
    Ok(eta)
}

pub(crate) fn check_arity(expected: usize, parents: &[Solution]) -> Result<(), OperatorError> {
    if parents.len() != expected {
        return Err(OperatorError::WrongArity {
            expected,
            actual: parents.len(),
        });
    }
    Ok(())
}

/// Clone the single parent and apply `mutate` to each of its variables
pub(crate) fn mutate_each<R, F>(
    parents: &[Solution],
    rng: &mut R,
    mut mutate: F,
) -> EvoResult<Vec<Solution>>
where
    R: Rng + ?Sized,
    F: FnMut(&mut Variable, &mut R),
{
    check_arity(1, parents)?;

    let mut child = parents[0].clone();
    for variable in &mut child.variables {
        mutate(variable, &mut *rng);
    }
    Ok(vec![child])
}

/// Clone both parents and, with probability `probability`, apply `cross` to
/// each aligned pair of variables
///
/// `length` reports the length the operator requires to match for a
/// variable, or `None` when the variable is not constrained.
pub(crate) fn crossover_pair<R, L, F>(
    parents: &[Solution],
    probability: f64,
    rng: &mut R,
    length: L,
    mut cross: F,
) -> EvoResult<Vec<Solution>>
where
    R: Rng + ?Sized,
    L: Fn(&Variable) -> Option<usize>,
    F: FnMut(&mut Variable, &mut Variable, &mut R),
{
    check_arity(2, parents)?;

    let (first, second) = (&parents[0], &parents[1]);
    if first.number_of_variables() != second.number_of_variables() {
        return Err(OperatorError::DimensionMismatch {
            index: first.number_of_variables().min(second.number_of_variables()),
            left: first.number_of_variables(),
            right: second.number_of_variables(),
        }
        .into());
    }

    for (index, (a, b)) in first.variables.iter().zip(&second.variables).enumerate() {
        if let (Some(left), Some(right)) = (length(a), length(b)) {
            if left != right {
                return Err(OperatorError::DimensionMismatch { index, left, right }.into());
            }
        }
    }

    let mut child1 = first.clone();
    let mut child2 = second.clone();

    if rng.gen::<f64>() < probability {
        for (a, b) in child1.variables.iter_mut().zip(child2.variables.iter_mut()) {
            cross(a, b, &mut *rng);
        }
    }

    Ok(vec![child1, child2])
}
