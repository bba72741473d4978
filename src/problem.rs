//! Problem abstraction
//!
//! A problem builds fresh solutions with the right variable layout and
//! evaluates them in place. Problems are shared between threads.

use crate::error::EvoResult;
use crate::population::solution::Solution;

/// An optimization problem
pub trait Problem: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &str;

    fn number_of_variables(&self) -> usize;

    fn number_of_objectives(&self) -> usize;

    fn number_of_constraints(&self) -> usize;

    /// Write objective and constraint values into `solution`
    fn evaluate(&self, solution: &mut Solution) -> EvoResult<()>;

    /// A new solution with variables at their defaults and objectives unset
    ///
    /// Callers randomize the variables before evaluation.
    fn new_solution(&self) -> Solution;
}
