//! Algorithm abstraction
//!
//! The island layer drives algorithms only through this trait, so any
//! iterative population-based optimizer can run on an island.

use crate::error::EvoResult;
use crate::population::archive::NondominatedPopulation;
use crate::population::population::Population;

/// An iterative population-based optimizer
pub trait Algorithm: Send {
    /// Human-readable name
    fn name(&self) -> &str;

    /// Perform one iteration; the first call initializes the population
    fn iterate(&mut self) -> EvoResult<()>;

    /// Evaluations performed since construction
    fn number_of_evaluations(&self) -> usize;

    /// Current population
    fn population(&self) -> &Population;

    /// Mutable access to the current population, used to inject immigrants
    fn population_mut(&mut self) -> &mut Population;

    /// Best solutions found so far
    fn result(&self) -> EvoResult<NondominatedPopulation>;
}
