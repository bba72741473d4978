//! Nondominated population (Pareto archive)
//!
//! Insertion keeps the archive free of dominated members: a candidate that
//! is dominated by a member is rejected, and members dominated by an accepted
//! candidate are removed.
//!
//! Results depend on insertion order when candidates share objective values:
//! the first one inserted survives.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{EvoResult, EvolutionError};
use crate::objective::dominance::{DominanceComparator, ParetoDominanceComparator};
use crate::population::population::Population;
use crate::population::solution::Solution;

/// Distance below which two solutions are considered duplicates
pub const DUPLICATE_TOLERANCE: f64 = 1e-10;

/// How mutually nondominated near-identical solutions are treated
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuplicateMode {
    /// Reject a candidate whose objectives match a member's
    #[default]
    NoDuplicateObjectives,
    /// Keep equal objectives unless the decision variables also match
    AllowDuplicateObjectives,
    /// Never reject on similarity
    AllowDuplicates,
}

/// A population in which no member dominates another
#[derive(Clone, Debug)]
pub struct NondominatedPopulation<C = ParetoDominanceComparator> {
    population: Population,
    comparator: C,
    duplicate_mode: DuplicateMode,
}

impl NondominatedPopulation<ParetoDominanceComparator> {
    /// Empty archive under constraint-aware Pareto dominance
    pub fn new() -> Self {
        Self::with_comparator(ParetoDominanceComparator)
    }
}

impl Default for NondominatedPopulation<ParetoDominanceComparator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: DominanceComparator> NondominatedPopulation<C> {
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            population: Population::new(),
            comparator,
            duplicate_mode: DuplicateMode::default(),
        }
    }

    pub fn with_duplicate_mode(mut self, mode: DuplicateMode) -> Self {
        self.duplicate_mode = mode;
        self
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub fn duplicate_mode(&self) -> DuplicateMode {
        self.duplicate_mode
    }

    fn is_duplicate(&self, a: &Solution, b: &Solution) -> EvoResult<bool> {
        Ok(match self.duplicate_mode {
            DuplicateMode::NoDuplicateObjectives => {
                a.objective_distance(b)? < DUPLICATE_TOLERANCE
            }
            DuplicateMode::AllowDuplicateObjectives => {
                a.variable_distance(b) < DUPLICATE_TOLERANCE
            }
            DuplicateMode::AllowDuplicates => false,
        })
    }

    /// Insert a copy of `solution` if no member dominates or duplicates it
    ///
    /// Returns `true` when the solution was added. A rejected candidate
    /// leaves the archive unchanged.
    pub fn add(&mut self, solution: &Solution) -> EvoResult<bool> {
        let mut dominated = Vec::new();

        for (index, member) in self.population.iter().enumerate() {
            match self.comparator.compare(solution, member)? {
                Ordering::Less => dominated.push(index),
                Ordering::Greater => {
                    trace!(member = index, "candidate dominated by archive member");
                    return Ok(false);
                }
                Ordering::Equal => {
                    if self.is_duplicate(solution, member)? {
                        trace!(member = index, "candidate duplicates archive member");
                        return Ok(false);
                    }
                }
            }
        }

        for index in dominated.into_iter().rev() {
            self.population.remove(index)?;
        }
        self.population.push(solution.clone());
        Ok(true)
    }

    /// Add each solution in order; returns `true` if any was added
    pub fn add_all<'a, I>(&mut self, solutions: I) -> EvoResult<bool>
    where
        I: IntoIterator<Item = &'a Solution>,
    {
        let mut changed = false;
        for solution in solutions {
            changed |= self.add(solution)?;
        }
        Ok(changed)
    }
}

impl<C> NondominatedPopulation<C> {
    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.population.get(index)
    }

    /// First member, or `NotFound` when empty
    pub fn first(&self) -> EvoResult<&Solution> {
        self.population.first()
    }

    /// Remove the member at `index`
    ///
    /// Removing members never breaks nondomination.
    pub fn remove(&mut self, index: usize) -> EvoResult<Solution> {
        self.population.remove(index)
    }

    /// Remove the first member equal to `solution`
    pub fn remove_solution(&mut self, solution: &Solution) -> EvoResult<Solution> {
        let index = self
            .population
            .iter()
            .position(|member| member == solution)
            .ok_or_else(|| EvolutionError::NotFound("solution not in archive".to_string()))?;
        self.population.remove(index)
    }

    pub fn contains(&self, solution: &Solution) -> bool {
        self.population.iter().any(|member| member == solution)
    }

    pub fn clear(&mut self) {
        self.population.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.population.iter()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }
}

impl<'a, C> IntoIterator for &'a NondominatedPopulation<C> {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.population.iter()
    }
}
