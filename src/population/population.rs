//! Population type
//!
//! An ordered, non-unique container of solutions.

use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{EvoResult, EvolutionError};
use crate::population::solution::Solution;
use crate::problem::Problem;

/// A population of solutions
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    solutions: Vec<Solution>,
}

impl Population {
    /// Create an empty population
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a population with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            solutions: Vec::with_capacity(capacity),
        }
    }

    /// Create a population from a vector of solutions
    pub fn from_solutions(solutions: Vec<Solution>) -> Self {
        Self { solutions }
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Solution> {
        self.solutions.get_mut(index)
    }

    /// First solution, or `NotFound` when empty
    pub fn first(&self) -> EvoResult<&Solution> {
        self.solutions
            .first()
            .ok_or_else(|| EvolutionError::NotFound("population is empty".to_string()))
    }

    /// Append a solution
    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    /// Remove and return the last solution
    pub fn pop(&mut self) -> EvoResult<Solution> {
        self.solutions
            .pop()
            .ok_or_else(|| EvolutionError::NotFound("population is empty".to_string()))
    }

    /// Remove the solution at `index`, shifting later solutions down
    pub fn remove(&mut self, index: usize) -> EvoResult<Solution> {
        if index >= self.solutions.len() {
            return Err(EvolutionError::NotFound(format!(
                "index {} in population of {}",
                index,
                self.solutions.len()
            )));
        }
        Ok(self.solutions.remove(index))
    }

    /// Replace the solution at `index`, returning the old one
    pub fn replace(&mut self, index: usize, solution: Solution) -> EvoResult<Solution> {
        let slot = self.solutions.get_mut(index).ok_or_else(|| {
            EvolutionError::NotFound(format!("index {} in population", index))
        })?;
        Ok(std::mem::replace(slot, solution))
    }

    pub fn clear(&mut self) {
        self.solutions.clear();
    }

    pub fn truncate(&mut self, len: usize) {
        self.solutions.truncate(len);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Solution> {
        self.solutions.iter_mut()
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn into_solutions(self) -> Vec<Solution> {
        self.solutions
    }

    /// Stable sort with a comparison function
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Solution, &Solution) -> Ordering,
    {
        self.solutions.sort_by(compare);
    }

    /// Evaluate every solution against `problem` (sequential)
    pub fn evaluate<P: Problem + ?Sized>(&mut self, problem: &P) -> EvoResult<()> {
        for solution in &mut self.solutions {
            problem.evaluate(solution)?;
        }
        Ok(())
    }

    /// Evaluate every solution against `problem` in parallel
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel<P: Problem + ?Sized>(&mut self, problem: &P) -> EvoResult<()> {
        self.solutions
            .par_iter_mut()
            .try_for_each(|solution| problem.evaluate(solution))
    }

    /// Sequential fallback used when the `parallel` feature is disabled
    #[cfg(not(feature = "parallel"))]
    pub fn evaluate_parallel<P: Problem + ?Sized>(&mut self, problem: &P) -> EvoResult<()> {
        self.evaluate(problem)
    }
}

impl std::ops::Index<usize> for Population {
    type Output = Solution;

    fn index(&self, index: usize) -> &Self::Output {
        &self.solutions[index]
    }
}

impl std::ops::IndexMut<usize> for Population {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.solutions[index]
    }
}

impl IntoIterator for Population {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

impl FromIterator<Solution> for Population {
    fn from_iter<I: IntoIterator<Item = Solution>>(iter: I) -> Self {
        Self::from_solutions(iter.into_iter().collect())
    }
}

impl From<Vec<Solution>> for Population {
    fn from(solutions: Vec<Solution>) -> Self {
        Self::from_solutions(solutions)
    }
}
