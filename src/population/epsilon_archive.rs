//! Epsilon-box dominance archive
//!
//! Keeps at most one solution per epsilon box. Besides the members, the
//! archive counts how often it improved, which drives the restart logic of
//! epsilon-based algorithms.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::EvoResult;
use crate::objective::epsilon::{EpsilonBoxDominanceComparator, Epsilons};
use crate::population::archive::NondominatedPopulation;
use crate::population::population::Population;
use crate::population::solution::Solution;

/// Archive that is nondominated under epsilon-box dominance
#[derive(Clone, Debug)]
pub struct EpsilonBoxDominanceArchive {
    population: Population,
    comparator: EpsilonBoxDominanceComparator,
    /// Accepted insertions that did not just replace a same-box member
    improvements: usize,
    /// Improvements that removed a box-dominated member
    dominating_improvements: usize,
}

impl EpsilonBoxDominanceArchive {
    pub fn new(epsilons: Epsilons) -> Self {
        Self {
            population: Population::new(),
            comparator: EpsilonBoxDominanceComparator::new(epsilons),
            improvements: 0,
            dominating_improvements: 0,
        }
    }

    pub fn comparator(&self) -> &EpsilonBoxDominanceComparator {
        &self.comparator
    }

    pub fn epsilons(&self) -> &Epsilons {
        self.comparator.epsilons()
    }

    /// Insert a copy of `solution` unless a member beats it
    ///
    /// Members the candidate box-dominates, or beats inside their shared
    /// box, are removed. A rejected candidate leaves the archive unchanged.
    pub fn add(&mut self, solution: &Solution) -> EvoResult<bool> {
        let mut beaten = Vec::new();
        let mut same_box = false;
        let mut dominates = false;

        for (index, member) in self.population.iter().enumerate() {
            let result = self.comparator.compare_boxes(solution, member)?;
            match result.ordering {
                Ordering::Less => {
                    if result.same_box {
                        same_box = true;
                    } else {
                        dominates = true;
                    }
                    beaten.push(index);
                }
                Ordering::Greater => {
                    trace!(
                        member = index,
                        same_box = result.same_box,
                        "epsilon archive rejected candidate"
                    );
                    return Ok(false);
                }
                Ordering::Equal => {}
            }
        }

        for index in beaten.into_iter().rev() {
            self.population.remove(index)?;
        }

        if !same_box {
            self.improvements += 1;
            if dominates {
                self.dominating_improvements += 1;
            }
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

    pub fn number_of_improvements(&self) -> usize {
        self.improvements
    }

    pub fn number_of_dominating_improvements(&self) -> usize {
        self.dominating_improvements
    }

    pub fn len(&self) -> usize {
        self.population.len()
    }

    pub fn is_empty(&self) -> bool {
        self.population.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.population.get(index)
    }

    pub fn first(&self) -> EvoResult<&Solution> {
        self.population.first()
    }

    pub fn remove(&mut self, index: usize) -> EvoResult<Solution> {
        self.population.remove(index)
    }

    pub fn contains(&self, solution: &Solution) -> bool {
        self.population.iter().any(|member| member == solution)
    }

    /// Remove every member; the improvement counters are kept
    pub fn clear(&mut self) {
        self.population.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.population.iter()
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Copy the members into a Pareto archive
    pub fn to_nondominated(&self) -> EvoResult<NondominatedPopulation> {
        let mut result = NondominatedPopulation::new();
        result.add_all(self.population.iter())?;
        Ok(result)
    }
}
