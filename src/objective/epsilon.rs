//! Epsilon-box dominance
//!
//! Objective space is divided into boxes of side `epsilon`. Solutions are
//! compared by the boxes they occupy; two solutions in the same box are
//! separated by their distance to the box's lower corner.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::dominance::{combine, AggregateConstraintComparator, DominanceComparator};
use crate::error::{EvoResult, EvolutionError};
use crate::population::solution::Solution;

/// Per-objective box sizes
///
/// Objectives past the end of the vector reuse the last value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Epsilons {
    values: Vec<f64>,
}

impl Epsilons {
    /// Validate and wrap epsilon values; each must be finite and positive
    pub fn new(values: Vec<f64>) -> EvoResult<Self> {
        if values.is_empty() {
            return Err(EvolutionError::Configuration(
                "at least one epsilon is required".to_string(),
            ));
        }
        if let Some(bad) = values.iter().find(|&&e| !(e.is_finite() && e > 0.0)) {
            return Err(EvolutionError::Configuration(format!(
                "epsilon must be finite and positive, got {}",
                bad
            )));
        }
        Ok(Self { values })
    }

    /// Same epsilon for every objective
    pub fn uniform(epsilon: f64) -> EvoResult<Self> {
        Self::new(vec![epsilon])
    }

    /// Epsilon for objective `index`
    pub fn get(&self, index: usize) -> f64 {
        let last = self.values.len() - 1;
        self.values[index.min(last)]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl TryFrom<Vec<f64>> for Epsilons {
    type Error = EvolutionError;

    fn try_from(values: Vec<f64>) -> EvoResult<Self> {
        Self::new(values)
    }
}

impl From<Epsilons> for Vec<f64> {
    fn from(epsilons: Epsilons) -> Self {
        epsilons.values
    }
}

/// Outcome of an epsilon-box comparison
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxComparison {
    pub ordering: Ordering,
    /// Both solutions occupy the same box
    pub same_box: bool,
}

/// Epsilon-box dominance with constraint handling
#[derive(Clone, Debug)]
pub struct EpsilonBoxDominanceComparator {
    epsilons: Epsilons,
}

impl EpsilonBoxDominanceComparator {
    pub fn new(epsilons: Epsilons) -> Self {
        Self { epsilons }
    }

    pub fn epsilons(&self) -> &Epsilons {
        &self.epsilons
    }

    /// Box index vector of a solution
    pub fn box_index(&self, solution: &Solution) -> EvoResult<Vec<i64>> {
        solution
            .objectives()
            .iter()
            .enumerate()
            .map(|(i, o)| o.epsilon_index(self.epsilons.get(i)))
            .collect()
    }

    fn corner_distance(&self, solution: &Solution) -> EvoResult<f64> {
        let mut sum = 0.0;
        for (i, objective) in solution.objectives().iter().enumerate() {
            sum += objective.epsilon_distance(self.epsilons.get(i))?.powi(2);
        }
        Ok(sum)
    }

    /// Compare `a` against `b`, reporting whether they share a box
    ///
    /// Inside a shared box the solution closer to the lower corner wins and
    /// an exact tie favours `b`.
    pub fn compare_boxes(&self, a: &Solution, b: &Solution) -> EvoResult<BoxComparison> {
        let constraint = AggregateConstraintComparator.compare(a, b)?;
        if constraint != Ordering::Equal {
            return Ok(BoxComparison {
                ordering: constraint,
                same_box: false,
            });
        }

        if a.number_of_objectives() != b.number_of_objectives() {
            return Err(EvolutionError::type_mismatch(
                format!("{} objectives", a.number_of_objectives()),
                format!("{} objectives", b.number_of_objectives()),
            ));
        }
        for (oa, ob) in a.objectives().iter().zip(b.objectives()) {
            if oa.sense() != ob.sense() {
                return Err(EvolutionError::type_mismatch(oa.sense(), ob.sense()));
            }
        }

        let box_a = self.box_index(a)?;
        let box_b = self.box_index(b)?;

        let mut a_better = false;
        let mut b_better = false;
        for (ia, ib) in box_a.iter().zip(&box_b) {
            match ia.cmp(ib) {
                Ordering::Less => a_better = true,
                Ordering::Greater => b_better = true,
                Ordering::Equal => {}
            }
        }

        if a_better || b_better {
            return Ok(BoxComparison {
                ordering: combine(a_better, b_better),
                same_box: false,
            });
        }

        let da = self.corner_distance(a)?;
        let db = self.corner_distance(b)?;
        let ordering = if da < db {
            Ordering::Less
        } else {
            Ordering::Greater
        };

        Ok(BoxComparison {
            ordering,
            same_box: true,
        })
    }
}

impl DominanceComparator for EpsilonBoxDominanceComparator {
    fn compare(&self, a: &Solution, b: &Solution) -> EvoResult<Ordering> {
        Ok(self.compare_boxes(a, b)?.ordering)
    }
}
