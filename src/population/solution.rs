//! Solution type
//!
//! A solution holds decision variables, a fixed-arity vector of objectives,
//! constraint values, and numeric attributes attached by algorithms (rank,
//! crowding distance, penalty). Solutions are plain values: whenever one
//! crosses an ownership boundary it is cloned.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::objective::objective::Objective;
use crate::variable::Variable;

/// Attribute key for the nondominated rank (0 = first front)
pub const RANK: &str = "rank";
/// Attribute key for the crowding distance
pub const CROWDING_DISTANCE: &str = "crowding_distance";
/// Attribute key for the penalty computed by a penalty function
pub const PENALTY: &str = "penalty";

/// A candidate solution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Decision variables
    pub variables: Vec<Variable>,
    objectives: Vec<Objective>,
    /// Constraint values; 0.0 means satisfied, any other value is a violation
    /// whose magnitude is its absolute value
    constraints: Vec<f64>,
    attributes: BTreeMap<String, f64>,
}

impl Solution {
    /// Create a solution with the given variables, objective template, and
    /// number of constraints (all initially satisfied)
    pub fn new(
        variables: Vec<Variable>,
        objectives: Vec<Objective>,
        number_of_constraints: usize,
    ) -> Self {
        Self {
            variables,
            objectives,
            constraints: vec![0.0; number_of_constraints],
            attributes: BTreeMap::new(),
        }
    }

    /// Create a variable-free solution with minimized objective values
    ///
    /// Handy for reference sets and archive tests.
    pub fn from_objectives(values: &[f64]) -> Self {
        Self::new(
            Vec::new(),
            values
                .iter()
                .map(|&v| Objective::minimize().with_value(v))
                .collect(),
            0,
        )
    }

    pub fn number_of_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    pub fn number_of_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    /// Get one objective
    pub fn objective(&self, index: usize) -> EvoResult<&Objective> {
        self.objectives
            .get(index)
            .ok_or_else(|| EvolutionError::NotFound(format!("objective {}", index)))
    }

    /// Raw objective values in order
    pub fn objective_values(&self) -> Vec<f64> {
        self.objectives.iter().map(Objective::value).collect()
    }

    /// Set the value of one objective
    pub fn set_objective(&mut self, index: usize, value: f64) -> EvoResult<()> {
        let objective = self
            .objectives
            .get_mut(index)
            .ok_or_else(|| EvolutionError::NotFound(format!("objective {}", index)))?;
        objective.set_value(value);
        Ok(())
    }

    /// Set every objective value; the arity is fixed
    pub fn set_objectives(&mut self, values: &[f64]) -> EvoResult<()> {
        if values.len() != self.objectives.len() {
            return Err(EvolutionError::type_mismatch(
                format!("{} objectives", self.objectives.len()),
                format!("{} objectives", values.len()),
            ));
        }
        for (objective, &value) in self.objectives.iter_mut().zip(values) {
            objective.set_value(value);
        }
        Ok(())
    }

    pub fn constraints(&self) -> &[f64] {
        &self.constraints
    }

    /// Set the value of one constraint
    pub fn set_constraint(&mut self, index: usize, value: f64) -> EvoResult<()> {
        let slot = self
            .constraints
            .get_mut(index)
            .ok_or_else(|| EvolutionError::NotFound(format!("constraint {}", index)))?;
        *slot = value;
        Ok(())
    }

    /// Set every constraint value; the arity is fixed
    pub fn set_constraints(&mut self, values: &[f64]) -> EvoResult<()> {
        if values.len() != self.constraints.len() {
            return Err(EvolutionError::type_mismatch(
                format!("{} constraints", self.constraints.len()),
                format!("{} constraints", values.len()),
            ));
        }
        self.constraints.copy_from_slice(values);
        Ok(())
    }

    /// True if any constraint is violated
    pub fn violates_constraints(&self) -> bool {
        self.constraints.iter().any(|&c| c != 0.0)
    }

    /// Sum of constraint violation magnitudes
    pub fn aggregate_violation(&self) -> f64 {
        self.constraints.iter().map(|c| c.abs()).sum()
    }

    pub fn attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).copied()
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.attributes.insert(key.into(), value)
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<f64> {
        self.attributes.remove(key)
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Euclidean distance between objective vectors
    pub fn objective_distance(&self, other: &Self) -> EvoResult<f64> {
        if self.objectives.len() != other.objectives.len() {
            return Err(EvolutionError::type_mismatch(
                format!("{} objectives", self.objectives.len()),
                format!("{} objectives", other.objectives.len()),
            ));
        }
        let mut sum = 0.0;
        for (a, b) in self.objectives.iter().zip(&other.objectives) {
            sum += a.distance(b)?.powi(2);
        }
        Ok(sum.sqrt())
    }

    /// Sum of per-variable distances in decision space
    pub fn variable_distance(&self, other: &Self) -> f64 {
        let common: f64 = self
            .variables
            .iter()
            .zip(&other.variables)
            .map(|(a, b)| a.distance(b))
            .sum();
        common + self.variables.len().abs_diff(other.variables.len()) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variable::BitString;

    #[test]
    fn test_from_objectives() {
        let solution = Solution::from_objectives(&[1.0, 2.0]);
        assert_eq!(solution.number_of_objectives(), 2);
        assert_eq!(solution.objective_values(), vec![1.0, 2.0]);
        assert!(!solution.violates_constraints());
    }

    #[test]
    fn test_set_objectives_arity() {
        let mut solution = Solution::from_objectives(&[0.0, 0.0]);
        assert!(solution.set_objectives(&[1.0, 2.0]).is_ok());
        assert!(solution.set_objectives(&[1.0]).is_err());
        assert!(matches!(
            solution.set_objective(5, 1.0),
            Err(EvolutionError::NotFound(_))
        ));
    }

    #[test]
    fn test_constraints() {
        let mut solution = Solution::new(vec![], vec![Objective::minimize()], 2);
        assert!(!solution.violates_constraints());

        solution.set_constraints(&[0.0, -1.5]).unwrap();
        assert!(solution.violates_constraints());
        assert_eq!(solution.aggregate_violation(), 1.5);
    }

    #[test]
    fn test_attributes() {
        let mut solution = Solution::from_objectives(&[1.0]);
        assert!(!solution.has_attribute(RANK));
        solution.set_attribute(RANK, 2.0);
        assert_eq!(solution.attribute(RANK), Some(2.0));
        assert_eq!(solution.remove_attribute(RANK), Some(2.0));
        assert!(!solution.has_attribute(RANK));
    }

    #[test]
    fn test_clone_is_deep() {
        let original = Solution::new(
            vec![BitString::zeros(4).into()],
            vec![Objective::minimize().with_value(1.0)],
            0,
        );
        let mut copy = original.clone();
        if let Variable::Binary(bits) = &mut copy.variables[0] {
            bits.flip(0);
        }
        assert_ne!(original, copy);
        assert_eq!(original.variables[0].as_binary().unwrap().count_ones(), 0);
    }

    #[test]
    fn test_objective_distance() {
        let a = Solution::from_objectives(&[0.0, 0.0]);
        let b = Solution::from_objectives(&[3.0, 4.0]);
        assert_eq!(a.objective_distance(&b).unwrap(), 5.0);
    }
}
