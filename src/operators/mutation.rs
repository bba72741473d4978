//! Mutation operators
//!
//! Each operator takes one parent and returns one mutated copy. Variables of
//! kinds an operator does not handle are copied unchanged.

use rand::Rng;

use crate::error::{EvoResult, OperatorError};
use crate::operators::traits::{
    check_distribution_index, check_probability, mutate_each, Variation,
};
use crate::population::solution::Solution;
use crate::variable::Variable;

/// Bit-flip mutation for binary variables
///
/// Flips each bit independently with the given probability.
#[derive(Clone, Debug)]
pub struct BitFlip {
    /// Per-bit mutation probability
    probability: f64,
}

impl BitFlip {
    pub fn new(probability: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            probability: check_probability("bit flip probability", probability)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Variation for BitFlip {
    fn arity(&self) -> usize {
        1
    }

    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        mutate_each(parents, rng, |variable, rng| {
            if let Variable::Binary(bits) = variable {
                for i in 0..bits.len() {
                    if rng.gen::<f64>() < self.probability {
                        bits.flip(i);
                    }
                }
            }
        })
    }
}

/// Uniform codon mutation for grammar variables
///
/// Each codon is redrawn from `[0, max_value)` with the given probability.
#[derive(Clone, Debug)]
pub struct GrammarMutation {
    probability: f64,
}

impl GrammarMutation {
    pub fn new(probability: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            probability: check_probability("grammar mutation probability", probability)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Variation for GrammarMutation {
    fn arity(&self) -> usize {
        1
    }

    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        mutate_each(parents, rng, |variable, rng| {
            if let Variable::Grammar(grammar) = variable {
                for i in 0..grammar.len() {
                    if rng.gen::<f64>() < self.probability {
                        grammar.redraw(i, rng);
                    }
                }
            }
        })
    }
}

/// Polynomial mutation for bounded real variables
///
/// Perturbs each real variable with the given probability using a
/// polynomial distribution; the result stays within the bounds.
///
/// Reference: Deb, K. (2001). Multi-Objective Optimization using Evolutionary Algorithms.
#[derive(Clone, Debug)]
pub struct PolynomialMutation {
    /// Per-variable mutation probability
    probability: f64,
    /// Distribution index (typically 20)
    /// Higher values = smaller mutations
    distribution_index: f64,
}

impl PolynomialMutation {
    pub fn new(probability: f64, distribution_index: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            probability: check_probability("polynomial mutation probability", probability)?,
            distribution_index: check_distribution_index(distribution_index)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn distribution_index(&self) -> f64 {
        self.distribution_index
    }

    fn mutate_value<R: Rng + ?Sized>(&self, value: f64, min: f64, max: f64, rng: &mut R) -> f64 {
        let range = max - min;
        if range <= 0.0 {
            return value;
        }

        let delta1 = (value - min) / range;
        let delta2 = (max - value) / range;
        let exponent = self.distribution_index + 1.0;

        let u = rng.gen::<f64>();
        let delta_q = if u <= 0.5 {
            let val = 2.0 * u + (1.0 - 2.0 * u) * (1.0 - delta1).powf(exponent);
            val.powf(1.0 / exponent) - 1.0
        } else {
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * (1.0 - delta2).powf(exponent);
            1.0 - val.powf(1.0 / exponent)
        };

        value + delta_q * range
    }
}

impl Variation for PolynomialMutation {
    fn arity(&self) -> usize {
        1
    }

    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        mutate_each(parents, rng, |variable, rng| {
            if let Variable::Real(real) = variable {
                if rng.gen::<f64>() < self.probability {
                    let bounds = real.bounds();
                    let mutated = self.mutate_value(real.value(), bounds.min, bounds.max, rng);
                    real.set_clamped(mutated);
                }
            }
        })
    }
}

/// Swap mutation for permutations
///
/// With the given probability, exchanges two distinct random positions.
#[derive(Clone, Debug)]
pub struct SwapMutation {
    probability: f64,
}

impl SwapMutation {
    pub fn new(probability: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            probability: check_probability("swap probability", probability)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Variation for SwapMutation {
    fn arity(&self) -> usize {
        1
    }

    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        mutate_each(parents, rng, |variable, rng| {
            if let Variable::Permutation(perm) = variable {
                let n = perm.len();
                if n >= 2 && rng.gen::<f64>() < self.probability {
                    let i = rng.gen_range(0..n);
                    let mut j = rng.gen_range(0..n - 1);
                    if j >= i {
                        j += 1;
                    }
                    perm.swap(i, j);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvolutionError;
    use crate::objective::objective::Objective;
    use crate::variable::{BitString, Bounds, Grammar, Permutation, RealVariable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solution(variables: Vec<Variable>) -> Solution {
        Solution::new(variables, vec![Objective::minimize()], 0)
    }

    #[test]
    fn test_invalid_probability() {
        assert!(matches!(
            BitFlip::new(1.5),
            Err(OperatorError::InvalidConfiguration(_))
        ));
        assert!(BitFlip::new(-0.1).is_err());
        assert!(GrammarMutation::new(2.0).is_err());
        assert!(SwapMutation::new(-1.0).is_err());
        assert!(PolynomialMutation::new(0.5, -1.0).is_err());
        assert!(PolynomialMutation::new(1.1, 20.0).is_err());
    }

    fn observed_flip_rate(probability: f64, seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mutation = BitFlip::new(probability).unwrap();
        let parent = solution(vec![BitString::zeros(100).into()]);

        let trials = 500;
        let mut flipped = 0;
        for _ in 0..trials {
            let child = mutation.evolve(&[parent.clone()], &mut rng).unwrap();
            flipped += child[0].variables[0].as_binary().unwrap().count_ones();
        }
        flipped as f64 / (trials * 100) as f64
    }

    #[test]
    fn test_bit_flip_rate() {
        // 50,000 bits per rate; tolerances are several standard deviations
        let low = observed_flip_rate(0.1, 42);
        assert!((low - 0.1).abs() < 0.0065, "mean flip rate {}", low);

        let half = observed_flip_rate(0.5, 7);
        assert!((half - 0.5).abs() < 0.01, "mean flip rate {}", half);
    }

    #[test]
    fn test_bit_flip_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let parent = solution(vec![BitString::zeros(32).into()]);

        let none = BitFlip::new(0.0)
            .unwrap()
            .evolve(&[parent.clone()], &mut rng)
            .unwrap();
        assert_eq!(none[0], parent);

        let all = BitFlip::new(1.0)
            .unwrap()
            .evolve(&[parent.clone()], &mut rng)
            .unwrap();
        assert_eq!(all[0].variables[0].as_binary().unwrap().count_ones(), 32);
    }

    #[test]
    fn test_parent_not_modified() {
        let mut rng = StdRng::seed_from_u64(7);
        let parent = solution(vec![BitString::zeros(16).into()]);
        let before = parent.clone();

        let parents = [parent];
        let _ = BitFlip::new(1.0).unwrap().evolve(&parents, &mut rng).unwrap();
        assert_eq!(parents[0], before);
    }

    #[test]
    fn test_other_kinds_pass_through() {
        let mut rng = StdRng::seed_from_u64(3);
        let real = RealVariable::with_value(0.5, Bounds::unit()).unwrap();
        let parent = solution(vec![
            real.into(),
            BitString::zeros(8).into(),
            Permutation::identity(5).into(),
        ]);

        let mutation = BitFlip::new(1.0).unwrap();
        let child = &mutation.evolve(&[parent.clone()], &mut rng).unwrap()[0];
        assert_eq!(child.variables[0], parent.variables[0]);
        assert_eq!(child.variables[2], parent.variables[2]);
        assert_eq!(child.variables[1].as_binary().unwrap().count_ones(), 8);
    }

    #[test]
    fn test_wrong_arity() {
        let mut rng = StdRng::seed_from_u64(3);
        let parent = solution(vec![BitString::zeros(8).into()]);
        let result = BitFlip::new(0.5)
            .unwrap()
            .evolve(&[parent.clone(), parent], &mut rng);
        assert!(matches!(
            result,
            Err(EvolutionError::Operator(OperatorError::WrongArity { .. }))
        ));
    }

    #[test]
    fn test_grammar_mutation_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let grammar = Grammar::from_codons(vec![0; 50], 10).unwrap();
        let parent = solution(vec![grammar.into()]);

        let mutation = GrammarMutation::new(1.0).unwrap();
        let child = &mutation.evolve(&[parent], &mut rng).unwrap()[0];
        let codons = child.variables[0].as_grammar().unwrap().codons();
        assert_eq!(codons.len(), 50);
        assert!(codons.iter().all(|&c| c < 10));
        assert!(codons.iter().any(|&c| c != 0));
    }

    #[test]
    fn test_polynomial_mutation_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let mutation = PolynomialMutation::new(1.0, 20.0).unwrap();
        let bounds = Bounds::new(-1.0, 1.0).unwrap();
        let parent = solution(vec![RealVariable::with_value(0.99, bounds).unwrap().into()]);

        let mut changed = false;
        for _ in 0..1000 {
            let child = mutation.evolve(&[parent.clone()], &mut rng).unwrap();
            let value = child[0].variables[0].as_real().unwrap().value();
            assert!((-1.0..=1.0).contains(&value));
            changed |= value != 0.99;
        }
        assert!(changed);
    }

    #[test]
    fn test_swap_mutation_keeps_permutation_valid() {
        let mut rng = StdRng::seed_from_u64(9);
        let parent = solution(vec![Permutation::identity(10).into()]);

        let mutation = SwapMutation::new(1.0).unwrap();
        let child = &mutation.evolve(&[parent], &mut rng).unwrap()[0];
        let perm = child.variables[0].as_permutation().unwrap();
        assert!(perm.is_valid());

        let moved = perm
            .as_slice()
            .iter()
            .enumerate()
            .filter(|(i, &p)| *i != p)
            .count();
        assert_eq!(moved, 2);
    }
}
