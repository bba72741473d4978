//! Crossover operators
//!
//! Each operator takes two parents and returns two offspring. The pair is
//! recombined with the operator's probability; otherwise the offspring are
//! plain copies of the parents.

use rand::Rng;

use crate::error::{EvoResult, OperatorError};
use crate::operators::traits::{
    check_distribution_index, check_probability, crossover_pair, Variation,
};
use crate::population::solution::Solution;
use crate::variable::{BitString, Variable};

/// Half-uniform crossover (HUX) for binary variables
///
/// Each bit on which the parents differ is exchanged with probability 0.5.
/// Bits the parents share are never touched.
#[derive(Clone, Debug)]
pub struct Hux {
    probability: f64,
}

impl Hux {
    pub fn new(probability: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            probability: check_probability("HUX probability", probability)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Variation for Hux {
    fn arity(&self) -> usize {
        2
    }

    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        crossover_pair(
            parents,
            self.probability,
            rng,
            |variable| variable.as_binary().map(BitString::len),
            |a, b, rng| {
                if let (Variable::Binary(a), Variable::Binary(b)) = (a, b) {
                    for i in 0..a.len() {
                        if a[i] != b[i] && rng.gen_bool(0.5) {
                            a.swap_with(b, i);
                        }
                    }
                }
            },
        )
    }
}

/// Single-point crossover for grammar variables
///
/// A cut point is drawn independently for each parent in `[1, len - 1]` and
/// the tails are exchanged, so offspring lengths may differ from their
/// parents'. Codon sequences shorter than two are left unchanged.
#[derive(Clone, Debug)]
pub struct GrammarCrossover {
    probability: f64,
}

impl GrammarCrossover {
    pub fn new(probability: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            probability: check_probability("grammar crossover probability", probability)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl Variation for GrammarCrossover {
    fn arity(&self) -> usize {
        2
    }

    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        crossover_pair(
            parents,
            self.probability,
            rng,
            |_| None,
            |a, b, rng| {
                if let (Variable::Grammar(a), Variable::Grammar(b)) = (a, b) {
                    if a.len() < 2 || b.len() < 2 {
                        return;
                    }
                    let cut_a = rng.gen_range(1..a.len());
                    let cut_b = rng.gen_range(1..b.len());
                    let tail_a = a.split_tail(cut_a);
                    let tail_b = b.split_tail(cut_b);
                    a.extend_tail(tail_b);
                    b.extend_tail(tail_a);
                }
            },
        )
    }
}

/// Simulated Binary Crossover (SBX) for bounded real variables
///
/// SBX generates offspring from parents using a spread factor that
/// simulates single-point crossover for binary strings. Offspring values
/// are clamped into the variable bounds.
///
/// Reference: Deb, K., & Agrawal, R. B. (1995). Simulated Binary Crossover
/// for Continuous Search Space.
#[derive(Clone, Debug)]
pub struct Sbx {
    probability: f64,
    /// Distribution index (typically 15)
    /// Higher values = offspring closer to parents
    distribution_index: f64,
}

impl Sbx {
    pub fn new(probability: f64, distribution_index: f64) -> Result<Self, OperatorError> {
        Ok(Self {
            probability: check_probability("SBX probability", probability)?,
            distribution_index: check_distribution_index(distribution_index)?,
        })
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn distribution_index(&self) -> f64 {
        self.distribution_index
    }

    /// Compute the spread factor β from a uniform random value
    fn spread_factor(&self, u: f64) -> f64 {
        let exponent = 1.0 / (self.distribution_index + 1.0);
        if u <= 0.5 {
            (2.0 * u).powf(exponent)
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(exponent)
        }
    }
}

impl Variation for Sbx {
    fn arity(&self) -> usize {
        2
    }

    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        crossover_pair(
            parents,
            self.probability,
            rng,
            |_| None,
            |a, b, rng| {
                if let (Variable::Real(a), Variable::Real(b)) = (a, b) {
                    let (x1, x2) = (a.value(), b.value());
                    // Only apply if parents differ sufficiently
                    if (x1 - x2).abs() > 1e-14 {
                        let beta = self.spread_factor(rng.gen::<f64>());
                        a.set_clamped(0.5 * ((1.0 + beta) * x1 + (1.0 - beta) * x2));
                        b.set_clamped(0.5 * ((1.0 - beta) * x1 + (1.0 + beta) * x2));
                    }
                }
            },
        )
    }
}
