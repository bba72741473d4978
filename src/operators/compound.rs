//! Operator pipelines

use rand::Rng;

use crate::error::{EvoResult, OperatorError};
use crate::operators::traits::Variation;
use crate::population::solution::Solution;

/// Applies `first`, then feeds its offspring through `second`
///
/// The usual pairing is a crossover followed by a mutation. Offspring of
/// `first` are passed to `second` in groups of `second.arity()`.
#[derive(Clone, Debug)]
pub struct CompoundVariation<A, B> {
    first: A,
    second: B,
}

impl<A: Variation, B: Variation> CompoundVariation<A, B> {
    pub fn new(first: A, second: B) -> Result<Self, OperatorError> {
        if second.arity() == 0 {
            return Err(OperatorError::InvalidConfiguration(
                "second operator of a pipeline must take at least one parent".to_string(),
            ));
        }
        Ok(Self { first, second })
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }
}

impl<A: Variation, B: Variation> Variation for CompoundVariation<A, B> {
    fn arity(&self) -> usize {
        self.first.arity()
    }

    fn evolve<R: Rng + ?Sized>(
        &self,
        parents: &[Solution],
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        let intermediate = self.first.evolve(parents, rng)?;

        let group = self.second.arity();
        if intermediate.len() % group != 0 {
            return Err(OperatorError::WrongArity {
                expected: group,
                actual: intermediate.len() % group,
            }
            .into());
        }

        let mut offspring = Vec::with_capacity(intermediate.len());
        for chunk in intermediate.chunks(group) {
            offspring.extend(self.second.evolve(chunk, rng)?);
        }
        Ok(offspring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::objective::Objective;
    use crate::operators::crossover::Hux;
    use crate::operators::mutation::BitFlip;
    use crate::variable::{BitString, Variable};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn solution(bits: BitString) -> Solution {
        Solution::new(vec![Variable::from(bits)], vec![Objective::minimize()], 0)
    }

    #[test]
    fn test_crossover_then_mutation() {
        let mut rng = StdRng::seed_from_u64(1);
        let pipeline =
            CompoundVariation::new(Hux::new(0.0).unwrap(), BitFlip::new(1.0).unwrap()).unwrap();
        assert_eq!(pipeline.arity(), 2);

        let parents = [solution(BitString::zeros(8)), solution(BitString::ones(8))];
        let offspring = pipeline.evolve(&parents, &mut rng).unwrap();

        assert_eq!(offspring.len(), 2);
        // HUX is disabled, so each child is its parent with every bit flipped
        assert_eq!(offspring[0].variables[0].as_binary().unwrap().count_ones(), 8);
        assert_eq!(offspring[1].variables[0].as_binary().unwrap().count_ones(), 0);
    }

    #[test]
    fn test_group_mismatch() {
        let mut rng = StdRng::seed_from_u64(1);
        let pipeline =
            CompoundVariation::new(BitFlip::new(0.5).unwrap(), Hux::new(1.0).unwrap()).unwrap();
        let parents = [solution(BitString::zeros(8))];
        assert!(pipeline.evolve(&parents, &mut rng).is_err());
    }
}
