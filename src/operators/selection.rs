//! Selection operators
//!
//! Tournament selection driven by a dominance comparator.

use std::cmp::Ordering;

use rand::seq::index;
use rand::Rng;

use crate::error::{EvoResult, EvolutionError, OperatorError};
use crate::objective::dominance::{DominanceComparator, NondominatedSortingComparator};
use crate::population::population::Population;
use crate::population::solution::Solution;

/// Tournament selection operator
///
/// Draws `size` distinct members at random and keeps the one the
/// comparator prefers. Ties go to the first drawn.
#[derive(Clone, Debug)]
pub struct TournamentSelection<C = NondominatedSortingComparator> {
    /// Tournament size (number of solutions competing)
    size: usize,
    comparator: C,
}

impl TournamentSelection<NondominatedSortingComparator> {
    /// Binary tournament on rank, then crowding distance
    pub fn binary() -> Self {
        Self {
            size: 2,
            comparator: NondominatedSortingComparator::rank_and_crowding(),
        }
    }
}

impl<C: DominanceComparator> TournamentSelection<C> {
    pub fn new(size: usize, comparator: C) -> Result<Self, OperatorError> {
        if size == 0 {
            return Err(OperatorError::InvalidConfiguration(
                "tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self { size, comparator })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Index of the tournament winner
    pub fn select_index<R: Rng + ?Sized>(
        &self,
        population: &Population,
        rng: &mut R,
    ) -> EvoResult<usize> {
        if population.is_empty() {
            return Err(EvolutionError::EmptyPopulation);
        }

        let size = self.size.min(population.len());
        let mut contestants = index::sample(rng, population.len(), size).into_iter();

        let mut winner = contestants.next().ok_or_else(|| {
            OperatorError::SelectionFailed("no tournament contestants".to_string())
        })?;
        for candidate in contestants {
            if self.comparator.compare(&population[candidate], &population[winner])?
                == Ordering::Less
            {
                winner = candidate;
            }
        }

        Ok(winner)
    }

    /// The tournament winner
    pub fn select<'a, R: Rng + ?Sized>(
        &self,
        population: &'a Population,
        rng: &mut R,
    ) -> EvoResult<&'a Solution> {
        let index = self.select_index(population, rng)?;
        Ok(&population[index])
    }

    /// Clones of `count` independent tournament winners
    pub fn select_many<R: Rng + ?Sized>(
        &self,
        population: &Population,
        count: usize,
        rng: &mut R,
    ) -> EvoResult<Vec<Solution>> {
        (0..count)
            .map(|_| self.select(population, rng).map(Solution::clone))
            .collect()
    }
}

impl Default for TournamentSelection<NondominatedSortingComparator> {
    fn default() -> Self {
        Self::binary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::dominance::ParetoDominanceComparator;
    use crate::population::solution::RANK;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ranked(ranks: &[f64]) -> Population {
        ranks
            .iter()
            .map(|&rank| {
                let mut solution = Solution::from_objectives(&[rank]);
                solution.set_attribute(RANK, rank);
                solution
            })
            .collect()
    }

    #[test]
    fn test_invalid_size() {
        assert!(TournamentSelection::new(0, ParetoDominanceComparator).is_err());
    }

    #[test]
    fn test_empty_population() {
        let mut rng = StdRng::seed_from_u64(1);
        let selection = TournamentSelection::binary();
        assert!(matches!(
            selection.select_index(&Population::new(), &mut rng),
            Err(EvolutionError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_full_tournament_picks_best() {
        let mut rng = StdRng::seed_from_u64(1);
        let population = ranked(&[3.0, 1.0, 0.0, 2.0]);
        let selection =
            TournamentSelection::new(4, NondominatedSortingComparator::rank_and_crowding())
                .unwrap();

        for _ in 0..20 {
            assert_eq!(selection.select_index(&population, &mut rng).unwrap(), 2);
        }
    }

    #[test]
    fn test_binary_tournament_favours_low_rank() {
        let mut rng = StdRng::seed_from_u64(42);
        let population = ranked(&[0.0, 1.0, 2.0, 3.0]);
        let selection = TournamentSelection::binary();

        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[selection.select_index(&population, &mut rng).unwrap()] += 1;
        }
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
        assert_eq!(counts[3], 0);
    }

    #[test]
    fn test_select_many() {
        let mut rng = StdRng::seed_from_u64(3);
        let population = ranked(&[0.0, 1.0]);
        let selected = TournamentSelection::binary()
            .select_many(&population, 5, &mut rng)
            .unwrap();
        assert_eq!(selected.len(), 5);
    }
}
