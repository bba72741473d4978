//! Migration strategies
//!
//! A strategy picks emigrants from an island and deposits copies into the
//! immigration queues of its neighbors. It never touches another island's
//! population directly.

use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use crate::error::{EvoResult, OperatorError};
use crate::island::island::Island;
use crate::island::queue::ImmigrationQueue;
use crate::operators::selection::TournamentSelection;

/// How emigrants leave an island
pub trait Migration: Send + Sync {
    /// Send copies of selected members of `island` to `neighbors`
    ///
    /// Islands with no neighbors or an empty population send nothing.
    fn migrate<R: Rng + ?Sized>(
        &self,
        island: &Island,
        neighbors: &[Arc<ImmigrationQueue>],
        rng: &mut R,
    ) -> EvoResult<()>;
}

/// One emigrant, chosen by binary tournament, sent to one random neighbor
#[derive(Clone, Debug, Default)]
pub struct SingleNeighborMigration {
    selection: TournamentSelection,
}

impl SingleNeighborMigration {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Migration for SingleNeighborMigration {
    fn migrate<R: Rng + ?Sized>(
        &self,
        island: &Island,
        neighbors: &[Arc<ImmigrationQueue>],
        rng: &mut R,
    ) -> EvoResult<()> {
        if neighbors.is_empty() || island.population().is_empty() {
            return Ok(());
        }

        let emigrant = self.selection.select(island.population(), rng)?;
        let target = rng.gen_range(0..neighbors.len());
        neighbors[target].add(emigrant);

        trace!(neighbor = target, "emigrant sent");
        Ok(())
    }
}

/// `count` emigrants, each copied into every neighbor's queue
#[derive(Clone, Debug)]
pub struct BroadcastMigration {
    count: usize,
    selection: TournamentSelection,
}

impl BroadcastMigration {
    pub fn new(count: usize) -> Result<Self, OperatorError> {
        if count == 0 {
            return Err(OperatorError::InvalidConfiguration(
                "broadcast migration must send at least one emigrant".to_string(),
            ));
        }
        Ok(Self {
            count,
            selection: TournamentSelection::binary(),
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl Migration for BroadcastMigration {
    fn migrate<R: Rng + ?Sized>(
        &self,
        island: &Island,
        neighbors: &[Arc<ImmigrationQueue>],
        rng: &mut R,
    ) -> EvoResult<()> {
        if neighbors.is_empty() || island.population().is_empty() {
            return Ok(());
        }

        for _ in 0..self.count {
            let emigrant = self.selection.select(island.population(), rng)?;
            for queue in neighbors {
                queue.add(emigrant);
            }
        }

        trace!(
            emigrants = self.count,
            neighbors = neighbors.len(),
            "emigrants broadcast"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::traits::Algorithm;
    use crate::population::archive::NondominatedPopulation;
    use crate::population::population::Population;
    use crate::population::solution::Solution;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Fixed(Population);

    impl Algorithm for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn iterate(&mut self) -> EvoResult<()> {
            Ok(())
        }

        fn number_of_evaluations(&self) -> usize {
            0
        }

        fn population(&self) -> &Population {
            &self.0
        }

        fn population_mut(&mut self) -> &mut Population {
            &mut self.0
        }

        fn result(&self) -> EvoResult<NondominatedPopulation> {
            Ok(NondominatedPopulation::new())
        }
    }

    fn island(size: usize) -> Island {
        let population = (0..size)
            .map(|i| Solution::from_objectives(&[i as f64]))
            .collect();
        Island::new(Box::new(Fixed(population)))
    }

    fn queues(count: usize) -> Vec<Arc<ImmigrationQueue>> {
        (0..count).map(|_| Arc::new(ImmigrationQueue::new())).collect()
    }

    #[test]
    fn test_single_neighbor_sends_one() {
        let mut rng = StdRng::seed_from_u64(5);
        let island = island(10);
        let neighbors = queues(3);

        for _ in 0..30 {
            SingleNeighborMigration::new()
                .migrate(&island, &neighbors, &mut rng)
                .unwrap();
        }

        let total: usize = neighbors.iter().map(|q| q.len()).sum();
        assert_eq!(total, 30);
        assert!(neighbors.iter().all(|q| !q.is_empty()));
        assert_eq!(island.population().len(), 10);
    }

    #[test]
    fn test_broadcast_reaches_every_neighbor() {
        let mut rng = StdRng::seed_from_u64(5);
        let island = island(10);
        let neighbors = queues(4);

        BroadcastMigration::new(2)
            .unwrap()
            .migrate(&island, &neighbors, &mut rng)
            .unwrap();

        assert!(neighbors.iter().all(|q| q.len() == 2));
    }

    #[test]
    fn test_no_neighbors_or_empty_population() {
        let mut rng = StdRng::seed_from_u64(5);
        let neighbors = queues(2);
        SingleNeighborMigration::new()
            .migrate(&island(0), &neighbors, &mut rng)
            .unwrap();
        SingleNeighborMigration::new()
            .migrate(&island(3), &[], &mut rng)
            .unwrap();
        assert!(neighbors.iter().all(|q| q.is_empty()));
    }

    #[test]
    fn test_broadcast_rejects_zero() {
        assert!(BroadcastMigration::new(0).is_err());
    }
}
