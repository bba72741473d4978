//! Island Model Parallelism
//!
//! Runs several algorithm instances (islands) concurrently, one OS thread
//! per island, with periodic migration of solutions between them. Islands
//! only communicate through their immigration queues.

use std::any::Any;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::algorithms::traits::Algorithm;
use crate::error::{EvoResult, EvolutionError};
use crate::island::island::Island;
use crate::island::migration::{Migration, SingleNeighborMigration};
use crate::island::queue::ImmigrationQueue;
use crate::island::topology::Topology;
use crate::population::archive::NondominatedPopulation;

/// Configuration for the island model
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IslandModelConfig {
    /// Evaluations an island performs between migrations
    pub migration_frequency: usize,
    /// Seed for the per-island migration RNGs
    pub seed: Option<u64>,
}

impl Default for IslandModelConfig {
    fn default() -> Self {
        Self {
            migration_frequency: 1000,
            seed: None,
        }
    }
}

/// Island model evolutionary search
pub struct IslandModel<M = SingleNeighborMigration> {
    config: IslandModelConfig,
    topology: Topology,
    migration: M,
    islands: Vec<Island>,
}

impl<M: Migration> IslandModel<M> {
    pub fn builder() -> IslandModelBuilder<M> {
        IslandModelBuilder::new()
    }

    pub fn config(&self) -> &IslandModelConfig {
        &self.config
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn migration(&self) -> &M {
        &self.migration
    }

    /// Add an island running `algorithm`; returns its index
    pub fn add_island<A: Algorithm + 'static>(&mut self, algorithm: A) -> usize {
        self.islands.push(Island::new(Box::new(algorithm)));
        self.islands.len() - 1
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// Evaluations across every island
    pub fn number_of_evaluations(&self) -> usize {
        self.islands.iter().map(Island::number_of_evaluations).sum()
    }

    /// Run every island until `max_evaluations` more evaluations have been
    /// performed in total, then merge their results
    ///
    /// The stop condition is the aggregate evaluation count, read under a
    /// shared lock, so a fast island may perform more than an even share.
    /// Before each iteration an island reserves the cost of its previous
    /// iteration against the target; with a constant per-iteration cost the
    /// run ends exactly on the target. Immigrants still queued when the run
    /// ends are discarded. If any island fails, the first failure is
    /// returned once all threads have finished.
    pub fn run(&mut self, max_evaluations: usize) -> EvoResult<NondominatedPopulation> {
        if self.islands.is_empty() {
            return Err(EvolutionError::Configuration(
                "Island model has no islands".to_string(),
            ));
        }

        let Self {
            config,
            topology,
            migration,
            islands,
        } = self;
        let migration: &M = migration;
        let topology = *topology;
        let frequency = config.migration_frequency;
        let seed = config.seed;
        let count = islands.len();
        let start: usize = islands.iter().map(Island::number_of_evaluations).sum();
        let target = start + max_evaluations;

        info!(
            islands = count,
            start,
            target,
            ?topology,
            "Island model run started"
        );

        let queues: Vec<Arc<ImmigrationQueue>> = islands
            .iter()
            .map(|island| Arc::clone(island.immigration_queue()))
            .collect();
        let progress = Mutex::new(
            islands
                .iter()
                .map(Island::number_of_evaluations)
                .collect::<Vec<_>>(),
        );

        let outcomes: Vec<thread::Result<EvoResult<()>>> = thread::scope(|scope| {
            let handles: Vec<_> = islands
                .iter_mut()
                .enumerate()
                .map(|(index, island)| {
                    let neighbors: Vec<Arc<ImmigrationQueue>> = topology
                        .neighbors(index, count)
                        .into_iter()
                        .map(|neighbor| Arc::clone(&queues[neighbor]))
                        .collect();
                    let rng = match seed {
                        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
                        None => StdRng::from_entropy(),
                    };
                    let worker = Worker {
                        index,
                        target,
                        frequency,
                        neighbors,
                        migration,
                        progress: &progress,
                        rng,
                    };
                    scope.spawn(move || worker.run(island))
                })
                .collect();

            handles.into_iter().map(|handle| handle.join()).collect()
        });

        let discarded: usize = queues.iter().map(|queue| queue.pop_all().len()).sum();
        if discarded > 0 {
            debug!(discarded, "Undelivered immigrants discarded");
        }

        let mut failure = None;
        for (index, outcome) in outcomes.into_iter().enumerate() {
            let reason = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(error)) => error.to_string(),
                Err(payload) => panic_message(payload.as_ref()),
            };
            warn!(island = index, %reason, "Island failed");
            if failure.is_none() {
                failure = Some(EvolutionError::IslandFailed { index, reason });
            }
        }
        if let Some(error) = failure {
            return Err(error);
        }

        let mut result = NondominatedPopulation::new();
        for island in islands.iter() {
            result.add_all(island.result()?.iter())?;
        }

        info!(
            evaluations = islands
                .iter()
                .map(Island::number_of_evaluations)
                .sum::<usize>(),
            result_size = result.len(),
            "Island model run finished"
        );
        Ok(result)
    }
}

/// Per-thread state for one island during a run
struct Worker<'a, M> {
    index: usize,
    target: usize,
    frequency: usize,
    neighbors: Vec<Arc<ImmigrationQueue>>,
    migration: &'a M,
    /// Evaluations claimed by each island, including reservations
    progress: &'a Mutex<Vec<usize>>,
    rng: StdRng,
}

impl<M: Migration> Worker<'_, M> {
    fn run(mut self, island: &mut Island) -> EvoResult<()> {
        let start = island.number_of_evaluations();
        let mut local = 0;
        let mut next_migration = self.frequency;
        let mut cost = 1;

        while self.reserve(cost) {
            if let Err(error) = island.iterate() {
                self.settle(island.number_of_evaluations());
                return Err(error);
            }

            let evaluations = island.number_of_evaluations();
            self.settle(evaluations);
            let advanced = evaluations - start;
            if advanced <= local {
                return Err(EvolutionError::Configuration(format!(
                    "{} performed no evaluations in an iteration",
                    island.algorithm().name()
                )));
            }
            cost = advanced - local;
            local = advanced;

            if local >= next_migration {
                self.migration
                    .migrate(island, &self.neighbors, &mut self.rng)?;
                island.record_migration();
                let accepted = island.accept_immigrants(&mut self.rng)?;

                debug!(
                    island = self.index,
                    evaluations = local,
                    accepted,
                    total = self.aggregate(),
                    "Migration"
                );

                while next_migration <= local {
                    next_migration += self.frequency;
                }
            }
        }

        Ok(())
    }

    /// Claim `cost` evaluations unless the aggregate has reached the target
    fn reserve(&self, cost: usize) -> bool {
        let mut progress = self
            .progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if progress.iter().sum::<usize>() >= self.target {
            return false;
        }
        progress[self.index] += cost;
        true
    }

    /// Replace this island's claim with its actual evaluation count
    fn settle(&self, evaluations: usize) {
        self.progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner)[self.index] = evaluations;
    }

    fn aggregate(&self) -> usize {
        self.progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .sum()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

impl<M> std::fmt::Debug for IslandModel<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IslandModel")
            .field("config", &self.config)
            .field("topology", &self.topology)
            .field("islands", &self.islands)
            .finish()
    }
}

/// Builder for IslandModel
pub struct IslandModelBuilder<M = SingleNeighborMigration> {
    config: IslandModelConfig,
    topology: Topology,
    migration: Option<M>,
}

impl<M: Migration> IslandModelBuilder<M> {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: IslandModelConfig::default(),
            topology: Topology::default(),
            migration: None,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: IslandModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Set migration topology
    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Set migration strategy
    pub fn migration(mut self, migration: M) -> Self {
        self.migration = Some(migration);
        self
    }

    /// Set evaluations between migrations
    pub fn migration_frequency(mut self, frequency: usize) -> Self {
        self.config.migration_frequency = frequency;
        self
    }

    /// Set random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Build the island model
    pub fn build(self) -> EvoResult<IslandModel<M>> {
        let migration = self.migration.ok_or(EvolutionError::Configuration(
            "Migration strategy is required".to_string(),
        ))?;

        if self.config.migration_frequency == 0 {
            return Err(EvolutionError::Configuration(
                "Migration frequency must be at least 1".to_string(),
            ));
        }
        Ok(IslandModel {
            config: self.config,
            topology: self.topology,
            migration,
            islands: Vec::new(),
        })
    }
}

impl<M: Migration> Default for IslandModelBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}
