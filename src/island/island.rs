//! A single island: one algorithm and its immigration queue

use std::cmp::Ordering;
use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use crate::algorithms::traits::Algorithm;
use crate::error::EvoResult;
use crate::island::queue::ImmigrationQueue;
use crate::objective::dominance::{DominanceComparator, ParetoDominanceComparator};
use crate::population::archive::NondominatedPopulation;
use crate::population::population::Population;

/// One algorithm instance in an island model
pub struct Island {
    algorithm: Box<dyn Algorithm>,
    queue: Arc<ImmigrationQueue>,
    migrations: usize,
    immigrants_accepted: usize,
}

impl Island {
    pub fn new(algorithm: Box<dyn Algorithm>) -> Self {
        Self {
            algorithm,
            queue: Arc::new(ImmigrationQueue::new()),
            migrations: 0,
            immigrants_accepted: 0,
        }
    }

    pub fn algorithm(&self) -> &dyn Algorithm {
        self.algorithm.as_ref()
    }

    /// Handle other islands use to send migrants here
    pub fn immigration_queue(&self) -> &Arc<ImmigrationQueue> {
        &self.queue
    }

    pub fn population(&self) -> &Population {
        self.algorithm.population()
    }

    pub fn number_of_evaluations(&self) -> usize {
        self.algorithm.number_of_evaluations()
    }

    /// Number of migration events this island has initiated
    pub fn migrations(&self) -> usize {
        self.migrations
    }

    pub(crate) fn record_migration(&mut self) {
        self.migrations += 1;
    }

    /// Immigrants that made it into the population
    pub fn immigrants_accepted(&self) -> usize {
        self.immigrants_accepted
    }

    pub fn iterate(&mut self) -> EvoResult<()> {
        self.algorithm.iterate()
    }

    pub fn result(&self) -> EvoResult<NondominatedPopulation> {
        self.algorithm.result()
    }

    /// Drain the immigration queue into the population
    ///
    /// An immigrant replaces the first member it dominates. One that is
    /// nondominated with respect to every member replaces a random member or
    /// is appended, with equal chance. Dominated immigrants are dropped.
    ///
    /// Returns the number of immigrants accepted.
    pub fn accept_immigrants<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EvoResult<usize> {
        let comparator = ParetoDominanceComparator;
        let mut accepted = 0;

        for immigrant in self.queue.pop_all() {
            let population = self.algorithm.population_mut();

            let mut dominated_member = None;
            let mut is_dominated = false;
            for (i, member) in population.iter().enumerate() {
                match comparator.compare(&immigrant, member)? {
                    Ordering::Less => {
                        dominated_member = Some(i);
                        break;
                    }
                    Ordering::Greater => is_dominated = true,
                    Ordering::Equal => {}
                }
            }

            match dominated_member {
                Some(index) => {
                    population.replace(index, immigrant)?;
                }
                None if is_dominated => {
                    trace!("dominated immigrant discarded");
                    continue;
                }
                None => {
                    if !population.is_empty() && rng.gen_bool(0.5) {
                        let index = rng.gen_range(0..population.len());
                        population.replace(index, immigrant)?;
                    } else {
                        population.push(immigrant);
                    }
                }
            }
            accepted += 1;
        }

        self.immigrants_accepted += accepted;
        Ok(accepted)
    }
}

impl std::fmt::Debug for Island {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Island")
            .field("algorithm", &self.algorithm.name())
            .field("queued", &self.queue.len())
            .field("migrations", &self.migrations)
            .field("immigrants_accepted", &self.immigrants_accepted)
            .finish()
    }
}
