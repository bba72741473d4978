//! NSGA-II (Non-dominated Sorting Genetic Algorithm II)
//!
//! Implements the NSGA-II algorithm for multi-objective optimization.
//!
//! Reference: Deb, K., Pratap, A., Agarwal, S., & Meyarivan, T. (2002).
//! A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II.
//! IEEE Transactions on Evolutionary Computation, 6(2).

use std::cmp::Ordering;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::algorithms::traits::Algorithm;
use crate::error::{EvoResult, EvolutionError};
use crate::objective::dominance::{DominanceComparator, ParetoDominanceComparator};
use crate::objective::epsilon::Epsilons;
use crate::objective::penalty::PenaltyFunction;
use crate::operators::selection::TournamentSelection;
use crate::operators::traits::Variation;
use crate::population::archive::NondominatedPopulation;
use crate::population::epsilon_archive::EpsilonBoxDominanceArchive;
use crate::population::population::Population;
use crate::population::solution::{Solution, CROWDING_DISTANCE, RANK};
use crate::problem::Problem;

/// Fast non-dominated sort
///
/// Returns fronts of indices into `solutions`, where `fronts[0]` is the
/// nondominated front.
pub fn fast_non_dominated_sort<C: DominanceComparator + ?Sized>(
    solutions: &[Solution],
    comparator: &C,
) -> EvoResult<Vec<Vec<usize>>> {
    let n = solutions.len();
    if n == 0 {
        return Ok(vec![]);
    }

    // domination_count[i] = number of solutions that dominate i
    let mut domination_count = vec![0usize; n];
    // dominated_set[i] = set of solutions that i dominates
    let mut dominated_set: Vec<Vec<usize>> = vec![vec![]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match comparator.compare(&solutions[i], &solutions[j])? {
                Ordering::Less => {
                    dominated_set[i].push(j);
                    domination_count[j] += 1;
                }
                Ordering::Greater => {
                    dominated_set[j].push(i);
                    domination_count[i] += 1;
                }
                Ordering::Equal => {}
            }
        }
    }

    let mut fronts: Vec<Vec<usize>> = vec![];
    let mut current_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();

    while !current_front.is_empty() {
        let mut next_front = vec![];
        for &i in &current_front {
            for &j in &dominated_set[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    next_front.push(j);
                }
            }
        }

        fronts.push(current_front);
        current_front = next_front;
    }

    Ok(fronts)
}

/// Crowding distance of each member of `front`, in front order
///
/// Boundary solutions, and every solution of a front with two or fewer
/// members, get an infinite distance.
pub fn crowding_distances(solutions: &[Solution], front: &[usize]) -> Vec<f64> {
    let n = front.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let mut distances = vec![0.0; n];
    let value =
        |slot: usize, obj: usize| solutions[front[slot]].objectives()[obj].canonical_value();
    let num_objectives = solutions[front[0]].number_of_objectives();

    for obj in 0..num_objectives {
        // Sort front positions by this objective
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            value(a, obj)
                .partial_cmp(&value(b, obj))
                .unwrap_or(Ordering::Equal)
        });

        distances[order[0]] = f64::INFINITY;
        distances[order[n - 1]] = f64::INFINITY;

        let obj_range = value(order[n - 1], obj) - value(order[0], obj);
        if obj_range > 0.0 {
            for i in 1..(n - 1) {
                let prev_val = value(order[i - 1], obj);
                let next_val = value(order[i + 1], obj);
                distances[order[i]] += (next_val - prev_val) / obj_range;
            }
        }
    }

    distances
}

/// Configuration for NSGA-II
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Nsga2Config {
    /// Population size
    pub population_size: usize,
    /// Seed for the algorithm's random number generator
    pub seed: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            seed: None,
        }
    }
}

/// NSGA-II algorithm
///
/// Each iteration after the first creates and evaluates exactly
/// `population_size` offspring.
pub struct Nsga2<V> {
    config: Nsga2Config,
    problem: Arc<dyn Problem>,
    variation: V,
    selection: TournamentSelection,
    comparator: ParetoDominanceComparator,
    archive: Option<EpsilonBoxDominanceArchive>,
    penalty: Option<Box<dyn PenaltyFunction>>,
    population: Population,
    rng: StdRng,
    evaluations: usize,
    iterations: usize,
}

impl<V: Variation> Nsga2<V> {
    pub fn builder() -> Nsga2Builder<V> {
        Nsga2Builder::new()
    }

    pub fn config(&self) -> &Nsga2Config {
        &self.config
    }

    pub fn problem(&self) -> &dyn Problem {
        self.problem.as_ref()
    }

    /// Epsilon-box archive of every evaluated solution, if configured
    pub fn archive(&self) -> Option<&EpsilonBoxDominanceArchive> {
        self.archive.as_ref()
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn is_initialized(&self) -> bool {
        self.iterations > 0
    }

    /// Evaluate, penalize, and archive a batch of new solutions
    fn evaluate_all(&mut self, solutions: &mut Population) -> EvoResult<()> {
        solutions.evaluate_parallel(self.problem.as_ref())?;
        self.evaluations += solutions.len();

        if let Some(penalty) = &self.penalty {
            for solution in solutions.iter_mut() {
                penalty.calculate(solution);
            }
        }
        if let Some(archive) = &mut self.archive {
            archive.add_all(solutions.iter())?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> EvoResult<()> {
        let mut initial = Population::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let mut solution = self.problem.new_solution();
            for variable in &mut solution.variables {
                variable.randomize(&mut self.rng);
            }
            initial.push(solution);
        }

        self.evaluate_all(&mut initial)?;
        self.population = self.truncate(initial.into_solutions())?;

        debug!(
            problem = self.problem.name(),
            population_size = self.config.population_size,
            "NSGA-II initialized"
        );
        Ok(())
    }

    fn create_offspring(&mut self) -> EvoResult<Population> {
        let size = self.config.population_size;
        let arity = self.variation.arity();
        let mut offspring = Population::with_capacity(size);

        while offspring.len() < size {
            let parents = self
                .selection
                .select_many(&self.population, arity, &mut self.rng)?;
            let children = self.variation.evolve(&parents, &mut self.rng)?;
            if children.is_empty() {
                return Err(EvolutionError::Configuration(
                    "variation produced no offspring".to_string(),
                ));
            }
            for child in children {
                if offspring.len() < size {
                    offspring.push(child);
                }
            }
        }

        Ok(offspring)
    }

    /// Rank `combined`, assign rank and crowding attributes, and keep the
    /// best `population_size` solutions
    fn truncate(&self, mut combined: Vec<Solution>) -> EvoResult<Population> {
        let size = self.config.population_size;
        let fronts = fast_non_dominated_sort(&combined, &self.comparator)?;

        for (rank, front) in fronts.iter().enumerate() {
            let distances = crowding_distances(&combined, front);
            for (&i, distance) in front.iter().zip(distances) {
                combined[i].set_attribute(RANK, rank as f64);
                combined[i].set_attribute(CROWDING_DISTANCE, distance);
            }
        }

        let mut selected = Vec::with_capacity(size);
        for front in fronts {
            if selected.len() + front.len() <= size {
                selected.extend(front);
            } else {
                // Partial front - sort by crowding distance
                let mut sorted_front = front;
                sorted_front.sort_by(|&a, &b| {
                    let da = combined[a].attribute(CROWDING_DISTANCE).unwrap_or(0.0);
                    let db = combined[b].attribute(CROWDING_DISTANCE).unwrap_or(0.0);
                    db.partial_cmp(&da).unwrap_or(Ordering::Equal)
                });
                let remaining = size - selected.len();
                selected.extend(sorted_front.into_iter().take(remaining));
                break;
            }
        }

        let mut slots: Vec<Option<Solution>> = combined.into_iter().map(Some).collect();
        Ok(selected
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect())
    }
}

impl<V: Variation + 'static> Algorithm for Nsga2<V> {
    fn name(&self) -> &str {
        "NSGA-II"
    }

    fn iterate(&mut self) -> EvoResult<()> {
        if self.iterations == 0 {
            self.initialize()?;
        } else {
            let mut offspring = self.create_offspring()?;
            self.evaluate_all(&mut offspring)?;

            let mut combined = std::mem::take(&mut self.population).into_solutions();
            combined.extend(offspring);
            self.population = self.truncate(combined)?;
        }

        self.iterations += 1;
        trace!(
            iteration = self.iterations,
            evaluations = self.evaluations,
            "NSGA-II iteration complete"
        );
        Ok(())
    }

    fn number_of_evaluations(&self) -> usize {
        self.evaluations
    }

    fn population(&self) -> &Population {
        &self.population
    }

    fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    fn result(&self) -> EvoResult<NondominatedPopulation> {
        match &self.archive {
            Some(archive) => archive.to_nondominated(),
            None => {
                let mut result = NondominatedPopulation::new();
                result.add_all(self.population.iter())?;
                Ok(result)
            }
        }
    }
}

/// Builder for NSGA-II
pub struct Nsga2Builder<V> {
    config: Nsga2Config,
    problem: Option<Arc<dyn Problem>>,
    variation: Option<V>,
    epsilons: Option<Epsilons>,
    penalty: Option<Box<dyn PenaltyFunction>>,
}

impl<V: Variation> Nsga2Builder<V> {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: Nsga2Config::default(),
            problem: None,
            variation: None,
            epsilons: None,
            penalty: None,
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: Nsga2Config) -> Self {
        self.config = config;
        self
    }

    /// Set population size
    pub fn population_size(mut self, size: usize) -> Self {
        self.config.population_size = size;
        self
    }

    /// Set random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Set the problem
    pub fn problem(mut self, problem: Arc<dyn Problem>) -> Self {
        self.problem = Some(problem);
        self
    }

    /// Set the variation operator
    pub fn variation(mut self, variation: V) -> Self {
        self.variation = Some(variation);
        self
    }

    /// Keep an epsilon-box archive of every evaluated solution
    pub fn epsilons(mut self, epsilons: Epsilons) -> Self {
        self.epsilons = Some(epsilons);
        self
    }

    /// Compute a penalty attribute for every evaluated solution
    pub fn penalty(mut self, penalty: impl PenaltyFunction + 'static) -> Self {
        self.penalty = Some(Box::new(penalty));
        self
    }

    /// Build NSGA-II
    pub fn build(self) -> EvoResult<Nsga2<V>> {
        let problem = self.problem.ok_or(EvolutionError::Configuration(
            "Problem is required".to_string(),
        ))?;
        let variation = self.variation.ok_or(EvolutionError::Configuration(
            "Variation operator is required".to_string(),
        ))?;

        if self.config.population_size == 0 {
            return Err(EvolutionError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if variation.arity() == 0 {
            return Err(EvolutionError::Configuration(
                "Variation operator must take at least one parent".to_string(),
            ));
        }

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Nsga2 {
            population: Population::with_capacity(self.config.population_size),
            config: self.config,
            problem,
            variation,
            selection: TournamentSelection::binary(),
            comparator: ParetoDominanceComparator,
            archive: self.epsilons.map(EpsilonBoxDominanceArchive::new),
            penalty: self.penalty,
            rng,
            evaluations: 0,
            iterations: 0,
        })
    }
}

impl<V: Variation> Default for Nsga2Builder<V> {
    fn default() -> Self {
        Self::new()
    }
}
