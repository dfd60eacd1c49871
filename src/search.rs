//! Generational search engine.
//!
//! [`GaSearch`] owns the population, the objective, and a seeded RNG, and
//! advances the search one generation at a time: evaluate → update best →
//! rank → carry elites → select/crossover/mutate → replace. A generation
//! step is atomic; a failed evaluation leaves the previous generation's
//! state intact.
//!
//! The caller drives the loop and decides when to stop:
//!
//! ```
//! use gasearch::{Chromosome, Direction, GaSearch, SearchConfig};
//!
//! let template = Chromosome::new(8, 1)?;
//! let config = SearchConfig::default()
//!     .with_population_size(20)
//!     .with_seed(42);
//! let mut search = GaSearch::new(
//!     &template,
//!     |c: &Chromosome| c.count_ones() as f32,
//!     Direction::Maximize,
//!     config,
//! )?;
//!
//! for _ in 0..25 {
//!     search.evolve()?;
//! }
//! let (best, utility) = search.optimum()?;
//! assert_eq!(utility, best.count_ones() as f32);
//! # Ok::<(), gasearch::Error>(())
//! ```

use crate::chromosome::Chromosome;
use crate::config::SearchConfig;
use crate::error::Error;
use crate::population::Population;
use crate::types::{Direction, Objective};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Result of a multi-generation [`run`](GaSearch::run).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// The best chromosome seen across the whole run.
    pub best: Chromosome,

    /// Utility of `best`.
    pub best_utility: f32,

    /// Total generations completed over the engine's lifetime.
    pub generations: usize,

    /// Best-seen utility after each generation of this run.
    ///
    /// Monotone under elitism; suitable for plotting convergence.
    pub utility_history: Vec<f32>,
}

/// Population-based bit-string search engine.
///
/// Created from a template chromosome (which fixes the shape of every
/// individual), an [`Objective`], a [`Direction`], and a [`SearchConfig`].
/// The configuration, direction, and objective are immutable for the
/// engine's lifetime; the RNG is engine-owned, so two engines in one
/// process never perturb each other's sequences.
pub struct GaSearch<O: Objective> {
    objective: O,
    direction: Direction,
    config: SearchConfig,
    population: Option<Population>,
    rng: StdRng,
    generation: usize,
}

impl<O: Objective> std::fmt::Debug for GaSearch<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GaSearch")
            .field("direction", &self.direction)
            .field("config", &self.config)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<O: Objective> GaSearch<O> {
    /// Creates an engine and scores generation zero.
    ///
    /// The population is one exact copy of `template` plus randomized
    /// variants, evaluated immediately so [`optimum`](Self::optimum) is
    /// answerable before the first [`evolve`](Self::evolve) step.
    ///
    /// Returns [`Error::InvalidConfig`] for an invalid configuration and
    /// [`Error::InvalidUtility`] if the initial evaluation produces a
    /// non-finite utility.
    pub fn new(
        template: &Chromosome,
        objective: O,
        direction: Direction,
        config: SearchConfig,
    ) -> Result<Self, Error> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let mut population = Population::initialize(template, config.population_size, &mut rng);
        population.evaluate_all(&objective, config.parallel)?;
        population.update_best(direction);

        Ok(Self {
            objective,
            direction,
            config,
            population: Some(population),
            rng,
            generation: 0,
        })
    }

    /// Advances the search by one generation.
    ///
    /// The step is atomic: on [`Error::InvalidUtility`] the population,
    /// the best-seen record, and the generation counter keep their
    /// pre-step state. This is the only operation that changes population
    /// contents, and it is deterministic given a fixed seed.
    pub fn evolve(&mut self) -> Result<(), Error> {
        let direction = self.direction;
        let parallel = self.config.parallel;
        let elite_count = self.config.elite_count;
        let selection = self.config.selection;
        let crossover = self.config.crossover;
        let mutation_rate = self.config.mutation_rate;

        let population = self.population.as_mut().ok_or(Error::UseAfterDestroy)?;

        population.evaluate_all(&self.objective, parallel)?;
        if population.update_best(direction) {
            if let Some((_, utility)) = population.best() {
                debug!(
                    "generation {}: best utility improved to {utility}",
                    self.generation + 1
                );
            }
        }

        // Rank the freshly evaluated slots best-first; the sort is stable,
        // so ties keep their slot order.
        let size = population.len();
        let mut order: Vec<usize> = (0..size).collect();
        {
            let fitness = population.fitness();
            order.sort_by(|&a, &b| direction.compare(fitness[a], fitness[b]));
        }

        let mut next: Vec<Chromosome> = Vec::with_capacity(size);
        for &i in &order[..elite_count] {
            next.push(population.slots()[i].clone());
        }
        while next.len() < size {
            let p1 = selection.select(population.fitness(), direction, &mut self.rng);
            let p2 = selection.select(population.fitness(), direction, &mut self.rng);
            let mut child = crossover.recombine(
                &population.slots()[p1],
                &population.slots()[p2],
                &mut self.rng,
            );
            child.mutate(mutation_rate, &mut self.rng);
            next.push(child);
        }
        population.replace(next);

        self.generation += 1;
        trace!("generation {} complete", self.generation);
        Ok(())
    }

    /// Returns a deep copy of the best-seen chromosome and its utility.
    ///
    /// Idempotent; does not advance the search. The copy shares no storage
    /// with engine state.
    pub fn optimum(&self) -> Result<(Chromosome, f32), Error> {
        let population = self.population.as_ref().ok_or(Error::UseAfterDestroy)?;
        let (best, utility) = population
            .best()
            .expect("best-seen record is established at engine creation");
        Ok((best.clone(), utility))
    }

    /// Runs `generations` evolve steps, recording the best-seen utility
    /// after each one.
    pub fn run(&mut self, generations: usize) -> Result<SearchResult, Error> {
        let mut utility_history = Vec::with_capacity(generations);
        for _ in 0..generations {
            self.evolve()?;
            let (_, utility) = self.optimum()?;
            utility_history.push(utility);
        }
        let (best, best_utility) = self.optimum()?;
        Ok(SearchResult {
            best,
            best_utility,
            generations: self.generation,
            utility_history,
        })
    }

    /// Releases the population and every owned chromosome.
    ///
    /// Terminal: every later operation, including a second `destroy`,
    /// returns [`Error::UseAfterDestroy`]. Dropping the engine without
    /// calling this releases everything just the same.
    pub fn destroy(&mut self) -> Result<(), Error> {
        match self.population.take() {
            Some(_) => Ok(()),
            None => Err(Error::UseAfterDestroy),
        }
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// The engine's optimization direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The engine's configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn ones(c: &Chromosome) -> f32 {
        c.count_ones() as f32
    }

    fn small_config(seed: u64) -> SearchConfig {
        SearchConfig::default()
            .with_population_size(10)
            .with_mutation_rate(0.1)
            .with_seed(seed)
    }

    // ---- OneMax scenarios ----

    #[test]
    fn test_onemax_reaches_optimum() {
        // 4 one-bit traits, population 10, rate 0.1, maximize set bits:
        // 50 generations must find the all-ones chromosome.
        let template = Chromosome::new(4, 1).unwrap();
        let mut search =
            GaSearch::new(&template, ones, Direction::Maximize, small_config(42)).unwrap();

        for _ in 0..50 {
            search.evolve().unwrap();
        }

        let (best, utility) = search.optimum().unwrap();
        assert_eq!(utility, 4.0);
        assert_eq!(best.count_ones(), 4);
    }

    #[test]
    fn test_minimize_reaches_zero() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0);
        let mut template = Chromosome::new(4, 1).unwrap();
        template.mutate(1.0, &mut rng); // start from all ones

        let mut search =
            GaSearch::new(&template, ones, Direction::Minimize, small_config(42)).unwrap();
        for _ in 0..50 {
            search.evolve().unwrap();
        }

        let (_, utility) = search.optimum().unwrap();
        assert_eq!(utility, 0.0);
    }

    #[test]
    fn test_optimum_is_monotone() {
        let template = Chromosome::new(32, 1).unwrap();
        let mut search =
            GaSearch::new(&template, ones, Direction::Maximize, small_config(7)).unwrap();

        let (_, mut previous) = search.optimum().unwrap();
        for _ in 0..40 {
            search.evolve().unwrap();
            let (_, utility) = search.optimum().unwrap();
            assert!(
                utility >= previous,
                "best-seen regressed from {previous} to {utility}"
            );
            previous = utility;
        }
    }

    #[test]
    fn test_optimum_is_queryable_before_first_evolve() {
        let template = Chromosome::new(8, 1).unwrap();
        let search =
            GaSearch::new(&template, ones, Direction::Maximize, small_config(3)).unwrap();
        let (best, utility) = search.optimum().unwrap();
        assert_eq!(utility, best.count_ones() as f32);
        assert_eq!(search.generation(), 0);
    }

    #[test]
    fn test_population_size_is_invariant() {
        let template = Chromosome::new(8, 1).unwrap();
        let mut search =
            GaSearch::new(&template, ones, Direction::Maximize, small_config(5)).unwrap();

        for _ in 0..20 {
            search.evolve().unwrap();
            assert_eq!(search.population.as_ref().unwrap().len(), 10);
        }
    }

    #[test]
    fn test_optimum_is_a_deep_copy() {
        let template = Chromosome::new(8, 1).unwrap();
        let mut search =
            GaSearch::new(&template, ones, Direction::Maximize, small_config(5)).unwrap();

        let (mut best, _) = search.optimum().unwrap();
        best.mutate(1.0, &mut rand::rngs::StdRng::seed_from_u64(0));

        // Mutating the returned copy never disturbs engine state.
        let (_, utility) = search.optimum().unwrap();
        search.evolve().unwrap();
        let (_, after) = search.optimum().unwrap();
        assert!(after >= utility);
    }

    // ---- Determinism ----

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let template = Chromosome::new(16, 2).unwrap();
        let config = SearchConfig::default()
            .with_population_size(12)
            .with_mutation_rate(0.05)
            .with_seed(123);

        let run_once = || {
            let mut search = GaSearch::new(
                &template,
                ones,
                Direction::Maximize,
                config.clone(),
            )
            .unwrap();
            search.run(30).unwrap()
        };

        let first = run_once();
        let second = run_once();
        assert_eq!(first.utility_history, second.utility_history);
        assert_eq!(first.best, second.best);
        assert_eq!(first.best_utility, second.best_utility);
    }

    #[test]
    fn test_engines_do_not_share_random_state() {
        let template = Chromosome::new(16, 1).unwrap();

        // Interleaving two engines must give each the same evolution it
        // would have alone.
        let mut alone = GaSearch::new(&template, ones, Direction::Maximize, small_config(9))
            .unwrap();
        let solo = alone.run(10).unwrap();

        let mut a = GaSearch::new(&template, ones, Direction::Maximize, small_config(9))
            .unwrap();
        let mut b = GaSearch::new(&template, ones, Direction::Maximize, small_config(77))
            .unwrap();
        let mut history = Vec::new();
        for _ in 0..10 {
            a.evolve().unwrap();
            b.evolve().unwrap();
            history.push(a.optimum().unwrap().1);
        }
        assert_eq!(history, solo.utility_history);
    }

    // ---- Configuration and error paths ----

    #[test]
    fn test_zero_population_size_fails() {
        let template = Chromosome::new(4, 1).unwrap();
        let config = SearchConfig::default().with_population_size(0);
        let err = GaSearch::new(&template, ones, Direction::Maximize, config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_mutation_rate_fails() {
        let template = Chromosome::new(4, 1).unwrap();
        let config = SearchConfig::default().with_mutation_rate(1.5);
        let err = GaSearch::new(&template, ones, Direction::Maximize, config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_nan_objective_fails_creation() {
        let template = Chromosome::new(4, 1).unwrap();
        let err = GaSearch::new(
            &template,
            |_: &Chromosome| f32::NAN,
            Direction::Maximize,
            small_config(1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidUtility { .. }));
    }

    #[test]
    fn test_nan_objective_aborts_step_and_preserves_state() {
        let poison = Arc::new(AtomicBool::new(false));
        let flag = poison.clone();
        let objective = move |c: &Chromosome| {
            if flag.load(Ordering::Relaxed) {
                f32::NAN
            } else {
                c.count_ones() as f32
            }
        };

        let template = Chromosome::new(8, 1).unwrap();
        let mut search =
            GaSearch::new(&template, objective, Direction::Maximize, small_config(4)).unwrap();
        search.evolve().unwrap();

        let optimum_before = search.optimum().unwrap();
        let slots_before = search.population.as_ref().unwrap().slots().to_vec();
        let generation_before = search.generation();

        poison.store(true, Ordering::Relaxed);
        let err = search.evolve().unwrap_err();
        assert!(matches!(err, Error::InvalidUtility { .. }));

        // Pre-step state intact: population, best-seen record, counter.
        assert_eq!(search.optimum().unwrap(), optimum_before);
        assert_eq!(
            search.population.as_ref().unwrap().slots(),
            slots_before.as_slice()
        );
        assert_eq!(search.generation(), generation_before);

        // Clearing the poison resumes the search from where it stopped.
        poison.store(false, Ordering::Relaxed);
        search.evolve().unwrap();
        assert_eq!(search.generation(), generation_before + 1);
    }

    // ---- Destroy ----

    #[test]
    fn test_operations_after_destroy_fail() {
        let template = Chromosome::new(4, 1).unwrap();
        let mut search =
            GaSearch::new(&template, ones, Direction::Maximize, small_config(2)).unwrap();

        search.destroy().unwrap();
        assert_eq!(search.evolve(), Err(Error::UseAfterDestroy));
        assert_eq!(search.optimum().unwrap_err(), Error::UseAfterDestroy);
        assert_eq!(search.run(5).unwrap_err(), Error::UseAfterDestroy);
        assert_eq!(search.destroy(), Err(Error::UseAfterDestroy));
    }

    // ---- run() ----

    #[test]
    fn test_run_records_history() {
        let template = Chromosome::new(16, 1).unwrap();
        let mut search =
            GaSearch::new(&template, ones, Direction::Maximize, small_config(6)).unwrap();

        let result = search.run(25).unwrap();
        assert_eq!(result.utility_history.len(), 25);
        assert_eq!(result.generations, 25);
        assert_eq!(result.best_utility, *result.utility_history.last().unwrap());
        for window in result.utility_history.windows(2) {
            assert!(window[1] >= window[0], "history must be monotone");
        }

        // A second run keeps counting from where the first stopped.
        let result = search.run(5).unwrap();
        assert_eq!(result.generations, 30);
    }

    #[test]
    fn test_entropy_seeded_engine_works() {
        let template = Chromosome::new(8, 1).unwrap();
        let config = SearchConfig::default().with_population_size(10);
        let mut search =
            GaSearch::new(&template, ones, Direction::Maximize, config).unwrap();
        search.evolve().unwrap();
        let (_, utility) = search.optimum().unwrap();
        assert!(utility.is_finite());
    }

    #[test]
    fn test_single_slot_population() {
        let template = Chromosome::new(8, 1).unwrap();
        let config = SearchConfig::default()
            .with_population_size(1)
            .with_seed(8);
        let mut search =
            GaSearch::new(&template, ones, Direction::Maximize, config).unwrap();

        // Fully elitist degenerate case: the lone slot survives unchanged.
        for _ in 0..5 {
            search.evolve().unwrap();
        }
        let (best, utility) = search.optimum().unwrap();
        assert_eq!(best, template);
        assert_eq!(utility, 0.0);
    }

    // ---- Knapsack: resource selection end to end ----

    struct Knapsack {
        weights: Vec<f32>,
        values: Vec<f32>,
        capacity: f32,
    }

    impl Objective for Knapsack {
        /// Total value of the selected items, or the (negative) capacity
        /// overshoot as a distance metric for infeasible selections.
        fn utility(&self, c: &Chromosome) -> f32 {
            let mut total_value = 0.0;
            let mut total_weight = 0.0;
            for i in 0..c.num_traits() {
                if c.get(i).unwrap_or(0) == 1 {
                    total_value += self.values[i];
                    total_weight += self.weights[i];
                }
            }
            if total_weight > self.capacity {
                self.capacity - total_weight
            } else {
                total_value
            }
        }
    }

    #[test]
    fn test_knapsack_search_improves_and_stays_feasible() {
        use rand::Rng;

        let num_items = 40;
        let mut rng = rand::rngs::StdRng::seed_from_u64(1234);
        let bag = Knapsack {
            weights: (0..num_items).map(|_| rng.random_range(0.0..1.0)).collect(),
            values: (0..num_items).map(|_| rng.random_range(0.0..1.0)).collect(),
            capacity: 5.0,
        };
        let capacity = bag.capacity;
        let weights = bag.weights.clone();

        let template = Chromosome::new(num_items, 1).unwrap();
        let config = SearchConfig::default()
            .with_population_size(50)
            .with_mutation_rate(0.02)
            .with_seed(42);
        let mut search =
            GaSearch::new(&template, bag, Direction::Maximize, config).unwrap();

        let (_, initial) = search.optimum().unwrap();
        let result = search.run(100).unwrap();
        assert!(
            result.best_utility >= initial,
            "search must not regress: {initial} -> {}",
            result.best_utility
        );
        assert!(result.best_utility > 0.0, "expected a feasible selection");

        // The winning selection fits in the bag.
        let packed: f32 = (0..num_items)
            .filter(|&i| result.best.get(i).unwrap() == 1)
            .map(|i| weights[i])
            .sum();
        assert!(packed <= capacity);
    }
}
