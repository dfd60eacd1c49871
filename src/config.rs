//! Search engine configuration.
//!
//! [`SearchConfig`] holds every parameter that controls the evolutionary
//! loop. The configuration is immutable once an engine has been created
//! from it.

use crate::error::Error;
use crate::operators::Crossover;
use crate::selection::Selection;

/// Configuration for a genetic search engine.
///
/// # Defaults
///
/// ```
/// use gasearch::SearchConfig;
///
/// let config = SearchConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.elite_count, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use gasearch::{Crossover, SearchConfig, Selection};
///
/// let config = SearchConfig::default()
///     .with_population_size(200)
///     .with_mutation_rate(0.05)
///     .with_selection(Selection::Rank)
///     .with_crossover(Crossover::Uniform)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Number of chromosomes in the population. Must be at least 1;
    /// fixed for the engine's lifetime.
    pub population_size: usize,

    /// Per-bit flip probability applied to every offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// Strategy for choosing crossover parents.
    pub selection: Selection,

    /// Recombination strategy for producing offspring.
    pub crossover: Crossover,

    /// Number of top-ranked chromosomes carried unchanged into the next
    /// generation. Must satisfy `1 <= elite_count <= population_size`;
    /// at least one elite guarantees the best-seen record never regresses.
    pub elite_count: usize,

    /// Whether to evaluate the population in parallel.
    ///
    /// Only effective with the `parallel` feature; ignored otherwise.
    /// Results are identical either way since objectives are pure.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            mutation_rate: 0.1,
            selection: Selection::default(),
            crossover: Crossover::default(),
            elite_count: 1,
            parallel: true,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the per-bit mutation rate.
    ///
    /// The value is not clamped; an out-of-range rate surfaces as
    /// [`Error::InvalidConfig`] from [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the elite count.
    pub fn with_elite_count(mut self, count: usize) -> Self {
        self.elite_count = count;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Called by [`GaSearch::new`](crate::GaSearch::new); also useful for
    /// checking user-supplied parameters before constructing an engine.
    pub fn validate(&self) -> Result<(), Error> {
        if self.population_size == 0 {
            return Err(Error::InvalidConfig(
                "population size must be at least 1".into(),
            ));
        }
        if !self.mutation_rate.is_finite() || !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidConfig(format!(
                "mutation rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if self.elite_count == 0 {
            return Err(Error::InvalidConfig(
                "elite count must be at least 1".into(),
            ));
        }
        if self.elite_count > self.population_size {
            return Err(Error::InvalidConfig(format!(
                "elite count {} exceeds population size {}",
                self.elite_count, self.population_size
            )));
        }
        Ok(())
    }
}
