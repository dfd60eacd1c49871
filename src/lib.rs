//! Bit-string genetic algorithm search.
//!
//! A single-objective, fixed-length, discrete optimizer for knapsack-style
//! resource-selection problems. Candidate solutions are [`Chromosome`]s —
//! packed bit-strings of fixed-width "trait" fields — and the caller
//! supplies the scoring logic as an [`Objective`] (any closure or struct
//! carrying its own context).
//!
//! # Architecture
//!
//! - [`Chromosome`]: bit-packed genotype with bounds-checked trait
//!   accessors; all bit-twiddling lives here.
//! - [`Objective`] / [`Direction`]: the evaluation contract — a pure
//!   function from chromosome to finite utility, maximized or minimized.
//! - [`GaSearch`]: the engine — owns the population, fitness cache,
//!   best-seen record, and a seeded RNG; advances one generation per
//!   [`evolve`](GaSearch::evolve) call, with elitism guaranteeing the
//!   best-seen utility never regresses.
//! - [`operators`] / [`Selection`]: pluggable recombination and parent
//!   selection strategies.
//!
//! # Example
//!
//! ```
//! use gasearch::{Chromosome, Direction, GaSearch, SearchConfig};
//!
//! // Maximize the number of set bits over 16 one-bit traits.
//! let template = Chromosome::new(16, 1)?;
//! let config = SearchConfig::default()
//!     .with_population_size(30)
//!     .with_mutation_rate(0.05)
//!     .with_seed(42);
//!
//! let mut search = GaSearch::new(
//!     &template,
//!     |c: &Chromosome| c.count_ones() as f32,
//!     Direction::Maximize,
//!     config,
//! )?;
//!
//! let result = search.run(100)?;
//! assert_eq!(result.best_utility, 16.0);
//! # Ok::<(), gasearch::Error>(())
//! ```
//!
//! # Features
//!
//! - `parallel`: evaluate the population with rayon. Objectives are pure,
//!   so results are identical to the sequential path.
//! - `serde`: serialization for configuration and result types.
//!
//! # Determinism
//!
//! Every stochastic operator draws from an engine-owned, seedable RNG.
//! Fixing [`SearchConfig::seed`] makes a whole run reproducible; two
//! engines never share random state.

mod chromosome;
mod config;
mod error;
pub mod operators;
mod population;
mod search;
mod selection;
mod types;

pub use chromosome::{Chromosome, MAX_TRAIT_BITS};
pub use config::SearchConfig;
pub use error::Error;
pub use operators::Crossover;
pub use search::{GaSearch, SearchResult};
pub use selection::Selection;
pub use types::{Direction, Objective};
