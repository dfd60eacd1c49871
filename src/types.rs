//! Core contracts for the search engine.
//!
//! [`Objective`] is the only trait a user must implement: a pure scoring
//! function from a chromosome to a finite utility. Any domain context
//! (item weights, capacities, lookup tables) travels inside the
//! implementing value — a struct field or a closure capture — so no opaque
//! pointer ever crosses the boundary.
//!
//! [`Direction`] selects whether the engine maximizes or minimizes that
//! utility.

use crate::chromosome::Chromosome;
use std::cmp::Ordering;

/// Caller-supplied scoring function for candidate solutions.
///
/// The engine calls [`utility`](Objective::utility) exactly once per
/// chromosome per generation. Implementations must be side-effect-free
/// with respect to engine state and must return a **finite** value;
/// a NaN or infinite utility aborts the generation step with
/// [`Error::InvalidUtility`](crate::Error::InvalidUtility).
///
/// `Send + Sync` is required so evaluation may fan out across threads
/// when the `parallel` feature is enabled.
///
/// Plain closures work directly:
///
/// ```
/// use gasearch::{Chromosome, Objective};
///
/// let ones = |c: &Chromosome| c.count_ones() as f32;
/// let c = Chromosome::new(8, 1)?;
/// assert_eq!(ones.utility(&c), 0.0);
/// # Ok::<(), gasearch::Error>(())
/// ```
pub trait Objective: Send + Sync {
    /// Scores one chromosome. Must return a finite value.
    fn utility(&self, chromosome: &Chromosome) -> f32;
}

impl<F> Objective for F
where
    F: Fn(&Chromosome) -> f32 + Send + Sync,
{
    fn utility(&self, chromosome: &Chromosome) -> f32 {
        self(chromosome)
    }
}

/// Optimization direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Higher utility is better; the best-seen record improves on `>`.
    Maximize,
    /// Lower utility is better; the best-seen record improves on `<`.
    Minimize,
}

impl Direction {
    /// Whether `candidate` strictly improves on `incumbent`.
    ///
    /// Ties never improve, so the first-found record wins.
    pub(crate) fn improves(self, candidate: f32, incumbent: f32) -> bool {
        match self {
            Direction::Maximize => candidate > incumbent,
            Direction::Minimize => candidate < incumbent,
        }
    }

    /// Best-first ordering for ranking a fitness cache.
    pub(crate) fn compare(self, a: f32, b: f32) -> Ordering {
        match self {
            Direction::Maximize => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
            Direction::Minimize => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }
}
