//! Parent selection strategies.
//!
//! Selection determines which population slots are chosen as crossover
//! parents. Every strategy gives each slot a nonzero selection probability
//! while favoring better-ranked slots, so diversity survives without
//! losing selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::types::Direction;
use rand::Rng;

/// Strategy for choosing crossover parents.
///
/// Strategies operate on the population's fitness cache and respect the
/// engine's [`Direction`]: under `Maximize` higher utility is better,
/// under `Minimize` lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` slots with replacement, keep the
    /// best.
    ///
    /// Higher `k` = stronger selection pressure.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure (risk of premature convergence)
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Utilities are shifted so the best slot gets the largest weight
    /// under either direction; a small epsilon keeps the worst slot
    /// selectable.
    ///
    /// **Warning**: susceptible to super-individual dominance when the
    /// utility spread is large.
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Rank-based selection.
    ///
    /// Slots are sorted best-first and selection probability is linear in
    /// rank position rather than raw utility, avoiding the scaling
    /// problems of roulette selection.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per selection (sort)
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from the fitness cache.
    ///
    /// # Panics
    /// Panics if `fitness` is empty.
    pub fn select<R: Rng>(&self, fitness: &[f32], direction: Direction, rng: &mut R) -> usize {
        assert!(!fitness.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(fitness, direction, *k, rng),
            Selection::Roulette => roulette(fitness, direction, rng),
            Selection::Rank => rank(fitness, direction, rng),
        }
    }
}

/// Tournament: sample k slots with replacement, return the best.
fn tournament<R: Rng>(fitness: &[f32], direction: Direction, k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = fitness.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if direction.improves(fitness[idx], fitness[best_idx]) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel over shifted utilities.
///
/// Maximize: weight_i = fitness_i - min + epsilon.
/// Minimize: weight_i = max - fitness_i + epsilon.
fn roulette<R: Rng>(fitness: &[f32], direction: Direction, rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }

    let min = fitness.iter().cloned().fold(f32::INFINITY, f32::min) as f64;
    let max = fitness.iter().cloned().fold(f32::NEG_INFINITY, f32::max) as f64;

    let epsilon = 1e-10;

    let weights: Vec<f64> = fitness
        .iter()
        .map(|&f| {
            let w = match direction {
                Direction::Maximize => f as f64 - min + epsilon,
                Direction::Minimize => max - f as f64 + epsilon,
            };
            if w > 0.0 {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Linear ranking: sort best-first, weight_i = n - rank_i.
fn rank<R: Rng>(fitness: &[f32], direction: Direction, rng: &mut R) -> usize {
    let n = fitness.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<usize> = (0..n).collect();
    indexed.sort_by(|&a, &b| direction.compare(fitness[a], fitness[b]));

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &original_idx) in indexed.iter().enumerate() {
        let weight = (n - rank) as f64;
        cumulative += weight;
        if cumulative > threshold {
            return original_idx;
        }
    }

    *indexed.last().expect("population has n >= 2 slots") // fallback
}
