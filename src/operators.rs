//! Recombination operators for bit-string chromosomes.
//!
//! Both operators produce a single child from two same-shaped parents
//! without modifying either parent, and are deterministic given the
//! supplied RNG.
//!
//! - [`single_point`]: split the packed bit sequence at one random index
//! - [`uniform`]: draw each bit from either parent with probability ½
//!
//! The engine dispatches through [`Crossover`]; the functions are public
//! for callers composing their own evolutionary loops.

use crate::chromosome::Chromosome;
use rand::Rng;

/// Recombination strategy used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Crossover {
    /// Single-point crossover over the packed bit sequence (the default):
    /// the child takes bits `[0, point)` from the first parent and
    /// `[point, n)` from the second.
    SinglePoint,
    /// Uniform crossover: each bit comes from either parent with
    /// probability ½.
    Uniform,
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::SinglePoint
    }
}

impl Crossover {
    pub(crate) fn recombine<R: Rng>(
        &self,
        a: &Chromosome,
        b: &Chromosome,
        rng: &mut R,
    ) -> Chromosome {
        match self {
            Crossover::SinglePoint => single_point(a, b, rng),
            Crossover::Uniform => uniform(a, b, rng),
        }
    }
}

/// Single-point crossover.
///
/// The crossover point is drawn from `1..num_bits`, so the child always
/// carries at least one bit position from each parent. A one-bit
/// chromosome has nothing to split; the child copies a random parent.
///
/// # Panics
/// Panics if the parents have different shapes.
pub fn single_point<R: Rng>(a: &Chromosome, b: &Chromosome, rng: &mut R) -> Chromosome {
    check_shapes(a, b);

    let n = a.num_bits();
    if n == 1 {
        return if rng.random_bool(0.5) {
            a.clone()
        } else {
            b.clone()
        };
    }

    let point = rng.random_range(1..n);
    let mut child = a.clone();
    for i in point..n {
        child.set_bit(i, b.bit(i));
    }
    child
}

/// Uniform crossover.
///
/// # Panics
/// Panics if the parents have different shapes.
pub fn uniform<R: Rng>(a: &Chromosome, b: &Chromosome, rng: &mut R) -> Chromosome {
    check_shapes(a, b);

    let mut child = a.clone();
    for i in 0..a.num_bits() {
        if rng.random_bool(0.5) {
            child.set_bit(i, b.bit(i));
        }
    }
    child
}

fn check_shapes(a: &Chromosome, b: &Chromosome) {
    assert_eq!(
        a.num_traits(),
        b.num_traits(),
        "parents must have equal trait counts"
    );
    assert_eq!(
        a.bits_per_trait(),
        b.bits_per_trait(),
        "parents must have equal trait widths"
    );
}
