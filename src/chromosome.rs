//! Fixed-length bit-string chromosome.
//!
//! A [`Chromosome`] encodes one candidate solution as an ordered sequence of
//! fixed-width bit-fields ("traits"), packed into machine words. All
//! bit-twiddling in the crate lives here; the engine and operators only see
//! bounds-checked trait accessors and whole-chromosome operations.
//!
//! The shape (`num_traits` × `bits_per_trait`) is fixed at creation and
//! shared by every chromosome participating in one search.

use crate::error::Error;
use rand::Rng;
use std::fmt;

/// Maximum supported trait width in bits.
pub const MAX_TRAIT_BITS: usize = 32;

const WORD_BITS: usize = u64::BITS as usize;

/// A fixed-length bit-string genotype.
///
/// # Examples
///
/// ```
/// use gasearch::Chromosome;
///
/// let mut c = Chromosome::new(8, 4)?;
/// c.set(3, 0b1010)?;
/// assert_eq!(c.get(3)?, 0b1010);
/// assert_eq!(c.count_ones(), 2);
/// # Ok::<(), gasearch::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    num_traits: usize,
    bits_per_trait: usize,
    words: Vec<u64>,
}

impl Chromosome {
    /// Creates an all-zero chromosome with `num_traits` fields of
    /// `bits_per_trait` bits each.
    ///
    /// Returns [`Error::InvalidShape`] if either argument is zero or the
    /// width exceeds [`MAX_TRAIT_BITS`].
    pub fn new(num_traits: usize, bits_per_trait: usize) -> Result<Self, Error> {
        if num_traits == 0 || bits_per_trait == 0 || bits_per_trait > MAX_TRAIT_BITS {
            return Err(Error::InvalidShape {
                num_traits,
                bits_per_trait,
            });
        }
        let num_bits = num_traits * bits_per_trait;
        Ok(Self {
            num_traits,
            bits_per_trait,
            words: vec![0; num_bits.div_ceil(WORD_BITS)],
        })
    }

    /// Number of traits.
    pub fn num_traits(&self) -> usize {
        self.num_traits
    }

    /// Width of each trait in bits.
    pub fn bits_per_trait(&self) -> usize {
        self.bits_per_trait
    }

    /// Total number of bits in the chromosome.
    pub fn num_bits(&self) -> usize {
        self.num_traits * self.bits_per_trait
    }

    /// Largest value a single trait can hold.
    pub fn max_value(&self) -> u32 {
        if self.bits_per_trait == MAX_TRAIT_BITS {
            u32::MAX
        } else {
            (1u32 << self.bits_per_trait) - 1
        }
    }

    /// Returns the value of the trait at `index`.
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= num_traits`.
    pub fn get(&self, index: usize) -> Result<u32, Error> {
        self.check_index(index)?;
        let base = index * self.bits_per_trait;
        let mut value = 0u32;
        for b in 0..self.bits_per_trait {
            if self.bit(base + b) {
                value |= 1 << b;
            }
        }
        Ok(value)
    }

    /// Stores `value` in the trait at `index`, truncated to the trait width.
    ///
    /// Returns [`Error::IndexOutOfRange`] if `index >= num_traits`.
    pub fn set(&mut self, index: usize, value: u32) -> Result<(), Error> {
        self.check_index(index)?;
        let base = index * self.bits_per_trait;
        for b in 0..self.bits_per_trait {
            self.set_bit(base + b, (value >> b) & 1 == 1);
        }
        Ok(())
    }

    /// Flips every bit independently with probability `rate`, in place.
    ///
    /// `rate = 0.0` leaves the chromosome untouched; `rate = 1.0` produces
    /// the full complement. Reproducible given a seeded RNG.
    ///
    /// # Panics
    /// Panics if `rate` is not in `[0, 1]`.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        assert!(
            (0.0..=1.0).contains(&rate),
            "mutation rate must be in [0, 1]"
        );
        for i in 0..self.num_bits() {
            if rng.random_bool(rate) {
                self.words[i / WORD_BITS] ^= 1 << (i % WORD_BITS);
            }
        }
    }

    /// Reinitializes every bit uniformly at random.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for word in &mut self.words {
            *word = rng.random();
        }
        self.mask_tail();
    }

    /// Number of set bits across the whole chromosome.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub(crate) fn bit(&self, i: usize) -> bool {
        debug_assert!(i < self.num_bits());
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    pub(crate) fn set_bit(&mut self, i: usize, value: bool) {
        debug_assert!(i < self.num_bits());
        let mask = 1u64 << (i % WORD_BITS);
        if value {
            self.words[i / WORD_BITS] |= mask;
        } else {
            self.words[i / WORD_BITS] &= !mask;
        }
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.num_traits {
            return Err(Error::IndexOutOfRange {
                index,
                num_traits: self.num_traits,
            });
        }
        Ok(())
    }

    /// Clears storage bits past `num_bits`, keeping `Eq` and `count_ones`
    /// exact after whole-word writes.
    fn mask_tail(&mut self) {
        let tail = self.num_bits() % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << tail) - 1;
            }
        }
    }
}

impl fmt::Display for Chromosome {
    /// Renders each trait as its bits, most significant first, traits
    /// separated by spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for t in 0..self.num_traits {
            if t > 0 {
                f.write_str(" ")?;
            }
            for b in (0..self.bits_per_trait).rev() {
                let set = self.bit(t * self.bits_per_trait + b);
                f.write_str(if set { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}
