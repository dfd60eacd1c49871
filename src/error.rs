//! Error types for the search engine.
//!
//! All failures are local and synchronous: they are reported to the
//! immediate caller of the failing operation and never retried internally.

use thiserror::Error;

/// Errors produced by chromosome and search-engine operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A chromosome shape parameter is out of range.
    ///
    /// Both the trait count and the trait width must be nonzero, and the
    /// width must not exceed [`MAX_TRAIT_BITS`](crate::MAX_TRAIT_BITS).
    #[error(
        "invalid chromosome shape: {num_traits} traits of {bits_per_trait} bits \
         (both must be nonzero, width at most 32)"
    )]
    InvalidShape {
        /// Requested number of traits.
        num_traits: usize,
        /// Requested bits per trait.
        bits_per_trait: usize,
    },

    /// A trait index exceeds the chromosome's trait count.
    #[error("trait index {index} out of range for chromosome with {num_traits} traits")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of traits in the chromosome.
        num_traits: usize,
    },

    /// A search configuration parameter is invalid.
    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),

    /// The objective returned a non-finite utility (NaN or infinity).
    ///
    /// The evaluation pass that observed the value is aborted as a whole;
    /// the population and best-seen record keep their pre-step state.
    #[error("objective returned non-finite utility {value} for population slot {index}")]
    InvalidUtility {
        /// Population slot whose evaluation produced the value.
        index: usize,
        /// The non-finite utility.
        value: f32,
    },

    /// An operation was attempted on an engine after [`destroy`].
    ///
    /// [`destroy`]: crate::GaSearch::destroy
    #[error("operation on a destroyed search engine")]
    UseAfterDestroy,
}
