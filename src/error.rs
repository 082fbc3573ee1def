use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by the order-statistic queries.
///
/// Every variant is a usage error detected before any mutation happens, so a
/// failed call leaves the tree exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The tree holds no elements
    #[error("median tree is empty")]
    EmptyStructure,

    /// The requested rank is not in `[0, size)`
    #[error("rank {rank} out of range for {size} elements")]
    RankOutOfRange {
        /// Requested zero-based rank
        rank: usize,
        /// Number of elements at the time of the call
        size: usize,
    },

    /// The key has no place in the total order (NaN)
    #[error("key is not comparable with the stored keys")]
    InvalidKey,

    /// The key cannot be widened to `f64` for averaging
    #[error("key cannot be represented as f64")]
    NotNumeric,
}
