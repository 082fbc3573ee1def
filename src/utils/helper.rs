use num_traits::{Float, float::FloatCore};

/// Returns the ranks of the lower and upper median for `len` elements
///
/// For an odd `len` both ranks point at the middle element, for an even `len`
/// they are the two elements straddling the middle.
///
/// # Arguments
///
/// * `len` - The number of elements, must be non-zero
///
/// # Returns
///
/// * `(usize, usize)` - The lower and upper median ranks
#[inline]
pub const fn median_ranks(len: usize) -> (usize, usize) {
    debug_assert!(len > 0);
    let lo = len.div_ceil(2) - 1;
    if len % 2 == 0 { (lo, lo + 1) } else { (lo, lo) }
}

/// Returns the rank selected by the quantile `q` among `len` elements
///
/// `q` is clamped to `[0, 1]`; NaN selects the first rank. The position is
/// floored, no interpolation happens between neighbouring ranks.
///
/// # Arguments
///
/// * `q` - The quantile to select
/// * `len` - The number of elements, must be non-zero
///
/// # Returns
///
/// * `usize` - The zero-based rank
#[inline]
pub fn quantile_rank(q: f64, len: usize) -> usize {
    debug_assert!(len > 0);
    let q = q.clamp(0.0, 1.0);
    if q >= 1.0 {
        len - 1
    } else if q <= 0.0 || q.is_nan() {
        0
    } else {
        let pos = q * (len - 1) as f64;
        Float::floor(pos) as usize
    }
}

/// Returns the arithmetic mean of two values
///
/// Halves before adding, large finite inputs stay finite. Equal inputs are
/// returned as is, halving a subnormal would drop its last bit.
#[inline]
pub fn midpoint<T: FloatCore>(lo: T, hi: T) -> T {
    if lo == hi {
        return lo;
    }
    let _2 = T::one() + T::one();
    lo / _2 + hi / _2
}
