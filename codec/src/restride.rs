//! Digit reinterpretation between limb strides.
//!
//! A value whose base-`2^small` digits are `[d0, d1, ...]` is rewritten as
//! `d0 + d1 * 2^target + d2 * 2^(2*target) + ...`. The digit values and
//! positions are kept; only the slot width changes, so the numeric value
//! changes unless the two strides are equal.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::errors::CodecError;
use crate::limbs::digit_mask;

/// Little-endian base-`2^small_stride` digits of `x`.
///
/// Stops as soon as the remainder is zero, so the digit count follows the
/// value rather than a fixed width and `0` has no digits.
pub fn decompose(x: &BigUint, small_stride: u32) -> Result<Vec<BigUint>, CodecError> {
    let mask = digit_mask(small_stride)?;

    let mut rest = x.clone();
    let mut digits = Vec::new();
    while !rest.is_zero() {
        digits.push(&rest & &mask);
        rest >>= small_stride;
    }
    Ok(digits)
}

/// Places `digits[i]` at bit offset `target_stride * i` and sums.
pub fn recompose(digits: &[BigUint], target_stride: u32) -> Result<BigUint, CodecError> {
    if target_stride == 0 {
        return Err(CodecError::InvalidArgument("stride must be non-zero"));
    }

    Ok(digits
        .iter()
        .enumerate()
        .fold(BigUint::zero(), |acc, (i, digit)| {
            acc + (digit << (target_stride as usize * i))
        }))
}

/// Re-encodes the `small_stride`-bit digits of `x` at `target_stride`-bit
/// positions.
pub fn restride(x: &BigUint, small_stride: u32, target_stride: u32) -> Result<BigUint, CodecError> {
    if target_stride == 0 {
        return Err(CodecError::InvalidArgument("stride must be non-zero"));
    }
    let digits = decompose(x, small_stride)?;
    recompose(&digits, target_stride)
}
