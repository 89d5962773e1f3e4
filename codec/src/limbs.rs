//! Radix-`2^n` limb decomposition.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::errors::CodecError;

/// Shape of a limb encoding: `count` limbs of `stride` bits each.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LimbLayout {
    pub stride: u32,
    pub count: usize,
}

impl LimbLayout {
    /// Four 64-bit limbs, the layout used for 256-bit secp256k1 values.
    pub const U64X4: Self = Self {
        stride: 64,
        count: 4,
    };

    pub const fn new(stride: u32, count: usize) -> Self {
        Self { stride, count }
    }

    /// Total number of bits the layout can hold.
    pub fn width_bits(&self) -> u64 {
        u64::from(self.stride) * self.count as u64
    }

    pub fn encode(&self, x: &BigUint) -> Result<Limbs, CodecError> {
        to_limbs(x, self.stride, self.count)
    }

    pub fn decode(&self, limbs: &[BigUint]) -> Result<BigUint, CodecError> {
        if limbs.len() != self.count {
            return Err(CodecError::InvalidArgument(
                "limb count does not match the layout",
            ));
        }
        from_limbs(limbs, self.stride)
    }
}

impl Default for LimbLayout {
    fn default() -> Self {
        Self::U64X4
    }
}

/// A value split into little-endian limbs, each strictly below `2^stride`.
///
/// Built by [`to_limbs`]; deserialization re-checks the limb bound, so
/// `sum(limb[i] * 2^(stride*i)) == value` always holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawLimbs")]
pub struct Limbs {
    stride: u32,
    limbs: Vec<BigUint>,
}

#[derive(Deserialize)]
struct RawLimbs {
    stride: u32,
    limbs: Vec<BigUint>,
}

impl TryFrom<RawLimbs> for Limbs {
    type Error = CodecError;

    fn try_from(raw: RawLimbs) -> Result<Self, Self::Error> {
        from_limbs(&raw.limbs, raw.stride)?;
        Ok(Self {
            stride: raw.stride,
            limbs: raw.limbs,
        })
    }
}

impl Limbs {
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.limbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limbs.is_empty()
    }

    pub fn as_slice(&self) -> &[BigUint] {
        &self.limbs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BigUint> {
        self.limbs.iter()
    }

    pub fn into_vec(self) -> Vec<BigUint> {
        self.limbs
    }

    /// Recomposes the encoded value.
    pub fn value(&self) -> BigUint {
        self.limbs
            .iter()
            .rev()
            .fold(BigUint::zero(), |acc, limb| (acc << self.stride) | limb)
    }
}

impl IntoIterator for Limbs {
    type Item = BigUint;
    type IntoIter = std::vec::IntoIter<BigUint>;

    fn into_iter(self) -> Self::IntoIter {
        self.limbs.into_iter()
    }
}

/// `2^stride - 1`, the largest value a single digit may take.
pub(crate) fn digit_mask(stride: u32) -> Result<BigUint, CodecError> {
    if stride == 0 {
        return Err(CodecError::InvalidArgument("stride must be non-zero"));
    }
    Ok((BigUint::one() << stride) - 1u32)
}

/// Splits `x` into `count` limbs of `stride` bits, least significant first.
///
/// Each step takes `x mod 2^stride` and divides by `2^stride`. Anything left
/// after `count` steps means the value does not fit, which is an
/// [`CodecError::Overflow`].
pub fn to_limbs(x: &BigUint, stride: u32, count: usize) -> Result<Limbs, CodecError> {
    let mask = digit_mask(stride)?;

    let mut rest = x.clone();
    let mut limbs = Vec::with_capacity(count);
    for _ in 0..count {
        limbs.push(&rest & &mask);
        rest >>= stride;
    }

    if !rest.is_zero() {
        return Err(CodecError::Overflow {
            bits: x.bits(),
            width: u64::from(stride) * count as u64,
        });
    }

    Ok(Limbs { stride, limbs })
}

/// Computes `sum(limbs[i] * 2^(stride*i))`.
///
/// Limbs must each be below `2^stride`; a wider limb would alias bits of its
/// neighbour and is rejected as an overflow.
pub fn from_limbs(limbs: &[BigUint], stride: u32) -> Result<BigUint, CodecError> {
    let mask = digit_mask(stride)?;

    limbs
        .iter()
        .rev()
        .try_fold(BigUint::zero(), |acc, limb| {
            if limb > &mask {
                return Err(CodecError::Overflow {
                    bits: limb.bits(),
                    width: u64::from(stride),
                });
            }
            Ok((acc << stride) | limb)
        })
}
