//! Fixed-width encodings of arbitrary-precision integers for circuit inputs.
//!
//! Circuits cannot consume a 256-bit scalar directly. This crate provides the
//! conversions between a non-negative [`BigUint`] and the two shapes circuits
//! expect:
//! - a little-endian array of `k` limbs of `n` bits each ([`Limbs`])
//! - a fixed-length big-endian byte string
//!
//! plus the stride re-basing used to repack digits into wider limb slots.
//!
//! Every encoder is lossless: a value that does not fit the requested width is
//! reported as [`CodecError::Overflow`] instead of being truncated.
//!
//! # Example
//!
//! ```
//! use codec::{from_limbs, to_limbs};
//! use num_bigint::BigUint;
//!
//! let x = BigUint::from(1234u32);
//! let limbs = to_limbs(&x, 64, 4).expect("fits in 256 bits");
//! assert_eq!(limbs.len(), 4);
//! assert_eq!(from_limbs(limbs.as_slice(), 64).expect("valid limbs"), x);
//! ```

mod bytes;
mod errors;
mod limbs;
mod restride;

#[cfg(test)]
mod tests;

pub use bytes::{from_bytes_be, to_bytes32, to_bytes_be};
pub use errors::CodecError;
pub use limbs::{from_limbs, to_limbs, LimbLayout, Limbs};
pub use num_bigint::BigUint;
pub use restride::{decompose, recompose, restride};
