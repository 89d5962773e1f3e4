//! Fixed-length big-endian byte encoding.

use num_bigint::BigUint;

use crate::errors::CodecError;

/// Encodes `x` as exactly `len` bytes, most significant byte first.
pub fn to_bytes_be(x: &BigUint, len: usize) -> Result<Vec<u8>, CodecError> {
    if len == 0 {
        return Err(CodecError::InvalidArgument("byte length must be non-zero"));
    }

    let width = 8 * len as u64;
    if x.bits() > width {
        return Err(CodecError::Overflow {
            bits: x.bits(),
            width,
        });
    }

    // `to_bytes_be` of zero is `[0]`, which still fits any non-zero length.
    let raw = x.to_bytes_be();
    let mut out = vec![0u8; len];
    out[len - raw.len()..].copy_from_slice(&raw);
    Ok(out)
}

/// 32-byte form of [`to_bytes_be`], the width of a secp256k1 scalar.
pub fn to_bytes32(x: &BigUint) -> Result<[u8; 32], CodecError> {
    let mut out = [0u8; 32];
    out.copy_from_slice(&to_bytes_be(x, 32)?);
    Ok(out)
}

/// Decodes big-endian bytes. An empty slice decodes to zero.
pub fn from_bytes_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}
