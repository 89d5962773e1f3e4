//! Sizes and parameters shared by the signature backends.

/// Size of a secp256k1 private key in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of one big-endian scalar half of a compact signature.
pub const SCALAR_SIZE: usize = 32;

/// Size of a compact ECDSA signature: `r || s`, each 32 bytes big-endian.
pub const COMPACT_SIGNATURE_SIZE: usize = 2 * SCALAR_SIZE;

/// Byte width of a message field element when fed to the nonce hash.
pub(crate) const EDDSA_MESSAGE_BYTES: usize = 32;

/// Cofactor of the Baby Jubjub curve.
pub(crate) const BABY_JUBJUB_COFACTOR: u64 = 8;
