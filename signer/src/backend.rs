//! Capability traits for the external cryptographic primitives.
//!
//! Values cross these traits as plain integers, so an implementation can sit
//! on any curve library. All calls are blocking.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::SignerError;

/// An affine curve point given by its coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PointXY {
    pub x: BigUint,
    pub y: BigUint,
}

impl PointXY {
    pub fn new(x: BigUint, y: BigUint) -> Self {
        Self { x, y }
    }
}

/// An EdDSA signature: commitment point `R8` and response scalar `S`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EddsaSignature {
    pub r8: PointXY,
    pub s: BigUint,
}

/// ECDSA primitives over secp256k1.
pub trait EcdsaBackend {
    /// Derives the uncompressed public key.
    fn public_key(&self, private_key: &[u8; 32]) -> Result<PointXY, SignerError>;

    /// Signs a 32-byte message hash and returns the compact `r || s` form.
    ///
    /// Implementations must be deterministic and return the low-S form.
    fn sign_compact(
        &self,
        message_hash: &[u8; 32],
        private_key: &[u8; 32],
    ) -> Result<[u8; 64], SignerError>;

    /// Checks a compact signature. Malformed keys or scalars verify as `false`.
    fn verify_compact(
        &self,
        message_hash: &[u8; 32],
        signature: &[u8; 64],
        public_key: &PointXY,
    ) -> Result<bool, SignerError>;
}

/// EdDSA primitives with a Poseidon challenge hash.
pub trait EddsaBackend {
    fn prv2pub(&self, private_key: &[u8]) -> Result<PointXY, SignerError>;

    fn sign_poseidon(
        &self,
        private_key: &[u8],
        message: &BigUint,
    ) -> Result<EddsaSignature, SignerError>;

    fn verify_poseidon(
        &self,
        message: &BigUint,
        signature: &EddsaSignature,
        public_key: &PointXY,
    ) -> Result<bool, SignerError>;
}

/// Algebraic hash over field elements.
pub trait FieldHasher {
    fn hash(&self, inputs: &[BigUint]) -> Result<BigUint, SignerError>;
}
