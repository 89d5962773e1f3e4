//! Signature test-vector generation for circuit conformance testing.
//!
//! This crate produces signature records whose components are ready to be
//! encoded as circuit inputs:
//! - ECDSA over secp256k1 (RFC 6979 nonces, low-S, compact `r || s` encoding)
//! - EdDSA over Baby Jubjub with a Poseidon challenge hash
//!
//! # Overview
//!
//! Cryptographic primitives are reached only through three small capability
//! traits, so the generator can run against fakes in tests:
//! - [`EcdsaBackend`]: public key derivation, compact signing, verification
//! - [`EddsaBackend`]: `prv2pub`, Poseidon signing, Poseidon verification
//! - [`FieldHasher`]: Poseidon over the BN254 scalar field
//!
//! The shipped implementations are [`Secp256k1`], [`BabyJubJub`] and
//! [`CircomPoseidon`].
//!
//! Every generated signature is verified before it is returned. A signature
//! that fails its own verification aborts generation with
//! [`SignerError::SelfCheckFailed`].
//!
//! # Example
//!
//! ```
//! use codec::LimbLayout;
//! use num_bigint::BigUint;
//! use signer::{generate_ecdsa, CircomPoseidon, Secp256k1};
//!
//! let private_key = BigUint::from(0xC0FFEEu32);
//! let message_hash = BigUint::from(1234u32);
//!
//! let record = generate_ecdsa(
//!     &Secp256k1,
//!     &CircomPoseidon,
//!     &private_key,
//!     &message_hash,
//!     LimbLayout::U64X4,
//! )
//! .expect("signing failed");
//! assert_eq!(record.message(), &message_hash);
//! ```

mod backend;
mod constants;
mod ecdsa;
mod eddsa;
mod errors;
mod poseidon;
mod vectors;


pub use backend::{EcdsaBackend, EddsaBackend, EddsaSignature, FieldHasher, PointXY};
pub use constants::{COMPACT_SIGNATURE_SIZE, PRIVATE_KEY_SIZE, SCALAR_SIZE};
pub use ecdsa::{secp256k1_order, Secp256k1};
pub use eddsa::{baby_jubjub_order, BabyJubJub};
pub use errors::SignerError;
pub use poseidon::{bn254_modulus, CircomPoseidon};
pub use vectors::{generate_ecdsa, generate_eddsa, Scheme, SignatureComponents, SignatureRecord};
