//! Error types for signature vector generation.

use codec::CodecError;
use num_bigint::BigUint;
use thiserror::Error;

use crate::vectors::Scheme;

/// Errors that can occur while deriving keys, signing or hashing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignerError {
    /// The private key is zero, out of range, or otherwise unusable.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    /// An input does not satisfy a backend precondition, such as a message
    /// that is not a field element.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The underlying primitive reported a failure.
    #[error("{backend} backend failure: {reason}")]
    Backend {
        backend: &'static str,
        reason: String,
    },

    /// A freshly produced signature does not verify under its own public key.
    ///
    /// This is fatal: the vector is never handed to a harness.
    #[error("{scheme} signature failed its self-check under public key ({x}, {y})")]
    SelfCheckFailed {
        scheme: Scheme,
        x: BigUint,
        y: BigUint,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl SignerError {
    pub(crate) fn backend(backend: &'static str, reason: impl ToString) -> Self {
        Self::Backend {
            backend,
            reason: reason.to_string(),
        }
    }
}
