//! Signature records: the circuit-facing output of a signing run.

use std::fmt;

use codec::{from_bytes_be, to_bytes32, LimbLayout};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::backend::{EcdsaBackend, EddsaBackend, FieldHasher, PointXY};
use crate::constants::SCALAR_SIZE;
use crate::errors::SignerError;

/// Signature scheme of a record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scheme {
    Ecdsa,
    Eddsa,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Ecdsa => f.write_str("ECDSA"),
            Scheme::Eddsa => f.write_str("EdDSA"),
        }
    }
}

/// Scheme-specific signature scalars.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureComponents {
    /// Compact ECDSA halves, decoded from big-endian bytes.
    Ecdsa { r: BigUint, s: BigUint },
    /// EdDSA commitment point and response scalar.
    Eddsa { r8: PointXY, s: BigUint },
}

/// A verified signature together with everything needed to reproduce it.
///
/// Records are only produced by [`generate_ecdsa`] and [`generate_eddsa`],
/// after the signature has verified under `public_key`. They are immutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SignatureRecord {
    private_key: Vec<u8>,
    message: BigUint,
    public_key: PointXY,
    components: SignatureComponents,
    public_key_hash: BigUint,
}

impl SignatureRecord {
    pub fn scheme(&self) -> Scheme {
        match self.components {
            SignatureComponents::Ecdsa { .. } => Scheme::Ecdsa,
            SignatureComponents::Eddsa { .. } => Scheme::Eddsa,
        }
    }

    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }

    /// Message hash for ECDSA, message field element for EdDSA.
    pub fn message(&self) -> &BigUint {
        &self.message
    }

    pub fn public_key(&self) -> &PointXY {
        &self.public_key
    }

    pub fn components(&self) -> &SignatureComponents {
        &self.components
    }

    /// Poseidon commitment to the public key (`sender_pubkey_hash`).
    pub fn public_key_hash(&self) -> &BigUint {
        &self.public_key_hash
    }
}

/// Signs `message_hash` with ECDSA and derives the circuit-facing scalars.
///
/// The public key commitment is the Poseidon hash of the public key
/// coordinates, each split into limbs according to `layout`.
#[tracing::instrument(skip_all, name = "generate_ecdsa")]
pub fn generate_ecdsa<B, H>(
    backend: &B,
    hasher: &H,
    private_key: &BigUint,
    message_hash: &BigUint,
    layout: LimbLayout,
) -> Result<SignatureRecord, SignerError>
where
    B: EcdsaBackend + ?Sized,
    H: FieldHasher + ?Sized,
{
    let key_bytes = to_bytes32(private_key)?;
    let hash_bytes = to_bytes32(message_hash)?;

    let compact = backend.sign_compact(&hash_bytes, &key_bytes)?;
    let (r, s) = compact.split_at(SCALAR_SIZE);
    let (r, s) = (from_bytes_be(r), from_bytes_be(s));

    let public_key = backend.public_key(&key_bytes)?;
    if !backend.verify_compact(&hash_bytes, &compact, &public_key)? {
        error!(%message_hash, x = %public_key.x, y = %public_key.y, "ECDSA self-check failed");
        return Err(SignerError::SelfCheckFailed {
            scheme: Scheme::Ecdsa,
            x: public_key.x,
            y: public_key.y,
        });
    }

    let mut commitment = layout.encode(&public_key.x)?.into_vec();
    commitment.extend(layout.encode(&public_key.y)?);
    let public_key_hash = hasher.hash(&commitment)?;

    debug!(%message_hash, %r, %s, "generated ECDSA vector");

    Ok(SignatureRecord {
        private_key: key_bytes.to_vec(),
        message: message_hash.clone(),
        public_key,
        components: SignatureComponents::Ecdsa { r, s },
        public_key_hash,
    })
}

/// Signs `message` with EdDSA-Poseidon and self-verifies the result.
#[tracing::instrument(skip_all, name = "generate_eddsa")]
pub fn generate_eddsa<B, H>(
    backend: &B,
    hasher: &H,
    private_key: &[u8],
    message: &BigUint,
) -> Result<SignatureRecord, SignerError>
where
    B: EddsaBackend + ?Sized,
    H: FieldHasher + ?Sized,
{
    let public_key = backend.prv2pub(private_key)?;
    let signature = backend.sign_poseidon(private_key, message)?;

    if !backend.verify_poseidon(message, &signature, &public_key)? {
        error!(%message, x = %public_key.x, y = %public_key.y, "EdDSA self-check failed");
        return Err(SignerError::SelfCheckFailed {
            scheme: Scheme::Eddsa,
            x: public_key.x,
            y: public_key.y,
        });
    }

    let public_key_hash = hasher.hash(&[public_key.x.clone(), public_key.y.clone()])?;

    debug!(%message, s = %signature.s, "generated EdDSA vector");

    Ok(SignatureRecord {
        private_key: private_key.to_vec(),
        message: message.clone(),
        public_key,
        components: SignatureComponents::Eddsa {
            r8: signature.r8,
            s: signature.s,
        },
        public_key_hash,
    })
}
