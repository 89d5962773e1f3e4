//! ECDSA over secp256k1, backed by `k256`.

use codec::{from_bytes_be, to_bytes32};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use num_bigint::BigUint;

use crate::backend::{EcdsaBackend, PointXY};
use crate::constants::COMPACT_SIGNATURE_SIZE;
use crate::errors::SignerError;

/// SEC1 tag for an uncompressed point.
const SEC1_UNCOMPRESSED: u8 = 0x04;

/// Order of the secp256k1 group, big-endian.
const ORDER_BE: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Order `n` of the secp256k1 group.
pub fn secp256k1_order() -> BigUint {
    from_bytes_be(&ORDER_BE)
}

/// secp256k1 ECDSA with RFC 6979 nonces and low-S normalisation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Secp256k1;

fn signing_key(private_key: &[u8; 32]) -> Result<SigningKey, SignerError> {
    SigningKey::from_slice(private_key).map_err(|e| SignerError::InvalidKey(e.to_string()))
}

fn sec1_uncompressed(point: &PointXY) -> Result<Vec<u8>, SignerError> {
    let mut out = Vec::with_capacity(1 + COMPACT_SIGNATURE_SIZE);
    out.push(SEC1_UNCOMPRESSED);
    out.extend_from_slice(&to_bytes32(&point.x)?);
    out.extend_from_slice(&to_bytes32(&point.y)?);
    Ok(out)
}

impl EcdsaBackend for Secp256k1 {
    fn public_key(&self, private_key: &[u8; 32]) -> Result<PointXY, SignerError> {
        let key = signing_key(private_key)?;
        let encoded = key.verifying_key().to_encoded_point(false);

        let x = encoded
            .x()
            .ok_or_else(|| SignerError::backend("secp256k1", "public key is the identity"))?;
        let y = encoded
            .y()
            .ok_or_else(|| SignerError::backend("secp256k1", "public key is compressed"))?;

        Ok(PointXY::new(from_bytes_be(x), from_bytes_be(y)))
    }

    fn sign_compact(
        &self,
        message_hash: &[u8; 32],
        private_key: &[u8; 32],
    ) -> Result<[u8; 64], SignerError> {
        let key = signing_key(private_key)?;
        let signature: Signature = key
            .sign_prehash(message_hash)
            .map_err(|e| SignerError::backend("secp256k1", e))?;
        let signature = signature.normalize_s().unwrap_or(signature);

        let mut out = [0u8; COMPACT_SIGNATURE_SIZE];
        out.copy_from_slice(&signature.to_bytes());
        Ok(out)
    }

    fn verify_compact(
        &self,
        message_hash: &[u8; 32],
        signature: &[u8; 64],
        public_key: &PointXY,
    ) -> Result<bool, SignerError> {
        let Ok(sec1) = sec1_uncompressed(public_key) else {
            return Ok(false);
        };
        let Ok(key) = VerifyingKey::from_sec1_bytes(&sec1) else {
            return Ok(false);
        };
        let Ok(signature) = Signature::from_slice(signature) else {
            return Ok(false);
        };

        Ok(key.verify_prehash(message_hash, &signature).is_ok())
    }
}
