//! EdDSA over Baby Jubjub with a Poseidon challenge.
//!
//! Follows the circomlib construction:
//! 1. `h = BLAKE2b-512(sk)`; the low half is pruned into the secret `s`
//! 2. `A = G * (s >> 3)`
//! 3. `r = BLAKE2b-512(h[32..64] || msg) mod l`, `R8 = G * r`
//! 4. `hm = Poseidon(R8.x, R8.y, A.x, A.y, msg)`
//! 5. `S = r + hm * s mod l`
//!
//! Verification checks `G * S == R8 + A * (8 * hm)`, with `S < l` and both
//! points on the curve and in the prime-order subgroup.

use ark_ec::{AffineRepr, CurveGroup};
use ark_ed_on_bn254::{EdwardsAffine, Fq, Fr};
use ark_ff::PrimeField;
use blake2::{Blake2b512, Digest};
use codec::to_bytes_be;
use num_bigint::BigUint;

use crate::backend::{EddsaBackend, EddsaSignature, FieldHasher, PointXY};
use crate::constants::{BABY_JUBJUB_COFACTOR, EDDSA_MESSAGE_BYTES};
use crate::errors::SignerError;
use crate::poseidon::{bn254_modulus, CircomPoseidon};

/// Order `l` of the prime-order subgroup of Baby Jubjub.
pub fn baby_jubjub_order() -> BigUint {
    Fr::MODULUS.into()
}

/// EdDSA-Poseidon signer over Baby Jubjub.
///
/// The challenge hash is pluggable; [`BabyJubJub::new`] uses
/// [`CircomPoseidon`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BabyJubJub<H = CircomPoseidon> {
    hasher: H,
}

impl BabyJubJub<CircomPoseidon> {
    pub fn new() -> Self {
        Self {
            hasher: CircomPoseidon,
        }
    }
}

impl<H: FieldHasher> BabyJubJub<H> {
    pub fn with_hasher(hasher: H) -> Self {
        Self { hasher }
    }

    fn challenge(
        &self,
        r8: &PointXY,
        public_key: &PointXY,
        message: &BigUint,
    ) -> Result<Fr, SignerError> {
        let hm = self.hasher.hash(&[
            r8.x.clone(),
            r8.y.clone(),
            public_key.x.clone(),
            public_key.y.clone(),
            message.clone(),
        ])?;
        Ok(Fr::from(hm))
    }
}

/// Secret material expanded from a raw private key.
struct ExpandedKey {
    /// `s >> 3`, the multiplier of the public key.
    scalar: Fr,
    /// Upper half of the key digest, mixed into every nonce.
    nonce_prefix: [u8; 32],
}

fn expand_key(private_key: &[u8]) -> Result<ExpandedKey, SignerError> {
    if private_key.is_empty() {
        return Err(SignerError::InvalidKey("private key is empty".into()));
    }

    let digest = Blake2b512::digest(private_key);
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&digest[..32]);
    secret[0] &= 0xf8;
    secret[31] &= 0x7f;
    secret[31] |= 0x40;

    let mut nonce_prefix = [0u8; 32];
    nonce_prefix.copy_from_slice(&digest[32..]);

    Ok(ExpandedKey {
        scalar: Fr::from(BigUint::from_bytes_le(&secret) >> 3),
        nonce_prefix,
    })
}

fn check_message(message: &BigUint) -> Result<(), SignerError> {
    if message >= &bn254_modulus() {
        return Err(SignerError::InvalidArgument(format!(
            "message {message} is not a BN254 field element"
        )));
    }
    Ok(())
}

fn to_point(point: &EdwardsAffine) -> PointXY {
    PointXY::new(point.x.into_bigint().into(), point.y.into_bigint().into())
}

/// Rebuilds a curve point, rejecting non-canonical coordinates, points off
/// the curve and points outside the prime-order subgroup.
fn from_point(point: &PointXY) -> Option<EdwardsAffine> {
    let modulus = bn254_modulus();
    if point.x >= modulus || point.y >= modulus {
        return None;
    }

    let affine = EdwardsAffine::new_unchecked(Fq::from(point.x.clone()), Fq::from(point.y.clone()));
    (affine.is_on_curve() && affine.is_in_correct_subgroup_assuming_on_curve()).then_some(affine)
}

impl<H: FieldHasher> EddsaBackend for BabyJubJub<H> {
    fn prv2pub(&self, private_key: &[u8]) -> Result<PointXY, SignerError> {
        let key = expand_key(private_key)?;
        Ok(to_point(&(EdwardsAffine::generator() * key.scalar).into_affine()))
    }

    fn sign_poseidon(
        &self,
        private_key: &[u8],
        message: &BigUint,
    ) -> Result<EddsaSignature, SignerError> {
        check_message(message)?;
        let key = expand_key(private_key)?;
        let generator = EdwardsAffine::generator();
        let public_key = to_point(&(generator * key.scalar).into_affine());

        let mut message_le = to_bytes_be(message, EDDSA_MESSAGE_BYTES)?;
        message_le.reverse();
        let nonce_digest = Blake2b512::new()
            .chain_update(key.nonce_prefix)
            .chain_update(&message_le)
            .finalize();
        let nonce = Fr::from_le_bytes_mod_order(&nonce_digest);

        let r8 = to_point(&(generator * nonce).into_affine());
        let hm = self.challenge(&r8, &public_key, message)?;
        let s = nonce + hm * key.scalar * Fr::from(BABY_JUBJUB_COFACTOR);

        Ok(EddsaSignature {
            r8,
            s: s.into_bigint().into(),
        })
    }

    fn verify_poseidon(
        &self,
        message: &BigUint,
        signature: &EddsaSignature,
        public_key: &PointXY,
    ) -> Result<bool, SignerError> {
        check_message(message)?;
        if signature.s >= baby_jubjub_order() {
            return Ok(false);
        }
        let (Some(a), Some(r8)) = (from_point(public_key), from_point(&signature.r8)) else {
            return Ok(false);
        };

        let hm = self.challenge(&signature.r8, public_key, message)?;
        let lhs = EdwardsAffine::generator() * Fr::from(signature.s.clone());
        let rhs = r8.into_group() + a * (hm * Fr::from(BABY_JUBJUB_COFACTOR));

        Ok(lhs == rhs)
    }
}
