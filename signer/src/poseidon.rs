//! Circom-compatible Poseidon over the BN254 scalar field.

use ark_bn254::Fr;
use ark_ff::PrimeField;
use light_poseidon::{Poseidon, PoseidonHasher};
use num_bigint::BigUint;

use crate::backend::FieldHasher;
use crate::errors::SignerError;

/// Modulus of the BN254 scalar field, the native field of the circuits.
pub fn bn254_modulus() -> BigUint {
    Fr::MODULUS.into()
}

/// Poseidon with the circomlib round constants and MDS matrices.
///
/// Accepts between 1 and 12 inputs; each input must be a canonical field
/// element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CircomPoseidon;

impl FieldHasher for CircomPoseidon {
    fn hash(&self, inputs: &[BigUint]) -> Result<BigUint, SignerError> {
        let modulus = bn254_modulus();
        let elements = inputs
            .iter()
            .map(|x| {
                if x >= &modulus {
                    return Err(SignerError::InvalidArgument(format!(
                        "poseidon input {x} is not a BN254 field element"
                    )));
                }
                Ok(Fr::from(x.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut poseidon = Poseidon::<Fr>::new_circom(elements.len())
            .map_err(|e| SignerError::backend("poseidon", e))?;
        let digest = poseidon
            .hash(&elements)
            .map_err(|e| SignerError::backend("poseidon", e))?;

        Ok(digest.into_bigint().into())
    }
}
