//! Circuit input assignments built from signature records.

use codec::LimbLayout;
use num_bigint::BigUint;
use num_traits::One;
use serde::{Deserialize, Serialize};
use signer::{SignatureComponents, SignatureRecord};

use crate::assignment::{InputAssignment, InputValue};
use crate::errors::CircuitError;

/// A deliberate corruption applied to one input before evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tamper {
    /// `r + 1` for ECDSA, `R8x + 1` for EdDSA.
    IncrementR,
    IncrementS,
    IncrementMessage,
}

fn bump(value: &BigUint, hit: bool) -> BigUint {
    if hit {
        value + BigUint::one()
    } else {
        value.clone()
    }
}

/// Builds the input map for `record`'s scheme.
///
/// ECDSA values are split into limbs according to `layout`; EdDSA inputs are
/// single field elements and ignore it.
pub fn assignment_for(
    record: &SignatureRecord,
    layout: LimbLayout,
    tamper: Option<Tamper>,
) -> Result<InputAssignment, CircuitError> {
    let message = bump(record.message(), tamper == Some(Tamper::IncrementMessage));
    let public_key = record.public_key();

    let assignment = match record.components() {
        SignatureComponents::Ecdsa { r, s } => {
            let r = bump(r, tamper == Some(Tamper::IncrementR));
            let s = bump(s, tamper == Some(Tamper::IncrementS));
            let pubkey = InputValue::from(vec![
                InputValue::from(layout.encode(&public_key.x)?),
                InputValue::from(layout.encode(&public_key.y)?),
            ]);
            InputAssignment::new()
                .with("r", layout.encode(&r)?)
                .with("s", layout.encode(&s)?)
                .with("msghash", layout.encode(&message)?)
                .with("sender_pubkey", pubkey)
                .with("sender_pubkey_hash", record.public_key_hash().clone())
        }
        SignatureComponents::Eddsa { r8, s } => InputAssignment::new()
            .with("Ax", public_key.x.clone())
            .with("Ay", public_key.y.clone())
            .with("R8x", bump(&r8.x, tamper == Some(Tamper::IncrementR)))
            .with("R8y", r8.y.clone())
            .with("S", bump(s, tamper == Some(Tamper::IncrementS)))
            .with("msg", message)
            .with("sender_pubkey_hash", record.public_key_hash().clone()),
    };
    Ok(assignment)
}
