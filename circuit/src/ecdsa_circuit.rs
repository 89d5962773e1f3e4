//! ECDSA verification circuit over secp256k1 with limb-encoded inputs.
//!
//! Inputs (for a `k`-limb layout of `n`-bit limbs):
//! - `r[k]`, `s[k]`: signature scalars
//! - `msghash[k]`: the signed message hash
//! - `sender_pubkey[2][k]`: public key coordinates, `x` then `y`
//! - `sender_pubkey_hash`: Poseidon commitment to the `2k` public key limbs
//!
//! The public key is taken as given: it is not re-derived or checked against
//! anything except the commitment.

use std::sync::Arc;

use codec::{from_limbs, LimbLayout};
use signer::bn254_modulus;
use tracing::debug;

use crate::assignment::{InputAssignment, InputSpec, Shape};
use crate::constraints::{Constraint, ConstraintSystem};
use crate::errors::CircuitError;
use crate::handle::Circuit;
use crate::witness::{InputBinding, SignalLayout, Witness};

/// Bit width of secp256k1 scalars and coordinates.
const SECP256K1_BITS: u64 = 256;

/// Largest limb stride whose limbs are always BN254 field elements.
const MAX_STRIDE: u32 = 253;

/// Largest Poseidon arity supported by the commitment.
const MAX_COMMITMENT_INPUTS: usize = 12;

/// A limb input whose recomposed value the circuit derives.
#[derive(Clone, Debug)]
struct Recomposition {
    name: String,
    limbs: Vec<usize>,
    value: usize,
}

#[derive(Clone, Debug)]
pub struct EcdsaVerifyCircuit {
    name: String,
    limbs: LimbLayout,
    inputs: Vec<InputSpec>,
    bindings: Vec<InputBinding>,
    recompositions: Vec<Recomposition>,
    layout: Arc<SignalLayout>,
    constraints: ConstraintSystem,
}

impl EcdsaVerifyCircuit {
    pub fn new(limbs: LimbLayout) -> Result<Self, CircuitError> {
        if limbs.stride == 0 || limbs.stride > MAX_STRIDE {
            return Err(CircuitError::Descriptor(format!(
                "limb stride {} must be between 1 and {MAX_STRIDE}",
                limbs.stride
            )));
        }
        if limbs.width_bits() < SECP256K1_BITS {
            return Err(CircuitError::Descriptor(format!(
                "{} limbs of {} bits cannot hold a {SECP256K1_BITS}-bit scalar",
                limbs.count, limbs.stride
            )));
        }
        if 2 * limbs.count > MAX_COMMITMENT_INPUTS {
            return Err(CircuitError::Descriptor(format!(
                "public key commitment over {} limbs exceeds {MAX_COMMITMENT_INPUTS} inputs",
                2 * limbs.count
            )));
        }

        let k = limbs.count;
        let stride = limbs.stride;
        let mut layout = SignalLayout::new();

        let inputs = vec![
            InputSpec::new("r", Shape::array(k)),
            InputSpec::new("s", Shape::array(k)),
            InputSpec::new("msghash", Shape::array(k)),
            InputSpec::new("sender_pubkey", Shape::matrix(2, k)),
            InputSpec::new("sender_pubkey_hash", Shape::Scalar),
        ];
        let bindings: Vec<InputBinding> = inputs.iter().cloned().map(|spec| layout.bind(spec)).collect();
        let [r, s, msghash, pubkey, pubkey_hash] = [0, 1, 2, 3, 4].map(|i| &bindings[i].signals);
        let (pub_x, pub_y) = pubkey.split_at(k);

        let recompositions: Vec<Recomposition> = [
            ("r", r.as_slice()),
            ("s", s.as_slice()),
            ("msghash", msghash.as_slice()),
            ("sender_pubkey[0]", pub_x),
            ("sender_pubkey[1]", pub_y),
        ]
        .into_iter()
        .map(|(name, limbs)| Recomposition {
            name: name.to_string(),
            limbs: limbs.to_vec(),
            value: layout.alloc(format!("{name}.value")),
        })
        .collect();

        let mut constraints = ConstraintSystem::new();
        for signal in r.iter().chain(s).chain(msghash).chain(pubkey) {
            let label = format!("{} < 2^{stride}", layout.name(*signal).unwrap_or_default());
            constraints.add(
                label,
                Constraint::Range {
                    signal: *signal,
                    bits: stride,
                },
            );
        }
        for rc in &recompositions {
            constraints.add(
                format!("{}.value == sum({}[i] * 2^({stride}*i))", rc.name, rc.name),
                Constraint::Recompose {
                    limbs: rc.limbs.clone(),
                    stride,
                    value: rc.value,
                },
            );
        }
        constraints.add(
            "sender_pubkey_hash < p",
            Constraint::LessThan {
                signal: pubkey_hash[0],
                bound: bn254_modulus(),
            },
        );
        constraints.add(
            "sender_pubkey_hash == Poseidon(sender_pubkey)",
            Constraint::Poseidon {
                inputs: pubkey.clone(),
                output: pubkey_hash[0],
            },
        );
        let [r_value, s_value, msghash_value, x_value, y_value] =
            [0, 1, 2, 3, 4].map(|i| recompositions[i].value);
        constraints.add(
            "ECDSA(r, s) verifies msghash under sender_pubkey",
            Constraint::EcdsaVerify {
                r: r_value,
                s: s_value,
                msghash: msghash_value,
                qx: x_value,
                qy: y_value,
            },
        );

        Ok(Self {
            name: format!("ecdsa_verify_no_pubkey_check_{}_{}", stride, k),
            limbs,
            inputs,
            bindings,
            recompositions,
            layout: Arc::new(layout),
            constraints,
        })
    }
}

impl Circuit for EcdsaVerifyCircuit {
    fn name(&self) -> &str {
        &self.name
    }

    fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    fn constraints(&self) -> &ConstraintSystem {
        &self.constraints
    }

    fn limbs(&self) -> Option<LimbLayout> {
        Some(self.limbs)
    }

    fn evaluate(&self, inputs: &InputAssignment) -> Result<Witness, CircuitError> {
        let mut witness = Witness::new(Arc::clone(&self.layout));
        witness.bind_inputs(&self.bindings, inputs)?;

        for rc in &self.recompositions {
            let value = from_limbs(&witness.gather(&rc.limbs), self.limbs.stride).map_err(|e| {
                CircuitError::ConstraintUnsatisfiable {
                    circuit: self.name.clone(),
                    constraint: format!("{} limbs: {e}", rc.name),
                }
            })?;
            witness.set(rc.value, value);
        }

        debug!(circuit = %self.name, signals = witness.len(), "evaluated witness");
        Ok(witness)
    }

    fn check_constraints(&self, witness: &Witness) -> Result<(), CircuitError> {
        witness.ensure_layout(&self.layout, &self.name)?;
        self.constraints.check(&self.name, witness)
    }
}
