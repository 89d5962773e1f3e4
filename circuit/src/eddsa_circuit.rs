//! EdDSA-Poseidon verification circuit over Baby Jubjub.
//!
//! All inputs are single BN254 field elements: the public key `(Ax, Ay)`,
//! the commitment point `(R8x, R8y)`, the response `S`, the message `msg` and
//! the commitment `sender_pubkey_hash = Poseidon(Ax, Ay)`.

use std::sync::Arc;

use signer::{baby_jubjub_order, bn254_modulus};
use tracing::debug;

use crate::assignment::{InputAssignment, InputSpec, Shape};
use crate::constraints::{Constraint, ConstraintSystem};
use crate::errors::CircuitError;
use crate::handle::Circuit;
use crate::witness::{InputBinding, SignalLayout, Witness};

const INPUTS: [&str; 7] = ["Ax", "Ay", "R8x", "R8y", "S", "msg", "sender_pubkey_hash"];

#[derive(Clone, Debug)]
pub struct EddsaPoseidonCircuit {
    inputs: Vec<InputSpec>,
    bindings: Vec<InputBinding>,
    layout: Arc<SignalLayout>,
    constraints: ConstraintSystem,
}

impl Default for EddsaPoseidonCircuit {
    fn default() -> Self {
        Self::new()
    }
}

impl EddsaPoseidonCircuit {
    pub const NAME: &'static str = "eddsa_poseidon_verifier";

    pub fn new() -> Self {
        let mut layout = SignalLayout::new();
        let inputs: Vec<InputSpec> = INPUTS
            .iter()
            .map(|name| InputSpec::new(*name, Shape::Scalar))
            .collect();
        let bindings: Vec<InputBinding> = inputs.iter().cloned().map(|spec| layout.bind(spec)).collect();
        let [ax, ay, r8x, r8y, s, msg, pubkey_hash] = [0, 1, 2, 3, 4, 5, 6].map(|i| bindings[i].signals[0]);

        let mut constraints = ConstraintSystem::new();
        let p = bn254_modulus();
        for (name, signal) in [
            ("Ax", ax),
            ("Ay", ay),
            ("R8x", r8x),
            ("R8y", r8y),
            ("msg", msg),
            ("sender_pubkey_hash", pubkey_hash),
        ] {
            constraints.add(
                format!("{name} < p"),
                Constraint::LessThan {
                    signal,
                    bound: p.clone(),
                },
            );
        }
        constraints.add(
            "S < l",
            Constraint::LessThan {
                signal: s,
                bound: baby_jubjub_order(),
            },
        );
        constraints.add(
            "sender_pubkey_hash == Poseidon(Ax, Ay)",
            Constraint::Poseidon {
                inputs: vec![ax, ay],
                output: pubkey_hash,
            },
        );
        constraints.add(
            "S*G == R8 + 8*hm*A",
            Constraint::EddsaVerify {
                ax,
                ay,
                r8x,
                r8y,
                s,
                msg,
            },
        );

        Self {
            inputs,
            bindings,
            layout: Arc::new(layout),
            constraints,
        }
    }
}

impl Circuit for EddsaPoseidonCircuit {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    fn constraints(&self) -> &ConstraintSystem {
        &self.constraints
    }

    fn evaluate(&self, inputs: &InputAssignment) -> Result<Witness, CircuitError> {
        let mut witness = Witness::new(Arc::clone(&self.layout));
        witness.bind_inputs(&self.bindings, inputs)?;
        debug!(circuit = Self::NAME, signals = witness.len(), "evaluated witness");
        Ok(witness)
    }

    fn check_constraints(&self, witness: &Witness) -> Result<(), CircuitError> {
        witness.ensure_layout(&self.layout, Self::NAME)?;
        self.constraints.check(Self::NAME, witness)
    }
}
