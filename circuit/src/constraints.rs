//! Gadget-level constraint systems checked against a witness.
//!
//! Each constraint relates witness signals through one relation: a bit range,
//! an upper bound, a limb recomposition, a Poseidon evaluation, or a
//! signature verification equation. A witness satisfies the system when
//! every relation holds.

use codec::{from_limbs, to_bytes32};
use num_bigint::BigUint;
use signer::{
    BabyJubJub, CircomPoseidon, EcdsaBackend, EddsaBackend, EddsaSignature, FieldHasher, PointXY,
    Secp256k1,
};
use tracing::warn;

use crate::errors::CircuitError;
use crate::witness::{Witness, WITNESS_SIGNALS};

/// A relation over witness signals, addressed by index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// `signal < 2^bits`.
    Range { signal: usize, bits: u32 },
    /// `signal < bound`.
    LessThan { signal: usize, bound: BigUint },
    /// `value == sum(limbs[i] * 2^(stride*i))`, with every limb below `2^stride`.
    Recompose {
        limbs: Vec<usize>,
        stride: u32,
        value: usize,
    },
    /// `output == Poseidon(inputs)`.
    Poseidon { inputs: Vec<usize>, output: usize },
    /// ECDSA over secp256k1: `(r, s)` signs `msghash` under `(qx, qy)`.
    EcdsaVerify {
        r: usize,
        s: usize,
        msghash: usize,
        qx: usize,
        qy: usize,
    },
    /// EdDSA-Poseidon over Baby Jubjub: `(R8, S)` signs `msg` under `A`.
    EddsaVerify {
        ax: usize,
        ay: usize,
        r8x: usize,
        r8y: usize,
        s: usize,
        msg: usize,
    },
}

impl Constraint {
    /// Highest signal index the relation reads.
    fn max_signal(&self) -> usize {
        match self {
            Self::Range { signal, .. } | Self::LessThan { signal, .. } => *signal,
            Self::Recompose { limbs, value, .. } => limbs.iter().fold(*value, |m, l| m.max(*l)),
            Self::Poseidon { inputs, output } => inputs.iter().fold(*output, |m, i| m.max(*i)),
            Self::EcdsaVerify {
                r,
                s,
                msghash,
                qx,
                qy,
            } => [*r, *s, *msghash, *qx, *qy].into_iter().fold(0, usize::max),
            Self::EddsaVerify {
                ax,
                ay,
                r8x,
                r8y,
                s,
                msg,
            } => [*ax, *ay, *r8x, *r8y, *s, *msg].into_iter().fold(0, usize::max),
        }
    }

    fn holds(&self, w: &Witness) -> bool {
        match self {
            Self::Range { signal, bits } => w.at(*signal).bits() <= u64::from(*bits),
            Self::LessThan { signal, bound } => w.at(*signal) < bound,
            Self::Recompose {
                limbs,
                stride,
                value,
            } => from_limbs(&w.gather(limbs), *stride).is_ok_and(|v| &v == w.at(*value)),
            Self::Poseidon { inputs, output } => CircomPoseidon
                .hash(&w.gather(inputs))
                .is_ok_and(|digest| &digest == w.at(*output)),
            Self::EcdsaVerify {
                r,
                s,
                msghash,
                qx,
                qy,
            } => ecdsa_holds(w, *r, *s, *msghash, *qx, *qy),
            Self::EddsaVerify {
                ax,
                ay,
                r8x,
                r8y,
                s,
                msg,
            } => {
                let signature = EddsaSignature {
                    r8: PointXY::new(w.at(*r8x).clone(), w.at(*r8y).clone()),
                    s: w.at(*s).clone(),
                };
                let public_key = PointXY::new(w.at(*ax).clone(), w.at(*ay).clone());
                matches!(
                    BabyJubJub::new().verify_poseidon(w.at(*msg), &signature, &public_key),
                    Ok(true)
                )
            }
        }
    }
}

fn ecdsa_holds(w: &Witness, r: usize, s: usize, msghash: usize, qx: usize, qy: usize) -> bool {
    let (Ok(r), Ok(s), Ok(msghash)) = (
        to_bytes32(w.at(r)),
        to_bytes32(w.at(s)),
        to_bytes32(w.at(msghash)),
    ) else {
        return false;
    };

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&r);
    compact[32..].copy_from_slice(&s);
    let public_key = PointXY::new(w.at(qx).clone(), w.at(qy).clone());

    matches!(
        Secp256k1.verify_compact(&msghash, &compact, &public_key),
        Ok(true)
    )
}

/// Labelled constraints of one circuit.
#[derive(Clone, Debug, Default)]
pub struct ConstraintSystem {
    constraints: Vec<(String, Constraint)>,
    /// Smallest witness length every constraint can index into.
    min_signals: usize,
}

impl ConstraintSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: impl Into<String>, constraint: Constraint) {
        self.min_signals = self.min_signals.max(constraint.max_signal() + 1);
        self.constraints.push((label.into(), constraint));
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Constraint)> {
        self.constraints.iter().map(|(label, c)| (label.as_str(), c))
    }

    /// Fails on the first constraint the witness violates.
    ///
    /// A witness too short for the referenced signals is a shape mismatch.
    pub fn check(&self, circuit: &str, witness: &Witness) -> Result<(), CircuitError> {
        if witness.len() < self.min_signals {
            return Err(CircuitError::ShapeMismatch {
                signal: WITNESS_SIGNALS.to_string(),
                expected: format!("at least {} signals", self.min_signals),
                found: format!("{} signals", witness.len()),
            });
        }
        match self.constraints.iter().find(|(_, c)| !c.holds(witness)) {
            None => Ok(()),
            Some((label, _)) => {
                warn!(circuit, constraint = %label, "constraint violated");
                Err(CircuitError::ConstraintUnsatisfiable {
                    circuit: circuit.to_string(),
                    constraint: label.clone(),
                })
            }
        }
    }
}
