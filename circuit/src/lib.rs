//! Conformance harness for signature verification circuits.
//!
//! Two circuits are provided as native gadget-level constraint systems:
//! - [`EcdsaVerifyCircuit`]: ECDSA over secp256k1, inputs split into limbs
//! - [`EddsaPoseidonCircuit`]: EdDSA-Poseidon over Baby Jubjub
//!
//! Both bind the sender's public key to a Poseidon commitment input,
//! `sender_pubkey_hash`.
//!
//! ## Running a suite
//!
//! ```rust,no_run
//! use circuit::{default_ecdsa_cases, Suite, SuiteConfig};
//!
//! let config = SuiteConfig::from_file("suite.json")?;
//! let suite = Suite::from_config(config)?;
//! let cases = default_ecdsa_cases(suite.config().limbs)?;
//! let report = suite.run(cases);
//! report.ensure_passed()?;
//! # Ok::<(), circuit::HarnessError>(())
//! ```
//!
//! Each case is built into an [`InputAssignment`], evaluated into a
//! [`Witness`] and checked against the circuit's [`ConstraintSystem`]. Cases
//! are independent and run on the rayon pool unless
//! [`SuiteConfig::parallel`] is off.
//!
//! ## Circuit descriptors
//!
//! [`load_circuit`] reads JSON descriptors such as
//!
//! ```json
//! { "template": "ecdsa_verify_no_pubkey_check", "limbs": { "stride": 64, "count": 4 } }
//! ```
//!
//! The descriptors shipped with the crate live under `circuits/`.

mod assignment;
mod cases;
mod config;
mod constraints;
mod ecdsa_circuit;
mod eddsa_circuit;
mod errors;
mod handle;
mod harness;
mod signature_inputs;
mod witness;


pub use assignment::{InputAssignment, InputSpec, InputValue, Shape};
pub use cases::{
    default_ecdsa_cases, default_ecdsa_keys, default_eddsa_cases, default_eddsa_key, ecdsa_cases,
    eddsa_cases, Expectation, TestCase, ECDSA_MESSAGE_HASH, ECDSA_PRIVATE_KEYS, EDDSA_MESSAGE,
    EDDSA_PRIVATE_KEY_HEX,
};
pub use config::SuiteConfig;
pub use constraints::{Constraint, ConstraintSystem};
pub use ecdsa_circuit::EcdsaVerifyCircuit;
pub use eddsa_circuit::EddsaPoseidonCircuit;
pub use errors::{CircuitError, HarnessError};
pub use handle::{load_circuit, Circuit, CircuitDescriptor, CircuitHandle};
pub use harness::{CaseReport, CaseState, Stage, Suite, SuiteReport};
pub use signature_inputs::{assignment_for, Tamper};
pub use witness::{InputBinding, SignalLayout, Witness, ONE_SIGNAL, WITNESS_SIGNALS};
