//! Error types for circuit loading, evaluation and suite runs.

use std::path::PathBuf;
use std::time::Duration;

use codec::{CodecError, LimbLayout};
use signer::SignerError;
use thiserror::Error;

/// Errors produced by a circuit or while building its inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CircuitError {
    /// The assignment does not match the circuit's declared inputs: a wrong
    /// array shape, a missing signal or an unknown signal.
    #[error("input `{signal}` has shape {found}, expected {expected}")]
    ShapeMismatch {
        signal: String,
        expected: String,
        found: String,
    },

    /// The witness violates a constraint, or no witness exists for the inputs.
    #[error("circuit `{circuit}` is unsatisfied: {constraint}")]
    ConstraintUnsatisfiable { circuit: String, constraint: String },

    #[error("failed to load circuit from {}: {reason}", .path.display())]
    Load { path: PathBuf, reason: String },

    /// The descriptor names a template with unusable parameters.
    #[error("invalid circuit descriptor: {0}")]
    Descriptor(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Signer(#[from] SignerError),
}

/// Errors surfaced to the test runner by a suite.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("failed to read suite config {}: {reason}", .path.display())]
    Config { path: PathBuf, reason: String },

    #[error(transparent)]
    Circuit(#[from] CircuitError),

    #[error(transparent)]
    Signer(#[from] SignerError),

    /// The circuit's limb layout differs from the one inputs are encoded
    /// with. Public key commitments depend on the layout, so values are not
    /// re-based.
    #[error("circuit reads {circuit:?} limbs but the suite encodes {config:?}")]
    LayoutMismatch {
        circuit: LimbLayout,
        config: LimbLayout,
    },

    #[error("suite exceeded its deadline of {0:?}")]
    SuiteTimeout(Duration),

    #[error("{failed} of {total} cases failed; first: {first}")]
    CasesFailed {
        failed: usize,
        total: usize,
        first: String,
    },
}
