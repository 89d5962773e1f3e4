//! The circuit interface, shared handles and descriptor loading.

use std::fmt;
use std::fs;
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;

use codec::LimbLayout;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assignment::{InputAssignment, InputSpec};
use crate::constraints::ConstraintSystem;
use crate::ecdsa_circuit::EcdsaVerifyCircuit;
use crate::eddsa_circuit::EddsaPoseidonCircuit;
use crate::errors::CircuitError;
use crate::witness::Witness;

/// A compiled circuit: named inputs, a witness generator and a constraint
/// system.
///
/// Implementations are immutable once built, so one instance can serve many
/// concurrent evaluations.
pub trait Circuit: Send + Sync {
    fn name(&self) -> &str;

    /// Declared inputs, in signal order.
    fn inputs(&self) -> &[InputSpec];

    fn constraints(&self) -> &ConstraintSystem;

    /// Limb layout of limb-encoded inputs, if the circuit has any.
    fn limbs(&self) -> Option<LimbLayout> {
        None
    }

    /// Computes the full witness for `inputs`.
    ///
    /// Fails with [`CircuitError::ShapeMismatch`] when the assignment does not
    /// match [`Circuit::inputs`], and with
    /// [`CircuitError::ConstraintUnsatisfiable`] when no witness exists.
    fn evaluate(&self, inputs: &InputAssignment) -> Result<Witness, CircuitError>;

    /// Fails on the first constraint `witness` violates.
    fn check_constraints(&self, witness: &Witness) -> Result<(), CircuitError>;
}

/// Shared, read-only reference to a loaded circuit.
#[derive(Clone)]
pub struct CircuitHandle(Arc<dyn Circuit>);

impl CircuitHandle {
    pub fn new(circuit: impl Circuit + 'static) -> Self {
        Self(Arc::new(circuit))
    }
}

impl Deref for CircuitHandle {
    type Target = dyn Circuit;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for CircuitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitHandle")
            .field("name", &self.0.name())
            .field("inputs", &self.0.inputs().len())
            .field("constraints", &self.0.constraints().len())
            .finish()
    }
}

/// On-disk description of a circuit: a template name and its parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum CircuitDescriptor {
    EcdsaVerifyNoPubkeyCheck {
        #[serde(default)]
        limbs: LimbLayout,
    },
    EddsaPoseidonVerifier,
}

impl CircuitDescriptor {
    pub fn instantiate(&self) -> Result<CircuitHandle, CircuitError> {
        Ok(match self {
            Self::EcdsaVerifyNoPubkeyCheck { limbs } => {
                CircuitHandle::new(EcdsaVerifyCircuit::new(*limbs)?)
            }
            Self::EddsaPoseidonVerifier => CircuitHandle::new(EddsaPoseidonCircuit::new()),
        })
    }
}

/// Reads a JSON [`CircuitDescriptor`] from `path` and builds the circuit.
#[tracing::instrument(skip_all, name = "load_circuit")]
pub fn load_circuit(path: impl AsRef<Path>) -> Result<CircuitHandle, CircuitError> {
    let path = path.as_ref();
    let load_error = |reason: String| CircuitError::Load {
        path: path.to_path_buf(),
        reason,
    };

    let text = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let descriptor: CircuitDescriptor =
        serde_json::from_str(&text).map_err(|e| load_error(e.to_string()))?;
    let handle = descriptor.instantiate()?;

    info!(
        path = %path.display(),
        circuit = handle.name(),
        constraints = handle.constraints().len(),
        "loaded circuit"
    );
    Ok(handle)
}
