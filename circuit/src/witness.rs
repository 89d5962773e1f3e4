//! Signal layout and witness vectors.
//!
//! Signals are numbered the way circom numbers them: index 0 is the constant
//! one, followed by every input leaf in declaration order, followed by the
//! intermediate signals a circuit derives.

use std::collections::HashMap;
use std::sync::Arc;

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::assignment::{InputAssignment, InputSpec, Shape};
use crate::errors::CircuitError;

/// Name of the constant-one signal at index 0.
pub const ONE_SIGNAL: &str = "one";

/// Name reported when a whole witness, rather than one input, has the wrong
/// shape.
pub const WITNESS_SIGNALS: &str = "witness";

/// Ordered signal names of a circuit, fixed when the circuit is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalLayout {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Default for SignalLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalLayout {
    pub fn new() -> Self {
        let mut layout = Self {
            names: Vec::new(),
            index: HashMap::new(),
        };
        layout.alloc(ONE_SIGNAL);
        layout
    }

    /// Allocates one signal and returns its index.
    pub fn alloc(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        let idx = self.names.len();
        self.index.insert(name.clone(), idx);
        self.names.push(name);
        idx
    }

    /// Allocates every leaf of an input, named `name[i][j]...`.
    pub fn bind(&mut self, spec: InputSpec) -> InputBinding {
        let mut signals = Vec::with_capacity(spec.shape.size());
        self.alloc_leaves(&spec.name, &spec.shape, &mut signals);
        InputBinding { spec, signals }
    }

    fn alloc_leaves(&mut self, prefix: &str, shape: &Shape, out: &mut Vec<usize>) {
        match shape {
            Shape::Scalar => out.push(self.alloc(prefix)),
            Shape::Array { len, of } => {
                for i in 0..*len {
                    self.alloc_leaves(&format!("{prefix}[{i}]"), of, out);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, idx: usize) -> Option<&str> {
        self.names.get(idx).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }
}

/// An input together with the signal indices of its leaves.
#[derive(Clone, Debug)]
pub struct InputBinding {
    pub spec: InputSpec,
    pub signals: Vec<usize>,
}

/// Full signal assignment produced by evaluating a circuit.
#[derive(Clone, Debug)]
pub struct Witness {
    layout: Arc<SignalLayout>,
    values: Vec<BigUint>,
}

impl Witness {
    /// All-zero witness over `layout`, with the constant-one signal set.
    pub fn new(layout: Arc<SignalLayout>) -> Self {
        let mut values = vec![BigUint::zero(); layout.len()];
        values[0] = BigUint::one();
        Self { layout, values }
    }

    /// Copies input leaves into their signals, rejecting any assignment whose
    /// names or shapes differ from `bindings`.
    pub fn bind_inputs(
        &mut self,
        bindings: &[InputBinding],
        assignment: &InputAssignment,
    ) -> Result<(), CircuitError> {
        if let Some((name, value)) = assignment
            .iter()
            .find(|(name, _)| !bindings.iter().any(|b| b.spec.name == *name))
        {
            return Err(CircuitError::ShapeMismatch {
                signal: name.to_string(),
                expected: "no such input".to_string(),
                found: value.describe(),
            });
        }

        for binding in bindings {
            let value = assignment.get(&binding.spec.name).ok_or_else(|| {
                CircuitError::ShapeMismatch {
                    signal: binding.spec.name.clone(),
                    expected: binding.spec.shape.to_string(),
                    found: "missing".to_string(),
                }
            })?;
            if !value.conforms(&binding.spec.shape) {
                return Err(CircuitError::ShapeMismatch {
                    signal: binding.spec.name.clone(),
                    expected: binding.spec.shape.to_string(),
                    found: value.describe(),
                });
            }
            for (idx, leaf) in binding.signals.iter().zip(value.leaves()) {
                self.values[*idx] = leaf.clone();
            }
        }
        Ok(())
    }

    /// Fails unless the witness was laid out as `layout`.
    pub fn ensure_layout(&self, layout: &Arc<SignalLayout>, circuit: &str) -> Result<(), CircuitError> {
        if Arc::ptr_eq(&self.layout, layout) || self.layout.names == layout.names {
            return Ok(());
        }
        Err(CircuitError::ShapeMismatch {
            signal: WITNESS_SIGNALS.to_string(),
            expected: format!("{} signals of {circuit}", layout.len()),
            found: format!("{} signals", self.len()),
        })
    }

    pub fn layout(&self) -> &Arc<SignalLayout> {
        &self.layout
    }

    pub(crate) fn set(&mut self, idx: usize, value: BigUint) {
        self.values[idx] = value;
    }

    pub(crate) fn at(&self, idx: usize) -> &BigUint {
        &self.values[idx]
    }

    pub(crate) fn gather(&self, signals: &[usize]) -> Vec<BigUint> {
        signals.iter().map(|idx| self.values[*idx].clone()).collect()
    }

    /// Value of a signal by name, e.g. `"r[0]"` or `"sender_pubkey_hash"`.
    pub fn get(&self, name: &str) -> Option<&BigUint> {
        self.layout.index_of(name).map(|idx| &self.values[idx])
    }

    /// Replaces a signal's value and returns the previous one.
    ///
    /// Evaluation never needs this; it exists for fault injection when
    /// testing that constraint checks reject tampered witnesses.
    pub fn overwrite(&mut self, name: &str, value: BigUint) -> Option<BigUint> {
        let idx = self.layout.index_of(name)?;
        Some(std::mem::replace(&mut self.values[idx], value))
    }

    pub fn values(&self) -> &[BigUint] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
