//! Named circuit inputs and their shapes.

use std::collections::BTreeMap;
use std::fmt;

use codec::Limbs;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared shape of one circuit input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Scalar,
    Array { len: usize, of: Box<Shape> },
}

impl Shape {
    /// A flat array of `len` scalars, the shape of one limb encoding.
    pub fn array(len: usize) -> Self {
        Self::Array {
            len,
            of: Box::new(Self::Scalar),
        }
    }

    /// `rows` arrays of `cols` scalars each.
    pub fn matrix(rows: usize, cols: usize) -> Self {
        Self::Array {
            len: rows,
            of: Box::new(Self::array(cols)),
        }
    }

    /// Number of scalar leaves.
    pub fn size(&self) -> usize {
        match self {
            Self::Scalar => 1,
            Self::Array { len, of } => len * of.size(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.write_str("scalar"),
            Self::Array { len, of } => {
                write!(f, "[{len}]")?;
                match of.as_ref() {
                    Self::Scalar => Ok(()),
                    inner => write!(f, "{inner}"),
                }
            }
        }
    }
}

/// One declared circuit input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub name: String,
    pub shape: Shape,
}

impl InputSpec {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

/// Value assigned to a circuit input: a field integer or a nested array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputValue {
    Scalar(BigUint),
    Array(Vec<InputValue>),
}

impl InputValue {
    pub fn conforms(&self, shape: &Shape) -> bool {
        match (self, shape) {
            (Self::Scalar(_), Shape::Scalar) => true,
            (Self::Array(items), Shape::Array { len, of }) => {
                items.len() == *len && items.iter().all(|item| item.conforms(of))
            }
            _ => false,
        }
    }

    /// Human-readable shape, in the same notation as [`Shape`]'s `Display`.
    pub fn describe(&self) -> String {
        match self {
            Self::Scalar(_) => "scalar".to_string(),
            Self::Array(items) => match items.first() {
                Some(inner @ Self::Array(_)) => format!("[{}]{}", items.len(), inner.describe()),
                _ => format!("[{}]", items.len()),
            },
        }
    }

    /// Scalar leaves in row-major order.
    pub fn leaves(&self) -> Vec<&BigUint> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a BigUint>) {
        match self {
            Self::Scalar(x) => out.push(x),
            Self::Array(items) => items.iter().for_each(|item| item.collect_leaves(out)),
        }
    }

    /// Circom input notation: decimal strings inside nested arrays.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Scalar(x) => Value::String(x.to_str_radix(10)),
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl From<BigUint> for InputValue {
    fn from(x: BigUint) -> Self {
        Self::Scalar(x)
    }
}

impl From<Limbs> for InputValue {
    fn from(limbs: Limbs) -> Self {
        Self::Array(limbs.into_iter().map(Self::Scalar).collect())
    }
}

impl From<Vec<InputValue>> for InputValue {
    fn from(items: Vec<InputValue>) -> Self {
        Self::Array(items)
    }
}

/// Input map for one circuit evaluation, ordered by signal name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputAssignment {
    values: BTreeMap<String, InputValue>,
}

impl InputAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Option<InputValue> {
        self.values.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<InputValue> {
        self.values.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&InputValue> {
        self.values.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the assignment as a circom `input.json` object.
    pub fn to_circom_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(name, value)| (name.clone(), value.to_json()))
                .collect(),
        )
    }
}
