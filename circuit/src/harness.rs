//! Conformance suite runner.
//!
//! A case moves through three stages:
//!
//! ```text
//! Built --evaluate--> Evaluated --check_constraints--> Checked
//!   \                    \
//!    +--> Failed          +--> Failed
//! ```
//!
//! A failed case stops at the stage it failed to reach and is never resumed.

use std::fmt;
use std::time::{Duration, Instant};

use num_bigint::BigUint;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use serde_json::Value;
use signer::{PointXY, Scheme};
use tracing::{error, info, warn};

use crate::cases::{Expectation, TestCase};
use crate::config::SuiteConfig;
use crate::errors::{CircuitError, HarnessError};
use crate::handle::{load_circuit, CircuitHandle};
use crate::signature_inputs::assignment_for;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Built,
    Evaluated,
    Checked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseState {
    Built,
    Evaluated,
    Checked,
    /// The case could not reach `stage`.
    Failed { stage: Stage, error: CircuitError },
    /// The suite deadline passed before the case started.
    TimedOut,
}

impl CaseState {
    pub fn error(&self) -> Option<&CircuitError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for CaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Built => f.write_str("built"),
            Self::Evaluated => f.write_str("evaluated"),
            Self::Checked => f.write_str("checked"),
            Self::Failed { stage, error } => write!(f, "failed before {stage:?}: {error}"),
            Self::TimedOut => f.write_str("timed out"),
        }
    }
}

fn as_display<T: fmt::Display, S: Serializer>(value: &T, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(value)
}

fn as_decimal_point<S: Serializer>(point: &PointXY, s: S) -> Result<S::Ok, S::Error> {
    [point.x.to_string(), point.y.to_string()].serialize(s)
}

/// Outcome of one case, with enough context to reproduce it.
#[derive(Clone, Debug, Serialize)]
pub struct CaseReport {
    pub label: String,
    #[serde(serialize_with = "as_display")]
    pub scheme: Scheme,
    #[serde(skip)]
    pub expectation: Expectation,
    /// Hex-encoded private key.
    pub private_key: String,
    #[serde(serialize_with = "as_display")]
    pub message: BigUint,
    #[serde(serialize_with = "as_decimal_point")]
    pub public_key: PointXY,
    /// Circom-style input JSON; `null` when no assignment was built.
    pub inputs: Value,
    #[serde(serialize_with = "as_display")]
    pub state: CaseState,
    /// The case finished after the suite deadline.
    pub overran: bool,
}

impl CaseReport {
    fn new(case: &TestCase, state: CaseState) -> Self {
        Self {
            label: case.label.clone(),
            scheme: case.record.scheme(),
            expectation: case.expectation,
            private_key: hex::encode(case.record.private_key()),
            message: case.record.message().clone(),
            public_key: case.record.public_key().clone(),
            inputs: Value::Null,
            state,
            overran: false,
        }
    }

    /// Whether the outcome matches the case's expectation.
    ///
    /// A rejecting case passes only through a violated constraint; shape
    /// errors and timeouts never count as rejection.
    pub fn passed(&self) -> bool {
        match (self.expectation, &self.state) {
            (Expectation::Accept, CaseState::Checked) => true,
            (
                Expectation::Reject,
                CaseState::Failed {
                    error: CircuitError::ConstraintUnsatisfiable { .. },
                    ..
                },
            ) => true,
            _ => false,
        }
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}{}; private key 0x{}, message {}, public key ({}, {}), inputs {}",
            self.label,
            self.scheme,
            self.state,
            if self.overran { " past the deadline" } else { "" },
            self.private_key,
            self.message,
            self.public_key.x,
            self.public_key.y,
            self.inputs
        )
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SuiteReport {
    pub circuit: String,
    pub cases: Vec<CaseReport>,
    pub timed_out: bool,
    pub deadline: Duration,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|c| !c.passed())
    }

    pub fn ensure_passed(&self) -> Result<(), HarnessError> {
        if self.timed_out {
            return Err(HarnessError::SuiteTimeout(self.deadline));
        }
        let failed: Vec<&CaseReport> = self.failures().collect();
        match failed.first() {
            None => Ok(()),
            Some(first) => Err(HarnessError::CasesFailed {
                failed: failed.len(),
                total: self.cases.len(),
                first: first.to_string(),
            }),
        }
    }
}

/// A loaded circuit and the settings to run cases against it.
#[derive(Clone, Debug)]
pub struct Suite {
    handle: CircuitHandle,
    config: SuiteConfig,
}

impl Suite {
    /// Fails when the circuit reads limbs in a layout other than the one
    /// `config` encodes with.
    pub fn new(handle: CircuitHandle, config: SuiteConfig) -> Result<Self, HarnessError> {
        if let Some(limbs) = handle.limbs() {
            if limbs != config.limbs {
                return Err(HarnessError::LayoutMismatch {
                    circuit: limbs,
                    config: config.limbs,
                });
            }
        }
        Ok(Self { handle, config })
    }

    /// Loads the circuit named by `config`.
    pub fn from_config(config: SuiteConfig) -> Result<Self, HarnessError> {
        let handle = load_circuit(&config.circuit)?;
        Self::new(handle, config)
    }

    pub fn handle(&self) -> &CircuitHandle {
        &self.handle
    }

    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Runs every case and collects one report per case, in input order.
    ///
    /// Cases that start after the deadline are not run. Cases that finish
    /// after it are kept but flagged, and either marks the suite timed out.
    #[tracing::instrument(skip_all, name = "Suite::run")]
    pub fn run(&self, cases: Vec<TestCase>) -> SuiteReport {
        let deadline = self.config.deadline();
        let expires = Instant::now().checked_add(deadline);
        let start = Instant::now();
        let total = cases.len();

        let past_deadline = || expires.is_some_and(|at| Instant::now() >= at);
        let run = |case: TestCase| {
            if past_deadline() {
                return CaseReport::new(&case, CaseState::TimedOut);
            }
            let mut report = self.run_case(&case);
            if past_deadline() {
                warn!(case = %report.label, ?deadline, "case finished past the suite deadline");
                report.overran = true;
            }
            report
        };
        let reports: Vec<CaseReport> = if self.config.parallel {
            cases.into_par_iter().map(run).collect()
        } else {
            cases.into_iter().map(run).collect()
        };

        let timed_out = start.elapsed() > deadline
            || reports
                .iter()
                .any(|r| r.overran || r.state == CaseState::TimedOut);
        let report = SuiteReport {
            circuit: self.handle.name().to_string(),
            timed_out,
            cases: reports,
            deadline,
        };
        info!(
            circuit = %report.circuit,
            passed = report.passed(),
            total,
            timed_out = report.timed_out,
            elapsed = ?start.elapsed(),
            "suite finished"
        );
        report
    }

    fn run_case(&self, case: &TestCase) -> CaseReport {
        let mut report = CaseReport::new(case, CaseState::Built);
        report.state = match assignment_for(&case.record, self.config.limbs, case.tamper) {
            Err(error) => CaseState::Failed {
                stage: Stage::Built,
                error,
            },
            Ok(inputs) => {
                report.inputs = inputs.to_circom_json();
                match self.handle.evaluate(&inputs) {
                    Err(error) => CaseState::Failed {
                        stage: Stage::Evaluated,
                        error,
                    },
                    Ok(witness) => match self.handle.check_constraints(&witness) {
                        Ok(()) => CaseState::Checked,
                        Err(error) => CaseState::Failed {
                            stage: Stage::Checked,
                            error,
                        },
                    },
                }
            }
        };

        if !report.passed() {
            error!(case = %report, "case did not meet its expectation");
        }
        report
    }
}
