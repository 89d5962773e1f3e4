//! Suite configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use codec::LimbLayout;
use serde::{Deserialize, Serialize};

use crate::errors::HarnessError;

/// Settings for one suite run, loaded from JSON.
///
/// Missing fields take their defaults:
///
/// ```json
/// {
///   "circuit": "circuits/ecdsa_64_4.json",
///   "limbs": { "stride": 64, "count": 4 },
///   "deadline_secs": 1000,
///   "parallel": true
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Circuit descriptor, relative to the config file when loaded from one.
    pub circuit: PathBuf,
    /// Limb layout used to encode ECDSA inputs.
    pub limbs: LimbLayout,
    /// Coarse deadline for the whole suite.
    pub deadline_secs: u64,
    pub parallel: bool,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            circuit: PathBuf::from("circuits/ecdsa_64_4.json"),
            limbs: LimbLayout::U64X4,
            deadline_secs: 1000,
            parallel: true,
        }
    }
}

impl SuiteConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let path = path.as_ref();
        let config_error = |reason: String| HarnessError::Config {
            path: path.to_path_buf(),
            reason,
        };

        let text = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let mut config = Self::from_json(&text).map_err(|e| config_error(e.to_string()))?;
        if config.circuit.is_relative() {
            if let Some(dir) = path.parent() {
                config.circuit = dir.join(&config.circuit);
            }
        }
        Ok(config)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_secs)
    }
}
