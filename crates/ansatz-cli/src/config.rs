//! Pulse-ansatz configuration files.
//!
//! Sources, highest precedence first:
//! 1. Command-line flags
//! 2. Environment variables (`ANSATZ_` prefix)
//! 3. The YAML configuration file
//! 4. Default values
//!
//! ```yaml
//! num_qubits: 3
//! backend: lab_backend.yaml   # omit for the pulse simulator
//! physical_qubits: [4, 5, 6]
//! frequency_shift_ranges:
//!   4: [-5.0e6, 5.0e6]
//! max_duration: 800
//! reps: 2
//! entanglement:
//!   type: pairs
//!   pairs: [[0, 1], [1, 2]]
//! add_rz: false
//! final_rx: true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ansatz_forms::{DEFAULT_MAX_DURATION, Entanglement};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything needed to build a [`CrAnsatz`](ansatz_forms::CrAnsatz).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrConfig {
    /// Number of program qubits.
    pub num_qubits: u32,

    /// Backend configuration file; the pulse simulator when absent.
    #[serde(default)]
    pub backend: Option<PathBuf>,

    /// Physical qubit of each program qubit; identity when absent.
    #[serde(default)]
    pub physical_qubits: Option<Vec<u32>>,

    /// Allowed `(min, max)` frequency shift per physical control qubit.
    #[serde(default)]
    pub frequency_shift_ranges: BTreeMap<u32, (f64, f64)>,

    /// Maximum cross-resonance flat-top duration in samples.
    #[serde(default = "default_max_duration")]
    pub max_duration: f64,

    /// Number of layers.
    #[serde(default = "default_reps")]
    pub reps: usize,

    /// Entangling pattern.
    #[serde(default)]
    pub entanglement: Entanglement,

    /// Add a virtual `rz` after every `rx`.
    #[serde(default)]
    pub add_rz: bool,

    /// Close with an `rx` layer.
    #[serde(default = "default_final_rx")]
    pub final_rx: bool,
}

fn default_max_duration() -> f64 {
    DEFAULT_MAX_DURATION
}

fn default_reps() -> usize {
    1
}

fn default_final_rx() -> bool {
    true
}

impl CrConfig {
    /// Defaults for `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            backend: None,
            physical_qubits: None,
            frequency_shift_ranges: BTreeMap::new(),
            max_duration: default_max_duration(),
            reps: default_reps(),
            entanglement: Entanglement::default(),
            add_rz: false,
            final_rx: default_final_rx(),
        }
    }

    /// Load a configuration from a YAML file.
    ///
    /// A relative `backend` path is resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        let mut config = Self::from_yaml(&contents)?;
        if let (Some(backend), Some(dir)) = (&config.backend, path.parent()) {
            if backend.is_relative() {
                config.backend = Some(dir.join(backend));
            }
        }
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: CrConfig = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `config_file`, or start from defaults for `num_qubits`,
    /// then apply environment overrides read through `lookup`.
    pub fn load(
        config_file: Option<&str>,
        num_qubits: Option<u32>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match (config_file, num_qubits) {
            (Some(path), _) => Self::from_file(path)?,
            (None, Some(n)) => Self::new(n),
            (None, None) => {
                return Err(ConfigError::ValidationError(
                    "either a configuration file or a qubit count is required".into(),
                ));
            }
        };
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    ///
    /// Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("ANSATZ_BACKEND") {
            self.backend = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("ANSATZ_MAX_DURATION") {
            if let Ok(val) = v.parse() {
                self.max_duration = val;
            }
        }
        if let Some(v) = lookup("ANSATZ_REPS") {
            if let Ok(val) = v.parse() {
                self.reps = val;
            }
        }
        if let Some(v) = lookup("ANSATZ_ADD_RZ") {
            if let Ok(val) = v.parse() {
                self.add_rz = val;
            }
        }
        if let Some(v) = lookup("ANSATZ_FINAL_RX") {
            if let Ok(val) = v.parse() {
                self.final_rx = val;
            }
        }
    }

    /// Check ranges and the qubit map.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_duration <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "max_duration must be positive, got {}",
                self.max_duration
            )));
        }
        if let Some(map) = &self.physical_qubits {
            if map.len() < self.num_qubits as usize {
                return Err(ConfigError::ValidationError(format!(
                    "physical_qubits maps {} qubits but num_qubits is {}",
                    map.len(),
                    self.num_qubits
                )));
            }
        }
        for (qubit, (lo, hi)) in &self.frequency_shift_ranges {
            if lo >= hi {
                return Err(ConfigError::ValidationError(format!(
                    "frequency shift range for qubit {qubit} is empty: [{lo}, {hi}]"
                )));
            }
        }
        if let Entanglement::Pairs(pairs) = &self.entanglement {
            if let Some(&(c, t)) = pairs
                .iter()
                .find(|&&(c, t)| c >= self.num_qubits || t >= self.num_qubits || c == t)
            {
                return Err(ConfigError::ValidationError(format!(
                    "invalid entangling pair ({c}, {t}) for {} qubits",
                    self.num_qubits
                )));
            }
        }
        Ok(())
    }

    /// The program-to-physical map, defaulting to the identity.
    pub fn physical_qubits(&self) -> Vec<u32> {
        self.physical_qubits
            .clone()
            .unwrap_or_else(|| (0..self.num_qubits).collect())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
