//! Static backend configuration.
//!
//! A [`BackendConfiguration`] describes what a pulse-capable device exposes
//! to the ansatz builder: its control-channel table and the default pulse
//! shapes of its single-qubit gates. It can be written by hand as YAML or
//! exported as JSON by a device provider.
//!
//! ```yaml
//! name: fake_manila
//! num_qubits: 2
//! control_channels:
//!   - qubits: [0, 1]
//!     channels: [0]
//! defaults:
//!   - qubit: 0
//!     duration: 160
//!     amp: 0.19
//!     sigma: 40
//!     beta: -0.7
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use ansatz_ir::{Channel, Schedule, Waveform};

use crate::error::{HalError, HalResult};

/// Control channels driving the interaction between a qubit pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlChannelEntry {
    /// Control and target physical qubit.
    pub qubits: (u32, u32),
    /// Control-channel indices, preferred first.
    pub channels: Vec<u32>,
}

/// Default DRAG pulse implementing `x` on one qubit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XPulseDefaults {
    /// Physical qubit.
    pub qubit: u32,
    /// Pulse length in samples.
    #[serde(default = "default_x_duration")]
    pub duration: u64,
    /// Calibrated π-pulse amplitude.
    #[serde(default = "default_x_amp")]
    pub amp: f64,
    /// Gaussian width in samples.
    #[serde(default = "default_x_sigma")]
    pub sigma: f64,
    /// DRAG coefficient.
    #[serde(default)]
    pub beta: f64,
}

impl XPulseDefaults {
    /// Typical transmon defaults for `qubit`.
    pub fn typical(qubit: u32) -> Self {
        Self {
            qubit,
            duration: default_x_duration(),
            amp: default_x_amp(),
            sigma: default_x_sigma(),
            beta: 0.0,
        }
    }

    /// The `x` schedule for this qubit.
    pub fn schedule(&self) -> Schedule {
        let mut sched = Schedule::named("x");
        sched.play(
            Waveform::Drag {
                duration: (self.duration as f64).into(),
                amp: self.amp.into(),
                sigma: self.sigma,
                beta: self.beta,
            },
            Channel::Drive(self.qubit),
        );
        sched
    }
}

/// Complete static description of a pulse backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfiguration {
    /// Backend name.
    pub name: String,
    /// Number of physical qubits.
    pub num_qubits: u32,
    /// Sample time in seconds.
    #[serde(default = "default_dt")]
    pub dt: f64,
    /// Control-channel table.
    #[serde(default)]
    pub control_channels: Vec<ControlChannelEntry>,
    /// Default `x` pulses per qubit.
    #[serde(default)]
    pub defaults: Vec<XPulseDefaults>,
}

fn default_x_duration() -> u64 {
    160
}

fn default_x_amp() -> f64 {
    0.2
}

fn default_x_sigma() -> f64 {
    40.0
}

fn default_dt() -> f64 {
    2.0e-9 / 9.0
}

impl BackendConfiguration {
    /// A configuration with typical `x` defaults on every qubit and no
    /// control-channel table.
    pub fn uniform(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            dt: default_dt(),
            control_channels: vec![],
            defaults: (0..num_qubits).map(XPulseDefaults::typical).collect(),
        }
    }

    /// Builder-style addition of a control-channel entry.
    #[must_use]
    pub fn with_control_channel(mut self, qubits: (u32, u32), channel: u32) -> Self {
        match self.control_channels.iter_mut().find(|e| e.qubits == qubits) {
            Some(entry) => entry.channels.push(channel),
            None => self.control_channels.push(ControlChannelEntry {
                qubits,
                channels: vec![channel],
            }),
        }
        self
    }

    /// Load a configuration from a YAML or JSON file (by extension).
    pub fn from_file<P: AsRef<Path>>(path: P) -> HalResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: BackendConfiguration = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&contents)?,
            _ => serde_yaml_ng::from_str(&contents)?,
        };
        config.validate()?;
        debug!(
            backend = %config.name,
            qubits = config.num_qubits,
            control_channels = config.control_channels.len(),
            "Loaded backend configuration"
        );
        Ok(config)
    }

    /// Parse a configuration from a YAML string.
    pub fn from_yaml(contents: &str) -> HalResult<Self> {
        let config: BackendConfiguration = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every qubit reference lies on the device.
    pub fn validate(&self) -> HalResult<()> {
        if self.name.is_empty() {
            return Err(HalError::Configuration("backend name is empty".into()));
        }
        let check = |qubit: u32| {
            if qubit >= self.num_qubits {
                Err(HalError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                })
            } else {
                Ok(())
            }
        };
        for entry in &self.control_channels {
            check(entry.qubits.0)?;
            check(entry.qubits.1)?;
            if entry.channels.is_empty() {
                return Err(HalError::Configuration(format!(
                    "control channel entry for {:?} lists no channels",
                    entry.qubits
                )));
            }
        }
        for d in &self.defaults {
            check(d.qubit)?;
            if d.sigma <= 0.0 {
                return Err(HalError::Configuration(format!(
                    "x pulse on qubit {} has non-positive sigma",
                    d.qubit
                )));
            }
        }
        Ok(())
    }

    /// First control channel listed for `qubits`.
    pub fn control_channel(&self, qubits: (u32, u32)) -> Option<Channel> {
        self.control_channels
            .iter()
            .find(|e| e.qubits == qubits)
            .and_then(|e| e.channels.first())
            .map(|&idx| Channel::Control(idx))
    }

    /// Default schedule of `gate` on `qubits`.
    pub fn instruction_schedule(&self, gate: &str, qubits: &[u32]) -> HalResult<Schedule> {
        let found = match (gate, qubits) {
            ("x", [q]) => self.defaults.iter().find(|d| d.qubit == *q),
            _ => None,
        };
        found
            .map(XPulseDefaults::schedule)
            .ok_or_else(|| HalError::ScheduleNotFound {
                backend: self.name.clone(),
                gate: gate.to_string(),
                qubits: qubits.to_vec(),
            })
    }
}
