//! Backend trait and implementations.
//!
//! The [`PulseBackend`] trait is the narrow view of a device the ansatz
//! builder needs: where two-qubit drive tones go, and what the calibrated
//! single-qubit pulses look like.
//!
//! ## Control-channel discovery
//!
//! A backend can report control channels in two ways:
//!
//! 1. by overriding [`PulseBackend::control_channel`] directly, or
//! 2. by exposing a [`BackendConfiguration`] whose control-channel table the
//!    provided implementation consults.
//!
//! When neither yields a channel (simulators), callers synthesize their own.

use std::fmt;

use ansatz_ir::{Channel, Schedule};

use crate::configuration::BackendConfiguration;
use crate::error::HalResult;

/// A device (or simulator) that pulse schedules are built for.
pub trait PulseBackend: Send + Sync {
    /// Backend name.
    fn name(&self) -> &str;

    /// Number of physical qubits.
    fn num_qubits(&self) -> u32;

    /// Static configuration, if the backend publishes one.
    fn configuration(&self) -> Option<&BackendConfiguration> {
        None
    }

    /// Control channel for the ordered qubit pair (control, target).
    fn control_channel(&self, qubits: (u32, u32)) -> Option<Channel> {
        self.configuration()
            .and_then(|config| config.control_channel(qubits))
    }

    /// Default schedule implementing `gate` on physical `qubits`.
    fn instruction_schedule(&self, gate: &str, qubits: &[u32]) -> HalResult<Schedule>;
}

/// A backend fully described by a [`BackendConfiguration`].
#[derive(Clone)]
pub struct ConfiguredBackend {
    config: BackendConfiguration,
}

impl ConfiguredBackend {
    /// Wrap a validated configuration.
    pub fn new(config: BackendConfiguration) -> HalResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl fmt::Debug for ConfiguredBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfiguredBackend")
            .field("name", &self.config.name)
            .field("num_qubits", &self.config.num_qubits)
            .field("control_channels", &self.config.control_channels.len())
            .finish()
    }
}

impl PulseBackend for ConfiguredBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn num_qubits(&self) -> u32 {
        self.config.num_qubits
    }

    fn configuration(&self) -> Option<&BackendConfiguration> {
        Some(&self.config)
    }

    fn instruction_schedule(&self, gate: &str, qubits: &[u32]) -> HalResult<Schedule> {
        self.config.instruction_schedule(gate, qubits)
    }
}

/// Pulse simulator: typical single-qubit defaults, no control channels.
#[derive(Debug, Clone)]
pub struct SimulatorBackend {
    defaults: BackendConfiguration,
}

impl SimulatorBackend {
    /// Create a simulator with `num_qubits` qubits.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            defaults: BackendConfiguration::uniform("pulse_simulator", num_qubits),
        }
    }
}

impl PulseBackend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.defaults.name
    }

    fn num_qubits(&self) -> u32 {
        self.defaults.num_qubits
    }

    fn instruction_schedule(&self, gate: &str, qubits: &[u32]) -> HalResult<Schedule> {
        self.defaults.instruction_schedule(gate, qubits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HalError;

    /// A backend that reports channels itself instead of via configuration.
    struct DirectBackend;

    impl PulseBackend for DirectBackend {
        fn name(&self) -> &str {
            "direct"
        }

        fn num_qubits(&self) -> u32 {
            2
        }

        fn control_channel(&self, qubits: (u32, u32)) -> Option<Channel> {
            Some(Channel::Control(10 + qubits.0))
        }

        fn instruction_schedule(&self, _gate: &str, _qubits: &[u32]) -> HalResult<Schedule> {
            Ok(Schedule::new())
        }
    }

    #[test]
    fn test_configured_backend_uses_table() {
        let config = BackendConfiguration::uniform("dev", 3).with_control_channel((1, 2), 7);
        let backend = ConfiguredBackend::new(config).unwrap();
        assert_eq!(backend.control_channel((1, 2)), Some(Channel::Control(7)));
        assert_eq!(backend.control_channel((0, 1)), None);
        assert!(backend.instruction_schedule("x", &[2]).is_ok());
    }

    #[test]
    fn test_direct_override() {
        assert_eq!(DirectBackend.control_channel((1, 0)), Some(Channel::Control(11)));
        assert!(DirectBackend.configuration().is_none());
    }

    #[test]
    fn test_simulator_has_no_control_channels() {
        let sim = SimulatorBackend::new(4);
        assert_eq!(sim.num_qubits(), 4);
        assert_eq!(sim.control_channel((0, 1)), None);
        assert!(sim.instruction_schedule("x", &[3]).is_ok());
        assert!(matches!(
            sim.instruction_schedule("x", &[4]),
            Err(HalError::ScheduleNotFound { .. })
        ));
    }

    #[test]
    fn test_configured_backend_rejects_invalid() {
        let config = BackendConfiguration::uniform("", 1);
        assert!(matches!(
            ConfiguredBackend::new(config),
            Err(HalError::Configuration(_))
        ));
    }
}
