//! Pulse backend abstraction.
//!
//! Ansatz builders attach calibrations for physical qubits, so they need a
//! handful of facts about the target device:
//!
//! - [`PulseBackend`]: the trait builders program against
//! - [`BackendConfiguration`]: a serde-loadable device description
//!   (control-channel table, default `x` pulses)
//! - [`ConfiguredBackend`] and [`SimulatorBackend`]: ready-made backends
//!
//! # Example
//!
//! ```rust
//! use ansatz_hal::{PulseBackend, SimulatorBackend};
//!
//! let sim = SimulatorBackend::new(2);
//! assert!(sim.control_channel((0, 1)).is_none());
//! assert!(sim.instruction_schedule("x", &[1]).is_ok());
//! ```

pub mod backend;
pub mod configuration;
pub mod error;

pub use backend::{ConfiguredBackend, PulseBackend, SimulatorBackend};
pub use configuration::{BackendConfiguration, ControlChannelEntry, XPulseDefaults};
pub use error::{HalError, HalResult};
