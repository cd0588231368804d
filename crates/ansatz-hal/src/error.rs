//! Error types for the HAL crate.

use thiserror::Error;

/// Errors that can occur in HAL operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The backend has no default schedule for a gate on these qubits.
    #[error("Backend '{backend}' has no '{gate}' schedule for qubits {qubits:?}")]
    ScheduleNotFound {
        /// Backend name.
        backend: String,
        /// Gate name.
        gate: String,
        /// Physical qubits.
        qubits: Vec<u32>,
    },

    /// Physical qubit outside the device.
    #[error("Qubit {qubit} out of range for backend with {num_qubits} qubits")]
    QubitOutOfRange {
        /// Offending qubit.
        qubit: u32,
        /// Device size.
        num_qubits: u32,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Reading a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
