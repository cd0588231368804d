//! Error types for ansatz construction.

use ansatz_hal::HalError;
use ansatz_ir::IrError;
use thiserror::Error;

/// Errors raised while building an ansatz or attaching its schedules.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnsatzError {
    /// The ansatz pairs qubits and needs an even count.
    #[error("The number of qubits must be even, got {0}")]
    OddQubitCount(u32),

    /// A symbolic gate parameter is not among the circuit's parameters.
    #[error("Parameter '{name}' not found in circuit parameters [{}]", available.join(", "))]
    ParameterNotFound {
        /// Parameter name.
        name: String,
        /// Names of the circuit's parameters.
        available: Vec<String>,
    },

    /// A gate parameter is neither a number nor a single parameter.
    #[error("Gate '{gate}' has a compound parameter expression '{expr}'")]
    UnsupportedExpression {
        /// Gate name.
        gate: String,
        /// Offending expression.
        expr: String,
    },

    /// A pulse gate carries the wrong number of parameters.
    #[error("Gate '{gate}' expects {expected} parameters, got {got}")]
    ParameterArity {
        /// Gate name.
        gate: String,
        /// Expected count.
        expected: usize,
        /// Actual count.
        got: usize,
    },

    /// A pulse gate is applied to the wrong number of qubits.
    #[error("Gate '{gate}' acts on {expected} qubits, got {got}")]
    QubitArity {
        /// Gate name.
        gate: String,
        /// Expected count.
        expected: usize,
        /// Actual count.
        got: usize,
    },

    /// The backend's default schedule does not start with a usable pulse.
    #[error("Default '{gate}' schedule on qubits {qubits:?} has no DRAG or Gaussian pulse")]
    InvalidDefaultSchedule {
        /// Gate name.
        gate: String,
        /// Physical qubits.
        qubits: Vec<u32>,
    },

    /// A program qubit has no entry in the physical-qubit map.
    #[error("Program qubit {0} is not mapped to a physical qubit")]
    UnmappedQubit(u32),

    /// A `ccr` gate's control qubit has no configured frequency range.
    #[error("No frequency shift range configured for physical qubit {0}")]
    MissingFrequencyRange(u32),

    /// Circuit IR error.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),

    /// Backend error.
    #[error("Backend error: {0}")]
    Hal(#[from] HalError),
}

/// Result type for ansatz construction.
pub type AnsatzResult<T> = Result<T, AnsatzError>;
