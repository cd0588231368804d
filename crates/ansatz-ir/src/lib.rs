//! Circuit intermediate representation for variational ansätze.
//!
//! This crate provides the data structures every ansatz builder in the
//! workspace produces and consumes.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses program qubits
//! - **Parameters**: [`Parameter`] (named placeholder with identity) and
//!   [`ParameterExpression`] for symbolic angles, amplitudes and durations
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   pulse-level primitives (`cr`, `ccr`) and composite blocks
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] builder API
//! - **Pulses**: [`Schedule`], [`Waveform`] and [`Channel`], attached to
//!   circuits through a [`CalibrationTable`]
//!
//! # Example: Parameterized Circuit
//!
//! ```rust
//! use ansatz_ir::{Circuit, Parameter, ParameterExpression, QubitId};
//!
//! let theta = Parameter::new("theta");
//! let mut circuit = Circuit::new("variational", 2);
//! circuit.rx(&theta, QubitId(0)).unwrap();
//! circuit
//!     .rzz(-ParameterExpression::from(&theta) / 2.0, QubitId(0), QubitId(1))
//!     .unwrap();
//!
//! assert_eq!(circuit.num_parameters(), 1);
//! let bound = circuit.assign_parameters(&[0.25]).unwrap();
//! assert_eq!(bound.num_parameters(), 0);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `X` | 1 | Pauli-X |
//! | `H` | 1 | Hadamard gate |
//! | `Rx`, `Rz` | 1 | Rotation gates |
//! | `CX` | 2 | Controlled-X |
//! | `CRx` | 2 | Controlled X rotation |
//! | `RXX`, `RYY`, `RZZ` | 2 | Two-qubit Pauli rotations |

pub mod calibration;
pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod pulse;
pub mod qubit;

pub use calibration::{Calibration, CalibrationTable};
pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{CustomGate, Gate, StandardGate};
pub use instruction::Instruction;
pub use parameter::{Parameter, ParameterExpression};
pub use pulse::{Channel, PulseInstruction, Schedule, Waveform};
pub use qubit::QubitId;
