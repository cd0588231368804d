//! Parametrized ansätze for variational and pulse-level workflows.
//!
//! # Gate-level forms
//!
//! - [`Rvb`]: resonating-valence-bond circuit built from `eSWAP` blocks
//! - [`Hva`]: Hamiltonian-variational circuit of `RZZ·RYY·RXX` bonds
//!
//! # Pulse-level forms
//!
//! [`AnsatzBuilder`] appends `rx`, `cr` and `ccr` gates and attaches their
//! pulse calibrations for a [`PulseBackend`](ansatz_hal::PulseBackend).
//! [`CrAnsatz`] stacks layers of those gates through the [`PulseAnsatz`]
//! trait. The builder's [`WrapperConfig`] tells an optimizer how to map raw
//! values onto bounded pulse parameters.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ansatz_forms::{AnsatzBuilder, CrAnsatz, PulseAnsatz, Rvb};
//! use ansatz_hal::SimulatorBackend;
//!
//! let rvb = Rvb::new(4).circuit().unwrap();
//! assert_eq!(rvb.num_parameters(), 8);
//!
//! let builder = AnsatzBuilder::new(Arc::new(SimulatorBackend::new(2)), vec![0, 1]);
//! let mut ansatz = CrAnsatz::new(2, builder);
//! let circuit = ansatz.scheduled_circuit().unwrap();
//! assert_eq!(ansatz.wrapper_config().len(), circuit.num_parameters());
//! ```

pub mod builder;
pub mod error;
pub mod hva;
pub mod pulse_ansatz;
pub mod rvb;
pub mod wrapper;

pub use builder::{AnsatzBuilder, DEFAULT_MAX_DURATION};
pub use error::{AnsatzError, AnsatzResult};
pub use hva::Hva;
pub use pulse_ansatz::{CrAnsatz, Entanglement, PulseAnsatz};
pub use rvb::{ESWAP, Rvb};
pub use wrapper::{WrapperConfig, WrapperEntry, WrapperKind};
