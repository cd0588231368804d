//! Lattice spin models.
//!
//! - [`Lattice`]: undirected lattice with complex couplings and on-site
//!   self-loops, backed by a `petgraph` graph
//! - [`SpinOp`]: sums of products of spin components
//! - [`HeisenbergModel`]: the XXX Hamiltonian on a lattice
//!
//! # Example
//!
//! ```rust
//! use ansatz_models::{Boundary, HeisenbergModel, Lattice, LatticeModel};
//! use num_complex::Complex64;
//!
//! let one = Complex64::new(1.0, 0.0);
//! let chain = Lattice::line(4, one, Complex64::new(0.0, 0.0), Boundary::Periodic);
//! let op = HeisenbergModel::new(chain).second_q_ops();
//! assert_eq!(op.len(), 4 * 3);
//! ```

pub mod error;
pub mod heisenberg;
pub mod lattice;
pub mod spin;

pub use error::{ModelError, ModelResult};
pub use heisenberg::{HeisenbergModel, LatticeModel};
pub use lattice::{Boundary, Lattice};
pub use spin::{Spin, SpinAxis, SpinOp, SpinTerm};
