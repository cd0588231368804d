//! The Heisenberg model.
//!
//! For every weighted edge `(a, b, J)` of the lattice:
//!
//!   H = Σ_{a≠b} J (X_a X_b + Y_a Y_b + Z_a Z_b)  +  Σ_a h_a X_a
//!
//! where the on-site field `h_a` is the weight of the self-loop on `a`.

use ndarray::Array2;
use num_complex::Complex64;
use tracing::{debug, warn};

use crate::error::{ModelError, ModelResult};
use crate::lattice::Lattice;
use crate::spin::{Spin, SpinAxis, SpinOp, SpinTerm};

/// A Hamiltonian defined on a lattice.
pub trait LatticeModel {
    /// The underlying lattice.
    fn lattice(&self) -> &Lattice;

    /// Hermitian interaction matrix of the lattice.
    fn interaction_matrix(&self) -> Array2<Complex64> {
        self.lattice().to_adjacency_matrix()
    }

    /// The Hamiltonian as a spin operator.
    fn second_q_ops(&self) -> SpinOp;
}

/// Heisenberg XXX model with a transverse on-site field.
#[derive(Debug, Clone, PartialEq)]
pub struct HeisenbergModel {
    lattice: Lattice,
}

impl HeisenbergModel {
    /// Define the model on `lattice`.
    pub fn new(lattice: Lattice) -> Self {
        Self { lattice }
    }

    /// The model on `lattice`'s graph with every coupling set to
    /// `interaction` and every site given on-site weight `onsite`.
    pub fn uniform_parameters(lattice: &Lattice, interaction: Complex64, onsite: Complex64) -> Self {
        Self::new(lattice.with_uniform_weights(interaction, onsite))
    }

    /// The model whose lattice has an edge `(i, j, m[i][j])` for every
    /// nonzero entry on or above the diagonal.
    pub fn from_parameters(interaction_matrix: &Array2<Complex64>) -> ModelResult<Self> {
        let (rows, cols) = interaction_matrix.dim();
        if rows != cols {
            return Err(ModelError::NonSquareMatrix { rows, cols });
        }
        let zero = Complex64::new(0.0, 0.0);
        let edges = (0..rows).flat_map(|i| {
            (i..rows).filter_map(move |j| {
                let w = interaction_matrix[[i, j]];
                (w != zero).then_some((i, j, w))
            })
        });
        Ok(Self::new(Lattice::from_weighted_edges(rows, edges)?))
    }

    /// Alias of [`LatticeModel::interaction_matrix`].
    pub fn coupling_matrix(&self) -> Array2<Complex64> {
        self.interaction_matrix()
    }

    /// [`LatticeModel::second_q_ops`] accepting a display format for
    /// fermionic operators, which spin operators ignore.
    pub fn second_q_ops_with_format(&self, display_format: Option<&str>) -> SpinOp {
        if let Some(format) = display_format {
            warn!(
                display_format = format,
                "Spin operators do not support display-format; the provided value is ignored"
            );
        }
        self.second_q_ops()
    }
}

impl LatticeModel for HeisenbergModel {
    fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    fn second_q_ops(&self) -> SpinOp {
        let mut terms = Vec::new();
        for (a, b, w) in self.lattice.weighted_edge_list() {
            let (a, b) = (a as u32, b as u32);
            if a == b {
                terms.push(SpinTerm::new([(a, SpinAxis::X)], w));
            } else {
                for axis in [SpinAxis::X, SpinAxis::Y, SpinAxis::Z] {
                    terms.push(SpinTerm::new([(a, axis), (b, axis)], w));
                }
            }
        }
        debug!(
            sites = self.lattice.num_nodes(),
            terms = terms.len(),
            "built Heisenberg Hamiltonian"
        );
        SpinOp::new(terms, Spin::HALF, self.lattice.num_nodes() as u32)
    }
}
