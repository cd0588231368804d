//! Hamiltonian-variational ansatz.
//!
//! Each repetition applies one `RZZ·RYY·RXX` triple per bond of the "odd"
//! sublattice (descending, first bond wraps to qubit 0) and then one per
//! bond of the "even" sublattice (ascending). Odd-layer angles are named
//! `phi<k>`, even-layer angles `gamma<k>`, sharing one counter.
//!
//! # Bell-pair preparation
//!
//! By default a Bell pair is emitted only when the last X-initialized qubit
//! (`n - 1`) is even. For an even register that qubit is always odd, so no
//! Bell pairs are prepared. [`Hva::with_bell_pairs`] puts `H`/`CX` on every
//! even qubit instead.

use ansatz_ir::{Circuit, Parameter, QubitId};
use tracing::{debug, instrument};

use crate::error::{AnsatzError, AnsatzResult};

/// Hamiltonian-variational ansatz generator.
#[derive(Debug, Clone)]
pub struct Hva {
    num_qubits: u32,
    reps: usize,
    bell_pairs: bool,
    params: Vec<Parameter>,
}

impl Hva {
    /// Create a generator for `num_qubits` qubits and one repetition.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            reps: 1,
            bell_pairs: false,
            params: vec![],
        }
    }

    /// Set the number of repetitions.
    #[must_use]
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    /// Prepare Bell pairs on `(0,1), (2,3), …` after the X layer.
    #[must_use]
    pub fn with_bell_pairs(mut self, enabled: bool) -> Self {
        self.bell_pairs = enabled;
        self
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of repetitions.
    pub fn reps(&self) -> usize {
        self.reps
    }

    /// Parameters allocated so far, in creation order.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Allocate a parameter named `prefix` followed by the current count.
    pub fn new_param(&mut self, prefix: &str) -> Parameter {
        let param = Parameter::new(format!("{prefix}{}", self.params.len()));
        self.params.push(param.clone());
        param
    }

    /// Build the circuit.
    #[instrument(skip(self), fields(num_qubits = self.num_qubits, reps = self.reps))]
    pub fn circuit(&mut self) -> AnsatzResult<Circuit> {
        let n = self.num_qubits;
        if n % 2 != 0 {
            return Err(AnsatzError::OddQubitCount(n));
        }

        let mut circuit = Circuit::new("HVA", n);
        for q in 0..n {
            circuit.x(QubitId(q))?;
        }
        if self.bell_pairs {
            for j in (0..n).step_by(2) {
                circuit.h(QubitId(j))?;
                circuit.cx(QubitId(j), QubitId(j + 1))?;
            }
        }

        for _ in 0..self.reps {
            for i in (1..n).rev().step_by(2) {
                let partner = if i < n - 1 { i + 1 } else { 0 };
                self.append_bond(&mut circuit, "phi", i, partner)?;
            }
            for i in (0..n).step_by(2) {
                self.append_bond(&mut circuit, "gamma", i, i + 1)?;
            }
        }

        debug!(
            params = circuit.num_parameters(),
            bell_pairs = self.bell_pairs,
            "built HVA circuit"
        );
        Ok(circuit)
    }

    fn append_bond(
        &mut self,
        circuit: &mut Circuit,
        prefix: &str,
        a: u32,
        b: u32,
    ) -> AnsatzResult<()> {
        let (qa, qb) = (QubitId(a), QubitId(b));
        circuit.rzz(self.new_param(prefix), qa, qb)?;
        circuit.ryy(self.new_param(prefix), qa, qb)?;
        circuit.rxx(self.new_param(prefix), qa, qb)?;
        Ok(())
    }
}
