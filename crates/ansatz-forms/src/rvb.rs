//! Resonating-valence-bond ansatz.
//!
//! Starts from `|1…1⟩`, forms Bell pairs on `(0,1), (2,3), …` and then
//! mixes neighbouring pairs with parametrized exchange blocks (`eSWAP`).
//! Each repetition runs one descending pass over odd sites, whose first
//! block wraps around to qubit 0, and one ascending pass over even sites.

use ansatz_ir::{Circuit, Instruction, Parameter, ParameterExpression, QubitId};
use tracing::{debug, instrument};

use crate::error::{AnsatzError, AnsatzResult};

/// Name of the parametrized exchange block.
pub const ESWAP: &str = "eSWAP";

/// RVB ansatz generator.
#[derive(Debug, Clone)]
pub struct Rvb {
    num_qubits: u32,
    reps: usize,
    params: Vec<Parameter>,
}

impl Rvb {
    /// Create a generator for `num_qubits` qubits and one repetition.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            reps: 1,
            params: vec![],
        }
    }

    /// Set the number of repetitions.
    #[must_use]
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
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

        let mut circuit = Circuit::new("RVB", n);
        for q in 0..n {
            circuit.x(QubitId(q))?;
        }
        for j in (0..n).step_by(2) {
            circuit.h(QubitId(j))?;
            circuit.cx(QubitId(j), QubitId(j + 1))?;
        }

        for _ in 0..self.reps {
            for l in (1..n).rev().step_by(2) {
                let partner = if l < n - 1 { l + 1 } else { 0 };
                self.append_eswap(&mut circuit, l, partner)?;
            }
            for l in (0..n.saturating_sub(1)).step_by(2) {
                self.append_eswap(&mut circuit, l, l + 1)?;
            }
        }

        debug!(
            params = circuit.num_parameters(),
            ops = circuit.num_ops(),
            "built RVB circuit"
        );
        Ok(circuit)
    }

    fn append_eswap(&mut self, circuit: &mut Circuit, a: u32, b: u32) -> AnsatzResult<()> {
        let theta = self.new_param("phi");
        let lambda = self.new_param("phi");

        let mut block = Circuit::new(ESWAP, 2);
        block
            .cx(QubitId(1), QubitId(0))?
            .crx(&theta, QubitId(0), QubitId(1))?
            .x(QubitId(0))?
            .rz(-ParameterExpression::from(&lambda) / 2.0, QubitId(0))?
            .cx(QubitId(1), QubitId(0))?;

        circuit.append(Instruction::gate(block.to_gate(), [QubitId(a), QubitId(b)]))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eswap_pairs(circuit: &Circuit) -> Vec<Vec<u32>> {
        circuit
            .instructions()
            .iter()
            .filter(|inst| inst.name() == ESWAP)
            .map(|inst| inst.qubit_indices())
            .collect()
    }

    #[test]
    fn test_four_qubits_one_rep() {
        let circuit = Rvb::new(4).circuit().unwrap();
        assert_eq!(circuit.num_qubits(), 4);
        assert_eq!(
            eswap_pairs(&circuit),
            vec![vec![3, 0], vec![1, 2], vec![0, 1], vec![2, 3]]
        );
        assert_eq!(circuit.num_parameters(), 8);
    }

    #[test]
    fn test_initial_layers() {
        let circuit = Rvb::new(2).circuit().unwrap();
        let names: Vec<_> = circuit.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(&names[..4], &["x", "x", "h", "cx"]);
    }

    #[test]
    fn test_two_qubits_wraps_to_zero() {
        let circuit = Rvb::new(2).circuit().unwrap();
        assert_eq!(eswap_pairs(&circuit), vec![vec![1, 0], vec![0, 1]]);
    }

    #[test]
    fn test_reps_scale_blocks() {
        let circuit = Rvb::new(6).with_reps(3).circuit().unwrap();
        assert_eq!(eswap_pairs(&circuit).len(), 6 * 3);
        assert_eq!(circuit.num_parameters(), 2 * 6 * 3);
    }

    #[test]
    fn test_odd_qubits_rejected() {
        assert!(matches!(
            Rvb::new(5).circuit(),
            Err(AnsatzError::OddQubitCount(5))
        ));
    }

    #[test]
    fn test_zero_qubits_is_empty() {
        let circuit = Rvb::new(0).with_reps(2).circuit().unwrap();
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_eswap_definition() {
        let circuit = Rvb::new(2).circuit().unwrap();
        let gate = circuit
            .instructions()
            .iter()
            .map(Instruction::as_gate)
            .find(|g| g.name() == ESWAP)
            .unwrap();
        let def = gate.definition().unwrap();
        let names: Vec<_> = def.instructions().iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["cx", "crx", "x", "rz", "cx"]);
        assert_eq!(def.instructions()[0].qubit_indices(), vec![1, 0]);
        assert_eq!(def.instructions()[1].qubit_indices(), vec![0, 1]);
        assert_eq!(gate.params().len(), 2);
    }

    #[test]
    fn test_param_names_follow_creation_order() {
        let mut rvb = Rvb::new(4);
        rvb.circuit().unwrap();
        let names: Vec<_> = rvb.params().iter().map(|p| p.name().to_string()).collect();
        let expected: Vec<_> = (0..8).map(|i| format!("phi{i}")).collect();
        assert_eq!(names, expected);
    }
}
