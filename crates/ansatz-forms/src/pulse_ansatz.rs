//! Layered pulse ansätze.

use ansatz_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::builder::AnsatzBuilder;
use crate::error::AnsatzResult;
use crate::wrapper::WrapperConfig;

/// Which qubit pairs a layer entangles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "pairs", rename_all = "snake_case")]
pub enum Entanglement {
    /// Neighbours `(q, q+1)` for even `q`, then for odd `q`.
    #[default]
    Interleaved,
    /// An explicit list of (control, target) program qubits.
    Pairs(Vec<(u32, u32)>),
}

/// A variational form made of repeated pulse-gate layers.
///
/// Implementors supply one layer; `circuit()` stacks `reps()` of them and
/// optionally closes with an `rx` on every qubit.
pub trait PulseAnsatz {
    /// Number of program qubits.
    fn num_qubits(&self) -> u32;

    /// Number of layers.
    fn reps(&self) -> usize;

    /// Whether the circuit ends with an `rx` layer.
    fn final_rx(&self) -> bool {
        true
    }

    /// Name given to the generated circuit.
    fn name(&self) -> &str {
        "pulse_ansatz"
    }

    /// The builder allocating parameters and schedules.
    fn builder_mut(&mut self) -> &mut AnsatzBuilder;

    /// Build a single layer.
    fn layer(&mut self) -> AnsatzResult<Circuit>;

    /// Build the full circuit, without schedules.
    fn circuit(&mut self) -> AnsatzResult<Circuit> {
        let n = self.num_qubits();
        let mut ansatz = Circuit::new(self.name(), n);
        for _ in 0..self.reps() {
            let layer = self.layer()?;
            ansatz.compose(&layer)?;
        }
        if self.final_rx() {
            for q in 0..n {
                self.builder_mut().add_rx(&mut ansatz, q)?;
            }
        }
        Ok(ansatz)
    }

    /// Build the full circuit and attach its calibrations.
    ///
    /// The builder's [`WrapperConfig`] is filled in as a side effect.
    fn scheduled_circuit(&mut self) -> AnsatzResult<Circuit> {
        let mut ansatz = self.circuit()?;
        self.builder_mut().add_schedules(&mut ansatz)?;
        Ok(ansatz)
    }
}

/// Single-qubit `rx` rotations followed by cross-resonance entanglers.
#[derive(Debug)]
pub struct CrAnsatz {
    num_qubits: u32,
    builder: AnsatzBuilder,
    reps: usize,
    entanglement: Entanglement,
    add_rz: bool,
    final_rx: bool,
}

impl CrAnsatz {
    /// Create an interleaved, single-layer ansatz with a final `rx` layer.
    pub fn new(num_qubits: u32, builder: AnsatzBuilder) -> Self {
        Self {
            num_qubits,
            builder,
            reps: 1,
            entanglement: Entanglement::Interleaved,
            add_rz: false,
            final_rx: true,
        }
    }

    /// Set the number of layers.
    #[must_use]
    pub fn with_reps(mut self, reps: usize) -> Self {
        self.reps = reps;
        self
    }

    /// Set the entangling pattern.
    #[must_use]
    pub fn with_entanglement(mut self, entanglement: Entanglement) -> Self {
        self.entanglement = entanglement;
        self
    }

    /// Add a virtual `rz` with its own parameter after every `rx`.
    #[must_use]
    pub fn with_add_rz(mut self, add_rz: bool) -> Self {
        self.add_rz = add_rz;
        self
    }

    /// Close the circuit with an `rx` on every qubit.
    #[must_use]
    pub fn with_final_rx(mut self, final_rx: bool) -> Self {
        self.final_rx = final_rx;
        self
    }

    /// The entangling pattern.
    pub fn entanglement(&self) -> &Entanglement {
        &self.entanglement
    }

    /// The builder.
    pub fn builder(&self) -> &AnsatzBuilder {
        &self.builder
    }

    /// Recorded wrappers.
    pub fn wrapper_config(&self) -> &WrapperConfig {
        self.builder.wrapper_config()
    }

    /// Give back the builder.
    pub fn into_builder(self) -> AnsatzBuilder {
        self.builder
    }

    fn entangling_pairs(&self) -> Vec<(u32, u32)> {
        let n = self.num_qubits;
        match &self.entanglement {
            Entanglement::Interleaved => (0..n)
                .step_by(2)
                .chain((1..n).step_by(2))
                .filter(|&q| q + 1 < n)
                .map(|q| (q, q + 1))
                .collect(),
            Entanglement::Pairs(pairs) => pairs.clone(),
        }
    }
}

impl PulseAnsatz for CrAnsatz {
    fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    fn reps(&self) -> usize {
        self.reps
    }

    fn final_rx(&self) -> bool {
        self.final_rx
    }

    fn name(&self) -> &str {
        "cr_ansatz"
    }

    fn builder_mut(&mut self) -> &mut AnsatzBuilder {
        &mut self.builder
    }

    #[instrument(skip(self), fields(num_qubits = self.num_qubits))]
    fn layer(&mut self) -> AnsatzResult<Circuit> {
        let mut layer = Circuit::new("cr_layer", self.num_qubits);
        for q in 0..self.num_qubits {
            self.builder.add_rx(&mut layer, q)?;
            if self.add_rz {
                let phi = self.builder.new_param("phi");
                layer.rz(phi, q.into())?;
            }
        }

        let pairs = self.entangling_pairs();
        for &pair in &pairs {
            self.builder.add_cr(&mut layer, pair, None)?;
        }
        debug!(cr_gates = pairs.len(), "built CR layer");
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansatz_hal::SimulatorBackend;
    use std::sync::Arc;

    fn ansatz(n: u32) -> CrAnsatz {
        let builder = AnsatzBuilder::new(Arc::new(SimulatorBackend::new(n)), (0..n).collect::<Vec<_>>());
        CrAnsatz::new(n, builder)
    }

    fn cr_pairs(circuit: &Circuit) -> Vec<Vec<u32>> {
        circuit
            .instructions()
            .iter()
            .filter(|i| i.name() == "cr")
            .map(|i| i.qubit_indices())
            .collect()
    }

    #[test]
    fn test_interleaved_order() {
        let circuit = ansatz(4).layer().unwrap();
        assert_eq!(cr_pairs(&circuit), vec![vec![0, 1], vec![2, 3], vec![1, 2]]);
    }

    #[test]
    fn test_interleaved_odd_width_skips_overhang() {
        let circuit = ansatz(5).layer().unwrap();
        assert_eq!(
            cr_pairs(&circuit),
            vec![vec![0, 1], vec![2, 3], vec![1, 2], vec![3, 4]]
        );
    }

    #[test]
    fn test_explicit_pairs() {
        let mut a = ansatz(3).with_entanglement(Entanglement::Pairs(vec![(2, 0), (0, 1)]));
        let circuit = a.layer().unwrap();
        assert_eq!(cr_pairs(&circuit), vec![vec![2, 0], vec![0, 1]]);
    }

    #[test]
    fn test_pairs_out_of_range_fail() {
        let mut a = ansatz(2).with_entanglement(Entanglement::Pairs(vec![(1, 2)]));
        assert!(a.layer().is_err());
    }

    #[test]
    fn test_circuit_param_count() {
        // 2 layers × (3 rx + 2 cr × 2 params) + 3 final rx
        let mut a = ansatz(3).with_reps(2);
        let circuit = a.circuit().unwrap();
        assert_eq!(circuit.num_parameters(), 2 * (3 + 2 * 2) + 3);
        assert_eq!(circuit.name(), "cr_ansatz");
    }

    #[test]
    fn test_add_rz_and_no_final_rx() {
        let mut a = ansatz(2).with_add_rz(true).with_final_rx(false);
        let circuit = a.circuit().unwrap();
        let ops = circuit.count_ops();
        assert_eq!(ops["rx"], 2);
        assert_eq!(ops["rz"], 2);
        assert_eq!(ops["cr"], 1);
    }

    #[test]
    fn test_scheduled_circuit_wraps_everything() {
        let mut a = ansatz(2);
        let circuit = a.scheduled_circuit().unwrap();
        // 2 rx + cr(t, phi) + 2 final rx
        assert_eq!(circuit.num_parameters(), 6);
        assert_eq!(a.wrapper_config().len(), 6);
        assert_eq!(circuit.calibrations().len(), 5);
    }

    #[test]
    fn test_entanglement_serde() {
        let json = serde_json::to_string(&Entanglement::Interleaved).unwrap();
        assert_eq!(json, r#"{"type":"interleaved"}"#);
        let pairs: Entanglement =
            serde_json::from_str(r#"{"type":"pairs","pairs":[[0,1],[1,2]]}"#).unwrap();
        assert_eq!(pairs, Entanglement::Pairs(vec![(0, 1), (1, 2)]));
    }
}
