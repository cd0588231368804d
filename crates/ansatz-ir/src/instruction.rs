//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::parameter::Parameter;
use crate::qubit::QubitId;

/// A gate applied to an ordered list of qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The gate.
    pub gate: Gate,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            gate: gate.into(),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// The applied gate.
    pub fn as_gate(&self) -> &Gate {
        &self.gate
    }

    /// Mutable reference to the applied gate.
    pub fn gate_mut(&mut self) -> &mut Gate {
        &mut self.gate
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// Raw qubit indices, in operand order.
    pub fn qubit_indices(&self) -> Vec<u32> {
        self.qubits.iter().map(|q| q.0).collect()
    }

    /// Distinct parameters referenced by the gate and its definition.
    pub(crate) fn collect_parameters(&self, out: &mut Vec<Parameter>) {
        for p in self.gate.params() {
            p.collect_parameters(out);
        }
        if let Some(def) = self.gate.definition() {
            def.collect_parameters(out);
        }
    }
}
