//! High-level circuit builder API.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::calibration::CalibrationTable;
use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, Gate, StandardGate};
use crate::instruction::Instruction;
use crate::parameter::{Parameter, ParameterExpression};
use crate::pulse::Schedule;
use crate::qubit::QubitId;

/// A quantum circuit.
///
/// An ordered list of instructions over a fixed number of qubits, plus the
/// pulse calibrations attached to it. Gate methods validate their operands
/// and return `&mut Self` so calls can be chained with `?`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Instructions in program order.
    instructions: Vec<Instruction>,
    /// Gate calibrations.
    #[serde(default, skip_serializing_if = "CalibrationTable::is_empty")]
    calibrations: CalibrationTable,
}

impl Circuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
            calibrations: CalibrationTable::new(),
        }
    }

    /// Append an instruction after validating its operands.
    ///
    /// Fails with [`IrError::ParameterNameConflict`] if the instruction
    /// references a parameter whose name is already taken by a different
    /// parameter of this circuit.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        let mut incoming = Vec::new();
        instruction.collect_parameters(&mut incoming);
        self.check_parameter_names(&incoming)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let gate_name = || Some(instruction.name().to_string());

        let gate = instruction.as_gate();
        let got = instruction.qubits.len() as u32;
        if gate.num_qubits() != got {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got,
            });
        }

        for (i, q) in instruction.qubits.iter().enumerate() {
            if q.0 >= self.num_qubits {
                return Err(IrError::QubitNotFound {
                    qubit: *q,
                    num_qubits: self.num_qubits,
                    gate_name: gate_name(),
                });
            }
            if instruction.qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: gate_name(),
                });
            }
        }
        Ok(())
    }

    fn check_parameter_names(&self, incoming: &[Parameter]) -> IrResult<()> {
        let mut seen: HashMap<&str, &Parameter> = HashMap::new();
        let mut existing = Vec::new();
        self.collect_parameters(&mut existing);
        for p in existing.iter().chain(incoming) {
            match seen.get(p.name()) {
                Some(&q) if q != p => {
                    return Err(IrError::ParameterNameConflict(p.name().to_string()));
                }
                Some(_) => {}
                None => {
                    seen.insert(p.name(), p);
                }
            }
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply controlled-Rx gate.
    pub fn crx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        control: QubitId,
        target: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            StandardGate::CRx(theta.into()),
            control,
            target,
        ))
    }

    /// Apply RXX (XX rotation) gate.
    pub fn rxx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            StandardGate::RXX(theta.into()),
            q1,
            q2,
        ))
    }

    /// Apply RYY (YY rotation) gate.
    pub fn ryy(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            StandardGate::RYY(theta.into()),
            q1,
            q2,
        ))
    }

    /// Apply RZZ (ZZ rotation) gate.
    pub fn rzz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::two_qubit_gate(
            StandardGate::RZZ(theta.into()),
            q1,
            q2,
        ))
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.append(Instruction::gate(gate, qubits))
    }

    /// Append every instruction of `other` on the same qubit indices, and
    /// merge its calibrations.
    pub fn compose(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits > self.num_qubits {
            return Err(IrError::ComposeWidth {
                target: self.num_qubits,
                other: other.num_qubits,
            });
        }
        let mut incoming = Vec::new();
        other.collect_parameters(&mut incoming);
        self.check_parameter_names(&incoming)?;
        self.instructions.extend(other.instructions.iter().cloned());
        self.calibrations.merge(&other.calibrations);
        Ok(self)
    }

    /// Wrap this circuit into a composite gate.
    ///
    /// The gate's params are this circuit's parameters in circuit order and
    /// its definition is a copy of the circuit.
    pub fn to_gate(&self) -> CustomGate {
        let params = self
            .parameters()
            .into_iter()
            .map(ParameterExpression::Symbol)
            .collect();
        CustomGate::new(self.name.clone(), self.num_qubits)
            .with_params(params)
            .with_definition(self.clone())
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Distinct parameters referenced by the circuit, in circuit order.
    ///
    /// Circuit order is the lexicographic name sort of
    /// [`Parameter::ordering`], not creation order: `phi10` sorts before
    /// `phi2`. Parameters used only inside a composite gate's definition
    /// are included.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut out = Vec::new();
        self.collect_parameters(&mut out);
        out.sort_by(Parameter::ordering);
        out
    }

    pub(crate) fn collect_parameters(&self, out: &mut Vec<Parameter>) {
        for inst in &self.instructions {
            inst.collect_parameters(out);
        }
    }

    /// Number of distinct parameters.
    pub fn num_parameters(&self) -> usize {
        self.parameters().len()
    }

    /// Position of `param` in [`Circuit::parameters`].
    pub fn parameter_index(&self, param: &Parameter) -> Option<usize> {
        self.parameters().iter().position(|p| p == param)
    }

    /// Bind every parameter, in circuit order, to the given values.
    ///
    /// Gate parameters, composite definitions and calibration schedules are
    /// all rewritten.
    pub fn assign_parameters(&self, values: &[f64]) -> IrResult<Circuit> {
        let params = self.parameters();
        if params.len() != values.len() {
            return Err(IrError::ParameterCountMismatch {
                expected: params.len(),
                got: values.len(),
            });
        }
        let mut bound = self.clone();
        bound.bind_in_place(&params, values);
        Ok(bound)
    }

    fn bind_in_place(&mut self, params: &[Parameter], values: &[f64]) {
        for gate in self.instructions.iter_mut().map(Instruction::gate_mut) {
            for expr in gate.params_mut() {
                *expr = expr.bind_all(params.iter().zip(values.iter().copied()));
            }
            if let Some(def) = gate.definition_mut() {
                def.bind_in_place(params, values);
            }
        }
        for cal in self.calibrations.iter_mut() {
            for expr in &mut cal.params {
                *expr = expr.bind_all(params.iter().zip(values.iter().copied()));
            }
            for (p, v) in params.iter().zip(values) {
                cal.schedule.bind(p, *v);
            }
        }
    }

    // =========================================================================
    // Calibrations
    // =========================================================================

    /// Attach a pulse schedule to `gate` on physical `qubits` for `params`.
    pub fn add_calibration(
        &mut self,
        gate: impl Into<String>,
        qubits: Vec<u32>,
        params: Vec<ParameterExpression>,
        schedule: Schedule,
    ) {
        self.calibrations.insert(gate, qubits, params, schedule);
    }

    /// The calibration table.
    pub fn calibrations(&self) -> &CalibrationTable {
        &self.calibrations
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Instructions in program order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of operations.
    pub fn num_ops(&self) -> usize {
        self.instructions.len()
    }

    /// Operation counts keyed by name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in &self.instructions {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Circuit depth: the longest chain of gates sharing qubits.
    pub fn depth(&self) -> usize {
        let mut levels = vec![0usize; self.num_qubits as usize];
        for inst in &self.instructions {
            let next = inst
                .qubits
                .iter()
                .map(|q| levels[q.0 as usize])
                .max()
                .unwrap_or(0)
                + 1;
            for q in &inst.qubits {
                levels[q.0 as usize] = next;
            }
        }
        levels.into_iter().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test", 3);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_ops(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_fluent_api_and_depth() {
        let mut circuit = Circuit::new("bell", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .x(QubitId(1))
            .unwrap();
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.count_ops()["cx"], 1);
    }

    #[test]
    fn test_operand_validation() {
        let mut circuit = Circuit::new("test", 2);
        assert!(matches!(
            circuit.x(QubitId(2)),
            Err(IrError::QubitNotFound { .. })
        ));
        assert!(matches!(
            circuit.cx(QubitId(1), QubitId(1)),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert!(matches!(
            circuit.gate(CustomGate::new("cr", 2), [QubitId(0)]),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
        assert_eq!(circuit.num_ops(), 0);
    }

    #[test]
    fn test_parameters_sorted_by_name() {
        let mut circuit = Circuit::new("test", 1);
        for name in ["phi10", "phi2", "phi1", "t3"] {
            circuit
                .rx(ParameterExpression::symbol(name), QubitId(0))
                .unwrap();
        }
        let names: Vec<_> = circuit
            .parameters()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        assert_eq!(names, vec!["phi1", "phi10", "phi2", "t3"]);
    }

    #[test]
    fn test_parameters_deduplicated_across_gates() {
        let theta = Parameter::new("theta");
        let mut circuit = Circuit::new("test", 2);
        circuit.rx(&theta, QubitId(0)).unwrap();
        circuit.rzz(-ParameterExpression::from(&theta) / 2.0, QubitId(0), QubitId(1)).unwrap();
        assert_eq!(circuit.num_parameters(), 1);
        assert_eq!(circuit.parameter_index(&theta), Some(0));
        assert_eq!(circuit.parameter_index(&Parameter::new("theta")), None);
    }

    #[test]
    fn test_to_gate_carries_definition_parameters() {
        let mut block = Circuit::new("blk", 2);
        block
            .crx(ParameterExpression::symbol("a"), QubitId(0), QubitId(1))
            .unwrap()
            .rz(-ParameterExpression::symbol("b") / 2.0, QubitId(0))
            .unwrap();

        let gate = block.to_gate();
        assert_eq!(gate.name, "blk");
        assert_eq!(gate.params.len(), 2);

        let mut outer = Circuit::new("outer", 3);
        outer.gate(gate, [QubitId(2), QubitId(0)]).unwrap();
        assert_eq!(outer.num_parameters(), 2);
    }

    #[test]
    fn test_compose() {
        let mut layer = Circuit::new("layer", 2);
        layer.rx(ParameterExpression::symbol("p0"), QubitId(1)).unwrap();
        layer.add_calibration("rx", vec![5], vec![], Schedule::named("rx"));

        let mut circuit = Circuit::new("ansatz", 2);
        circuit.compose(&layer).unwrap().compose(&layer).unwrap();
        assert_eq!(circuit.num_ops(), 2);
        assert_eq!(circuit.calibrations().len(), 1);

        let wide = Circuit::new("wide", 3);
        assert!(matches!(
            circuit.compose(&wide),
            Err(IrError::ComposeWidth { target: 2, other: 3 })
        ));
    }

    #[test]
    fn test_assign_parameters() {
        let mut circuit = Circuit::new("test", 1);
        circuit
            .rx(ParameterExpression::symbol("a"), QubitId(0))
            .unwrap()
            .rz(ParameterExpression::symbol("b"), QubitId(0))
            .unwrap();

        assert!(matches!(
            circuit.assign_parameters(&[1.0]),
            Err(IrError::ParameterCountMismatch { expected: 2, got: 1 })
        ));

        let bound = circuit.assign_parameters(&[PI, 0.5]).unwrap();
        assert_eq!(bound.num_parameters(), 0);
        let first = bound.instructions()[0].as_gate().params()[0].as_f64();
        assert_eq!(first, Some(PI));
    }

    #[test]
    fn test_parallel_gates_share_a_layer() {
        let mut circuit = Circuit::new("test", 2);
        circuit.x(QubitId(0)).unwrap();
        circuit.x(QubitId(1)).unwrap();
        assert_eq!(circuit.depth(), 1);
        assert_eq!(circuit.num_ops(), 2);
    }

    #[test]
    fn test_same_name_different_parameter_rejected() {
        let mut circuit = Circuit::new("test", 1);
        circuit.rx(Parameter::new("phi0"), QubitId(0)).unwrap();
        assert!(matches!(
            circuit.rx(Parameter::new("phi0"), QubitId(0)),
            Err(IrError::ParameterNameConflict(name)) if name == "phi0"
        ));
        assert_eq!(circuit.num_ops(), 1);

        let shared = circuit.parameters()[0].clone();
        circuit.rz(-ParameterExpression::from(&shared), QubitId(0)).unwrap();
        assert_eq!(circuit.num_parameters(), 1);
    }

    #[test]
    fn test_same_name_conflict_within_one_instruction() {
        let cr = CustomGate::new("cr", 2).with_params(vec![
            ParameterExpression::symbol("t0"),
            ParameterExpression::symbol("t0"),
        ]);
        let mut circuit = Circuit::new("test", 2);
        assert!(matches!(
            circuit.gate(cr, [QubitId(0), QubitId(1)]),
            Err(IrError::ParameterNameConflict(_))
        ));
    }

    #[test]
    fn test_compose_rejects_conflicting_names() {
        let mut layer = Circuit::new("layer", 1);
        layer.rx(ParameterExpression::symbol("phi0"), QubitId(0)).unwrap();

        let mut circuit = Circuit::new("ansatz", 1);
        circuit.compose(&layer).unwrap();
        // Composing the same layer again reuses the same parameter.
        circuit.compose(&layer).unwrap();
        assert_eq!(circuit.num_parameters(), 1);

        let mut other = Circuit::new("other", 1);
        other.rx(ParameterExpression::symbol("phi0"), QubitId(0)).unwrap();
        assert!(matches!(
            circuit.compose(&other),
            Err(IrError::ParameterNameConflict(_))
        ));
        assert_eq!(circuit.num_ops(), 2);
    }
}
