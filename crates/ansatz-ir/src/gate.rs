//! Quantum gate types.

use serde::{Deserialize, Serialize};

use crate::circuit::Circuit;
use crate::parameter::ParameterExpression;

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Pauli-X gate.
    X,
    /// Hadamard gate.
    H,
    /// Rotation around X axis.
    Rx(ParameterExpression),
    /// Rotation around Z axis.
    Rz(ParameterExpression),
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled rotation around X.
    CRx(ParameterExpression),
    /// XX rotation gate.
    RXX(ParameterExpression),
    /// YY rotation gate.
    RYY(ParameterExpression),
    /// ZZ rotation gate.
    RZZ(ParameterExpression),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::Rx(_) => "rx",
            StandardGate::Rz(_) => "rz",
            StandardGate::CX => "cx",
            StandardGate::CRx(_) => "crx",
            StandardGate::RXX(_) => "rxx",
            StandardGate::RYY(_) => "ryy",
            StandardGate::RZZ(_) => "rzz",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::X
            | StandardGate::H
            | StandardGate::Rx(_)
            | StandardGate::Rz(_) => 1,

            StandardGate::CX
            | StandardGate::CRx(_)
            | StandardGate::RXX(_)
            | StandardGate::RYY(_)
            | StandardGate::RZZ(_) => 2,
        }
    }

    /// Get parameters of this gate.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Rz(p)
            | StandardGate::CRx(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p) => vec![p],
            _ => vec![],
        }
    }

    fn parameters_mut(&mut self) -> Vec<&mut ParameterExpression> {
        match self {
            StandardGate::Rx(p)
            | StandardGate::Rz(p)
            | StandardGate::CRx(p)
            | StandardGate::RXX(p)
            | StandardGate::RYY(p)
            | StandardGate::RZZ(p) => vec![p],
            _ => vec![],
        }
    }
}

/// A gate defined outside the standard set: a pulse-level primitive such
/// as `cr`, or a composite block carrying its own definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    /// The name of the gate.
    pub name: String,
    /// The number of qubits it operates on.
    pub num_qubits: u32,
    /// Parameters of the gate.
    pub params: Vec<ParameterExpression>,
    /// Sub-circuit implementing the gate, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<Box<Circuit>>,
}

impl CustomGate {
    /// Create a new custom gate.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            params: vec![],
            definition: None,
        }
    }

    /// Add parameters to the gate.
    #[must_use]
    pub fn with_params(mut self, params: Vec<ParameterExpression>) -> Self {
        self.params = params;
        self
    }

    /// Attach a defining sub-circuit.
    #[must_use]
    pub fn with_definition(mut self, definition: Circuit) -> Self {
        self.definition = Some(Box::new(definition));
        self
    }
}

/// A quantum gate, either standard or custom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A custom gate.
    Custom(CustomGate),
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            Gate::Standard(g) => g.name(),
            Gate::Custom(g) => &g.name,
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::Standard(g) => g.num_qubits(),
            Gate::Custom(g) => g.num_qubits,
        }
    }

    /// The gate's parameter expressions, in gate order.
    pub fn params(&self) -> Vec<&ParameterExpression> {
        match self {
            Gate::Standard(g) => g.parameters(),
            Gate::Custom(g) => g.params.iter().collect(),
        }
    }

    /// Mutable access to the gate's parameter expressions.
    pub fn params_mut(&mut self) -> Vec<&mut ParameterExpression> {
        match self {
            Gate::Standard(g) => g.parameters_mut(),
            Gate::Custom(g) => g.params.iter_mut().collect(),
        }
    }

    /// The defining sub-circuit of a composite gate.
    pub fn definition(&self) -> Option<&Circuit> {
        match self {
            Gate::Custom(g) => g.definition.as_deref(),
            Gate::Standard(_) => None,
        }
    }

    pub(crate) fn definition_mut(&mut self) -> Option<&mut Circuit> {
        match self {
            Gate::Custom(g) => g.definition.as_deref_mut(),
            Gate::Standard(_) => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::Standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::Custom(gate)
    }
}
