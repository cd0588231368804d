//! Per-circuit gate calibrations.
//!
//! A calibration overrides the hardware's default implementation of a gate
//! on specific physical qubits with a custom [`Schedule`]. Entries are keyed
//! by gate name, physical qubits and gate parameters; inserting an entry
//! with an existing key replaces the old schedule.

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterExpression;
use crate::pulse::Schedule;

/// A schedule bound to a gate on physical qubits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    /// Gate name.
    pub gate: String,
    /// Physical qubits.
    pub qubits: Vec<u32>,
    /// Gate parameters the schedule was built for.
    pub params: Vec<ParameterExpression>,
    /// The pulse program.
    pub schedule: Schedule,
}

impl Calibration {
    fn same_key(&self, gate: &str, qubits: &[u32], params: &[ParameterExpression]) -> bool {
        self.gate == gate && self.qubits == qubits && self.params == params
    }
}

/// Calibrations attached to a circuit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalibrationTable {
    entries: Vec<Calibration>,
}

impl CalibrationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a calibration.
    pub fn insert(
        &mut self,
        gate: impl Into<String>,
        qubits: Vec<u32>,
        params: Vec<ParameterExpression>,
        schedule: Schedule,
    ) {
        let gate = gate.into();
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|c| c.same_key(&gate, &qubits, &params))
        {
            existing.schedule = schedule;
            return;
        }
        self.entries.push(Calibration {
            gate,
            qubits,
            params,
            schedule,
        });
    }

    /// Look up a calibration.
    pub fn get(
        &self,
        gate: &str,
        qubits: &[u32],
        params: &[ParameterExpression],
    ) -> Option<&Schedule> {
        self.entries
            .iter()
            .find(|c| c.same_key(gate, qubits, params))
            .map(|c| &c.schedule)
    }

    /// Whether any calibration exists for `gate` on `qubits`.
    pub fn has_gate_on(&self, gate: &str, qubits: &[u32]) -> bool {
        self.entries
            .iter()
            .any(|c| c.gate == gate && c.qubits == qubits)
    }

    /// Merge another table into this one; entries of `other` win.
    pub fn merge(&mut self, other: &CalibrationTable) {
        for c in &other.entries {
            self.insert(
                c.gate.clone(),
                c.qubits.clone(),
                c.params.clone(),
                c.schedule.clone(),
            );
        }
    }

    /// Iterate over calibrations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Calibration> {
        self.entries.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Calibration> {
        self.entries.iter_mut()
    }

    /// Number of calibrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no calibrations are attached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::Parameter;
    use crate::pulse::Channel;

    #[test]
    fn test_insert_replaces_same_key() {
        let amp = Parameter::new("phi0");
        let mut table = CalibrationTable::new();

        table.insert("rx", vec![3], vec![(&amp).into()], Schedule::named("first"));
        table.insert("rx", vec![3], vec![(&amp).into()], Schedule::named("second"));
        table.insert("rx", vec![4], vec![(&amp).into()], Schedule::new());

        assert_eq!(table.len(), 2);
        let sched = table.get("rx", &[3], &[(&amp).into()]).unwrap();
        assert_eq!(sched.name.as_deref(), Some("second"));
        assert!(table.has_gate_on("rx", &[4]));
        assert!(!table.has_gate_on("cr", &[3, 4]));
    }

    #[test]
    fn test_merge() {
        let mut a = CalibrationTable::new();
        let mut sched = Schedule::new();
        sched.delay(16, Channel::Drive(0));
        a.insert("x", vec![0], vec![], Schedule::new());

        let mut b = CalibrationTable::new();
        b.insert("x", vec![0], vec![], sched.clone());
        b.insert("x", vec![1], vec![], Schedule::new());

        a.merge(&b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.get("x", &[0], &[]), Some(&sched));
    }
}
