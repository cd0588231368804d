//! Parameter wrappers.
//!
//! Pulse amplitudes, durations and frequency shifts live in bounded
//! intervals while optimizers search over unbounded reals. A wrapper maps a
//! raw optimizer value `x` into the valid interval before it is bound into
//! the circuit:
//!
//! | kind                 | value                                   |
//! |----------------------|-----------------------------------------|
//! | `SinWrapper`         | `a·sin(b·x + d) + c`                    |
//! | `SinDurationWrapper` | `max(round(a·sin(b·x) + c), d)` samples |
//!
//! The config is keyed by the parameter's position in
//! [`Circuit::parameters`](ansatz_ir::Circuit::parameters).

use std::collections::BTreeMap;
use std::fmt;

use ansatz_ir::{Circuit, IrResult};
use serde::{Deserialize, Serialize};

/// Wrapper function family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapperKind {
    /// Sinusoid; used for amplitudes and frequency shifts.
    SinWrapper,
    /// Sinusoid rounded to whole samples with a floor; used for durations.
    SinDurationWrapper,
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WrapperKind::SinWrapper => f.write_str("SinWrapper"),
            WrapperKind::SinDurationWrapper => f.write_str("SinDurationWrapper"),
        }
    }
}

/// One wrapped parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrapperEntry {
    /// Function family.
    pub kind: WrapperKind,
    /// `(a, b, c, d)` coefficients.
    pub coefficients: [f64; 4],
    /// Display label such as `amp[phi3]`.
    pub label: String,
}

impl WrapperEntry {
    /// Create an entry.
    pub fn new(kind: WrapperKind, coefficients: [f64; 4], label: impl Into<String>) -> Self {
        Self {
            kind,
            coefficients,
            label: label.into(),
        }
    }

    /// Map a raw optimizer value to the value bound into the circuit.
    pub fn evaluate(&self, x: f64) -> f64 {
        let [a, b, c, d] = self.coefficients;
        match self.kind {
            WrapperKind::SinWrapper => a * (b * x + d).sin() + c,
            WrapperKind::SinDurationWrapper => (a * (b * x).sin() + c).round().max(d),
        }
    }
}

/// Wrappers keyed by parameter position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WrapperConfig {
    entries: BTreeMap<usize, WrapperEntry>,
}

impl WrapperConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a wrapper for the parameter at `index`, replacing any previous one.
    pub fn insert(&mut self, index: usize, entry: WrapperEntry) {
        self.entries.insert(index, entry);
    }

    /// The wrapper for the parameter at `index`.
    pub fn get(&self, index: usize) -> Option<&WrapperEntry> {
        self.entries.get(&index)
    }

    /// Iterate in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &WrapperEntry)> {
        self.entries.iter().map(|(i, e)| (*i, e))
    }

    /// Number of wrapped parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is wrapped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply the wrappers to a full vector of raw values.
    ///
    /// Values at positions without a wrapper pass through unchanged.
    pub fn apply(&self, raw: &[f64]) -> Vec<f64> {
        raw.iter()
            .enumerate()
            .map(|(i, &x)| self.get(i).map_or(x, |w| w.evaluate(x)))
            .collect()
    }

    /// Wrap `raw` and bind the result into `circuit`.
    pub fn assign(&self, circuit: &Circuit, raw: &[f64]) -> IrResult<Circuit> {
        circuit.assign_parameters(&self.apply(raw))
    }
}
