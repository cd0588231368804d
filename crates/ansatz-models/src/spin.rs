//! Spin operators.
//!
//! A [`SpinOp`] is a sum of products of single-site spin components with
//! complex coefficients, over a register of `register_length` sites of equal
//! spin. Terms print as `"X_0 X_1"`.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Cartesian spin component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpinAxis {
    /// S_x.
    X,
    /// S_y.
    Y,
    /// S_z.
    Z,
}

impl fmt::Display for SpinAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpinAxis::X => f.write_str("X"),
            SpinAxis::Y => f.write_str("Y"),
            SpinAxis::Z => f.write_str("Z"),
        }
    }
}

/// Site spin as a fraction, stored as `2s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spin {
    twice: u32,
}

impl Spin {
    /// Spin 1/2.
    pub const HALF: Spin = Spin { twice: 1 };

    /// Spin `twice / 2`.
    pub const fn from_twice(twice: u32) -> Self {
        Self { twice }
    }

    /// The spin as a float.
    pub fn value(self) -> f64 {
        f64::from(self.twice) / 2.0
    }

    /// Local Hilbert-space dimension `2s + 1`.
    pub fn dim(self) -> u32 {
        self.twice + 1
    }
}

impl fmt::Display for Spin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.twice % 2 == 0 {
            write!(f, "{}", self.twice / 2)
        } else {
            write!(f, "{}/2", self.twice)
        }
    }
}

/// One weighted product of spin components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinTerm {
    /// `(site, component)` factors in product order.
    pub ops: Vec<(u32, SpinAxis)>,
    /// Coefficient.
    pub coeff: Complex64,
}

impl SpinTerm {
    /// Create a term.
    pub fn new(ops: impl IntoIterator<Item = (u32, SpinAxis)>, coeff: Complex64) -> Self {
        Self {
            ops: ops.into_iter().collect(),
            coeff,
        }
    }

    /// Label such as `"X_0 X_1"`.
    pub fn label(&self) -> String {
        self.ops
            .iter()
            .map(|(site, axis)| format!("{axis}_{site}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Highest site referenced.
    pub fn max_site(&self) -> Option<u32> {
        self.ops.iter().map(|(site, _)| *site).max()
    }
}

/// A sum of spin terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinOp {
    terms: Vec<SpinTerm>,
    spin: Spin,
    register_length: u32,
}

impl SpinOp {
    /// Create an operator from its terms.
    pub fn new(terms: Vec<SpinTerm>, spin: Spin, register_length: u32) -> Self {
        Self {
            terms,
            spin,
            register_length,
        }
    }

    /// Terms in insertion order.
    pub fn terms(&self) -> &[SpinTerm] {
        &self.terms
    }

    /// Site spin.
    pub fn spin(&self) -> Spin {
        self.spin
    }

    /// Number of sites.
    pub fn register_length(&self) -> u32 {
        self.register_length
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `(label, coeff)` pairs in insertion order.
    pub fn to_list(&self) -> Vec<(String, Complex64)> {
        self.terms.iter().map(|t| (t.label(), t.coeff)).collect()
    }

    /// Merge terms with equal factors and drop those whose coefficient
    /// falls below `atol` in magnitude. First-occurrence order is kept.
    #[must_use]
    pub fn simplify(&self, atol: f64) -> Self {
        let mut merged: Vec<SpinTerm> = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match merged.iter_mut().find(|m| m.ops == term.ops) {
                Some(m) => m.coeff += term.coeff,
                None => merged.push(term.clone()),
            }
        }
        merged.retain(|t| t.coeff.norm() > atol);
        Self::new(merged, self.spin, self.register_length)
    }
}

impl fmt::Display for SpinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpinOp(spin={}, register_length={})",
            self.spin, self.register_length
        )?;
        for term in &self.terms {
            write!(f, "\n  {} * ({})", term.coeff, term.label())?;
        }
        Ok(())
    }
}
