//! Symbolic parameters and parameter expressions.
//!
//! A [`Parameter`] is a named placeholder with an identity of its own: two
//! parameters created separately are different even if they share a name.
//! Circuits order their parameters with [`Parameter::ordering`], a plain
//! lexicographic sort on the name, so `phi10` comes before `phi2`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::PI;
use std::fmt;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A named symbolic placeholder for a value bound later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    name: String,
    id: Uuid,
}

impl Parameter {
    /// Create a fresh parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: Uuid::new_v4(),
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identity of this parameter.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Ordering used for a circuit's parameter list: byte-wise name order.
    ///
    /// Names are unique within a circuit, so this is total there.
    pub fn ordering(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Parameter {}

impl Hash for Parameter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A symbolic or concrete parameter expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant numeric value.
    Constant(f64),
    /// A symbolic parameter.
    Symbol(Parameter),
    /// The constant π.
    Pi,
    /// Negation.
    Neg(Box<ParameterExpression>),
    /// Addition.
    Add(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Subtraction.
    Sub(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Multiplication.
    Mul(Box<ParameterExpression>, Box<ParameterExpression>),
    /// Division.
    Div(Box<ParameterExpression>, Box<ParameterExpression>),
}

impl ParameterExpression {
    /// Create a constant parameter.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create an expression around a fresh parameter named `name`.
    pub fn symbol(name: impl Into<String>) -> Self {
        ParameterExpression::Symbol(Parameter::new(name))
    }

    /// Create a π constant.
    pub fn pi() -> Self {
        ParameterExpression::Pi
    }

    /// Check if this expression contains any parameters.
    pub fn is_symbolic(&self) -> bool {
        match self {
            ParameterExpression::Symbol(_) => true,
            ParameterExpression::Constant(_) | ParameterExpression::Pi => false,
            ParameterExpression::Neg(e) => e.is_symbolic(),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b)
            | ParameterExpression::Div(a, b) => a.is_symbolic() || b.is_symbolic(),
        }
    }

    /// The parameter itself, if this expression is a bare parameter.
    pub fn as_parameter(&self) -> Option<&Parameter> {
        match self {
            ParameterExpression::Symbol(p) => Some(p),
            _ => None,
        }
    }

    /// Try to evaluate as a concrete f64 value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(_) => None,
            ParameterExpression::Pi => Some(PI),
            ParameterExpression::Neg(e) => e.as_f64().map(|v| -v),
            ParameterExpression::Add(a, b) => Some(a.as_f64()? + b.as_f64()?),
            ParameterExpression::Sub(a, b) => Some(a.as_f64()? - b.as_f64()?),
            ParameterExpression::Mul(a, b) => Some(a.as_f64()? * b.as_f64()?),
            ParameterExpression::Div(a, b) => {
                let divisor = b.as_f64()?;
                if divisor == 0.0 {
                    return None;
                }
                Some(a.as_f64()? / divisor)
            }
        }
    }

    /// Distinct parameters in this expression, in first-occurrence order.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut out = Vec::new();
        self.collect_parameters(&mut out);
        out
    }

    pub(crate) fn collect_parameters(&self, out: &mut Vec<Parameter>) {
        match self {
            ParameterExpression::Constant(_) | ParameterExpression::Pi => {}
            ParameterExpression::Symbol(p) => {
                if !out.contains(p) {
                    out.push(p.clone());
                }
            }
            ParameterExpression::Neg(e) => e.collect_parameters(out),
            ParameterExpression::Add(a, b)
            | ParameterExpression::Sub(a, b)
            | ParameterExpression::Mul(a, b)
            | ParameterExpression::Div(a, b) => {
                a.collect_parameters(out);
                b.collect_parameters(out);
            }
        }
    }

    /// Bind a parameter to a value, returning a new expression.
    pub fn bind(&self, param: &Parameter, value: f64) -> Self {
        let rebind = |e: &ParameterExpression| Box::new(e.bind(param, value));
        match self {
            ParameterExpression::Symbol(p) if p == param => ParameterExpression::Constant(value),
            ParameterExpression::Constant(_)
            | ParameterExpression::Pi
            | ParameterExpression::Symbol(_) => self.clone(),
            ParameterExpression::Neg(e) => ParameterExpression::Neg(rebind(e)),
            ParameterExpression::Add(a, b) => ParameterExpression::Add(rebind(a), rebind(b)),
            ParameterExpression::Sub(a, b) => ParameterExpression::Sub(rebind(a), rebind(b)),
            ParameterExpression::Mul(a, b) => ParameterExpression::Mul(rebind(a), rebind(b)),
            ParameterExpression::Div(a, b) => ParameterExpression::Div(rebind(a), rebind(b)),
        }
    }

    /// Bind every parameter of `values` at once and fold constants.
    pub fn bind_all<'a>(&self, values: impl IntoIterator<Item = (&'a Parameter, f64)>) -> Self {
        values
            .into_iter()
            .fold(self.clone(), |expr, (p, v)| expr.bind(p, v))
            .simplify()
    }

    /// Simplify the expression by evaluating constant subexpressions.
    pub fn simplify(&self) -> Self {
        if let Some(v) = self.as_f64() {
            return ParameterExpression::Constant(v);
        }
        match self {
            ParameterExpression::Neg(e) => ParameterExpression::Neg(Box::new(e.simplify())),
            ParameterExpression::Add(a, b) => {
                ParameterExpression::Add(Box::new(a.simplify()), Box::new(b.simplify()))
            }
            ParameterExpression::Sub(a, b) => {
                ParameterExpression::Sub(Box::new(a.simplify()), Box::new(b.simplify()))
            }
            ParameterExpression::Mul(a, b) => {
                ParameterExpression::Mul(Box::new(a.simplify()), Box::new(b.simplify()))
            }
            ParameterExpression::Div(a, b) => {
                ParameterExpression::Div(Box::new(a.simplify()), Box::new(b.simplify()))
            }
            _ => self.clone(),
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(p) => write!(f, "{p}"),
            ParameterExpression::Pi => write!(f, "π"),
            ParameterExpression::Neg(e) => write!(f, "-({e})"),
            ParameterExpression::Add(a, b) => write!(f, "({a} + {b})"),
            ParameterExpression::Sub(a, b) => write!(f, "({a} - {b})"),
            ParameterExpression::Mul(a, b) => write!(f, "({a} * {b})"),
            ParameterExpression::Div(a, b) => write!(f, "({a} / {b})"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl From<i32> for ParameterExpression {
    fn from(value: i32) -> Self {
        ParameterExpression::Constant(f64::from(value))
    }
}

impl From<Parameter> for ParameterExpression {
    fn from(value: Parameter) -> Self {
        ParameterExpression::Symbol(value)
    }
}

impl From<&Parameter> for ParameterExpression {
    fn from(value: &Parameter) -> Self {
        ParameterExpression::Symbol(value.clone())
    }
}

impl std::ops::Add for ParameterExpression {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        ParameterExpression::Add(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Sub for ParameterExpression {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        ParameterExpression::Sub(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Mul for ParameterExpression {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        ParameterExpression::Mul(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div for ParameterExpression {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        ParameterExpression::Div(Box::new(self), Box::new(rhs))
    }
}

impl std::ops::Div<f64> for ParameterExpression {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        ParameterExpression::Div(Box::new(self), Box::new(ParameterExpression::Constant(rhs)))
    }
}

impl std::ops::Neg for ParameterExpression {
    type Output = Self;

    fn neg(self) -> Self::Output {
        ParameterExpression::Neg(Box::new(self))
    }
}
