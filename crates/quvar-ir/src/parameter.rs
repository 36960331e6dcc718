//! Parameter expressions for parameterized circuits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named free parameter, addressed by its position in the parameter vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Parameter {
    /// Vector name, e.g. `θ`.
    pub name: String,
    /// Position in the parameter vector.
    pub index: usize,
}

impl Parameter {
    /// Create a parameter `name[index]`.
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.index)
    }
}

/// A rotation angle: either fixed or a reference to a free parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterExpression {
    /// A constant angle in radians.
    Constant(f64),
    /// A free parameter.
    Symbol(Parameter),
}

impl ParameterExpression {
    /// Create a constant angle.
    pub fn constant(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }

    /// Create a reference to `name[index]`.
    pub fn symbol(name: impl Into<String>, index: usize) -> Self {
        ParameterExpression::Symbol(Parameter::new(name, index))
    }

    /// Check if this expression still refers to a free parameter.
    pub fn is_symbolic(&self) -> bool {
        matches!(self, ParameterExpression::Symbol(_))
    }

    /// The concrete value, if bound.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterExpression::Constant(v) => Some(*v),
            ParameterExpression::Symbol(_) => None,
        }
    }

    /// The referenced parameter, if symbolic.
    pub fn parameter(&self) -> Option<&Parameter> {
        match self {
            ParameterExpression::Symbol(p) => Some(p),
            ParameterExpression::Constant(_) => None,
        }
    }

    /// Substitute `values[index]` for a symbol, returning a new expression.
    ///
    /// Constants, and symbols whose index is outside `values`, are returned
    /// unchanged.
    pub fn bind(&self, values: &[f64]) -> Self {
        match self {
            ParameterExpression::Symbol(p) => values
                .get(p.index)
                .map_or_else(|| self.clone(), |v| ParameterExpression::Constant(*v)),
            ParameterExpression::Constant(_) => self.clone(),
        }
    }
}

impl fmt::Display for ParameterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterExpression::Constant(v) => write!(f, "{v}"),
            ParameterExpression::Symbol(p) => write!(f, "{p}"),
        }
    }
}

impl From<f64> for ParameterExpression {
    fn from(value: f64) -> Self {
        ParameterExpression::Constant(value)
    }
}

impl From<Parameter> for ParameterExpression {
    fn from(value: Parameter) -> Self {
        ParameterExpression::Symbol(value)
    }
}
