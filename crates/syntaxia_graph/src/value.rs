// SPDX-License-Identifier: MIT OR Apache-2.0
//! Runtime values produced by evaluation.

use std::fmt;

/// A runtime value. Only ever produced by evaluation, never stored in the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Floating point number
    Number(f64),
    /// Text
    Text(String),
}

impl Value {
    /// Interpret a literal by its surface form: a number if it parses as one,
    /// text otherwise.
    pub fn parse_literal(literal: &str) -> Self {
        match literal.parse::<f64>() {
            Ok(n) => Self::Number(n),
            Err(_) => Self::Text(literal.to_string()),
        }
    }

    /// The number, if this is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Equality used by ifElse conditions. Values of different kinds are never
    /// equal.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Number(l), Self::Number(r)) => l == r,
            (Self::Text(l), Self::Text(r)) => l == r,
            _ => false,
        }
    }

    /// Name of the value kind, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "text",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
