use derive_more::Display;

use crate::{numeric::parse_numeric_prefix, value::*};

/// The number substituted for an aggregate operand
pub const AGGREGATE_SENTINEL: f64 = 1.0;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    #[display(fmt = "A non-numeric value encountered")]
    NonNumericOperand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ErrorKind {
    #[error("Unsupported operand types")]
    UnsupportedOperandType,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coercion {
    Numeric(f64),
    NumericWithWarning(f64, WarningKind),
    Fatal(ErrorKind),
}

impl Coercion {
    /// The number this coercion produced, if it did not fail
    pub fn number(&self) -> Option<f64> {
        match *self {
            Coercion::Numeric(n) | Coercion::NumericWithWarning(n, _) => Some(n),
            Coercion::Fatal(_) => None,
        }
    }
    pub fn warning(&self) -> Option<WarningKind> {
        match *self {
            Coercion::NumericWithWarning(_, kind) => Some(kind),
            _ => None,
        }
    }
    pub fn into_result(self) -> Result<f64, ErrorKind> {
        match self {
            Coercion::Numeric(n) | Coercion::NumericWithWarning(n, _) => Ok(n),
            Coercion::Fatal(kind) => Err(kind),
        }
    }
}

/// Coerce a value to a numeric operand.
///
/// Numeric-looking kinds convert silently, lists convert to
/// [`AGGREGATE_SENTINEL`] with a warning, and objects are fatal.
pub fn coerce(value: &Value) -> Coercion {
    match value {
        Value::Int(i) => Coercion::Numeric(*i as f64),
        Value::Float(f) => Coercion::Numeric(*f),
        Value::Null => Coercion::Numeric(0.0),
        Value::Bool(b) => Coercion::Numeric(if *b { 1.0 } else { 0.0 }),
        Value::Str(bytes) => Coercion::Numeric(parse_numeric_prefix(bytes).0),
        Value::List(_) => {
            Coercion::NumericWithWarning(AGGREGATE_SENTINEL, WarningKind::NonNumericOperand)
        }
        Value::Object(_) => Coercion::Fatal(ErrorKind::UnsupportedOperandType),
        Value::Resource(handle) => Coercion::Numeric(f64::from(handle.id)),
    }
}
