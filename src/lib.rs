//! Numeric coercion of dynamically-typed operands for exponentiation.
//!
//! [`coerce`] maps every [`Value`] kind to a numeric operand, a warning, or a
//! fatal error. [`power`] coerces both operands and raises one to the other.
//! The remaining modules read operand fixtures, manage resource handles and
//! render results the way `var_dump` does.

pub mod coerce;
pub mod config;
pub mod dump;
pub mod fixture;
pub mod numeric;
pub mod power;
pub mod resource;
pub mod runner;
pub mod value;

pub use crate::{
    coerce::{coerce, Coercion, ErrorKind, WarningKind},
    power::{power, Number, Outcome},
    value::{Kind, Value},
};
