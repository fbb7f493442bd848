use std::{convert::TryFrom, fmt};

use derive_more::Display;

use crate::{coerce::*, value::Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    #[display(fmt = "base")]
    Base,
    #[display(fmt = "exponent")]
    Exponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub operand: Operand,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.operand)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result: Result<Number, ErrorKind>,
    pub warnings: Vec<Warning>,
}

impl Outcome {
    pub fn is_fatal(&self) -> bool {
        self.result.is_err()
    }
}

/// Raise `base` to the power `exp` after coercing both operands.
///
/// Both operands are always coerced so that each contributes its warnings.
/// If both are fatal the base's error is reported.
pub fn power(base: &Value, exp: &Value) -> Outcome {
    let coerced = [
        (Operand::Base, coerce(base)),
        (Operand::Exponent, coerce(exp)),
    ];
    let warnings = coerced
        .iter()
        .filter_map(|(operand, coercion)| {
            coercion.warning().map(|kind| Warning {
                kind,
                operand: *operand,
            })
        })
        .collect();
    let result = match (coerced[0].1.into_result(), coerced[1].1.into_result()) {
        (Err(kind), _) | (_, Err(kind)) => Err(kind),
        (Ok(b), Ok(e)) => Ok(pow_numbers(b, e)),
    };
    Outcome { result, warnings }
}

/// Integral operands with a non-negative exponent stay exact while the result
/// fits in an `i64`.
pub fn pow_numbers(base: f64, exp: f64) -> Number {
    if let (Some(b), Some(e)) = (as_exact_int(base), as_exact_int(exp)) {
        // Exponents past u32 only fit for these bases
        match (b, e) {
            (_, 0) | (1, _) if e >= 0 => return Number::Int(1),
            (0, _) if e > 0 => return Number::Int(0),
            (-1, _) if e > 0 => return Number::Int(if e % 2 == 0 { 1 } else { -1 }),
            _ => {}
        }
        if let Ok(e) = u32::try_from(e) {
            if let Some(n) = b.checked_pow(e) {
                return Number::Int(n);
            }
        }
    }
    Number::Float(base.powf(exp))
}

fn as_exact_int(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric(outcome: &Outcome) -> f64 {
        outcome.result.expect("numeric outcome").as_f64()
    }

    #[test]
    fn zero_exponent_is_one() {
        let outcome = power(&Value::Float(20.3), &Value::Int(0));
        assert_eq!(outcome.result, Ok(Number::Float(1.0)));
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn negative_exponent_is_reciprocal() {
        let outcome = power(&Value::Float(20.3), &Value::Int(-2345));
        let n = numeric(&outcome);
        assert!(n.is_finite());
        assert!(n >= 0.0 && n < 1.0);

        let small = numeric(&power(&Value::Float(20.3), &Value::Int(-2)));
        assert!(small > 0.0 && small < 1.0);
    }

    #[test]
    fn object_exponent_is_fatal() {
        let outcome = power(&Value::Float(20.3), &Value::object("classA", 1));
        assert_eq!(outcome.result, Err(ErrorKind::UnsupportedOperandType));
        assert!(outcome.is_fatal());
    }

    #[test]
    fn both_operands_contribute_warnings() {
        let outcome = power(&Value::list(vec![]), &Value::list(vec![Value::Int(2)]));
        assert_eq!(outcome.result, Ok(Number::Int(1)));
        assert_eq!(
            outcome.warnings,
            vec![
                Warning {
                    kind: WarningKind::NonNumericOperand,
                    operand: Operand::Base
                },
                Warning {
                    kind: WarningKind::NonNumericOperand,
                    operand: Operand::Exponent
                },
            ]
        );
    }

    #[test]
    fn warnings_survive_fatal() {
        let outcome = power(&Value::list(vec![]), &Value::object("classA", 1));
        assert!(outcome.is_fatal());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].operand, Operand::Base);
    }

    #[test]
    fn fatal_base_still_coerces_exponent() {
        let outcome = power(&Value::object("A", 1), &Value::list(vec![]));
        assert_eq!(outcome.result, Err(ErrorKind::UnsupportedOperandType));
        assert_eq!(
            outcome.warnings,
            vec![Warning {
                kind: WarningKind::NonNumericOperand,
                operand: Operand::Exponent
            }]
        );
    }

    #[test]
    fn list_exponent_uses_sentinel() {
        let outcome = power(&Value::Float(20.3), &Value::list(vec![]));
        assert_eq!(outcome.result, Ok(Number::Float(20.3)));
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[test]
    fn integral_operands_stay_exact() {
        assert_eq!(pow_numbers(2.0, 10.0), Number::Int(1024));
        assert_eq!(pow_numbers(-3.0, 3.0), Number::Int(-27));
        assert_eq!(pow_numbers(0.0, 0.0), Number::Int(1));
        assert_eq!(pow_numbers(2.0, -1.0), Number::Float(0.5));
        assert_eq!(pow_numbers(2.0, 64.0), Number::Float(2f64.powi(64)));
        assert_eq!(pow_numbers(1.0, 5e9), Number::Int(1));
        assert_eq!(pow_numbers(0.0, 5e9), Number::Int(0));
        assert_eq!(pow_numbers(-1.0, 5e9), Number::Int(1));
        assert_eq!(pow_numbers(-1.0, 5e9 + 1.0), Number::Int(-1));
        assert_eq!(pow_numbers(1.0, -5e9), Number::Float(1.0));
        assert_eq!(pow_numbers(2.0, 5e9), Number::Float(f64::INFINITY));
        assert_eq!(
            power(&Value::string("3"), &Value::Bool(true)).result,
            Ok(Number::Int(3))
        );
    }

    #[test]
    fn domain_errors_are_floats() {
        match pow_numbers(-8.0, 1.0 / 3.0) {
            Number::Float(f) => assert!(f.is_nan()),
            other => panic!("expected NaN, got {:?}", other),
        }
        assert_eq!(pow_numbers(0.0, -1.0), Number::Float(f64::INFINITY));
        assert_eq!(pow_numbers(20.3, 2147483647.0), Number::Float(f64::INFINITY));
    }

    #[test]
    fn exponent_one_is_identity() {
        let values = vec![
            Value::Int(-2345),
            Value::Float(2.5),
            Value::Float(-2.5),
            Value::Float(1.23456789e-9),
            Value::Null,
            Value::Bool(true),
            Value::string("12.3456789000e10"),
            Value::string("abc"),
        ];
        for value in values {
            let expected = coerce(&value).number().expect("numeric coercion");
            assert_eq!(numeric(&power(&value, &Value::Int(1))), expected);
        }
    }
}
