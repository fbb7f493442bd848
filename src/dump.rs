//! `var_dump`-style rendering of values and outcomes

use std::fmt::{self, Write};

use crate::{coerce::Coercion, power::*, value::*};

const FLOAT_PRECISION: usize = 14;

/// Format a float with 14 significant digits in the `%G` style.
///
/// Scientific notation is used for exponents below -4 or at least 14, and
/// always keeps one fractional digit (`1.0E+25`).
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "NAN".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF".into() } else { "-INF".into() };
    }
    // Negative zero prints as zero
    if f == 0.0 {
        return "0".into();
    }
    let sci = format!("{:.*e}", FLOAT_PRECISION - 1, f);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((mantissa, exp)) => (mantissa, exp.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= FLOAT_PRECISION as i32 {
        let mut mantissa = trim_fraction(mantissa).to_string();
        if !mantissa.contains('.') {
            mantissa.push_str(".0");
        }
        format!("{}E{}{}", mantissa, if exp < 0 { '-' } else { '+' }, exp.abs())
    } else {
        let decimals = (FLOAT_PRECISION as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{:.*}", decimals, f)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

pub fn number(n: Number) -> String {
    match n {
        Number::Int(i) => format!("int({})", i),
        Number::Float(f) => format!("float({})", format_float(f)),
    }
}

/// Render a value the way `var_dump` does, one line per scalar
pub fn value(value: &Value) -> String {
    let mut s = String::new();
    write_value(&mut s, value, 0).unwrap();
    s
}

fn write_value<W: Write>(w: &mut W, value: &Value, indent: usize) -> fmt::Result {
    let pad = " ".repeat(indent);
    match value {
        Value::Null => writeln!(w, "{}NULL", pad),
        Value::Bool(b) => writeln!(w, "{}bool({})", pad, b),
        Value::Int(i) => writeln!(w, "{}int({})", pad, i),
        Value::Float(f) => writeln!(w, "{}float({})", pad, format_float(*f)),
        Value::Str(bytes) => writeln!(
            w,
            "{}string({}) \"{}\"",
            pad,
            bytes.len(),
            String::from_utf8_lossy(bytes)
        ),
        Value::List(items) => {
            writeln!(w, "{}array({}) {{", pad, items.len())?;
            for (i, item) in items.iter().enumerate() {
                writeln!(w, "{}  [{}]=>", pad, i)?;
                write_value(w, item, indent + 2)?;
            }
            writeln!(w, "{}}}", pad)
        }
        Value::Object(object) => {
            writeln!(w, "{}object({})#{} (0) {{", pad, object.class, object.id)?;
            writeln!(w, "{}}}", pad)
        }
        Value::Resource(handle) => writeln!(
            w,
            "{}resource({}) of type ({})",
            pad, handle.id, handle.type_name
        ),
    }
}

pub fn coercion(coercion: &Coercion) -> String {
    match coercion {
        Coercion::Numeric(n) => format!("float({})\n", format_float(*n)),
        Coercion::NumericWithWarning(n, kind) => {
            format!("Warning: {}\nfloat({})\n", kind, format_float(*n))
        }
        Coercion::Fatal(kind) => format!("Fatal error: {}\n", kind),
    }
}

/// Render an outcome: its warnings, then either the number or the fatal error
pub fn outcome(outcome: &Outcome) -> String {
    let mut s = String::new();
    for warning in &outcome.warnings {
        s.push_str(&format!("Warning: {}\n", warning.kind));
    }
    match outcome.result {
        Ok(n) => s.push_str(&number(n)),
        Err(kind) => s.push_str(&format!("Fatal error: {}", kind)),
    }
    s.push('\n');
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::{ErrorKind, WarningKind};

    #[test]
    fn floats() {
        assert_eq!(format_float(1.0), "1");
        assert_eq!(format_float(20.3), "20.3");
        assert_eq!(format_float(-2.5), "-2.5");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.00001), "1.0E-5");
        assert_eq!(format_float(1.23456789e-9), "1.23456789E-9");
        assert_eq!(format_float(123456789000.0), "123456789000");
        assert_eq!(format_float(1e25), "1.0E+25");
        assert_eq!(format_float(1.0 / 3.0), "0.33333333333333");
        assert_eq!(format_float(2.0 / 3.0), "0.66666666666667");
        assert_eq!(format_float(99999999999999.9), "1.0E+14");
        assert_eq!(format_float(f64::INFINITY), "INF");
        assert_eq!(format_float(f64::NEG_INFINITY), "-INF");
        assert_eq!(format_float(f64::NAN), "NAN");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(-0.0), "0");
    }

    #[test]
    fn scalars() {
        assert_eq!(value(&Value::Null), "NULL\n");
        assert_eq!(value(&Value::Bool(true)), "bool(true)\n");
        assert_eq!(value(&Value::Int(-2345)), "int(-2345)\n");
        assert_eq!(value(&Value::string("abcxyz")), "string(6) \"abcxyz\"\n");
        assert_eq!(
            value(&Value::Resource(ResourceHandle {
                id: 5,
                type_name: "stream"
            })),
            "resource(5) of type (stream)\n"
        );
    }

    #[test]
    fn nested_lists() {
        let list = Value::list(vec![Value::Int(1), Value::list(vec![])]);
        assert_eq!(
            value(&list),
            "array(2) {\n  [0]=>\n  int(1)\n  [1]=>\n  array(0) {\n  }\n}\n"
        );
        assert_eq!(
            value(&Value::object("classA", 1)),
            "object(classA)#1 (0) {\n}\n"
        );
    }

    #[test]
    fn outcomes() {
        let ok = Outcome {
            result: Ok(Number::Float(20.3)),
            warnings: vec![Warning {
                kind: WarningKind::NonNumericOperand,
                operand: Operand::Exponent,
            }],
        };
        assert_eq!(
            outcome(&ok),
            "Warning: A non-numeric value encountered\nfloat(20.3)\n"
        );
        let fatal = Outcome {
            result: Err(ErrorKind::UnsupportedOperandType),
            warnings: Vec::new(),
        };
        assert_eq!(outcome(&fatal), "Fatal error: Unsupported operand types\n");
        assert_eq!(
            coercion(&Coercion::Fatal(ErrorKind::UnsupportedOperandType)),
            "Fatal error: Unsupported operand types\n"
        );
        assert_eq!(number(Number::Int(1024)), "int(1024)");
    }
}
