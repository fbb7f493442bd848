//! Leading-prefix numeric string parsing.
//!
//! Nothing is skipped: the prefix must start at the first byte. A prefix is an
//! optional sign, digits, an optional `.` followed by digits, and an optional
//! exponent. At least one mantissa digit must be present, and an exponent
//! marker only counts when a digit follows it.

/// Parse the longest numeric prefix of `bytes`.
///
/// Returns the value and the number of bytes consumed. When no prefix exists
/// the result is `(0.0, 0)`.
pub fn parse_numeric_prefix(bytes: &[u8]) -> (f64, usize) {
    let len = prefix_len(bytes);
    if len == 0 {
        return (0.0, 0);
    }
    // The prefix is pure ASCII by construction
    let text = std::str::from_utf8(&bytes[..len]).unwrap_or("0");
    (text.parse().unwrap_or(0.0), len)
}

/// Whether the entire input is a single numeric literal.
pub fn is_numeric(bytes: &[u8]) -> bool {
    !bytes.is_empty() && prefix_len(bytes) == bytes.len()
}

fn digits_from(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

fn prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }
    let int_digits = digits_from(bytes, i);
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = digits_from(bytes, i + 1);
        if int_digits > 0 || frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }
    if matches!(bytes.get(i), Some(b'e') | Some(b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exp_digits = digits_from(bytes, j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}
