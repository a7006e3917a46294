//! Numeric coercion and float rendering.

use std::fmt;

/// A coerced numeric operand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Widen to a float.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Mixed int/float arithmetic widens the same way the host does"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }

    /// Truncate to an integer the way the host's integer cast does.
    ///
    /// Non-finite floats become 0; out-of-range floats saturate.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Truncation toward zero is the integer cast semantics"
    )]
    pub fn as_i64(self) -> i64 {
        match self {
            Number::Int(n) => n,
            Number::Float(f) if f.is_finite() => f as i64,
            Number::Float(_) => 0,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(n) => n == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Float(x) => f.write_str(&float_to_string(*x)),
        }
    }
}

/// Parse a numeric string.
///
/// Accepts surrounding whitespace, an optional sign, digits with an
/// optional fraction (`.5` and `5.` included), and an optional exponent.
/// Integral text that fits in `i64` yields `Number::Int`; everything else
/// numeric yields `Number::Float`. Anything else (hex, `inf`, `nan`,
/// underscores, trailing garbage) is not numeric.
pub fn parse_numeric(text: &str) -> Option<Number> {
    let trimmed = text.trim_matches(|c: char| matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c'));
    let bytes = trimmed.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut integral = true;
    let mut frac_digits = 0;
    if pos < bytes.len() && bytes[pos] == b'.' {
        integral = false;
        pos += 1;
        let frac_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        frac_digits = pos - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        integral = false;
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let exp_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if pos == exp_start {
            return None;
        }
    }

    if pos != bytes.len() {
        return None;
    }

    if integral {
        if let Ok(n) = trimmed.parse::<i64>() {
            return Some(Number::Int(n));
        }
    }
    trimmed.parse::<f64>().ok().map(Number::Float)
}

/// Host string conversion of a float.
///
/// Integral values below 1e15 print without a fraction (`2`), very large
/// or very small magnitudes use `1.0E+25` notation, everything else prints
/// in shortest round-trip form.
pub fn float_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e15).contains(&magnitude) {
        return scientific(value);
    }
    if value.fract() == 0.0 {
        return format!("{value:.0}");
    }
    format!("{value}")
}

/// Float rendered as source text that reads back as a float.
///
/// Same as [`float_to_string`] but integral values keep a `.0` suffix so
/// `2.0` is not re-read as the integer `2`.
pub fn float_literal(value: f64) -> String {
    let text = float_to_string(value);
    if text.contains(['.', 'E', 'N', 'I']) {
        text
    } else {
        format!("{text}.0")
    }
}

fn scientific(value: f64) -> String {
    let raw = format!("{value:e}");
    let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
    let mantissa = if mantissa.contains('.') {
        mantissa.to_string()
    } else {
        format!("{mantissa}.0")
    };
    match exponent.strip_prefix('-') {
        Some(digits) => format!("{mantissa}E-{digits}"),
        None => format!("{mantissa}E+{exponent}"),
    }
}
