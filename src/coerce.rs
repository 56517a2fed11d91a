// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lenient string-to-number coercion for form and query values.

use serde::Deserialize;

/// Coerce a string to a number.
///
/// Surrounding whitespace is ignored and an empty string is zero. Accepts
/// decimal literals (with optional exponent), `0x`/`0o`/`0b` integers and
/// signed `Infinity`. Anything else is `NaN`.
pub fn to_number(raw: &str) -> f64 {
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // `str::parse` also accepts "inf" and "nan" spellings; only plain literals count here.
    let is_literal = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !is_literal {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// End index for taking a prefix of `len` items given a raw limit.
///
/// The limit is coerced with [`to_number`] and truncated toward zero; `NaN`
/// counts as zero and a negative limit counts back from the end.
pub fn prefix_end(limit: &str, len: usize) -> usize {
    let n = to_number(limit);
    if n.is_nan() {
        return 0;
    }
    let n = n.trunc();
    if n < 0.0 {
        let back = -n;
        if back >= len as f64 {
            0
        } else {
            len - back as usize
        }
    } else if n >= len as f64 {
        len
    } else {
        n as usize
    }
}

/// A numeric field that may arrive as a JSON number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Coerce to a whole number, truncating toward zero.
    ///
    /// Returns `None` when the value is not a finite number.
    pub fn to_integer(&self) -> Option<i64> {
        let n = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => to_number(s),
        };
        // The upper bound is exclusive: 2^63 itself does not fit.
        if n.is_finite() && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Some(n.trunc() as i64)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number("30"), 30.0);
        assert_eq!(to_number("  12.5 "), 12.5);
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("1e2"), 100.0);
        assert_eq!(to_number("0x1A"), 26.0);
        assert_eq!(to_number("0b101"), 5.0);
        assert_eq!(to_number("-Infinity"), f64::NEG_INFINITY);
        assert!(to_number("abc").is_nan());
        assert!(to_number("inf").is_nan());
        assert!(to_number("NaN").is_nan());
        assert!(to_number("3 apples").is_nan());
        assert!(to_number("0xZZ").is_nan());
    }

    #[test]
    fn test_prefix_end() {
        assert_eq!(prefix_end("2", 5), 2);
        assert_eq!(prefix_end("10", 5), 5);
        assert_eq!(prefix_end("1.9", 5), 1);
        assert_eq!(prefix_end("0", 5), 0);
        assert_eq!(prefix_end("abc", 5), 0);
        assert_eq!(prefix_end("-1", 5), 4);
        assert_eq!(prefix_end("-9", 5), 0);
        assert_eq!(prefix_end("Infinity", 5), 5);
    }

    #[test]
    fn test_numeric_to_integer() {
        assert_eq!(Numeric::Number(30.0).to_integer(), Some(30));
        assert_eq!(Numeric::Number(-2.7).to_integer(), Some(-2));
        assert_eq!(Numeric::Text("45".into()).to_integer(), Some(45));
        assert_eq!(Numeric::Text("".into()).to_integer(), Some(0));
        assert_eq!(Numeric::Text("ten".into()).to_integer(), None);
        assert_eq!(Numeric::Text("Infinity".into()).to_integer(), None);
    }

    #[test]
    fn test_numeric_deserializes_from_either_form() {
        let n: Numeric = serde_json::from_str("20").unwrap();
        assert_eq!(n, Numeric::Number(20.0));
        let t: Numeric = serde_json::from_str("\"20\"").unwrap();
        assert_eq!(t, Numeric::Text("20".to_string()));
    }
}
