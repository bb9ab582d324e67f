//! Decoding of numeric literal text.
//!
//! The lexer only validates numeric literals; values are computed from the
//! raw text when the parser builds literal nodes.

use num_bigint::BigInt;
use num_traits::{Num, ToPrimitive};

/// 2^53 - 1, the largest integer a double holds exactly.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

fn strip_separators(raw: &str) -> std::borrow::Cow<'_, str> {
    if raw.contains('_') {
        raw.replace('_', "").into()
    } else {
        raw.into()
    }
}

/// Split a radix prefix off an integer literal.
fn split_radix(digits: &str) -> (u32, &str) {
    let bytes = digits.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        match bytes[1] {
            b'x' | b'X' => return (16, &digits[2..]),
            b'o' | b'O' => return (8, &digits[2..]),
            b'b' | b'B' => return (2, &digits[2..]),
            _ => {}
        }
    }
    (10, digits)
}

/// Whether the literal uses the legacy octal form `017`. Literals such as
/// `089` have a leading zero but are decimal.
pub fn is_legacy_octal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() > 1
        && bytes[0] == b'0'
        && bytes[1..].iter().all(|b| matches!(b, b'0'..=b'7'))
}

fn radix_to_f64(digits: &str, radix: u32) -> f64 {
    if let Ok(value) = u64::from_str_radix(digits, radix) {
        return value as f64;
    }
    BigInt::from_str_radix(digits, radix)
        .ok()
        .and_then(|value| value.to_f64())
        .unwrap_or(f64::INFINITY)
}

/// The value of a numeric literal. Invalid text yields NaN; the lexer only
/// hands over validated literals.
pub fn parse_number(raw: &str) -> f64 {
    let text = strip_separators(raw);
    let text = text.as_ref();
    if is_legacy_octal(text) {
        return radix_to_f64(&text[1..], 8);
    }
    let (radix, digits) = split_radix(text);
    if radix != 10 {
        return radix_to_f64(digits, radix);
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

/// The value of a BigInt literal, with or without its `n` suffix.
pub fn parse_bigint(raw: &str) -> Option<BigInt> {
    let text = strip_separators(raw);
    let text = text.strip_suffix('n').unwrap_or(&text);
    let (radix, digits) = split_radix(text);
    if digits.is_empty() {
        return None;
    }
    BigInt::from_str_radix(digits, radix).ok()
}

/// A BigInt literal converted to a double. Values above 2^53 - 1 cannot be
/// represented exactly and yield 0.
pub fn bigint_to_f64(raw: &str) -> f64 {
    match parse_bigint(raw).and_then(|value| value.to_u64()) {
        Some(value) if value <= MAX_SAFE_INTEGER => value as f64,
        _ => 0.0,
    }
}
