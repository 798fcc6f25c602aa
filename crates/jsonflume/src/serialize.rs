//! Shared text-formatting helpers for the encoder: JSON string escaping and
//! significant-digit floating-point formatting.

use alloc::{
    format,
    string::{String, ToString},
};
use core::fmt::Write as _;

/// Escape `value` and wrap it in double quotes.
///
/// The two-character escapes `\" \\ \b \f \n \r \t` are used where they
/// exist, `\u00XX` for the remaining control bytes, and everything else is
/// passed through unescaped.
pub(crate) fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Format a finite `value` with `digits` significant digits, matching C's
/// `%.{digits}g`: fixed notation for moderate exponents with trailing zeros
/// trimmed, scientific notation (`1.5e+300` style) otherwise.
pub(crate) fn format_significant(value: f64, digits: usize) -> String {
    debug_assert!(value.is_finite());
    let digits = digits.max(1);

    if value == 0.0 {
        return if value.is_sign_negative() {
            "-0".to_string()
        } else {
            "0".to_string()
        };
    }

    // Round to the requested number of significant digits first; the decimal
    // exponent used below must be the post-rounding one (9.99e2 at one digit
    // is 1e3, not 10e2).
    let sci = format!("{:.*e}", digits - 1, value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = mantissa
        .strip_prefix('-')
        .map_or(("", mantissa), |rest| ("-", rest));
    let mut digit_chars: String = mantissa.chars().filter(|c| *c != '.').collect();

    #[allow(clippy::cast_possible_wrap)]
    if exp >= -4 && exp < digits as i32 {
        let mut out = String::from(sign);
        if exp >= 0 {
            let int_len = (exp as usize) + 1;
            while digit_chars.len() < int_len {
                digit_chars.push('0');
            }
            out.push_str(&digit_chars[..int_len]);
            let frac = digit_chars[int_len..].trim_end_matches('0');
            if !frac.is_empty() {
                out.push('.');
                out.push_str(frac);
            }
        } else {
            out.push('0');
            let frac_digits = digit_chars.trim_end_matches('0');
            if !frac_digits.is_empty() {
                out.push('.');
                for _ in 0..(-exp - 1) {
                    out.push('0');
                }
                out.push_str(frac_digits);
            }
        }
        out
    } else {
        let mut out = String::from(sign);
        let mut chars = digit_chars.chars();
        if let Some(first) = chars.next() {
            out.push(first);
        }
        let rest: &str = chars.as_str();
        let rest = rest.trim_end_matches('0');
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let _ = write!(out, "e{}{:02}", if exp < 0 { '-' } else { '+' }, exp.abs());
        out
    }
}
