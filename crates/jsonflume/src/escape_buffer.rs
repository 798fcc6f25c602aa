//! Accumulator for the four hexadecimal digits of a `\uXXXX` escape.
//!
//! The [`UnicodeEscapeBuffer`] type folds ASCII hex digits (`0-9`, `A-F`,
//! `a-f`) into a UTF-16 code unit as they arrive, and yields that unit once
//! the fourth digit is provided. Surrogate pairing is the caller's job: a
//! yielded unit may be a high or low surrogate half. After yielding, the
//! accumulator resets automatically to begin a new escape.

use crate::error::ParseErrorKind;

/// Accumulates exactly four hexadecimal digits into a UTF-16 code unit.
#[derive(Debug)]
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    /// Discards any accumulated digits.
    pub(crate) fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    /// Convert a single ASCII hex digit into its 0..=15 value.
    #[inline]
    fn hex_val(c: char) -> Option<u16> {
        match c {
            '0'..='9' => Some((c as u16) - ('0' as u16)),
            'a'..='f' => Some((c as u16) - ('a' as u16) + 10),
            'A'..='F' => Some((c as u16) - ('A' as u16) + 10),
            _ => None,
        }
    }

    /// Feeds one character of the escape sequence.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been provided.
    /// - Returns `Ok(Some(unit))` on the fourth digit, resetting the
    ///   accumulator.
    /// - Returns `Err(IllegalUnicodeEscapeChar)` if `c` is not an ASCII hex
    ///   digit.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u16>, ParseErrorKind> {
        let Some(d) = Self::hex_val(c) else {
            return Err(ParseErrorKind::IllegalUnicodeEscapeChar(c));
        };

        debug_assert!(self.len < 4);
        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}
