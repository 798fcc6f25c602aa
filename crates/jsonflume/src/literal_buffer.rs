//! Incremental matcher for keyword tokens.
//!
//! Besides `true`, `false` and `null`, the decoder accepts the bare
//! numeric-token extensions `nan`, `infinity` and `-infinity`. The matcher
//! carries the ambiguity of the shared `n` prefix (`null` vs `nan`) until the
//! second character resolves it.

/// Which literal a completed match stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LiteralValue {
    True,
    False,
    Null,
    Nan,
    Infinity,
    MinusInfinity,
}

/// What happened after feeding one more character into the matcher.
pub(crate) enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* consumed the last byte of the literal.
    Done(LiteralValue),
    /// Character did **not** continue any candidate literal.
    Reject,
}

const T_CANDIDATES: &[(&str, LiteralValue)] = &[("true", LiteralValue::True)];
const F_CANDIDATES: &[(&str, LiteralValue)] = &[("false", LiteralValue::False)];
const N_CANDIDATES: &[(&str, LiteralValue)] =
    &[("null", LiteralValue::Null), ("nan", LiteralValue::Nan)];
const I_CANDIDATES: &[(&str, LiteralValue)] = &[("infinity", LiteralValue::Infinity)];
const NEG_I_CANDIDATES: &[(&str, LiteralValue)] = &[("-infinity", LiteralValue::MinusInfinity)];

/// Candidate literals still compatible with the input seen so far, plus the
/// number of characters already matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ExpectedLiteralBuffer {
    candidates: &'static [(&'static str, LiteralValue)],
    pos: usize,
}

impl ExpectedLiteralBuffer {
    /// Start matching after the *first* character (`t`, `f`, `n`, or `i`).
    pub(crate) fn new(first: char) -> Self {
        let candidates = match first {
            't' => T_CANDIDATES,
            'f' => F_CANDIDATES,
            'n' => N_CANDIDATES,
            'i' => I_CANDIDATES,
            _ => &[],
        };
        ExpectedLiteralBuffer { candidates, pos: 1 }
    }

    /// Start matching `-infinity` with the sign and `i` already consumed.
    ///
    /// Used when the number lexer has read a lone `-` and then sees `i`.
    pub(crate) fn negative_infinity() -> Self {
        ExpectedLiteralBuffer {
            candidates: NEG_I_CANDIDATES,
            pos: 2,
        }
    }

    /// Give the matcher the next input character and learn what to do next.
    pub(crate) fn step(&mut self, c: char) -> Step {
        for (i, (text, value)) in self.candidates.iter().enumerate() {
            let bytes = text.as_bytes();
            if bytes.get(self.pos).is_some_and(|b| *b as char == c) {
                if self.pos + 1 == bytes.len() {
                    return Step::Done(*value);
                }
                // Narrow to the candidate that matched; at most one can,
                // since `null`/`nan` diverge at index 1.
                self.candidates = core::slice::from_ref(&self.candidates[i]);
                self.pos += 1;
                return Step::NeedMore;
            }
        }
        Step::Reject
    }
}
