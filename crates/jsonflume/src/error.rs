use thiserror::Error;

/// Classified reason for a decode failure.
///
/// The `Display` strings are part of the stable contract: callers match on
/// substrings such as `"Unexpected character"` or `"Unterminated object"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// A character that cannot start or continue the construct expected at
    /// the current position.
    #[error("Unexpected character ({0})")]
    UnexpectedCharacter(char),
    /// A second top-level value after a complete document.
    ///
    /// Kept distinct from [`ParseErrorKind::UnexpectedCharacter`] for
    /// compatibility with existing callers.
    #[error("Unexpected state")]
    UnexpectedState,
    /// End of input while an object was still open.
    #[error("Unterminated object")]
    UnterminatedObject,
    /// End of input while an array was still open.
    #[error("Unterminated array")]
    UnterminatedArray,
    /// End of input inside a string literal, including mid-escape.
    #[error("Unterminated string")]
    UnterminatedString,
    /// A backslash followed by a character that does not form an escape.
    #[error("Illegal escape sequence (\\{0})")]
    IllegalEscapeSequence(char),
    /// A non-hexadecimal character inside a `\uXXXX` escape.
    #[error("Illegal character in unicode sequence (\\{0})")]
    IllegalUnicodeEscapeChar(char),
    /// A numeric literal that does not match the JSON number grammar.
    #[error("Invalid number")]
    InvalidNumber,
    /// An object closed right after a key, with no value.
    #[error("Missing value")]
    MissingValue,
    /// A single string or number token exceeded the configured maximum size.
    #[error("Too many characters in a single string or number")]
    TooManyCharacters,
    /// Combined object/array nesting exceeded the configured maximum depth.
    #[error("Too many nested objects and/or arrays")]
    TooManyNestedContainers,
}

/// Error returned by [`StreamingParser::parse`](crate::StreamingParser::parse).
///
/// Carries the position of the offending character. `line` starts at 1;
/// `column` counts characters on the current line, also starting at 1.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind} at line {line}, character {column}")]
pub struct ParseError {
    /// The classified failure reason.
    pub kind: ParseErrorKind,
    /// 1-based line of the offense.
    pub line: usize,
    /// 1-based character position within the line.
    pub column: usize,
}
