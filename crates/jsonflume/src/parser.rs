//! The streaming JSON parser implementation.
//!
//! This module provides the push-based [`StreamingParser`], capable of
//! processing input in chunks and delivering events to a [`Visitor`] as
//! tokens and structural boundaries are recognized. Tokens may split across
//! chunk boundaries; the parser buffers the in-flight token and resumes.

use alloc::{string::String, vec, vec::Vec};

use crate::{
    error::{ParseError, ParseErrorKind},
    escape_buffer::UnicodeEscapeBuffer,
    literal_buffer::{ExpectedLiteralBuffer, LiteralValue, Step},
    options::ParserOptions,
    visitor::Visitor,
};

/// One entry on the parser's state stack.
///
/// The bottom entry is always `TopLevel`; one entry is pushed per open
/// container, so the current nesting depth is `frames.len() - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    TopLevel { has_value: bool },
    /// `first` distinguishes `{}` (allowed) from `{"a":1,}` (rejected).
    InObjectAwaitingKey { first: bool },
    /// Entered once a key completes; `colon_seen` flips on `:`.
    InObjectAwaitingValue { colon_seen: bool },
    InObjectAwaitingComma,
    /// `first` distinguishes `[]` (allowed) from `[1,]` (rejected).
    InArrayAwaitingValue { first: bool },
    InArrayAwaitingComma,
}

/// Lexical state of the token currently being accumulated, if any.
#[derive(Debug)]
enum Lex {
    Idle,
    Str(StrLex),
    Number,
    Literal(ExpectedLiteralBuffer),
}

#[derive(Debug)]
enum StrLex {
    Plain,
    Escape,
    Unicode(UnicodeEscapeBuffer),
}

const REPLACEMENT: char = '\u{FFFD}';

/// The streaming JSON parser.
///
/// `StreamingParser` is fed partial or complete JSON input in chunks via
/// [`parse`](StreamingParser::parse), and pushes events to a caller-supplied
/// [`Visitor`]. The visitor is borrowed only for the duration of each call.
///
/// # Examples
///
/// ```rust
/// use jsonflume::{ParserOptions, StreamingParser, Visitor};
///
/// #[derive(Default)]
/// struct Nulls(usize);
///
/// impl Visitor for Nulls {
///     fn null(&mut self) {
///         self.0 += 1;
///     }
/// }
///
/// let mut parser = StreamingParser::new(ParserOptions::default());
/// let mut nulls = Nulls::default();
/// parser.parse("[null, nu", false, &mut nulls).unwrap();
/// parser.parse("ll]", true, &mut nulls).unwrap();
/// assert_eq!(nulls.0, 2);
/// ```
#[derive(Debug)]
pub struct StreamingParser {
    options: ParserOptions,
    frames: Vec<Frame>,
    lex: Lex,
    /// Decoded content of the in-flight string/number/keyword token.
    token: String,
    /// Completed member key, delivered right before its value's event.
    pending_key: Option<String>,
    /// High surrogate of a `\uXXXX` escape awaiting its low half.
    pending_high_surrogate: Option<u16>,
    line: usize,
    column: usize,
    failed: Option<ParseError>,
}

impl Default for StreamingParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl StreamingParser {
    /// Creates a new `StreamingParser` with the given options.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self {
            options,
            frames: vec![Frame::TopLevel { has_value: false }],
            lex: Lex::Idle,
            token: String::new(),
            pending_key: None,
            pending_high_surrogate: None,
            line: 1,
            column: 1,
            failed: None,
        }
    }

    /// Feeds a chunk of JSON text, pushing events to `visitor` as tokens and
    /// structural boundaries complete. Pass `is_final = true` with the last
    /// chunk (an empty final chunk is fine) so the parser can complete a
    /// trailing token and check for unterminated constructs.
    ///
    /// # Errors
    ///
    /// On the first offense, the visitor's
    /// [`exception`](Visitor::exception) callback fires exactly once and the
    /// same [`ParseError`] is returned. The session is then failed
    /// permanently: later calls return the same error without delivering
    /// further events.
    pub fn parse<V: Visitor + ?Sized>(
        &mut self,
        chunk: &str,
        is_final: bool,
        visitor: &mut V,
    ) -> Result<(), ParseError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }

        for ch in chunk.chars() {
            if let Err(kind) = self.step(ch, visitor) {
                return Err(self.fail(kind, visitor));
            }
            self.advance(ch);
        }

        if is_final {
            if let Err(kind) = self.finish(visitor) {
                return Err(self.fail(kind, visitor));
            }
        }

        Ok(())
    }

    /// Returns the parser to its initial state so it can decode a new
    /// document, keeping allocated capacity.
    pub fn reset(&mut self) {
        self.frames.clear();
        self.frames.push(Frame::TopLevel { has_value: false });
        self.lex = Lex::Idle;
        self.token.clear();
        self.pending_key = None;
        self.pending_high_surrogate = None;
        self.line = 1;
        self.column = 1;
        self.failed = None;
    }

    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }

    fn fail<V: Visitor + ?Sized>(&mut self, kind: ParseErrorKind, visitor: &mut V) -> ParseError {
        let err = ParseError {
            kind,
            line: self.line,
            column: self.column,
        };
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        visitor.exception(&err);
        self.failed = Some(err.clone());
        err
    }

    fn step<V: Visitor + ?Sized>(
        &mut self,
        ch: char,
        visitor: &mut V,
    ) -> Result<(), ParseErrorKind> {
        match self.lex {
            Lex::Idle => self.step_idle(ch, visitor),
            Lex::Str(_) => self.step_string(ch, visitor),
            Lex::Number => self.step_number(ch, visitor),
            Lex::Literal(_) => self.step_literal(ch, visitor),
        }
    }

    // ----------------------------------------------------------------------
    // Structural dispatch (between tokens)
    // ----------------------------------------------------------------------

    fn step_idle<V: Visitor + ?Sized>(
        &mut self,
        ch: char,
        visitor: &mut V,
    ) -> Result<(), ParseErrorKind> {
        if ch.is_ascii_whitespace() {
            return Ok(());
        }

        let top = *self.frames.last().unwrap_or(&Frame::TopLevel { has_value: false });
        match top {
            Frame::TopLevel { has_value: false }
            | Frame::InObjectAwaitingValue { colon_seen: true }
            | Frame::InArrayAwaitingValue { .. } => self.step_value_start(ch, visitor),

            Frame::TopLevel { has_value: true } => Err(ParseErrorKind::UnexpectedState),

            Frame::InObjectAwaitingKey { first } => match ch {
                '"' => {
                    self.token.clear();
                    self.lex = Lex::Str(StrLex::Plain);
                    Ok(())
                }
                '}' if first => self.close_object(visitor),
                _ => Err(ParseErrorKind::UnexpectedCharacter(ch)),
            },

            Frame::InObjectAwaitingValue { colon_seen: false } => match ch {
                ':' => {
                    if let Some(top) = self.frames.last_mut() {
                        *top = Frame::InObjectAwaitingValue { colon_seen: true };
                    }
                    Ok(())
                }
                '}' => Err(ParseErrorKind::MissingValue),
                _ => Err(ParseErrorKind::UnexpectedCharacter(ch)),
            },

            Frame::InObjectAwaitingComma => match ch {
                ',' => {
                    if let Some(top) = self.frames.last_mut() {
                        *top = Frame::InObjectAwaitingKey { first: false };
                    }
                    Ok(())
                }
                '}' => self.close_object(visitor),
                _ => Err(ParseErrorKind::UnexpectedCharacter(ch)),
            },

            Frame::InArrayAwaitingComma => match ch {
                ',' => {
                    if let Some(top) = self.frames.last_mut() {
                        *top = Frame::InArrayAwaitingValue { first: false };
                    }
                    Ok(())
                }
                ']' => self.close_array(visitor),
                _ => Err(ParseErrorKind::UnexpectedCharacter(ch)),
            },
        }
    }

    /// Handles the first character of a value (or a container close when the
    /// grammar still allows one).
    fn step_value_start<V: Visitor + ?Sized>(
        &mut self,
        ch: char,
        visitor: &mut V,
    ) -> Result<(), ParseErrorKind> {
        match ch {
            '{' => {
                self.check_depth()?;
                self.emit_member_prelude(visitor);
                visitor.start_object();
                self.frames.push(Frame::InObjectAwaitingKey { first: true });
                Ok(())
            }
            '[' => {
                self.check_depth()?;
                self.emit_member_prelude(visitor);
                visitor.start_array();
                self.frames.push(Frame::InArrayAwaitingValue { first: true });
                Ok(())
            }
            '"' => {
                self.token.clear();
                self.lex = Lex::Str(StrLex::Plain);
                Ok(())
            }
            '0'..='9' | '-' => {
                self.token.clear();
                self.push_token_char(ch)?;
                self.lex = Lex::Number;
                Ok(())
            }
            't' | 'f' | 'n' | 'i' => {
                self.token.clear();
                self.push_token_char(ch)?;
                self.lex = Lex::Literal(ExpectedLiteralBuffer::new(ch));
                Ok(())
            }
            ']' => match self.frames.last() {
                Some(Frame::InArrayAwaitingValue { first: true }) => self.close_array(visitor),
                _ => Err(ParseErrorKind::UnexpectedCharacter(ch)),
            },
            '}' => match self.frames.last() {
                Some(Frame::InObjectAwaitingValue { .. }) => Err(ParseErrorKind::MissingValue),
                _ => Err(ParseErrorKind::UnexpectedCharacter(ch)),
            },
            _ => Err(ParseErrorKind::UnexpectedCharacter(ch)),
        }
    }

    fn check_depth(&self) -> Result<(), ParseErrorKind> {
        if self.frames.len() - 1 >= self.options.max_depth {
            return Err(ParseErrorKind::TooManyNestedContainers);
        }
        Ok(())
    }

    fn close_object<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> Result<(), ParseErrorKind> {
        visitor.end_object();
        self.frames.pop();
        self.note_value_end();
        Ok(())
    }

    fn close_array<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> Result<(), ParseErrorKind> {
        visitor.end_array();
        self.frames.pop();
        self.note_value_end();
        Ok(())
    }

    /// Fires the member announcement immediately before a value's own event.
    fn emit_member_prelude<V: Visitor + ?Sized>(&mut self, visitor: &mut V) {
        match self.frames.last() {
            Some(Frame::InObjectAwaitingValue { .. }) => {
                let key = self.pending_key.take().unwrap_or_default();
                visitor.start_object_member(&key);
            }
            Some(Frame::InArrayAwaitingValue { .. }) => visitor.start_array_member(),
            _ => {}
        }
    }

    /// Transitions the enclosing frame after a value (scalar or container)
    /// has completed.
    fn note_value_end(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            match top {
                Frame::TopLevel { has_value } => *has_value = true,
                Frame::InObjectAwaitingValue { .. } => *top = Frame::InObjectAwaitingComma,
                Frame::InArrayAwaitingValue { .. } => *top = Frame::InArrayAwaitingComma,
                _ => {}
            }
        }
    }

    // ----------------------------------------------------------------------
    // Tokens
    // ----------------------------------------------------------------------

    fn push_token_char(&mut self, ch: char) -> Result<(), ParseErrorKind> {
        if self.token.len() + ch.len_utf8() > self.options.max_token_size {
            return Err(ParseErrorKind::TooManyCharacters);
        }
        self.token.push(ch);
        Ok(())
    }

    fn step_number<V: Visitor + ?Sized>(
        &mut self,
        ch: char,
        visitor: &mut V,
    ) -> Result<(), ParseErrorKind> {
        match ch {
            '0'..='9' | '.' | 'e' | 'E' | '+' | '-' => self.push_token_char(ch),
            'i' if self.token == "-" => {
                self.push_token_char(ch)?;
                self.lex = Lex::Literal(ExpectedLiteralBuffer::negative_infinity());
                Ok(())
            }
            c if c.is_ascii_whitespace() || matches!(c, ',' | '}' | ']') => {
                self.complete_number(visitor)?;
                // The delimiter is structural; reprocess it.
                self.step_idle(ch, visitor)
            }
            _ => Err(ParseErrorKind::InvalidNumber),
        }
    }

    fn complete_number<V: Visitor + ?Sized>(
        &mut self,
        visitor: &mut V,
    ) -> Result<(), ParseErrorKind> {
        if !is_valid_number(&self.token) {
            return Err(ParseErrorKind::InvalidNumber);
        }
        self.emit_member_prelude(visitor);
        visitor.number(&self.token);
        self.token.clear();
        self.note_value_end();
        self.lex = Lex::Idle;
        Ok(())
    }

    fn step_literal<V: Visitor + ?Sized>(
        &mut self,
        ch: char,
        visitor: &mut V,
    ) -> Result<(), ParseErrorKind> {
        let step = match &mut self.lex {
            Lex::Literal(matcher) => matcher.step(ch),
            // `step` only dispatches here while lexing a literal.
            _ => Step::Reject,
        };
        match step {
            Step::NeedMore => self.push_token_char(ch),
            Step::Done(value) => {
                self.push_token_char(ch)?;
                self.emit_member_prelude(visitor);
                match value {
                    LiteralValue::True => visitor.boolean(true),
                    LiteralValue::False => visitor.boolean(false),
                    LiteralValue::Null => visitor.null(),
                    LiteralValue::Nan | LiteralValue::Infinity | LiteralValue::MinusInfinity => {
                        visitor.number(&self.token);
                    }
                }
                self.token.clear();
                self.note_value_end();
                self.lex = Lex::Idle;
                Ok(())
            }
            Step::Reject => Err(ParseErrorKind::UnexpectedCharacter(ch)),
        }
    }

    fn step_string<V: Visitor + ?Sized>(
        &mut self,
        ch: char,
        visitor: &mut V,
    ) -> Result<(), ParseErrorKind> {
        match self.lex {
            Lex::Str(StrLex::Plain) => match ch {
                '"' => self.complete_string(visitor),
                '\\' => {
                    self.lex = Lex::Str(StrLex::Escape);
                    Ok(())
                }
                // JSON allows 0x20..=0x10FFFF unescaped.
                c if (c as u32) < 0x20 => Err(ParseErrorKind::UnexpectedCharacter(c)),
                c => {
                    self.flush_pending_surrogate()?;
                    self.push_token_char(c)
                }
            },
            Lex::Str(StrLex::Escape) => {
                let decoded = match ch {
                    '"' | '\\' | '/' => Some(ch),
                    'b' => Some('\u{0008}'),
                    'f' => Some('\u{000C}'),
                    'n' => Some('\n'),
                    'r' => Some('\r'),
                    't' => Some('\t'),
                    'u' => None,
                    _ => return Err(ParseErrorKind::IllegalEscapeSequence(ch)),
                };
                if let Some(c) = decoded {
                    self.flush_pending_surrogate()?;
                    self.push_token_char(c)?;
                    self.lex = Lex::Str(StrLex::Plain);
                } else {
                    self.lex = Lex::Str(StrLex::Unicode(UnicodeEscapeBuffer::new()));
                }
                Ok(())
            }
            Lex::Str(StrLex::Unicode(_)) => {
                let unit = match &mut self.lex {
                    Lex::Str(StrLex::Unicode(buf)) => buf.feed(ch)?,
                    _ => None,
                };
                if let Some(unit) = unit {
                    self.push_code_unit(unit)?;
                    self.lex = Lex::Str(StrLex::Plain);
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Folds one decoded UTF-16 code unit into the token, pairing surrogate
    /// halves. Unpaired halves become U+FFFD.
    fn push_code_unit(&mut self, unit: u16) -> Result<(), ParseErrorKind> {
        if let Some(high) = self.pending_high_surrogate.take() {
            if (0xDC00..=0xDFFF).contains(&unit) {
                let code =
                    0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                let ch = char::from_u32(code).unwrap_or(REPLACEMENT);
                return self.push_token_char(ch);
            }
            self.push_token_char(REPLACEMENT)?;
        }

        if (0xD800..=0xDBFF).contains(&unit) {
            self.pending_high_surrogate = Some(unit);
            Ok(())
        } else if (0xDC00..=0xDFFF).contains(&unit) {
            self.push_token_char(REPLACEMENT)
        } else {
            self.push_token_char(char::from_u32(u32::from(unit)).unwrap_or(REPLACEMENT))
        }
    }

    fn flush_pending_surrogate(&mut self) -> Result<(), ParseErrorKind> {
        if self.pending_high_surrogate.take().is_some() {
            self.push_token_char(REPLACEMENT)?;
        }
        Ok(())
    }

    fn complete_string<V: Visitor + ?Sized>(
        &mut self,
        visitor: &mut V,
    ) -> Result<(), ParseErrorKind> {
        self.flush_pending_surrogate()?;
        self.lex = Lex::Idle;
        if matches!(self.frames.last(), Some(Frame::InObjectAwaitingKey { .. })) {
            self.pending_key = Some(core::mem::take(&mut self.token));
            if let Some(top) = self.frames.last_mut() {
                *top = Frame::InObjectAwaitingValue { colon_seen: false };
            }
        } else {
            self.emit_member_prelude(visitor);
            visitor.string(&self.token);
            self.token.clear();
            self.note_value_end();
        }
        Ok(())
    }

    // ----------------------------------------------------------------------
    // End of input
    // ----------------------------------------------------------------------

    fn finish<V: Visitor + ?Sized>(&mut self, visitor: &mut V) -> Result<(), ParseErrorKind> {
        match self.lex {
            Lex::Str(_) => return Err(ParseErrorKind::UnterminatedString),
            Lex::Number => self.complete_number(visitor)?,
            Lex::Literal(_) => {
                let last = self.token.chars().last().unwrap_or(' ');
                return Err(ParseErrorKind::UnexpectedCharacter(last));
            }
            Lex::Idle => {}
        }

        match self.frames.last() {
            Some(
                Frame::InObjectAwaitingKey { .. }
                | Frame::InObjectAwaitingValue { .. }
                | Frame::InObjectAwaitingComma,
            ) => Err(ParseErrorKind::UnterminatedObject),
            Some(Frame::InArrayAwaitingValue { .. } | Frame::InArrayAwaitingComma) => {
                Err(ParseErrorKind::UnterminatedArray)
            }
            _ => Ok(()),
        }
    }
}

/// Validates a complete numeric token against the JSON number grammar.
///
/// The bare `nan` / `infinity` / `-infinity` extensions never reach this
/// check; they are handled by the keyword matcher.
fn is_valid_number(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    match bytes.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => {
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
        }
        _ => return false,
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if !matches!(bytes.get(i), Some(b'0'..=b'9')) {
            return false;
        }
        while matches!(bytes.get(i), Some(b'0'..=b'9')) {
            i += 1;
        }
    }
    i == bytes.len()
}
