//! Shared test helpers: an event-recording visitor and chunked-feed drivers.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{ParseError, StreamingParser, Visitor};

/// Owned snapshot of one visitor callback, for order-sensitive assertions.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    String(String),
    Number(String),
    Boolean(bool),
    Null,
    StartObject,
    EndObject,
    Member(String),
    StartArray,
    EndArray,
    Element,
    Exception(String),
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Visitor for Recorder {
    fn string(&mut self, value: &str) {
        self.events.push(Event::String(value.to_string()));
    }

    fn number(&mut self, text: &str) {
        self.events.push(Event::Number(text.to_string()));
    }

    fn boolean(&mut self, value: bool) {
        self.events.push(Event::Boolean(value));
    }

    fn null(&mut self) {
        self.events.push(Event::Null);
    }

    fn start_object(&mut self) {
        self.events.push(Event::StartObject);
    }

    fn end_object(&mut self) {
        self.events.push(Event::EndObject);
    }

    fn start_object_member(&mut self, key: &str) {
        self.events.push(Event::Member(key.to_string()));
    }

    fn start_array(&mut self) {
        self.events.push(Event::StartArray);
    }

    fn end_array(&mut self) {
        self.events.push(Event::EndArray);
    }

    fn start_array_member(&mut self) {
        self.events.push(Event::Element);
    }

    fn exception(&mut self, error: &ParseError) {
        self.events.push(Event::Exception(error.to_string()));
    }
}

/// Feeds `text` as a single final chunk and returns the recorded events plus
/// the parse result.
pub fn parse_one(text: &str) -> (Vec<Event>, Result<(), ParseError>) {
    parse_chunked(&[text])
}

/// Feeds each chunk in order, marking the last one final. Stops at the first
/// error, like a caller that honors the terminal failed state would.
pub fn parse_chunked(chunks: &[&str]) -> (Vec<Event>, Result<(), ParseError>) {
    let mut parser = StreamingParser::default();
    let mut recorder = Recorder::default();
    let mut result = Ok(());
    let last = chunks.len().saturating_sub(1);
    for (i, chunk) in chunks.iter().enumerate() {
        result = parser.parse(chunk, i == last, &mut recorder);
        if result.is_err() {
            break;
        }
    }
    (recorder.events, result)
}

/// Splits `text` into UTF-8-safe chunks whose sizes are derived from
/// `splits`, covering the whole input.
pub fn partition(text: &str, splits: &[usize]) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut idx = 0;
    for s in splits {
        if idx >= chars.len() {
            break;
        }
        let size = 1 + (s % (chars.len() - idx));
        let chunk: String = chars[idx..idx + size].iter().collect();
        chunks.push(chunk);
        idx += size;
    }
    if idx < chars.len() {
        chunks.push(chars[idx..].iter().collect());
    }
    chunks
}
