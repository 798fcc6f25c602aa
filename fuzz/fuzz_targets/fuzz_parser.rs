#![no_main]

use arbitrary::Arbitrary;
use jsonflume::{ParseError, ParserOptions, StreamingParser, Visitor};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    splits: Vec<usize>,
}

#[derive(Default)]
struct Counter {
    events: usize,
    exceptions: usize,
}

impl Visitor for Counter {
    fn string(&mut self, _value: &str) {
        self.events += 1;
    }

    fn number(&mut self, _text: &str) {
        self.events += 1;
    }

    fn boolean(&mut self, _value: bool) {
        self.events += 1;
    }

    fn null(&mut self) {
        self.events += 1;
    }

    fn start_object(&mut self) {
        self.events += 1;
    }

    fn end_object(&mut self) {
        self.events += 1;
    }

    fn start_object_member(&mut self, _key: &str) {
        self.events += 1;
    }

    fn start_array(&mut self) {
        self.events += 1;
    }

    fn end_array(&mut self) {
        self.events += 1;
    }

    fn start_array_member(&mut self) {
        self.events += 1;
    }

    fn exception(&mut self, _error: &ParseError) {
        self.exceptions += 1;
    }
}

/// Splits `text` into chunks at UTF-8 boundaries derived from `splits`.
fn partition(text: &str, splits: &[usize]) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut chunks = Vec::new();
    let mut idx = 0;
    for s in splits {
        if idx >= chars.len() {
            break;
        }
        let size = 1 + (s % (chars.len() - idx));
        chunks.push(chars[idx..idx + size].iter().collect());
        idx += size;
    }
    if idx < chars.len() {
        chunks.push(chars[idx..].iter().collect());
    }
    chunks
}

fuzz_target!(|input: Input| {
    let Input { text, splits } = input;

    // Reference run: the whole document in one final chunk.
    let mut whole = Counter::default();
    let mut parser = StreamingParser::new(ParserOptions::default());
    let whole_result = parser.parse(&text, true, &mut whole);

    // At most one exception, fired iff the parse failed.
    assert!(whole.exceptions <= 1);
    assert_eq!(whole_result.is_err(), whole.exceptions == 1);

    // serde_json accepts a strict subset of this grammar; anything it takes,
    // we must take.
    if serde_json::from_str::<serde_json::Value>(&text).is_ok() {
        assert!(whole_result.is_ok(), "rejected valid JSON: {text:?}");
    }

    // Chunked run: identical outcome regardless of partitioning.
    let chunks = partition(&text, &splits);
    let mut split = Counter::default();
    let mut parser = StreamingParser::default();
    let mut split_result = Ok(());
    let last = chunks.len().saturating_sub(1);
    for (i, chunk) in chunks.iter().enumerate() {
        split_result = parser.parse(chunk, i == last, &mut split);
        if split_result.is_err() {
            break;
        }
    }
    if chunks.is_empty() {
        split_result = parser.parse("", true, &mut split);
    }

    assert_eq!(split_result, whole_result);
    assert_eq!(split.events, whole.events);
    assert_eq!(split.exceptions, whole.exceptions);
});
