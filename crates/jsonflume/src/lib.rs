//! Streaming, push-based JSON decoding and encoding.
//!
//! The decoder ([`StreamingParser`]) consumes JSON text in arbitrarily sized
//! chunks and delivers structural and value events to a caller-supplied
//! [`Visitor`], never materializing the document. The encoder
//! ([`StreamingWriter`]) is the inverse: values and container boundaries are
//! pushed in document order and serialized incrementally into a [`Sink`].
//!
//! ```rust
//! use jsonflume::{ParserOptions, StreamingParser, Visitor};
//!
//! #[derive(Default)]
//! struct KeyCounter(usize);
//!
//! impl Visitor for KeyCounter {
//!     fn start_object_member(&mut self, _key: &str) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut parser = StreamingParser::new(ParserOptions::default());
//! let mut counter = KeyCounter::default();
//! parser.parse(r#"{"a": 1, "#, false, &mut counter).unwrap();
//! parser.parse(r#""b": 2}"#, true, &mut counter).unwrap();
//! assert_eq!(counter.0, 2);
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod escape_buffer;
mod literal_buffer;
mod options;
mod parser;
mod serialize;
mod visitor;
mod writer;

#[cfg(test)]
mod tests;

pub use error::{ParseError, ParseErrorKind};
pub use options::ParserOptions;
pub use parser::StreamingParser;
pub use visitor::Visitor;
pub use writer::{ArrayContext, FormatOptions, ObjectContext, Sink, StreamingWriter};
