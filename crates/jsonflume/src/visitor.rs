use crate::error::ParseError;

/// Recipient of decoder events.
///
/// The [`StreamingParser`](crate::StreamingParser) invokes these callbacks in
/// document order, exactly once per element. All methods default to no-ops so
/// implementations only override the events they care about.
///
/// Ordering guarantees:
/// - [`start_object_member`](Visitor::start_object_member) fires immediately
///   before the member value's own event.
/// - [`start_array_member`](Visitor::start_array_member) fires immediately
///   before each element's own event.
/// - [`exception`](Visitor::exception) fires at most once per session, after
///   which no further events are delivered.
pub trait Visitor {
    /// A complete string value (escapes already decoded).
    fn string(&mut self, value: &str) {
        let _ = value;
    }

    /// A complete numeric literal, delivered verbatim as text.
    ///
    /// This includes the bare extension tokens `nan`, `infinity` and
    /// `-infinity`. The parser performs no numeric conversion itself.
    fn number(&mut self, text: &str) {
        let _ = text;
    }

    /// A `true` or `false` literal.
    fn boolean(&mut self, value: bool) {
        let _ = value;
    }

    /// A `null` literal.
    fn null(&mut self) {}

    /// An object opened with `{`.
    fn start_object(&mut self) {}

    /// An object closed with `}`.
    fn end_object(&mut self) {}

    /// A member key, delivered right before the member value's event.
    fn start_object_member(&mut self, key: &str) {
        let _ = key;
    }

    /// An array opened with `[`.
    fn start_array(&mut self) {}

    /// An array closed with `]`.
    fn end_array(&mut self) {}

    /// Announces the next array element, right before its event.
    fn start_array_member(&mut self) {}

    /// The session failed; no further events will be delivered.
    ///
    /// The same error is also returned from the driving
    /// [`parse`](crate::StreamingParser::parse) call.
    fn exception(&mut self, error: &ParseError) {
        let _ = error;
    }
}
