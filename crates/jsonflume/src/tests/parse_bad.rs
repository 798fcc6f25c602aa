use alloc::string::ToString;

use rstest::rstest;

use super::util::{Event, Recorder, parse_one};
use crate::{ParseErrorKind, ParserOptions, StreamingParser};

#[rstest]
// Unterminated constructs, detected at end of input.
#[case("{", ParseErrorKind::UnterminatedObject)]
#[case(r#"{"a": 1"#, ParseErrorKind::UnterminatedObject)]
#[case(r#"{"a""#, ParseErrorKind::UnterminatedObject)]
#[case("[", ParseErrorKind::UnterminatedArray)]
#[case("[1, 2", ParseErrorKind::UnterminatedArray)]
#[case(r#""abc"#, ParseErrorKind::UnterminatedString)]
#[case(r#""abc\"#, ParseErrorKind::UnterminatedString)]
#[case(r#""\u00"#, ParseErrorKind::UnterminatedString)]
// Structural offenses.
#[case("{,}", ParseErrorKind::UnexpectedCharacter(','))]
#[case("[,]", ParseErrorKind::UnexpectedCharacter(','))]
#[case("[1,,2]", ParseErrorKind::UnexpectedCharacter(','))]
#[case(r#"{"a" 1}"#, ParseErrorKind::UnexpectedCharacter('1'))]
#[case(r#"{"a": 1,}"#, ParseErrorKind::UnexpectedCharacter('}'))]
#[case("[1,]", ParseErrorKind::UnexpectedCharacter(']'))]
#[case("[1 2]", ParseErrorKind::UnexpectedCharacter('2'))]
#[case("]", ParseErrorKind::UnexpectedCharacter(']'))]
#[case("}", ParseErrorKind::UnexpectedCharacter('}'))]
#[case("x", ParseErrorKind::UnexpectedCharacter('x'))]
// A key with no value.
#[case(r#"{"a":}"#, ParseErrorKind::MissingValue)]
#[case(r#"{"a"}"#, ParseErrorKind::MissingValue)]
// Keyword typos fail on the first divergent character.
#[case("truz", ParseErrorKind::UnexpectedCharacter('z'))]
#[case("nulk", ParseErrorKind::UnexpectedCharacter('k'))]
#[case("[infinityy]", ParseErrorKind::UnexpectedCharacter('y'))]
// Keyword truncated by end of input.
#[case("tru", ParseErrorKind::UnexpectedCharacter('u'))]
#[case("-infini", ParseErrorKind::UnexpectedCharacter('i'))]
// Numbers outside the JSON grammar.
#[case("01", ParseErrorKind::InvalidNumber)]
#[case("-", ParseErrorKind::InvalidNumber)]
#[case("1.", ParseErrorKind::InvalidNumber)]
#[case("1e", ParseErrorKind::InvalidNumber)]
#[case("1.2.3", ParseErrorKind::InvalidNumber)]
#[case("1x", ParseErrorKind::InvalidNumber)]
#[case("+1", ParseErrorKind::UnexpectedCharacter('+'))]
// Bad escapes.
#[case(r#""a\x""#, ParseErrorKind::IllegalEscapeSequence('x'))]
#[case(r#""\uZ123""#, ParseErrorKind::IllegalUnicodeEscapeChar('Z'))]
#[case(r#""\u12G4""#, ParseErrorKind::IllegalUnicodeEscapeChar('G'))]
// Raw control characters in strings must be escaped.
#[case("\"a\u{01}b\"", ParseErrorKind::UnexpectedCharacter('\u{01}'))]
// A second top-level value.
#[case("1 2", ParseErrorKind::UnexpectedState)]
#[case("{} {}", ParseErrorKind::UnexpectedState)]
#[case("null null", ParseErrorKind::UnexpectedState)]
fn rejects(#[case] input: &str, #[case] kind: ParseErrorKind) {
    let (events, result) = parse_one(input);
    let err = result.unwrap_err();
    assert_eq!(err.kind, kind, "{input}");

    // Exactly one exception callback, carrying the same rendering, and no
    // events after it.
    let exceptions: alloc::vec::Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::Exception(_)))
        .collect();
    assert_eq!(exceptions.len(), 1, "{input}");
    assert_eq!(
        events.last(),
        Some(&Event::Exception(err.to_string())),
        "{input}"
    );
}

#[test]
fn error_positions_are_line_and_column() {
    let (_, result) = parse_one("{\n  \"a\": x");
    let err = result.unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnexpectedCharacter('x'));
    assert_eq!((err.line, err.column), (2, 8));
    assert_eq!(
        err.to_string(),
        "Unexpected character (x) at line 2, character 8"
    );
}

#[test]
fn error_rendering_matches_contract() {
    let cases = [
        ("{", "Unterminated object at line 1, character 2"),
        ("01", "Invalid number at line 1, character 3"),
        (r#"{"a":}"#, "Missing value at line 1, character 6"),
    ];
    for (input, message) in cases {
        let (_, result) = parse_one(input);
        assert_eq!(result.unwrap_err().to_string(), message, "{input}");
    }
}

#[test]
fn failed_state_is_terminal() {
    let mut parser = StreamingParser::new(ParserOptions::default());
    let mut recorder = Recorder::default();
    let first = parser.parse("[1,,", false, &mut recorder).unwrap_err();
    let events_after_failure = recorder.events.len();

    // Later chunks return the stored error and deliver nothing new.
    let second = parser.parse("2]", true, &mut recorder).unwrap_err();
    assert_eq!(second, first);
    assert_eq!(recorder.events.len(), events_after_failure);
}

#[test]
fn reset_clears_failed_state() {
    let mut parser = StreamingParser::default();
    let mut recorder = Recorder::default();
    assert!(parser.parse("{]", true, &mut recorder).is_err());

    parser.reset();
    let mut fresh = Recorder::default();
    assert!(parser.parse("{}", true, &mut fresh).is_ok());
    assert_eq!(fresh.events, [Event::StartObject, Event::EndObject]);
}
