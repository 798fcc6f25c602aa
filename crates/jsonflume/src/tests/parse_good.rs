use alloc::{string::String, vec, vec::Vec};

use super::util::{Event, Recorder, parse_chunked, parse_one};
use crate::{ParserOptions, StreamingParser};

#[test]
fn scalar_string() {
    let (events, result) = parse_one(r#""hello""#);
    assert!(result.is_ok());
    assert_eq!(events, vec![Event::String("hello".into())]);
}

#[test]
fn scalar_numbers_delivered_verbatim() {
    for text in ["0", "-0", "123", "-0.5", "1e3", "1E+3", "123.456e-7"] {
        let (events, result) = parse_one(text);
        assert!(result.is_ok(), "{text}");
        assert_eq!(events, vec![Event::Number(text.into())], "{text}");
    }
}

#[test]
fn scalar_keywords() {
    assert_eq!(parse_one("true").0, vec![Event::Boolean(true)]);
    assert_eq!(parse_one("false").0, vec![Event::Boolean(false)]);
    assert_eq!(parse_one("null").0, vec![Event::Null]);
}

#[test]
fn non_finite_keywords_are_numbers() {
    // `nan`, `infinity` and `-infinity` are an extension delivered through
    // the numeric callback, verbatim.
    for text in ["nan", "infinity", "-infinity"] {
        let (events, result) = parse_one(text);
        assert!(result.is_ok(), "{text}");
        assert_eq!(events, vec![Event::Number(text.into())], "{text}");
    }
}

#[test]
fn empty_containers() {
    assert_eq!(
        parse_one("{}").0,
        vec![Event::StartObject, Event::EndObject]
    );
    assert_eq!(parse_one("[]").0, vec![Event::StartArray, Event::EndArray]);
}

#[test]
fn empty_document_is_ok() {
    let (events, result) = parse_one("");
    assert!(result.is_ok());
    assert!(events.is_empty());

    let (events, result) = parse_one("  \n\t ");
    assert!(result.is_ok());
    assert!(events.is_empty());
}

#[test]
fn object_event_order() {
    let (events, result) = parse_one(r#"{"a": 1, "b": [true, null]}"#);
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![
            Event::StartObject,
            Event::Member("a".into()),
            Event::Number("1".into()),
            Event::Member("b".into()),
            Event::StartArray,
            Event::Element,
            Event::Boolean(true),
            Event::Element,
            Event::Null,
            Event::EndArray,
            Event::EndObject,
        ]
    );
}

#[test]
fn member_announcement_precedes_container_values() {
    let (events, result) = parse_one(r#"{"a": {"b": []}}"#);
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![
            Event::StartObject,
            Event::Member("a".into()),
            Event::StartObject,
            Event::Member("b".into()),
            Event::StartArray,
            Event::EndArray,
            Event::EndObject,
            Event::EndObject,
        ]
    );
}

#[test]
fn whitespace_everywhere() {
    let (events, result) = parse_one(" { \"a\" \t:\n [ 1 ,\r 2 ] } ");
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![
            Event::StartObject,
            Event::Member("a".into()),
            Event::StartArray,
            Event::Element,
            Event::Number("1".into()),
            Event::Element,
            Event::Number("2".into()),
            Event::EndArray,
            Event::EndObject,
        ]
    );
}

#[test]
fn string_escapes_decode() {
    let (events, result) = parse_one(r#""a\"b\\c\/d\b\f\n\r\te""#);
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![Event::String("a\"b\\c/d\u{8}\u{c}\n\r\te".into())]
    );
}

#[test]
fn unicode_escapes_decode() {
    let (events, result) = parse_one(r#""\u0041\u00e9\u6c34""#);
    assert!(result.is_ok());
    assert_eq!(events, vec![Event::String("Aé水".into())]);
}

#[test]
fn surrogate_pair_decodes() {
    let (events, result) = parse_one(r#""\ud83d\ude00""#);
    assert!(result.is_ok());
    assert_eq!(events, vec![Event::String("😀".into())]);
}

#[test]
fn lone_surrogates_become_replacement() {
    // High half with no low half, in every position that can orphan it.
    assert_eq!(
        parse_one(r#""\ud83dx""#).0,
        vec![Event::String("\u{fffd}x".into())]
    );
    assert_eq!(
        parse_one(r#""\ud83d""#).0,
        vec![Event::String("\u{fffd}".into())]
    );
    // Low half on its own.
    assert_eq!(
        parse_one(r#""\ude00""#).0,
        vec![Event::String("\u{fffd}".into())]
    );
    // Two high halves in a row.
    assert_eq!(
        parse_one(r#""\ud83d\ud83d\ude00""#).0,
        vec![Event::String("\u{fffd}😀".into())]
    );
}

#[test]
fn tokens_split_across_chunks() {
    let (events, result) = parse_chunked(&["{\"lo", "ng\": 12", "34}"]);
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![
            Event::StartObject,
            Event::Member("long".into()),
            Event::Number("1234".into()),
            Event::EndObject,
        ]
    );
}

#[test]
fn escape_split_across_chunks() {
    let (events, result) = parse_chunked(&["\"\\", "u00", "e9\""]);
    assert!(result.is_ok());
    assert_eq!(events, vec![Event::String("é".into())]);
}

#[test]
fn keyword_split_across_chunks() {
    let (events, result) = parse_chunked(&["[tr", "ue, nu", "ll, infi", "nity]"]);
    assert!(result.is_ok());
    assert_eq!(
        events,
        vec![
            Event::StartArray,
            Event::Element,
            Event::Boolean(true),
            Event::Element,
            Event::Null,
            Event::Element,
            Event::Number("infinity".into()),
            Event::EndArray,
        ]
    );
}

#[test]
fn empty_final_chunk_flushes_trailing_number() {
    // A trailing number is only complete once end of input is signalled.
    let (events, result) = parse_chunked(&["12.5", ""]);
    assert!(result.is_ok());
    assert_eq!(events, vec![Event::Number("12.5".into())]);
}

#[test]
fn one_chunk_per_character() {
    let text = r#"{"k": [1, "two", nan, {"n": null}]}"#;
    let whole = parse_one(text);
    let chunks: Vec<String> = text.chars().map(String::from).collect();
    let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
    let split = parse_chunked(&refs);
    assert!(split.1.is_ok());
    assert_eq!(split.0, whole.0);
}

#[test]
fn reset_allows_a_new_document() {
    let mut parser = StreamingParser::new(ParserOptions::default());
    let mut recorder = Recorder::default();
    parser.parse("[1]", true, &mut recorder).unwrap();

    // A second document without reset is one document too many.
    assert!(parser.parse("[2]", true, &mut recorder).is_err());

    parser.reset();
    let mut second = Recorder::default();
    parser.parse("[2]", true, &mut second).unwrap();
    assert_eq!(
        second.events,
        vec![
            Event::StartArray,
            Event::Element,
            Event::Number("2".into()),
            Event::EndArray,
        ]
    );
}

#[test]
fn visitor_is_borrowed_per_call() {
    // Different visitors may be supplied on successive chunks.
    let mut parser = StreamingParser::default();
    let mut first = Recorder::default();
    let mut second = Recorder::default();
    parser.parse("[1,", false, &mut first).unwrap();
    parser.parse("2]", true, &mut second).unwrap();
    assert_eq!(
        first.events,
        vec![Event::StartArray, Event::Element, Event::Number("1".into())]
    );
    assert_eq!(
        second.events,
        vec![Event::Element, Event::Number("2".into()), Event::EndArray]
    );
}
