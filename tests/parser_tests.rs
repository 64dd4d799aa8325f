//! Input loading and normalization tests.

use std::fs;

use msgviz::{ParseError, load_from_path, load_from_str};
use pretty_assertions::assert_eq;

#[test]
fn load_from_str_normalizes_a_full_response() {
    let message = load_from_str(
        r#"{
            "role": "assistant",
            "model": "m1",
            "stop_reason": "end_turn",
            "content": [{"type": "text", "text": "hello"}],
            "usage": {"input_tokens": 10, "output_tokens": 4}
        }"#,
    )
    .expect("parse");

    assert_eq!(message.role, "assistant");
    assert_eq!(message.model.as_deref(), Some("m1"));
    assert_eq!(message.stop_reason.as_deref(), Some("end_turn"));
    assert_eq!(message.content.len(), 1);
    assert_eq!(message.content[0].kind, "text");
    assert_eq!(message.usage.map(|usage| usage.total()), Some(14));
}

#[test]
fn load_from_str_rejects_empty_and_malformed_input() {
    assert!(matches!(load_from_str(""), Err(ParseError::EmptyInput)));
    assert!(matches!(load_from_str("   \n\t"), Err(ParseError::EmptyInput)));
    assert!(matches!(load_from_str("{oops"), Err(ParseError::Json(_))));
    assert!(matches!(
        load_from_str("\"just a string\""),
        Err(ParseError::UnsupportedShape)
    ));
}

#[test]
fn load_from_path_reads_a_json_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("response.json");
    fs::write(&path, r#"{"role": "user", "content": ["typed text"]}"#).expect("write");

    let message = load_from_path(&path).expect("load");
    assert_eq!(message.role, "user");
    assert_eq!(message.content[0].kind, "text");
    assert_eq!(message.content[0].str_field("text"), Some("typed text"));
}

#[test]
fn load_from_path_surfaces_missing_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.json");
    let err = load_from_path(&missing).expect_err("should fail");
    assert!(matches!(err, ParseError::Io { .. }));
    assert!(err.to_string().contains("nope.json"));
}
