//! Tests for socket message framing.

use serde_json::json;
use wireql_parser::ParseError;

use crate::parse_socket_message;

#[test]
fn parses_subscribe_frame() {
    let message = parse_socket_message(
        br#"{"type": "subscribe", "id": "1", "payload": {"query": "{ x }"}}"#,
    )
    .unwrap();
    assert_eq!(message.message_type, "subscribe");
    assert_eq!(message.id.as_deref(), Some("1"));
    let payload = message.payload.unwrap();
    assert_eq!(payload["query"], json!("{ x }"));
}

#[test]
fn id_and_payload_are_optional() {
    let message =
        parse_socket_message(br#"{"type": "connection_init"}"#).unwrap();
    assert_eq!(message.message_type, "connection_init");
    assert!(message.id.is_none());
    assert!(message.payload.is_none());

    let message =
        parse_socket_message(br#"{"type": "complete", "payload": null}"#)
            .unwrap();
    assert!(message.payload.is_none());
}

#[test]
fn unknown_keys_are_skipped() {
    let message = parse_socket_message(
        br#"{"extra": [1, 2], "type": "ping"}"#,
    )
    .unwrap();
    assert_eq!(message.message_type, "ping");
}

#[test]
fn missing_type_is_an_error() {
    let error = parse_socket_message(br#"{"id": "1"}"#);
    match error {
        Err(ParseError::Syntax(e)) => {
            assert!(e.message.contains("missing `type`"));
        }
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn non_string_type_is_an_error() {
    assert!(parse_socket_message(br#"{"type": 1}"#).is_err());
}
