//! Subscription-transport socket framing.
//!
//! Socket messages are small JSON envelopes: a required `type` tag, an
//! optional `id`, and an optional `payload` object that downstream
//! layers interpret (for GraphQL subscriptions, typically another
//! request envelope).

use serde_json::{Map, Value};
use wireql_parser::ParseError;

use crate::json::JsonReader;

/// A decoded socket message frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SocketMessage {
    /// The protocol message type, e.g. `connection_init`, `subscribe`,
    /// `complete`.
    pub message_type: String,
    pub id: Option<String>,
    pub payload: Option<Map<String, Value>>,
}

/// Parses one socket message frame.
///
/// `type` is required; `id` and `payload` are optional; unrecognized
/// keys are parsed and discarded.
pub fn parse_socket_message(payload: &[u8]) -> Result<SocketMessage, ParseError> {
    if payload.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut reader = JsonReader::new(payload);
    let frame_start = reader.position();
    reader.expect(b'{')?;

    let mut message_type: Option<String> = None;
    let mut id: Option<String> = None;
    let mut message_payload: Option<Map<String, Value>> = None;

    if reader.peek() != Some(b'}') {
        loop {
            let key = reader.parse_string()?;
            reader.expect(b':')?;
            match key.as_str() {
                "type" => match reader.peek() {
                    Some(b'"') => message_type = Some(reader.parse_string()?),
                    _ => {
                        return Err(reader
                            .error("`type` must be a string")
                            .into());
                    }
                },
                "id" => match reader.peek() {
                    Some(b'"') => id = Some(reader.parse_string()?),
                    Some(b'n') => reader.skip_value()?,
                    _ => {
                        return Err(reader
                            .error("`id` must be a string or null")
                            .into());
                    }
                },
                "payload" => match reader.peek() {
                    Some(b'{') => {
                        message_payload = Some(reader.parse_object()?);
                    }
                    Some(b'n') => reader.skip_value()?,
                    _ => {
                        return Err(reader
                            .error("`payload` must be an object or null")
                            .into());
                    }
                },
                _ => reader.skip_value()?,
            }
            match reader.peek() {
                Some(b',') => reader.expect(b',')?,
                Some(b'}') => break,
                _ => return Err(reader.error("expected `,` or `}`").into()),
            }
        }
    }
    reader.expect(b'}')?;
    reader.expect_end()?;

    let Some(message_type) = message_type else {
        return Err(reader
            .error_at(frame_start, "socket message is missing `type`")
            .into());
    };
    Ok(SocketMessage {
        message_type,
        id,
        payload: message_payload,
    })
}
