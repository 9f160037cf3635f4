//! Response normalization and wire-shape writers.
//!
//! A handler's raw return value is reduced to `(status, body)` by
//! [`normalize`]: a JSON object means 200, a two-element `[status, object]`
//! array means that literal status. Anything else is a server-side
//! programming error reported as a 500, never as validation data.
//!
//! The validation error report shape is part of the wire contract:
//! `{"status": "error", "data": {<name>: [<message>, ...]}}` with HTTP 409.

use crate::schema::ValidationError;
use may_minihttp::Response;
use serde_json::{json, Map, Value};
use std::fmt;

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// A handler returned a value the normalizer cannot reduce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeError {
    pub detail: String,
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported handler return shape: {}", self.detail)
    }
}

impl std::error::Error for NormalizeError {}

/// Reduce a handler's raw return value to a wire status and body.
///
/// - JSON object → `(200, object)`
/// - `[status, object]` with an integral status in `100..=599` → that pair
/// - anything else → [`NormalizeError`] (server programming error)
pub fn normalize(reply: Value) -> Result<(u16, Value), NormalizeError> {
    match reply {
        Value::Object(_) => Ok((200, reply)),
        Value::Array(items) if items.len() == 2 => {
            let status = items[0]
                .as_u64()
                .filter(|s| (100..=599).contains(s))
                .ok_or_else(|| NormalizeError {
                    detail: format!("first pair element is not a status code: {}", items[0]),
                })?;
            if !items[1].is_object() {
                return Err(NormalizeError {
                    detail: "second pair element is not a mapping".to_string(),
                });
            }
            let mut items = items;
            Ok((status as u16, items.pop().unwrap_or(Value::Null)))
        }
        other => Err(NormalizeError {
            detail: format!("expected a mapping or [status, mapping] pair, got {other}"),
        }),
    }
}

/// Build the 409 report body from aggregated validation errors.
///
/// Messages for the same field or parameter accumulate under one key;
/// nested field paths are joined with `.` (e.g. `"address.zipcode"`).
#[must_use]
pub fn validation_report(errors: &[ValidationError]) -> Value {
    let mut data = Map::new();
    for err in errors {
        let key = err.wire_key();
        match data.get_mut(&key) {
            Some(Value::Array(messages)) => messages.push(Value::String(err.message.clone())),
            _ => {
                data.insert(key, json!([err.message]));
            }
        }
    }
    json!({ "status": "error", "data": data })
}

/// Write a JSON body with the given status.
pub fn write_json(res: &mut Response, status: u16, body: &Value) {
    res.status_code(status as usize, status_reason(status));
    res.header("Content-Type: application/json");
    res.body_vec(body.to_string().into_bytes());
}

/// Write a JSON error body with the given status.
pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    write_json(res, status, &body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(409), "Conflict");
        assert_eq!(status_reason(404), "Not Found");
    }

    #[test]
    fn test_normalize_object_is_200() {
        let (status, body) = normalize(json!({"msg": "pong"})).unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, json!({"msg": "pong"}));
    }

    #[test]
    fn test_normalize_pair() {
        let (status, body) = normalize(json!([201, {"msg": "pong"}])).unwrap();
        assert_eq!(status, 201);
        assert_eq!(body, json!({"msg": "pong"}));
    }

    #[test]
    fn test_normalize_rejects_other_shapes() {
        assert!(normalize(json!("text")).is_err());
        assert!(normalize(json!([201, 202])).is_err());
        assert!(normalize(json!([999, {"a": 1}])).is_err());
        assert!(normalize(json!([200, {"a": 1}, {"b": 2}])).is_err());
        assert!(normalize(json!(42)).is_err());
    }

    #[test]
    fn test_validation_report_shape() {
        let errors = vec![
            ValidationError::new(vec!["number".to_string()], "Not a valid integer."),
            ValidationError::new(
                vec!["address".to_string(), "zipcode".to_string()],
                "Not a valid integer.",
            ),
        ];
        let report = validation_report(&errors);
        assert_eq!(
            report,
            json!({
                "status": "error",
                "data": {
                    "number": ["Not a valid integer."],
                    "address.zipcode": ["Not a valid integer."]
                }
            })
        );
    }
}
