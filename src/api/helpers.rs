//! Proxy-response builders shared by the handlers.

use serde_json::{Value, json};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Wraps an already-serialized JSON body in a proxy response.
#[must_use]
pub fn json_response(status_code: u16, body: String) -> Value {
    json!({
        "statusCode": status_code,
        "headers": { "content-type": JSON_CONTENT_TYPE },
        "body": body
    })
}

/// Returns a 200 OK response with the given JSON body.
#[must_use]
pub fn ok_json(body: &Value) -> Value {
    json_response(200, body.to_string())
}

/// Returns an error response with the given status code and message.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, json!({ "error": message }).to_string())
}

/// Request path from a proxy event, preferring `rawPath` over `path`.
#[must_use]
pub fn request_path(payload: &Value) -> Option<&str> {
    payload
        .get("rawPath")
        .and_then(Value::as_str)
        .or_else(|| payload.get("path").and_then(Value::as_str))
}
