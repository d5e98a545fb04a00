//! Minimal echo function deployed next to the OTF proxy.

use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::info;

use super::helpers;

pub const HELLO_MESSAGE: &str = "Hello from serverless function!";

/// Lambda handler that echoes the request path.
///
/// # Errors
///
/// Never returns `Err`.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(echo(&event.payload))
}

#[must_use]
pub fn echo(payload: &Value) -> Value {
    let path = helpers::request_path(payload).unwrap_or("/");
    info!(path = %path, "Echo request");

    helpers::ok_json(&json!({
        "message": HELLO_MESSAGE,
        "path": path
    }))
}
