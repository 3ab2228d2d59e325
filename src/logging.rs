//! Helpers for logging outgoing requests and incoming responses without
//! leaking secrets.

use serde_json::Value;

/// Request and response bodies longer than this many characters are
/// truncated at the `debug` level and logged in full at the `trace` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

const REDACTED: &str = "********";

/// Replace the value of every `field_name` key in a JSON object with asterisks.
pub fn redact_json_field(body: &Value, field_name: &str) -> Value {
    let mut body = body.clone();

    if let Some(value) = body.get_mut(field_name) {
        *value = Value::String(REDACTED.to_owned());
    }

    body
}

/// Mask `data.token` in a response body so a log in response can be logged.
///
/// Bodies that are not JSON objects are returned unchanged.
pub fn redact_response_body(body: &str) -> String {
    let Ok(mut value) = serde_json::from_str::<Value>(body) else {
        return body.to_owned();
    };

    match value.get_mut("data") {
        Some(data) if data.get("token").is_some() => {
            *data = redact_json_field(data, "token");
            value.to_string()
        }
        _ => body.to_owned(),
    }
}

fn truncate(body: &str) -> Option<&str> {
    body.char_indices()
        .nth(LOG_BODY_LENGTH_LIMIT)
        .map(|(end, _)| &body[..end])
}

/// Log an outgoing request. `body` should already be redacted.
pub fn log_request(method: &str, url: &str, body: &str) {
    match truncate(body) {
        Some(prefix) => {
            tracing::debug!("Sending request: {method} {url}\nbody: {prefix}...");
            tracing::trace!("Full request body: {body:?}");
        }
        None => tracing::debug!("Sending request: {method} {url}\nbody: {body:?}"),
    }
}

/// Log a response body and its HTTP status. Any `data.token` is masked first.
pub fn log_response(status: u16, body: &str) {
    let body = redact_response_body(body);
    let body = body.as_str();

    match truncate(body) {
        Some(prefix) => {
            tracing::debug!("Received response: status {status}\nbody: {prefix}...");
            tracing::trace!("Full response body: {body:?}");
        }
        None => tracing::debug!("Received response: status {status}\nbody: {body:?}"),
    }
}
