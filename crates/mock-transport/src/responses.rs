//! Canned service response bodies.

use assist_core::ServiceResponse;
use serde_json::json;

/// A successful body whose first candidate carries `text`.
pub fn text(text: impl Into<String>) -> ServiceResponse {
    let text = text.into();
    ServiceResponse::from_value(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    }))
}

/// A body carrying an error descriptor.
pub fn error(message: impl Into<String>) -> ServiceResponse {
    let message = message.into();
    ServiceResponse::from_value(json!({ "error": { "message": message } }))
}

/// An error descriptor with no message, as some gateway failures return.
pub fn bare_error() -> ServiceResponse {
    ServiceResponse::from_value(json!({ "error": { "code": 500 } }))
}

/// A successful body with no candidates.
pub fn empty() -> ServiceResponse {
    ServiceResponse::from_value(json!({ "candidates": [] }))
}
