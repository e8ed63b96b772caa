//! Extraction of generated text from service responses.

use serde_json::Value;
use tracing::{debug, warn};

use crate::api_types::{GenerateContentResponse, ServiceResponse};
use crate::error::ExtractionFailure;

/// Pull the first candidate's first text part out of a response.
///
/// A body with an `error` descriptor is a [`ExtractionFailure::ServiceError`]
/// carrying the descriptor's message, whatever the rest of the body looks like.
/// Anything without usable text (no candidates, no parts, blank text, or a
/// body of unexpected shape) is [`ExtractionFailure::EmptyResult`].
pub fn extract(response: &ServiceResponse) -> Result<String, ExtractionFailure> {
    if response.has_error() {
        let message = error_message(response.body());
        debug!("Service reported error: {:?}", message);
        return Err(ExtractionFailure::ServiceError(message));
    }

    let parsed = match GenerateContentResponse::deserialize_from(response) {
        Some(parsed) => parsed,
        None => {
            warn!("Response body has unexpected shape, treating as empty");
            return Err(ExtractionFailure::EmptyResult);
        }
    };

    let text = parsed
        .candidates
        .as_ref()
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.as_ref())
        .and_then(|parts| parts.first())
        .and_then(|part| part.text.as_ref())
        .filter(|text| !text.is_empty());

    match text {
        Some(text) => Ok(text.clone()),
        None => {
            debug!("No candidate text in response");
            Err(ExtractionFailure::EmptyResult)
        }
    }
}

/// `error.message`, read straight from the body so a malformed sibling
/// field cannot hide it.
fn error_message(body: &Value) -> Option<String> {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

impl GenerateContentResponse {
    fn deserialize_from(response: &ServiceResponse) -> Option<Self> {
        // Deserialize from a borrowed Value; the response stays untouched.
        <Self as serde::Deserialize>::deserialize(response.body()).ok()
    }
}
