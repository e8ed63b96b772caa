//! Generative service request and response types.

use serde::{Deserialize, Serialize};

use crate::role::ExternalRole;

/// A text fragment of a content entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Text of the fragment
    pub text: String,
}

/// A role-tagged content entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Role: "user" or "model"
    pub role: ExternalRole,
    /// Content parts (always a single text part when built here)
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a single-part content entry.
    pub fn text(role: ExternalRole, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Create a user content entry.
    pub fn user(text: impl Into<String>) -> Self {
        Self::text(ExternalRole::User, text)
    }

    /// Create a model content entry.
    pub fn model(text: impl Into<String>) -> Self {
        Self::text(ExternalRole::Model, text)
    }
}

/// `generateContent` request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Ordered conversation contents
    pub contents: Vec<Content>,
}

/// Response body returned by a transport.
///
/// Deliberately opaque: only [`crate::extract`] looks inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    body: serde_json::Value,
}

impl ServiceResponse {
    /// Wrap a parsed JSON body.
    pub fn from_value(body: serde_json::Value) -> Self {
        Self { body }
    }

    /// The raw JSON body.
    pub fn body(&self) -> &serde_json::Value {
        &self.body
    }

    /// Whether the body carries an `error` descriptor.
    pub fn has_error(&self) -> bool {
        self.body.get("error").is_some_and(|e| !e.is_null())
    }
}

/// Typed view of a `generateContent` response body.
///
/// Every field is optional; missing structure is classified by the
/// extractor rather than rejected during parsing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    /// Error descriptor, present when the service refused the request
    #[serde(default)]
    pub error: Option<ApiErrorDetails>,
}

/// A generated candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    /// Candidate content (absent when generation was blocked)
    #[serde(default)]
    pub content: Option<CandidateContent>,
    /// Finish reason
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Content of a candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    /// Generated parts
    #[serde(default)]
    pub parts: Option<Vec<CandidatePart>>,
}

/// A generated part.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidatePart {
    /// Generated text
    #[serde(default)]
    pub text: Option<String>,
}

/// API error details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorDetails {
    /// Error message
    #[serde(default)]
    pub message: Option<String>,
    /// Numeric error code
    #[serde(default)]
    pub code: Option<i64>,
    /// Error status, e.g. "RESOURCE_EXHAUSTED"
    #[serde(default)]
    pub status: Option<String>,
}
