//! Core types for the writing assistant's request pipeline.
//!
//! This crate provides the pieces shared by every call site that talks to
//! the generative text service:
//!
//! - [`Role`] / [`Turn`] - The internal two-role conversation model
//! - [`build_request`] - Turns a [`RequestMode`] and new input into a payload
//! - [`extract`] - Pulls generated text out of a [`ServiceResponse`]
//! - [`Transport`] - The boundary trait for sending payloads to the service
//! - [`ErrorInfo`] / [`ErrorKind`] - Classified failures for display
//!
//! # Example
//!
//! ```rust
//! use assist_core::{build_request, extract, RequestMode, ServiceResponse, Turn};
//!
//! let history = vec![Turn::author("A"), Turn::assistant("B")];
//! let request = build_request(RequestMode::Conversational { history: &history }, "C");
//! assert_eq!(request.contents.len(), 3);
//!
//! let response = ServiceResponse::from_value(serde_json::json!({
//!     "candidates": [{ "content": { "parts": [{ "text": "Hello!" }] } }]
//! }));
//! assert_eq!(extract(&response).unwrap(), "Hello!");
//! ```

mod api_types;
mod error;
mod extract;
mod request;
mod role;
mod transport;
mod turn;

pub use api_types::{
    ApiErrorDetails, Candidate, CandidateContent, CandidatePart, Content, GenerateContentRequest,
    GenerateContentResponse, Part, ServiceResponse,
};
pub use error::{
    ErrorInfo, ErrorKind, ExtractionFailure, TransportFault, GENERIC_SERVICE_ERROR,
};
pub use extract::extract;
pub use request::{build_request, RequestMode};
pub use role::{to_external_role, ExternalRole, Role};
pub use transport::Transport;
pub use turn::{Conversation, Turn};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
