//! Mock transport implementations for the writing assistant.
//!
//! This crate provides mock implementations of the `Transport` trait for testing:
//! - `ScriptedTransport` - Replays a queue of canned outcomes and records requests
//! - `DelayedTransport` - Wraps another transport with artificial delay
//! - `GatedTransport` - Holds every request until the test releases it
//!
//! For real requests, use the `gemini-transport` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_transport::{responses, ScriptedTransport};
//! use assist_core::{build_request, extract, RequestMode, Transport};
//!
//! #[tokio::main]
//! async fn main() {
//!     let transport = ScriptedTransport::new().respond(responses::text("Hello!"));
//!
//!     let request = build_request(RequestMode::SingleShot, "Hi");
//!     let response = transport.send(&request).await.unwrap();
//!     assert_eq!(extract(&response).unwrap(), "Hello!");
//! }
//! ```

mod delayed;
mod gated;
pub mod responses;
mod scripted;

// Re-export assist-core types for convenience
pub use assist_core::{
    async_trait, GenerateContentRequest, ServiceResponse, Transport, TransportFault,
};

pub use delayed::DelayedTransport;
pub use gated::GatedTransport;
pub use scripted::ScriptedTransport;
