//! Gemini `generateContent` transport.
//!
//! This crate provides the HTTP [`Transport`] used by the writing
//! assistant's chat and suggestion call sites.
//!
//! # Features
//!
//! - Uses Google's `gemini-2.5-flash` model by default
//! - One attempt per request, no retries
//! - Error bodies from failing responses are handed to the extractor
//! - API key read at call time, from config or `GEMINI_API_KEY`
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_transport::{build_request, extract, GeminiTransport, RequestMode, Transport};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = GeminiTransport::from_env()?;
//!     let request = build_request(RequestMode::SingleShot, "Suggest a title.");
//!     let response = transport.send(&request).await?;
//!     println!("{}", extract(&response)?);
//!     Ok(())
//! }
//! ```

mod config;
mod transport;

pub use config::{GeminiConfig, GeminiConfigBuilder, API_KEY_ENV};
pub use transport::GeminiTransport;

// Re-export assist-core types for convenience
pub use assist_core::{
    async_trait, build_request, extract, ErrorInfo, ErrorKind, GenerateContentRequest,
    RequestMode, ServiceResponse, Transport, TransportFault, Turn,
};
