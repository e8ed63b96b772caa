//! Request orchestration for the writing assistant's two call sites.
//!
//! This crate provides the single-flight [`RequestOrchestrator`] and the
//! two surfaces built on it: the chat sidebar ([`ChatSite`], [`ChatSession`])
//! and the editor's suggest action ([`SuggestionSite`], [`EditorAssist`]).
//!
//! # Features
//!
//! - One request in flight per call site; extra invocations are rejected as busy
//! - Busy flag always cleared on settlement, including dropped futures
//! - Chat failures surface as warning-prefixed assistant turns
//! - Suggestion failures surface as `None` plus an inline error message
//! - Optional cancellation through a `CancellationToken`
//!
//! # Architecture
//!
//! ```text
//! chat message / suggest click
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 REQUEST ORCHESTRATOR (per site)             │
//! │                                                             │
//! │  1. Idle -> InFlight (or reject: Busy)                      │
//! │         ↓                                                   │
//! │  2. Build payload (conversational or single-shot)           │
//! │         ↓                                                   │
//! │  3. Send via Transport                                      │
//! │         ↓                                                   │
//! │  4. Extract text / classify failure                         │
//! │         ↓                                                   │
//! │  5. InFlight -> Idle, record last error                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use orchestrator::{DocumentSnapshot, WritingAssistant};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut assistant = WritingAssistant::from_env()?;
//!
//!     if let Some(reply) = assistant.chat.send_message("Help me open my essay.").await {
//!         println!("AI: {}", reply.text());
//!     }
//!
//!     let doc = DocumentSnapshot::new("The quick brown fox.").with_selection(4..15);
//!     if let Some(suggestion) = assistant.editor.request_suggestion(&doc).await {
//!         println!("Suggestion: {}", suggestion);
//!     }
//!     Ok(())
//! }
//! ```

mod assistant;
mod chat;
mod orchestrator;
mod selection;
mod state;
mod suggest;

// Public exports
pub use assistant::WritingAssistant;
pub use chat::{ChatSession, ChatSite, GREETING, NO_RESPONSE_TEXT, WARNING_PREFIX};
pub use orchestrator::{Outcome, RequestOrchestrator};
pub use selection::{resolve_target, DocumentSnapshot, SelectionResolver};
pub use state::{OrchestrationState, Phase};
pub use suggest::{EditorAssist, SuggestionSite, SUGGESTION_FALLBACK};

// Re-export commonly used types from dependencies
pub use assist_core::{ErrorInfo, ErrorKind, Role, Transport, TransportFault, Turn};
pub use gemini_transport::{GeminiConfig, GeminiTransport};
pub use tokio_util::sync::CancellationToken;
