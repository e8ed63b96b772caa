//! Wiring of both call sites over one transport.

use std::sync::Arc;

use assist_core::{Transport, TransportFault};
use gemini_transport::GeminiTransport;

use crate::chat::{ChatSession, ChatSite};
use crate::suggest::{EditorAssist, SuggestionSite};

/// The chat surface and the editor's suggest action, ready to use.
///
/// Both call sites may share a transport, but each has its own
/// orchestrator, so a pending chat reply never blocks a suggestion.
pub struct WritingAssistant<T: Transport> {
    pub chat: ChatSession<T>,
    pub editor: EditorAssist<T>,
}

impl<T: Transport> WritingAssistant<T> {
    pub fn new(chat_transport: T, suggestion_transport: T) -> Self {
        Self {
            chat: ChatSession::new(Arc::new(ChatSite::new(chat_transport))),
            editor: EditorAssist::new(SuggestionSite::new(suggestion_transport)),
        }
    }
}

impl WritingAssistant<Arc<GeminiTransport>> {
    /// Build both call sites over a single Gemini transport.
    ///
    /// See [`gemini_transport::GeminiConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, TransportFault> {
        let transport = Arc::new(GeminiTransport::from_env()?);
        Ok(Self::new(transport.clone(), transport))
    }
}
