//! Chat call site and the transcript-owning chat session.

use std::sync::Arc;

use assist_core::{Conversation, ErrorInfo, ErrorKind, RequestMode, Transport, Turn};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::orchestrator::{Outcome, RequestOrchestrator};

/// Assistant greeting that opens every chat transcript.
pub const GREETING: &str = "Hello! I'm your AI writing assistant. Ask me anything! 🚀";

/// Reply shown when the service answers without any text.
pub const NO_RESPONSE_TEXT: &str = "⚠️ No response from AI";

/// Prefix for assistant turns that report a failure.
pub const WARNING_PREFIX: &str = "⚠️";

/// Chat call site: multi-turn requests that raise on failure.
pub struct ChatSite<T: Transport> {
    orchestrator: RequestOrchestrator<T>,
}

impl<T: Transport> ChatSite<T> {
    pub fn new(transport: T) -> Self {
        Self {
            orchestrator: RequestOrchestrator::new("chat", transport),
        }
    }

    /// Ask the assistant to reply to `message` given the prior `history`.
    ///
    /// `history` is read, never modified; the caller appends the reply. An
    /// empty answer becomes [`NO_RESPONSE_TEXT`] so the turn is never dropped.
    pub async fn chat_with_ai(&self, message: &str, history: &[Turn]) -> Result<String, ErrorInfo> {
        self.chat_with_ai_cancellable(message, history, &CancellationToken::new())
            .await
    }

    /// [`chat_with_ai`](Self::chat_with_ai) that can be abandoned through `cancel`.
    pub async fn chat_with_ai_cancellable(
        &self,
        message: &str,
        history: &[Turn],
        cancel: &CancellationToken,
    ) -> Result<String, ErrorInfo> {
        let outcome = self
            .orchestrator
            .invoke_cancellable(RequestMode::Conversational { history }, message, cancel)
            .await?;

        Ok(match outcome {
            Outcome::Text(text) => text,
            Outcome::Empty => NO_RESPONSE_TEXT.to_string(),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    pub fn last_error(&self) -> Option<ErrorInfo> {
        self.orchestrator.last_error()
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator<T> {
        &self.orchestrator
    }
}

/// A chat transcript bound to a chat call site.
///
/// Owns the conversation. Each exchange appends the author's turn and then
/// exactly one assistant turn: the reply, or a warning turn on failure.
pub struct ChatSession<T: Transport> {
    site: Arc<ChatSite<T>>,
    transcript: Conversation,
}

impl<T: Transport> ChatSession<T> {
    /// Start a transcript seeded with the assistant greeting.
    pub fn new(site: Arc<ChatSite<T>>) -> Self {
        Self::with_transcript(site, vec![Turn::assistant(GREETING)])
    }

    /// Start from an existing transcript.
    pub fn with_transcript(site: Arc<ChatSite<T>>, transcript: Conversation) -> Self {
        Self { site, transcript }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    pub fn site(&self) -> &ChatSite<T> {
        &self.site
    }

    /// Send one message and append the exchange to the transcript.
    ///
    /// Blank input is ignored. If the site is already busy the transcript is
    /// left unchanged. Returns the appended assistant turn.
    pub async fn send_message(&mut self, input: &str) -> Option<&Turn> {
        self.send_message_cancellable(input, &CancellationToken::new())
            .await
    }

    /// [`send_message`](Self::send_message) that can be abandoned through
    /// `cancel`; a cancelled exchange ends in a warning turn.
    ///
    /// Both turns are appended only once the request settles, so a future
    /// dropped mid-flight leaves the transcript as it was.
    pub async fn send_message_cancellable(
        &mut self,
        input: &str,
        cancel: &CancellationToken,
    ) -> Option<&Turn> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }

        let reply = self
            .site
            .chat_with_ai_cancellable(message, &self.transcript, cancel)
            .await;

        let text = match reply {
            Ok(text) => text,
            Err(error) if error.kind == ErrorKind::Busy => {
                debug!("Chat site busy, dropping message");
                return None;
            }
            Err(error) => format!("{} {}", WARNING_PREFIX, error.message),
        };

        self.transcript.push(Turn::author(message));
        self.transcript.push(Turn::assistant(text));
        self.transcript.last()
    }

    /// Header status text for the chat panel.
    pub fn status_label(&self) -> &'static str {
        if self.site.is_busy() {
            "Thinking..."
        } else {
            "Ready to help"
        }
    }
}
