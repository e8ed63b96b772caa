//! Suggestion call site and the editor's suggest action.

use assist_core::{ErrorKind, RequestMode, Transport};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::orchestrator::{Outcome, RequestOrchestrator};
use crate::selection::{resolve_target, SelectionResolver};

/// Generic message for suggestion failures that carry none of their own.
pub const SUGGESTION_FALLBACK: &str = "Failed to get AI suggestion";

/// Suggestion call site: stateless single-shot requests that return `None`
/// on failure. The failure message is available through [`error`].
///
/// [`error`]: SuggestionSite::error
pub struct SuggestionSite<T: Transport> {
    orchestrator: RequestOrchestrator<T>,
}

impl<T: Transport> SuggestionSite<T> {
    pub fn new(transport: T) -> Self {
        Self {
            orchestrator: RequestOrchestrator::new("suggestion", transport)
                .with_fallback_message(SUGGESTION_FALLBACK),
        }
    }

    /// Request a suggestion for `text`, ignoring any chat history.
    ///
    /// Returns `None` on failure, on an empty answer, or when a suggestion is
    /// already in flight. Only failures set [`error`](Self::error): a `None`
    /// with no error means the answer was empty, unless [`is_busy`] was true
    /// when the call was made, in which case it was rejected without being sent.
    ///
    /// [`is_busy`]: Self::is_busy
    pub async fn generate_suggestion(&self, text: &str) -> Option<String> {
        self.generate_suggestion_cancellable(text, &CancellationToken::new())
            .await
    }

    /// [`generate_suggestion`](Self::generate_suggestion) that can be abandoned through `cancel`.
    pub async fn generate_suggestion_cancellable(
        &self,
        text: &str,
        cancel: &CancellationToken,
    ) -> Option<String> {
        match self
            .orchestrator
            .invoke_cancellable(RequestMode::SingleShot, text, cancel)
            .await
        {
            Ok(Outcome::Text(suggestion)) => Some(suggestion),
            Ok(Outcome::Empty) => None,
            Err(error) => {
                if error.kind == ErrorKind::Busy {
                    debug!("Suggestion already in flight");
                }
                None
            }
        }
    }

    /// Suggest for the editor's selection, or the whole document without one.
    ///
    /// A blank target sends nothing.
    pub async fn suggest_for<R: SelectionResolver + ?Sized>(&self, resolver: &R) -> Option<String> {
        self.suggest_for_cancellable(resolver, &CancellationToken::new())
            .await
    }

    /// [`suggest_for`](Self::suggest_for) that can be abandoned through `cancel`.
    pub async fn suggest_for_cancellable<R: SelectionResolver + ?Sized>(
        &self,
        resolver: &R,
        cancel: &CancellationToken,
    ) -> Option<String> {
        let target = resolve_target(resolver);
        if target.trim().is_empty() {
            debug!("Nothing to suggest for, skipping request");
            return None;
        }
        self.generate_suggestion_cancellable(&target, cancel).await
    }

    /// Message of the last failed suggestion, for inline display.
    pub fn error(&self) -> Option<String> {
        self.orchestrator.last_error().map(|e| e.message)
    }

    pub fn is_busy(&self) -> bool {
        self.orchestrator.is_busy()
    }

    pub fn orchestrator(&self) -> &RequestOrchestrator<T> {
        &self.orchestrator
    }
}

/// The editor's "AI Suggest" action and the suggestion box it fills.
pub struct EditorAssist<T: Transport> {
    site: SuggestionSite<T>,
    suggestion: Option<String>,
}

impl<T: Transport> EditorAssist<T> {
    pub fn new(site: SuggestionSite<T>) -> Self {
        Self {
            site,
            suggestion: None,
        }
    }

    /// Run the suggest action against the editor's current state.
    ///
    /// Returns this request's suggestion, or `None` if it failed, was empty
    /// or was rejected. A new suggestion replaces the displayed one; otherwise
    /// [`suggestion`](Self::suggestion) keeps showing the previous one.
    pub async fn request_suggestion<R: SelectionResolver + ?Sized>(
        &mut self,
        editor: &R,
    ) -> Option<String> {
        self.request_suggestion_cancellable(editor, &CancellationToken::new())
            .await
    }

    /// [`request_suggestion`](Self::request_suggestion) that can be abandoned
    /// through `cancel`.
    pub async fn request_suggestion_cancellable<R: SelectionResolver + ?Sized>(
        &mut self,
        editor: &R,
        cancel: &CancellationToken,
    ) -> Option<String> {
        let fresh = self.site.suggest_for_cancellable(editor, cancel).await;
        if let Some(suggestion) = &fresh {
            self.suggestion = Some(suggestion.clone());
        }
        fresh
    }

    /// The suggestion currently shown, if any.
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Inline error text under the editor.
    pub fn error(&self) -> Option<String> {
        self.site.error()
    }

    /// Label of the suggest button.
    pub fn button_label(&self) -> &'static str {
        if self.site.is_busy() {
            "Thinking..."
        } else {
            "AI Suggest"
        }
    }

    pub fn site(&self) -> &SuggestionSite<T> {
        &self.site
    }
}
