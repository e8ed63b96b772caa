//! Single-flight request orchestrator shared by both call sites.

use std::sync::{Mutex, MutexGuard, PoisonError};

use assist_core::{
    build_request, extract, ErrorInfo, ExtractionFailure, RequestMode, Transport, TransportFault,
    GENERIC_SERVICE_ERROR,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::state::OrchestrationState;

/// Successful settlement of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The service produced text.
    Text(String),
    /// The service answered but produced nothing usable.
    Empty,
}

/// Drives Request Builder -> Transport -> Response Extractor for one call site.
///
/// Each call site owns its own orchestrator; instances never share state.
/// At most one request is in flight per instance. A second invocation
/// while one is pending is rejected with `Busy` rather than queued.
pub struct RequestOrchestrator<T: Transport> {
    /// Call site label used in logs.
    label: &'static str,
    /// Shown for failures that carry no message of their own.
    fallback_message: &'static str,
    transport: T,
    state: Mutex<OrchestrationState>,
}

impl<T: Transport> RequestOrchestrator<T> {
    /// Create an idle orchestrator for the named call site.
    pub fn new(label: &'static str, transport: T) -> Self {
        info!(
            "{} orchestrator initialized with transport: {}",
            label,
            transport.name()
        );

        Self {
            label,
            fallback_message: GENERIC_SERVICE_ERROR,
            transport,
            state: Mutex::new(OrchestrationState::new()),
        }
    }

    /// Replace the generic failure message used by this call site.
    pub fn with_fallback_message(mut self, message: &'static str) -> Self {
        self.fallback_message = message;
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn fallback_message(&self) -> &'static str {
        self.fallback_message
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> OrchestrationState {
        lock(&self.state).clone()
    }

    pub fn is_busy(&self) -> bool {
        lock(&self.state).busy()
    }

    pub fn last_error(&self) -> Option<ErrorInfo> {
        lock(&self.state).last_error().cloned()
    }

    /// Run one request to completion.
    pub async fn invoke(&self, mode: RequestMode<'_>, input: &str) -> Result<Outcome, ErrorInfo> {
        self.invoke_cancellable(mode, input, &CancellationToken::new())
            .await
    }

    /// Run one request, abandoning it if `cancel` fires first.
    ///
    /// A cancelled request settles as a transport fault.
    pub async fn invoke_cancellable(
        &self,
        mode: RequestMode<'_>,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<Outcome, ErrorInfo> {
        let flight = match Flight::begin(&self.state) {
            Ok(flight) => flight,
            Err(busy) => {
                debug!("{} request rejected: already in flight", self.label);
                return Err(busy);
            }
        };

        let request = build_request(mode, input);
        debug!(
            "{} request started with {} content entries",
            self.label,
            request.contents.len()
        );

        let sent = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TransportFault::Cancelled),
            result = self.transport.send(&request) => result,
        };

        let result = match sent {
            Ok(response) => match extract(&response) {
                Ok(text) => Ok(Outcome::Text(text)),
                Err(ExtractionFailure::EmptyResult) => {
                    warn!("{} request produced no output", self.label);
                    Ok(Outcome::Empty)
                }
                Err(failure) => Err(failure.classify(self.fallback_message)),
            },
            Err(fault) => Err(fault.classify(self.fallback_message)),
        };

        match &result {
            Ok(_) => debug!("{} request settled", self.label),
            Err(error) => warn!(
                "{} request failed ({}): {}",
                self.label,
                error.kind.as_str(),
                error.message
            ),
        }

        flight.settle(result.as_ref().err().cloned());
        result
    }
}

fn lock(state: &Mutex<OrchestrationState>) -> MutexGuard<'_, OrchestrationState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks a call site busy for its lifetime.
///
/// Dropping the guard always returns the state to `Idle`, so a request
/// future dropped mid-flight cannot leave the call site disabled.
struct Flight<'a> {
    state: &'a Mutex<OrchestrationState>,
    settled: Option<Option<ErrorInfo>>,
}

impl<'a> Flight<'a> {
    fn begin(state: &'a Mutex<OrchestrationState>) -> Result<Self, ErrorInfo> {
        lock(state).begin()?;
        Ok(Self {
            state,
            settled: None,
        })
    }

    fn settle(mut self, error: Option<ErrorInfo>) {
        self.settled = Some(error);
    }
}

impl Drop for Flight<'_> {
    fn drop(&mut self) {
        let error = match self.settled.take() {
            Some(error) => error,
            // Abandoned before settling.
            None => Some(ErrorInfo::from(TransportFault::Cancelled)),
        };
        lock(self.state).settle(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assist_core::{ErrorKind, Turn};
    use mock_transport::{responses, GatedTransport, ScriptedTransport};
    use std::sync::Arc;

    fn orchestrator(transport: ScriptedTransport) -> RequestOrchestrator<ScriptedTransport> {
        RequestOrchestrator::new("test", transport)
    }

    #[tokio::test]
    async fn test_success_returns_text_and_goes_idle() {
        let orch = orchestrator(ScriptedTransport::new().respond(responses::text("Hello!")));

        let outcome = orch
            .invoke(RequestMode::Conversational { history: &[] }, "Hi")
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Text("Hello!".to_string()));
        assert!(!orch.is_busy());
        assert!(orch.last_error().is_none());
    }

    #[tokio::test]
    async fn test_sends_built_payload() {
        let orch = orchestrator(ScriptedTransport::new().respond(responses::text("ok")));
        let history = vec![Turn::author("A"), Turn::assistant("B")];

        orch.invoke(RequestMode::Conversational { history: &history }, "C")
            .await
            .unwrap();

        let sent = orch.transport().sent_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], build_request(RequestMode::Conversational { history: &history }, "C"));
    }

    #[tokio::test]
    async fn test_empty_result_is_not_an_error() {
        let orch = orchestrator(ScriptedTransport::new().respond(responses::empty()));

        let outcome = orch.invoke(RequestMode::SingleShot, "text").await.unwrap();

        assert_eq!(outcome, Outcome::Empty);
        assert!(!orch.is_busy());
        assert!(orch.last_error().is_none());
    }

    #[tokio::test]
    async fn test_service_error_recorded() {
        let orch =
            orchestrator(ScriptedTransport::new().respond(responses::error("quota exceeded")));

        let err = orch.invoke(RequestMode::SingleShot, "text").await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::ServiceError);
        assert_eq!(err.message, "quota exceeded");
        assert!(!orch.is_busy());
        assert_eq!(orch.last_error(), Some(err));
    }

    #[tokio::test]
    async fn test_fallback_message_fills_bare_failures() {
        let orch = RequestOrchestrator::new(
            "test",
            ScriptedTransport::new()
                .respond(responses::bare_error())
                .fail(TransportFault::Status {
                    status: 500,
                    body: String::new(),
                }),
        )
        .with_fallback_message("Failed to get AI suggestion");

        let bare = orch.invoke(RequestMode::SingleShot, "one").await.unwrap_err();
        assert_eq!(bare.kind, ErrorKind::ServiceError);
        assert_eq!(bare.message, "Failed to get AI suggestion");

        let status = orch.invoke(RequestMode::SingleShot, "two").await.unwrap_err();
        assert_eq!(status.message, "Failed to get AI suggestion (HTTP 500)");
    }

    #[tokio::test]
    async fn test_transport_fault_recorded() {
        let orch = orchestrator(
            ScriptedTransport::new().fail(TransportFault::Network("connection refused".into())),
        );

        let err = orch.invoke(RequestMode::SingleShot, "text").await.unwrap_err();

        assert_eq!(err.kind, ErrorKind::TransportFault);
        assert!(!orch.is_busy());
        assert_eq!(orch.last_error().map(|e| e.kind), Some(ErrorKind::TransportFault));
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let orch = orchestrator(
            ScriptedTransport::new()
                .respond(responses::error("quota exceeded"))
                .respond(responses::text("recovered")),
        );

        let _ = orch.invoke(RequestMode::SingleShot, "one").await;
        assert!(orch.last_error().is_some());

        orch.invoke(RequestMode::SingleShot, "two").await.unwrap();
        assert!(orch.last_error().is_none());
    }

    #[tokio::test]
    async fn test_busy_rejection_does_not_disturb_first_request() {
        let orch = RequestOrchestrator::new(
            "test",
            GatedTransport::new(ScriptedTransport::new().respond(responses::text("first"))),
        );

        let first = orch.invoke(RequestMode::SingleShot, "one");
        let second = async {
            orch.transport().wait_for_request().await;
            assert!(orch.is_busy());
            assert!(orch.last_error().is_none());

            let rejected = orch.invoke(RequestMode::SingleShot, "two").await;

            // Rejection left the in-flight state alone.
            assert!(orch.is_busy());
            assert!(orch.last_error().is_none());
            orch.transport().release();
            rejected
        };

        let (first, second) = tokio::join!(first, second);

        assert_eq!(first.unwrap(), Outcome::Text("first".to_string()));
        assert_eq!(second.unwrap_err().kind, ErrorKind::Busy);
        assert_eq!(orch.transport().inner().send_count(), 1);
        assert!(!orch.is_busy());
    }

    #[tokio::test]
    async fn test_cancellation_settles_as_transport_fault() {
        let orch = RequestOrchestrator::new(
            "test",
            GatedTransport::new(ScriptedTransport::new().respond(responses::text("never"))),
        );
        let cancel = CancellationToken::new();

        let request = orch.invoke_cancellable(RequestMode::SingleShot, "one", &cancel);
        let canceller = async {
            orch.transport().wait_for_request().await;
            cancel.cancel();
        };

        let (result, ()) = tokio::join!(request, canceller);

        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::TransportFault);
        assert_eq!(err.message, TransportFault::Cancelled.to_string());
        assert!(!orch.is_busy());
        assert_eq!(orch.transport().inner().send_count(), 0);
    }

    #[tokio::test]
    async fn test_dropped_request_future_goes_idle() {
        let orch = Arc::new(RequestOrchestrator::new(
            "test",
            GatedTransport::new(ScriptedTransport::new()),
        ));

        let task = {
            let orch = orch.clone();
            tokio::spawn(async move { orch.invoke(RequestMode::SingleShot, "one").await })
        };

        orch.transport().wait_for_request().await;
        assert!(orch.is_busy());

        task.abort();
        let _ = task.await;

        assert!(!orch.is_busy());
        assert_eq!(orch.transport().waiting(), 0);
        assert_eq!(
            orch.last_error().map(|e| e.kind),
            Some(ErrorKind::TransportFault)
        );
    }
}
