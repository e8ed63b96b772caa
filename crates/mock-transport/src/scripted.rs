//! Scripted transport - replays queued outcomes.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use assist_core::{
    async_trait, GenerateContentRequest, ServiceResponse, Transport, TransportFault,
};

type Outcome = Result<ServiceResponse, TransportFault>;

/// A transport that returns queued outcomes in order and records every
/// request it receives.
///
/// Once the script runs out, every send fails with a network fault.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    sent: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedTransport {
    /// Create a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response body.
    pub fn respond(self, response: ServiceResponse) -> Self {
        lock(&self.script).push_back(Ok(response));
        self
    }

    /// Queue a transport fault.
    pub fn fail(self, fault: TransportFault) -> Self {
        lock(&self.script).push_back(Err(fault));
        self
    }

    /// Requests received so far, oldest first.
    pub fn sent_requests(&self) -> Vec<GenerateContentRequest> {
        lock(&self.sent).clone()
    }

    /// Number of requests received so far.
    pub fn send_count(&self) -> usize {
        lock(&self.sent).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<ServiceResponse, TransportFault> {
        lock(&self.sent).push(request.clone());

        lock(&self.script)
            .pop_front()
            .unwrap_or_else(|| Err(TransportFault::Network("script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "ScriptedTransport"
    }
}
