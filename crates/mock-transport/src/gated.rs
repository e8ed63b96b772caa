//! Gated transport - holds requests until released.

use std::sync::atomic::{AtomicUsize, Ordering};

use assist_core::{
    async_trait, GenerateContentRequest, ServiceResponse, Transport, TransportFault,
};
use tokio::sync::{Notify, Semaphore};

/// A transport that parks every request until the test calls [`release`].
///
/// Lets tests observe a call site while its request is still in flight.
///
/// [`release`]: GatedTransport::release
pub struct GatedTransport<T: Transport> {
    inner: T,
    gate: Semaphore,
    waiting: AtomicUsize,
    entered: Notify,
}

impl<T: Transport> GatedTransport<T> {
    /// Create a gate in front of `inner`; it starts closed.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            gate: Semaphore::new(0),
            waiting: AtomicUsize::new(0),
            entered: Notify::new(),
        }
    }

    /// Let one parked (or future) request through.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Number of requests currently parked at the gate.
    pub fn waiting(&self) -> usize {
        self.waiting.load(Ordering::SeqCst)
    }

    /// Wait until at least one request is parked at the gate.
    pub async fn wait_for_request(&self) {
        loop {
            let entered = self.entered.notified();
            if self.waiting() > 0 {
                return;
            }
            entered.await;
        }
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

/// Counts a request as parked until dropped, including when the caller
/// abandons the request at the gate.
struct Parked<'a>(&'a AtomicUsize);

impl<'a> Parked<'a> {
    fn enter(waiting: &'a AtomicUsize) -> Self {
        waiting.fetch_add(1, Ordering::SeqCst);
        Self(waiting)
    }
}

impl Drop for Parked<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl<T: Transport> Transport for GatedTransport<T> {
    async fn send(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<ServiceResponse, TransportFault> {
        let parked = Parked::enter(&self.waiting);
        self.entered.notify_waiters();

        let permit = self.gate.acquire().await;
        drop(parked);
        match permit {
            Ok(permit) => permit.forget(),
            Err(_) => return Err(TransportFault::Network("gate closed".to_string())),
        }

        self.inner.send(request).await
    }

    fn name(&self) -> &str {
        "GatedTransport"
    }
}
