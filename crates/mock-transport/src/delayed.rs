//! Delayed transport - wraps another transport with artificial delay.

use std::time::Duration;

use assist_core::{
    async_trait, GenerateContentRequest, ServiceResponse, Transport, TransportFault,
};
use tokio::time::sleep;

/// A transport that wraps another transport and adds artificial delay.
///
/// Useful for simulating service latency while a call site is busy.
pub struct DelayedTransport<T: Transport> {
    inner: T,
    delay: Duration,
}

impl<T: Transport> DelayedTransport<T> {
    /// Create a new DelayedTransport wrapping the given transport with the specified delay.
    pub fn new(inner: T, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a transport with a delay in milliseconds.
    pub fn with_millis(inner: T, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: Transport> Transport for DelayedTransport<T> {
    async fn send(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<ServiceResponse, TransportFault> {
        sleep(self.delay).await;
        self.inner.send(request).await
    }

    fn name(&self) -> &str {
        "DelayedTransport"
    }
}
