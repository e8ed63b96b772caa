//! The transport boundary.

use async_trait::async_trait;

use crate::api_types::{GenerateContentRequest, ServiceResponse};
use crate::error::TransportFault;

/// Sends a built payload to the generative service.
///
/// Implementations perform exactly one attempt per call: no retries, no
/// caching, no deduplication. A response whose body carries an error
/// descriptor should be returned as `Ok` so the extractor can classify it.
/// This trait is object-safe and can be used with `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the parsed response body.
    async fn send(&self, request: &GenerateContentRequest)
        -> Result<ServiceResponse, TransportFault>;

    /// Get a human-readable name for this transport.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<ServiceResponse, TransportFault> {
        (**self).send(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
