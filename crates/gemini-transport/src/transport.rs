//! GeminiTransport implementation using the generateContent API.

use assist_core::{
    async_trait, GenerateContentRequest, ServiceResponse, Transport, TransportFault,
};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::config::GeminiConfig;

/// HTTP transport for Google's Gemini `generateContent` endpoint.
///
/// Holds a pooled reqwest client. Each call to [`Transport::send`] makes
/// exactly one POST.
pub struct GeminiTransport {
    client: Client,
    config: GeminiConfig,
}

impl GeminiTransport {
    /// Create a new GeminiTransport with the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self, TransportFault> {
        let client = Client::builder().build().map_err(|e| {
            TransportFault::Network(format!("Failed to create HTTP client: {}", e))
        })?;

        info!(
            "GeminiTransport initialized with model: {}, endpoint: {}",
            config.model,
            config.endpoint_url()
        );

        Ok(Self { client, config })
    }

    /// Create a GeminiTransport from environment variables.
    ///
    /// See [`GeminiConfig::from_env`] for the variables read.
    pub fn from_env() -> Result<Self, TransportFault> {
        Self::new(GeminiConfig::from_env())
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn send(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<ServiceResponse, TransportFault> {
        let api_key = self
            .config
            .resolve_api_key()
            .ok_or(TransportFault::MissingCredential)?;
        let url = self.config.endpoint_url();

        debug!(
            "Sending request to {} with {} content entries",
            url,
            request.contents.len()
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            // Drop the URL from the error: it carries the key as a query parameter.
            .map_err(|e| {
                TransportFault::Network(format!("Failed to send request: {}", e.without_url()))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            TransportFault::Network(format!("Failed to read response: {}", e.without_url()))
        })?;

        classify_response(status, &body)
    }

    fn name(&self) -> &str {
        "GeminiTransport"
    }
}

/// Turn a status and raw body into a response or a transport fault.
///
/// Failing statuses whose body carries an `error` descriptor are passed on
/// as responses so the descriptor's message reaches the user.
fn classify_response(status: StatusCode, body: &str) -> Result<ServiceResponse, TransportFault> {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();

    if status.is_success() {
        return match parsed {
            Some(value) => {
                debug!("Received response from Gemini API ({})", status.as_u16());
                Ok(ServiceResponse::from_value(value))
            }
            None => {
                warn!("Unparseable success body from Gemini API");
                Err(TransportFault::Network(format!(
                    "Failed to parse response (HTTP {})",
                    status.as_u16()
                )))
            }
        };
    }

    match parsed.map(ServiceResponse::from_value) {
        Some(response) if response.has_error() => {
            warn!("Gemini API error ({})", status.as_u16());
            Ok(response)
        }
        _ => {
            warn!("Gemini API returned HTTP {} without error body", status.as_u16());
            Err(TransportFault::Status {
                status: status.as_u16(),
                body: body.to_string(),
            })
        }
    }
}
