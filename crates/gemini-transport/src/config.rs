//! Configuration for GeminiTransport.

use std::env;

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_API_VERSION: &str = "v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for GeminiTransport.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API base URL.
    pub api_url: String,

    /// API version path segment.
    pub api_version: String,

    /// Model name to use.
    pub model: String,

    /// API key. When `None`, `GEMINI_API_KEY` is read on every send.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_url", &self.api_url)
            .field("api_version", &self.api_version)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl GeminiConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `GEMINI_API_URL` - API URL (default: https://generativelanguage.googleapis.com)
    /// - `GEMINI_API_VERSION` - API version (default: v1beta)
    /// - `GEMINI_MODEL` - Model name (default: gemini-2.5-flash)
    ///
    /// `GEMINI_API_KEY` is not captured here; it is read when each request
    /// is sent, so a missing key shows up as a transport fault.
    pub fn from_env() -> Self {
        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_version =
            env::var("GEMINI_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            api_url,
            api_version,
            model,
            api_key: None,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Full `generateContent` endpoint, without the key.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.api_url.trim_end_matches('/'),
            self.api_version,
            self.model
        )
    }

    /// Resolve the credential for one request.
    pub(crate) fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty())
    }
}

/// Builder for GeminiConfig.
#[derive(Debug, Default)]
pub struct GeminiConfigBuilder {
    config: GeminiConfig,
}

impl GeminiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the API URL.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the API version.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    /// Set the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> GeminiConfig {
        self.config
    }
}
