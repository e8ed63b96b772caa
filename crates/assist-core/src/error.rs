//! Error taxonomy for the request pipeline.

use thiserror::Error;

/// Message used when a failure carries no message of its own.
pub const GENERIC_SERVICE_ERROR: &str = "Failed to get AI response";

/// Classification of a failed (or contentless) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network failure or non-success status without a usable error body.
    TransportFault,
    /// The service answered with an explicit error descriptor.
    ServiceError,
    /// The service answered but produced no usable text.
    EmptyResult,
    /// Rejected because a request on the same call site has not settled.
    Busy,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::TransportFault => "transport_fault",
            ErrorKind::ServiceError => "service_error",
            ErrorKind::EmptyResult => "empty_result",
            ErrorKind::Busy => "busy",
        }
    }
}

/// A classified failure, ready for display.
///
/// The `Display` form is the human-readable message alone, so call sites
/// can render it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Rejection for an invocation that arrived while another was in flight.
    pub fn busy() -> Self {
        Self::new(ErrorKind::Busy, "A request is already in progress")
    }
}

/// Failures raised by a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFault {
    /// Connection, DNS, TLS or body read failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success status whose body carried no error descriptor.
    #[error("Failed to get AI response (HTTP {status})")]
    Status { status: u16, body: String },

    /// No API credential was available at call time.
    #[error("API key not configured")]
    MissingCredential,

    /// The caller cancelled the request before it settled.
    #[error("Request cancelled")]
    Cancelled,
}

/// Reasons the extractor could not produce text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    /// The body carried an error descriptor, with its message if it had one.
    #[error("{}", .0.as_deref().unwrap_or(GENERIC_SERVICE_ERROR))]
    ServiceError(Option<String>),

    /// No candidate text was produced.
    #[error("No output produced")]
    EmptyResult,
}

impl TransportFault {
    /// Classify for a call site whose generic failure text is `fallback`.
    pub fn classify(self, fallback: &str) -> ErrorInfo {
        let message = match &self {
            TransportFault::Status { status, .. } => format!("{} (HTTP {})", fallback, status),
            _ => self.to_string(),
        };
        ErrorInfo::new(ErrorKind::TransportFault, message)
    }
}

impl ExtractionFailure {
    /// Classify for a call site whose generic failure text is `fallback`.
    ///
    /// A service error without a message of its own takes `fallback`.
    pub fn classify(self, fallback: &str) -> ErrorInfo {
        match self {
            ExtractionFailure::ServiceError(message) => ErrorInfo::new(
                ErrorKind::ServiceError,
                message.unwrap_or_else(|| fallback.to_string()),
            ),
            ExtractionFailure::EmptyResult => {
                ErrorInfo::new(ErrorKind::EmptyResult, self.to_string())
            }
        }
    }
}

impl From<TransportFault> for ErrorInfo {
    fn from(fault: TransportFault) -> Self {
        fault.classify(GENERIC_SERVICE_ERROR)
    }
}

impl From<ExtractionFailure> for ErrorInfo {
    fn from(failure: ExtractionFailure) -> Self {
        failure.classify(GENERIC_SERVICE_ERROR)
    }
}
