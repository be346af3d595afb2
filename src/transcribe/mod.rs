// Transcription pipeline: request construction, HTTP transport, job lifecycle

mod client;
mod request;

pub use client::{
    HttpResponse, HttpTransport, ReqwestTransport, TranscriptionClient,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use request::{build_request, FormField, TranscriptionRequest, DEFAULT_OPENAI_MODEL};

/// Failures of one transcription attempt, delivered via the error callback.
///
/// Cancellation is deliberately not represented here: a cancelled job invokes
/// neither callback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscribeError {
    /// No endpoint configured; checked before any network attempt
    #[error("Transcription endpoint is not configured")]
    EndpointUnset,
    /// The OpenAI-compatible backend requires an API key
    #[error("API key is not configured")]
    ApiKeyUnset,
    /// The backend answered with a non-2xx status; detail is the response
    /// body with newlines collapsed to spaces
    #[error("Transcription backend error: {0}")]
    BackendError(String),
    /// Network-level failure (DNS, connection refused, timeout)
    #[error("Network error: {0}")]
    TransportError(String),
}
