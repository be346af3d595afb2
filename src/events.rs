// Recording and transcription events for host notification
// Defines event payloads and emission traits for testability

use serde::Serialize;

/// Event names as constants for consistency
pub mod event_names {
    pub const RECORDING_STARTED: &str = "recording_started";
    pub const RECORDING_CANCELLED: &str = "recording_cancelled";
    pub const RECORDING_ERROR: &str = "recording_error";
    pub const TRANSCRIPTION_STARTED: &str = "transcription_started";
    pub const TRANSCRIPTION_COMPLETED: &str = "transcription_completed";
    pub const TRANSCRIPTION_ERROR: &str = "transcription_error";
}

/// Payload for recording_started event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordingStartedPayload {
    /// ISO 8601 timestamp when recording started
    pub timestamp: String,
}

/// Payload for recording_cancelled event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordingCancelledPayload {
    /// Reason for cancellation (e.g., "silence-timeout", "user")
    pub reason: String,
    /// ISO 8601 timestamp when recording was cancelled
    pub timestamp: String,
}

/// Payload for recording_error event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordingErrorPayload {
    /// Descriptive error message
    pub message: String,
}

/// Payload for transcription_started event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranscriptionStartedPayload {
    /// ISO 8601 timestamp when transcription started
    pub timestamp: String,
}

/// Payload for transcription_completed event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranscriptionCompletedPayload {
    /// The transcribed text, after postprocessing
    pub text: String,
    /// Duration of transcription in milliseconds
    pub duration_ms: u64,
}

/// Payload for transcription_error event
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TranscriptionErrorPayload {
    /// Descriptive error message, suitable for a one-shot notification
    pub error: String,
}

/// Trait for emitting recording events
/// Allows mocking in tests while using a real host bridge in production
pub trait RecordingEventEmitter: Send + Sync {
    /// Emit recording_started event
    fn emit_recording_started(&self, payload: RecordingStartedPayload);

    /// Emit recording_cancelled event
    fn emit_recording_cancelled(&self, payload: RecordingCancelledPayload);

    /// Emit recording_error event
    fn emit_recording_error(&self, payload: RecordingErrorPayload);
}

/// Trait for emitting transcription events
pub trait TranscriptionEventEmitter: Send + Sync {
    /// Emit transcription_started event
    fn emit_transcription_started(&self, payload: TranscriptionStartedPayload);

    /// Emit transcription_completed event
    fn emit_transcription_completed(&self, payload: TranscriptionCompletedPayload);

    /// Emit transcription_error event
    fn emit_transcription_error(&self, payload: TranscriptionErrorPayload);
}

/// Emitter that drops every event, for embedders that do not observe them.
pub struct NoopEmitter;

impl RecordingEventEmitter for NoopEmitter {
    fn emit_recording_started(&self, _payload: RecordingStartedPayload) {}
    fn emit_recording_cancelled(&self, _payload: RecordingCancelledPayload) {}
    fn emit_recording_error(&self, _payload: RecordingErrorPayload) {}
}

impl TranscriptionEventEmitter for NoopEmitter {
    fn emit_transcription_started(&self, _payload: TranscriptionStartedPayload) {}
    fn emit_transcription_completed(&self, _payload: TranscriptionCompletedPayload) {}
    fn emit_transcription_error(&self, _payload: TranscriptionErrorPayload) {}
}

/// Current timestamp in ISO 8601 / RFC 3339 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;
