use super::*;
use std::sync::{Arc, Mutex};

/// Mock emitter that records all emitted events for testing
#[derive(Default)]
pub struct MockEventEmitter {
    pub started_events: Arc<Mutex<Vec<RecordingStartedPayload>>>,
    pub cancelled_events: Arc<Mutex<Vec<RecordingCancelledPayload>>>,
    pub error_events: Arc<Mutex<Vec<RecordingErrorPayload>>>,
    pub transcription_started_events: Arc<Mutex<Vec<TranscriptionStartedPayload>>>,
    pub transcription_completed_events: Arc<Mutex<Vec<TranscriptionCompletedPayload>>>,
    pub transcription_error_events: Arc<Mutex<Vec<TranscriptionErrorPayload>>>,
}

impl MockEventEmitter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordingEventEmitter for MockEventEmitter {
    fn emit_recording_started(&self, payload: RecordingStartedPayload) {
        self.started_events.lock().unwrap().push(payload);
    }

    fn emit_recording_cancelled(&self, payload: RecordingCancelledPayload) {
        self.cancelled_events.lock().unwrap().push(payload);
    }

    fn emit_recording_error(&self, payload: RecordingErrorPayload) {
        self.error_events.lock().unwrap().push(payload);
    }
}

impl TranscriptionEventEmitter for MockEventEmitter {
    fn emit_transcription_started(&self, payload: TranscriptionStartedPayload) {
        self.transcription_started_events
            .lock()
            .unwrap()
            .push(payload);
    }

    fn emit_transcription_completed(&self, payload: TranscriptionCompletedPayload) {
        self.transcription_completed_events
            .lock()
            .unwrap()
            .push(payload);
    }

    fn emit_transcription_error(&self, payload: TranscriptionErrorPayload) {
        self.transcription_error_events
            .lock()
            .unwrap()
            .push(payload);
    }
}

#[test]
fn test_current_timestamp_is_iso8601() {
    let timestamp = current_timestamp();
    assert!(timestamp.contains("T"));
    assert!(timestamp.contains("-"));
    assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
}

// Verify serde camelCase rename works on the cancelled payload
#[test]
fn test_serde_camel_case_rename() {
    let payload = RecordingCancelledPayload {
        reason: "silence-timeout".to_string(),
        timestamp: "2025-01-01T12:00:00Z".to_string(),
    };
    let json = serde_json::to_string(&payload).unwrap();
    assert!(json.contains("\"reason\""));
    assert!(json.contains("\"timestamp\""));
    assert!(json.contains("silence-timeout"));
}

// MockEmitter tests - verify the mock infrastructure works correctly
#[test]
fn test_mock_emitter_records_recording_events() {
    let emitter = MockEventEmitter::new();

    emitter.emit_recording_started(RecordingStartedPayload {
        timestamp: "2025-01-01T12:00:00Z".to_string(),
    });
    emitter.emit_recording_cancelled(RecordingCancelledPayload {
        reason: "user".to_string(),
        timestamp: "2025-01-01T12:00:05Z".to_string(),
    });
    emitter.emit_recording_error(RecordingErrorPayload {
        message: "Test error".to_string(),
    });

    assert_eq!(emitter.started_events.lock().unwrap().len(), 1);
    assert_eq!(emitter.cancelled_events.lock().unwrap().len(), 1);
    assert_eq!(emitter.error_events.lock().unwrap().len(), 1);
}

#[test]
fn test_mock_emitter_records_transcription_events() {
    let emitter = MockEventEmitter::new();

    emitter.emit_transcription_started(TranscriptionStartedPayload {
        timestamp: "2025-01-01T12:00:00Z".to_string(),
    });
    emitter.emit_transcription_completed(TranscriptionCompletedPayload {
        text: "Hello".to_string(),
        duration_ms: 100,
    });
    emitter.emit_transcription_error(TranscriptionErrorPayload {
        error: "Test error".to_string(),
    });

    assert_eq!(
        emitter.transcription_started_events.lock().unwrap().len(),
        1
    );
    assert_eq!(
        emitter
            .transcription_completed_events
            .lock()
            .unwrap()
            .len(),
        1
    );
    assert_eq!(emitter.transcription_error_events.lock().unwrap().len(), 1);
}

#[test]
fn test_mock_emitter_records_multiple_events() {
    let emitter = MockEventEmitter::new();

    emitter.emit_recording_started(RecordingStartedPayload {
        timestamp: "2025-01-01T12:00:00Z".to_string(),
    });
    emitter.emit_recording_started(RecordingStartedPayload {
        timestamp: "2025-01-01T12:01:00Z".to_string(),
    });

    assert_eq!(emitter.started_events.lock().unwrap().len(), 2);
}

#[test]
fn test_noop_emitter_accepts_all_events() {
    let emitter = NoopEmitter;
    emitter.emit_recording_started(RecordingStartedPayload {
        timestamp: current_timestamp(),
    });
    emitter.emit_transcription_error(TranscriptionErrorPayload {
        error: "dropped".to_string(),
    });
}
