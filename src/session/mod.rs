// Dictation session: validated state machine plus the orchestrator that
// drives one record -> transcribe -> commit cycle

mod coordinator;
mod state;

pub use coordinator::{
    AudioRecorder, RecordingSession, SessionConfig, TextCommitter, CANCEL_REASON_SILENCE,
};
pub use state::{DictationState, DictationStateMachine, SessionError};
