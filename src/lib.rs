// voicekey: voice dictation core
// Amplitude-driven voice activity detection plus a cancellable pipeline that
// turns finished clips into committed text via a remote transcription backend.
// Everything platform-shaped (audio capture, settings persistence, text
// insertion, script conversion) lives behind collaborator traits.

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod events;
pub mod jobs;
pub mod postprocess;
pub mod session;
pub mod settings;
pub mod transcribe;
pub mod vad;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use events::{NoopEmitter, RecordingEventEmitter, TranscriptionEventEmitter};
pub use postprocess::{IdentityConverter, TextConverter};
pub use session::{
    AudioRecorder, DictationState, RecordingSession, SessionConfig, SessionError, TextCommitter,
};
pub use settings::{BackendKind, PostprocessMode, SettingsStore, TranscriptionConfig};
pub use transcribe::{HttpTransport, ReqwestTransport, TranscribeError, TranscriptionClient};
pub use vad::{VadConfig, VadDecision, VadState, VoiceActivityFsm, WindowedMaxTracker};
