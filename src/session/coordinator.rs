// Recording session orchestration
// Wires the audio recorder, the voice activity FSM, and the transcription
// client into one dictation cycle

use super::state::{DictationState, DictationStateMachine, SessionError};
use crate::events::{
    current_timestamp, NoopEmitter, RecordingCancelledPayload, RecordingErrorPayload,
    RecordingEventEmitter, RecordingStartedPayload, TranscriptionCompletedPayload,
    TranscriptionErrorPayload, TranscriptionEventEmitter, TranscriptionStartedPayload,
};
use crate::jobs::{JobHandle, JobRegistry};
use crate::settings::{self, SettingsStore};
use crate::transcribe::TranscriptionClient;
use crate::vad::{VadConfig, VadDecision, VoiceActivityFsm};
use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cancellation reason reported when the VAD times out waiting for speech
pub const CANCEL_REASON_SILENCE: &str = "silence-timeout";

/// Audio capture collaborator.
///
/// The host owns the actual capture stack; the session only needs start/stop
/// and a periodic peak-amplitude reading.
pub trait AudioRecorder: Send + Sync {
    /// Begin capturing into `output_path`.
    fn start(&self, output_path: &Path, format_hint: &str) -> Result<(), String>;

    /// Stop capturing and finalize the clip.
    fn stop(&self);

    /// Peak amplitude since the previous call. Polled once per sample period.
    fn max_amplitude(&self) -> u32;
}

/// Receives the final transcribed text at the host's input cursor.
pub trait TextCommitter: Send + Sync {
    fn commit_text(&self, text: &str);
}

/// Static configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Well-known clip location, exclusively owned by the active cycle
    pub audio_path: PathBuf,
    /// Media type sent with the clip (e.g. "audio/m4a")
    pub media_type: String,
    /// Format hint passed to the recorder collaborator
    pub format_hint: String,
    /// Appended to committed text (e.g. a trailing space)
    pub text_to_append: String,
    pub vad: VadConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self {
            audio_path: cache_dir.join("voicekey").join("recorded.m4a"),
            media_type: "audio/m4a".to_string(),
            format_hint: "m4a".to_string(),
            text_to_append: " ".to_string(),
            vad: VadConfig::default(),
        }
    }
}

/// Orchestrates one dictation cycle: record with VAD auto-stop, transcribe,
/// commit the text.
///
/// The amplitude polling loop runs as a background task registered in a
/// [`JobRegistry`], so restarting a session can never leave a stale loop
/// feeding an old FSM.
pub struct RecordingSession {
    config: SessionConfig,
    machine: Mutex<DictationStateMachine>,
    recorder: Arc<dyn AudioRecorder>,
    committer: Arc<dyn TextCommitter>,
    client: TranscriptionClient,
    store: Arc<dyn SettingsStore>,
    recording_emitter: Arc<dyn RecordingEventEmitter>,
    transcription_emitter: Arc<dyn TranscriptionEventEmitter>,
    polling: JobRegistry,
}

impl RecordingSession {
    pub fn new(
        config: SessionConfig,
        recorder: Arc<dyn AudioRecorder>,
        committer: Arc<dyn TextCommitter>,
        client: TranscriptionClient,
        store: Arc<dyn SettingsStore>,
    ) -> Self {
        Self {
            config,
            machine: Mutex::new(DictationStateMachine::new()),
            recorder,
            committer,
            client,
            store,
            recording_emitter: Arc::new(NoopEmitter),
            transcription_emitter: Arc::new(NoopEmitter),
            polling: JobRegistry::new(),
        }
    }

    /// Observe recording lifecycle events (builder pattern)
    pub fn with_recording_emitter(mut self, emitter: Arc<dyn RecordingEventEmitter>) -> Self {
        self.recording_emitter = emitter;
        self
    }

    /// Observe transcription lifecycle events (builder pattern)
    pub fn with_transcription_emitter(mut self, emitter: Arc<dyn TranscriptionEventEmitter>) -> Self {
        self.transcription_emitter = emitter;
        self
    }

    pub fn state(&self) -> DictationState {
        self.machine.lock().state()
    }

    /// Start a new recording cycle.
    ///
    /// Removes any stale clip at the well-known path, starts the recorder,
    /// and spawns the amplitude polling loop that drives the VAD.
    pub fn start_recording(self: &Arc<Self>) -> Result<(), SessionError> {
        self.machine.lock().transition_to(DictationState::Recording)?;

        prepare_clip_path(&self.config.audio_path);

        if let Err(message) = self
            .recorder
            .start(&self.config.audio_path, &self.config.format_hint)
        {
            crate::error!("[session] recorder failed to start: {message}");
            self.recording_emitter
                .emit_recording_error(RecordingErrorPayload {
                    message: message.clone(),
                });
            self.machine.lock().force_idle();
            return Err(SessionError::RecorderStart(message));
        }

        self.recording_emitter
            .emit_recording_started(RecordingStartedPayload {
                timestamp: current_timestamp(),
            });

        self.spawn_amplitude_polling();
        Ok(())
    }

    /// Stop the recorder and hand the clip to the transcription client.
    ///
    /// Called by the VAD on trailing silence, or directly by the host when
    /// the user taps "done".
    pub fn finish_recording(self: &Arc<Self>) -> Result<(), SessionError> {
        self.machine
            .lock()
            .transition_to(DictationState::Transcribing)?;

        self.polling.clear();
        self.recorder.stop();

        self.transcription_emitter
            .emit_transcription_started(TranscriptionStartedPayload {
                timestamp: current_timestamp(),
            });

        let started = Instant::now();
        let success_session = Arc::clone(self);
        let error_session = Arc::clone(self);

        self.client.start_async(
            self.config.audio_path.clone(),
            &self.config.media_type,
            &self.config.text_to_append,
            move |text| success_session.handle_transcription_success(text, started),
            move |message| error_session.handle_transcription_error(message),
        );
        Ok(())
    }

    /// Discard the current take as if nothing happened.
    pub fn cancel_recording(&self, reason: &str) -> Result<(), SessionError> {
        {
            let mut machine = self.machine.lock();
            match machine.state() {
                DictationState::Recording => {
                    machine.transition_to(DictationState::Idle)?;
                }
                other => {
                    return Err(SessionError::InvalidTransition {
                        from: other,
                        to: DictationState::Idle,
                    })
                }
            }
        }

        crate::info!("[session] recording cancelled ({reason})");
        self.polling.clear();
        self.recorder.stop();
        remove_clip(&self.config.audio_path, "discarded");

        self.recording_emitter
            .emit_recording_cancelled(RecordingCancelledPayload {
                reason: reason.to_string(),
                timestamp: current_timestamp(),
            });
        Ok(())
    }

    /// Abandon the in-flight transcription job. Its callbacks never fire.
    pub fn cancel_transcription(&self) -> Result<(), SessionError> {
        {
            let mut machine = self.machine.lock();
            match machine.state() {
                DictationState::Transcribing => {
                    machine.transition_to(DictationState::Idle)?;
                }
                other => {
                    return Err(SessionError::InvalidTransition {
                        from: other,
                        to: DictationState::Idle,
                    })
                }
            }
        }

        crate::info!("[session] transcription cancelled");
        self.client.stop();
        Ok(())
    }

    /// Force everything back to Idle: polling loop, transcription job,
    /// recorder. For host lifecycle edges (window hidden, shutdown).
    pub fn reset(&self) {
        crate::info!("[session] reset to idle");
        self.polling.clear();
        self.client.stop();
        self.recorder.stop();
        self.machine.lock().force_idle();
    }

    fn spawn_amplitude_polling(self: &Arc<Self>) {
        let session = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut fsm = VoiceActivityFsm::new(session.config.vad.clone());
            let period = Duration::from_millis(u64::from(session.config.vad.sample_period_ms.max(1)));
            let mut ticker = tokio::time::interval(period);

            loop {
                ticker.tick().await;
                if session.state() != DictationState::Recording {
                    break;
                }

                let amplitude = session.recorder.max_amplitude();
                match fsm.report_amplitude(amplitude) {
                    VadDecision::Normal => {}
                    VadDecision::CancelRecording => {
                        crate::info!("[session] nothing heard, cancelling the take");
                        if let Err(e) = session.cancel_recording(CANCEL_REASON_SILENCE) {
                            crate::error!("[session] silence cancel failed: {e}");
                        }
                        break;
                    }
                    VadDecision::FinishRecording => {
                        crate::info!("[session] speech ended, finishing the take");
                        if let Err(e) = session.finish_recording() {
                            crate::error!("[session] silence finish failed: {e}");
                        }
                        break;
                    }
                }
            }
        });
        self.polling.register(JobHandle::new(task));
    }

    fn handle_transcription_success(self: Arc<Self>, text: String, started: Instant) {
        self.committer.commit_text(&text);
        self.transcription_emitter
            .emit_transcription_completed(TranscriptionCompletedPayload {
                text,
                duration_ms: started.elapsed().as_millis() as u64,
            });
        self.settle_idle();

        // Hands-free mode: immediately begin the next take
        let session = Arc::clone(&self);
        tokio::spawn(async move {
            if settings::auto_start_recording(session.store.as_ref()).await {
                crate::info!("[session] auto-starting next take");
                if let Err(e) = session.start_recording() {
                    crate::warn!("[session] auto-start skipped: {e}");
                }
            }
        });
    }

    fn handle_transcription_error(self: Arc<Self>, message: String) {
        self.transcription_emitter
            .emit_transcription_error(TranscriptionErrorPayload { error: message });
        self.settle_idle();
    }

    fn settle_idle(&self) {
        let mut machine = self.machine.lock();
        if let Err(e) = machine.transition_to(DictationState::Idle) {
            crate::warn!("[session] unexpected state while settling: {e}");
            machine.force_idle();
        }
    }
}

/// The clip path must not carry leftovers into a new cycle.
fn prepare_clip_path(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            crate::warn!(
                "[session] could not create clip directory '{}': {}",
                parent.display(),
                e
            );
        }
    }
    remove_clip(path, "stale");
}

fn remove_clip(path: &Path, context: &str) {
    match std::fs::remove_file(path) {
        Ok(()) => crate::debug!("[session] removed {} clip '{}'", context, path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => crate::warn!(
            "[session] could not remove {} clip '{}': {}",
            context,
            path.display(),
            e
        ),
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
