// Dictation session state management
// One cycle is Idle -> Recording -> Transcribing -> Idle; cancels short-circuit
// back to Idle, and nothing skips Transcribing's terminal resolution

use serde::Serialize;

/// State of one dictation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DictationState {
    /// Not recording, ready to start
    Idle,
    /// Microphone is live, the VAD is watching the amplitude stream
    Recording,
    /// Clip is finished and a transcription job is in flight
    Transcribing,
}

impl Default for DictationState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Errors that can occur while driving a session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Invalid state transition attempted
    #[error("invalid state transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: DictationState,
        to: DictationState,
    },
    /// The audio recorder collaborator failed to start
    #[error("audio recorder failed to start: {0}")]
    RecorderStart(String),
}

/// Validated state holder for a dictation session.
///
/// Valid transitions:
/// - Idle -> Recording (start)
/// - Recording -> Transcribing (finish, VAD or explicit)
/// - Recording -> Idle (cancel)
/// - Transcribing -> Idle (success, error, or cancel)
#[derive(Debug, Default)]
pub struct DictationStateMachine {
    state: DictationState,
}

impl DictationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DictationState {
        self.state
    }

    #[must_use = "this returns a Result that should be handled"]
    pub fn transition_to(&mut self, new_state: DictationState) -> Result<(), SessionError> {
        let valid = matches!(
            (self.state, new_state),
            (DictationState::Idle, DictationState::Recording)
                | (DictationState::Recording, DictationState::Transcribing)
                | (DictationState::Recording, DictationState::Idle)
                | (DictationState::Transcribing, DictationState::Idle)
        );

        if !valid {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to: new_state,
            });
        }

        self.state = new_state;
        Ok(())
    }

    /// Force back to Idle, for error recovery when normal transitions
    /// aren't possible (e.g. recorder failure during start).
    pub fn force_idle(&mut self) {
        self.state = DictationState::Idle;
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
