// Voice activity FSM driving automatic recording stop
// Consumes one amplitude report per period and decides whether the recorder
// should keep going, cancel the take, or finish and transcribe

use super::window::WindowedMaxTracker;
use serde::Serialize;

/// State of the voice activity detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VadState {
    /// Waiting for speech onset (or a silence-timeout cancellation)
    Idle,
    /// User is speaking; waiting for trailing silence to finish the take
    Speaking,
}

/// Decision produced for each amplitude report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VadDecision {
    /// Keep recording
    Normal,
    /// Nothing was said; discard the recording
    CancelRecording,
    /// Speech ended; stop the recorder and transcribe
    FinishRecording,
}

/// Configuration for the voice activity FSM
///
/// Window lengths are derived from durations: `round(time_ms / period_ms)`,
/// clamped to at least one sample. All threshold comparisons are strict, so a
/// report exactly at a threshold never triggers a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VadConfig {
    /// Period between amplitude reports in milliseconds
    pub sample_period_ms: u32,
    /// How long the user may stay silent in Idle before the take is cancelled
    pub idle_cancel_time_ms: u32,
    /// How long the user must stay silent in Speaking to finish the take
    pub speaking_finish_time_ms: u32,
    /// Reports below this count as silence while Idle
    pub idle_cancel_threshold: u32,
    /// A report above this flips Idle into Speaking
    pub idle_to_speaking_threshold: u32,
    /// Reports below this count as silence while Speaking
    pub speaking_finish_threshold: u32,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            sample_period_ms: 150,
            idle_cancel_time_ms: 5_000,
            speaking_finish_time_ms: 2_000,
            idle_cancel_threshold: 700,
            idle_to_speaking_threshold: 1_000,
            speaking_finish_threshold: 1_000,
        }
    }
}

impl VadConfig {
    pub(crate) fn idle_window_len(&self) -> usize {
        derive_window_len(self.idle_cancel_time_ms, self.sample_period_ms)
    }

    pub(crate) fn speaking_window_len(&self) -> usize {
        derive_window_len(self.speaking_finish_time_ms, self.sample_period_ms)
    }
}

fn derive_window_len(time_ms: u32, period_ms: u32) -> usize {
    let period = period_ms.max(1) as f64;
    let len = (time_ms as f64 / period).round() as usize;
    len.max(1)
}

/// Two-state FSM over a stream of amplitude reports.
///
/// Pure decision logic: no I/O, no clocks. The caller is responsible for
/// delivering reports in arrival order from a single stream; the FSM is not
/// safe for concurrent delivery.
pub struct VoiceActivityFsm {
    config: VadConfig,
    state: VadState,
    idle_window: WindowedMaxTracker,
    speaking_window: WindowedMaxTracker,
}

impl VoiceActivityFsm {
    pub fn new(config: VadConfig) -> Self {
        let idle_window = WindowedMaxTracker::new(config.idle_window_len());
        let speaking_window = WindowedMaxTracker::new(config.speaking_window_len());
        Self {
            config,
            state: VadState::Idle,
            idle_window,
            speaking_window,
        }
    }

    pub fn state(&self) -> VadState {
        self.state
    }

    pub fn config(&self) -> &VadConfig {
        &self.config
    }

    /// Feed the next amplitude report and get the decision for it.
    ///
    /// No cancel/finish decision fires before the relevant window has filled,
    /// so a short initial silence cannot cancel a take prematurely.
    pub fn report_amplitude(&mut self, amplitude: u32) -> VadDecision {
        match self.state {
            VadState::Idle => {
                self.idle_window.push(amplitude);

                if amplitude > self.config.idle_to_speaking_threshold {
                    self.state = VadState::Speaking;
                    self.idle_window.reset();
                    self.speaking_window.reset();
                    return VadDecision::Normal;
                }

                if self.idle_window.is_full() {
                    if let Ok(max) = self.idle_window.current_max() {
                        if max < self.config.idle_cancel_threshold {
                            return VadDecision::CancelRecording;
                        }
                    }
                }

                VadDecision::Normal
            }
            VadState::Speaking => {
                self.speaking_window.push(amplitude);

                if self.speaking_window.is_full() {
                    if let Ok(max) = self.speaking_window.current_max() {
                        if max < self.config.speaking_finish_threshold {
                            return VadDecision::FinishRecording;
                        }
                    }
                }

                VadDecision::Normal
            }
        }
    }

    /// Force the FSM back to Idle with empty windows, ready for a new take.
    pub fn reset(&mut self) {
        self.state = VadState::Idle;
        self.idle_window.reset();
        self.speaking_window.reset();
    }
}

#[cfg(test)]
#[path = "fsm_test.rs"]
mod tests;
