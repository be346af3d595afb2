// Voice activity detection: windowed-maximum tracking and the recorder FSM

mod fsm;
mod window;

pub use fsm::{VadConfig, VadDecision, VadState, VoiceActivityFsm};
pub use window::{WindowError, WindowedMaxTracker};
