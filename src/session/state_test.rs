use super::*;

#[test]
fn starts_idle() {
    let machine = DictationStateMachine::new();
    assert_eq!(machine.state(), DictationState::Idle);
}

#[test]
fn full_cycle_is_valid() {
    let mut machine = DictationStateMachine::new();
    machine.transition_to(DictationState::Recording).unwrap();
    machine.transition_to(DictationState::Transcribing).unwrap();
    machine.transition_to(DictationState::Idle).unwrap();
    assert_eq!(machine.state(), DictationState::Idle);
}

#[test]
fn recording_can_cancel_back_to_idle() {
    let mut machine = DictationStateMachine::new();
    machine.transition_to(DictationState::Recording).unwrap();
    machine.transition_to(DictationState::Idle).unwrap();
    assert_eq!(machine.state(), DictationState::Idle);
}

#[test]
fn invalid_transitions_are_rejected() {
    // Idle cannot jump straight to Transcribing
    let mut machine = DictationStateMachine::new();
    let err = machine
        .transition_to(DictationState::Transcribing)
        .unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidTransition {
            from: DictationState::Idle,
            to: DictationState::Transcribing,
        }
    );

    // Transcribing cannot return to Recording
    let mut machine = DictationStateMachine::new();
    machine.transition_to(DictationState::Recording).unwrap();
    machine.transition_to(DictationState::Transcribing).unwrap();
    assert!(machine.transition_to(DictationState::Recording).is_err());

    // Self-transitions are invalid
    let mut machine = DictationStateMachine::new();
    assert!(machine.transition_to(DictationState::Idle).is_err());
}

#[test]
fn rejected_transition_preserves_state() {
    let mut machine = DictationStateMachine::new();
    machine.transition_to(DictationState::Recording).unwrap();
    let _ = machine.transition_to(DictationState::Recording);
    assert_eq!(machine.state(), DictationState::Recording);
}

#[test]
fn force_idle_recovers_from_any_state() {
    let mut machine = DictationStateMachine::new();
    machine.transition_to(DictationState::Recording).unwrap();
    machine.force_idle();
    assert_eq!(machine.state(), DictationState::Idle);

    // And the machine is usable again
    machine.transition_to(DictationState::Recording).unwrap();
}

#[test]
fn error_message_names_both_states() {
    let err = SessionError::InvalidTransition {
        from: DictationState::Idle,
        to: DictationState::Transcribing,
    };
    let message = err.to_string();
    assert!(message.contains("Idle"));
    assert!(message.contains("Transcribing"));
}

#[test]
fn state_serializes_by_name() {
    assert_eq!(
        serde_json::to_string(&DictationState::Recording).unwrap(),
        "\"Recording\""
    );
}
