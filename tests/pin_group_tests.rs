//! Pin group behavior against the mock board

use rs_relays::{
    hal::{BoardEvent, MockBoard},
    ChannelState, ConfigError, FaultKind, Group, GroupPhase, OutputMode, PinGroup, PinMode,
    PinOutput, RelayMode,
};

fn start_and_update<const N: usize>(group: &mut PinGroup<MockBoard>, state: &ChannelState<N>) {
    group.start();
    group.update(&state.view(group.channels()).unwrap());
}

fn relays(relay_mode: RelayMode) -> PinGroup<MockBoard> {
    PinGroup::new(2, 0, false, &[3, 4], relay_mode, MockBoard::new()).unwrap()
}

// ============================================================================
// Digital Relays
// ============================================================================

#[test]
fn active_high_drives_on_channel_high() {
    let mut group = relays(RelayMode::ActiveHigh);
    let mut state = ChannelState::<2>::new();
    state.set(0, 1).unwrap();
    state.set(1, 0).unwrap();

    start_and_update(&mut group, &state);

    assert_eq!(group.board().output(3), Some(PinOutput::Digital(true)));
    assert_eq!(group.board().output(4), Some(PinOutput::Digital(false)));
}

#[test]
fn active_low_inverts_relay_outputs() {
    let mut group = relays(RelayMode::ActiveLow);
    let mut state = ChannelState::<2>::new();
    state.set(0, 1).unwrap();
    state.set(1, 0).unwrap();

    start_and_update(&mut group, &state);

    assert_eq!(group.board().output(3), Some(PinOutput::Digital(false)));
    assert_eq!(group.board().output(4), Some(PinOutput::Digital(true)));
}

#[test]
fn any_nonzero_intensity_switches_a_digital_relay_on() {
    let mut group = relays(RelayMode::ActiveHigh);
    let mut state = ChannelState::<2>::new();

    for level in [1u8, 100, 254, 255] {
        state.set(0, level).unwrap();
        start_and_update(&mut group, &state);
        assert_eq!(group.board().is_high(3), Some(true), "level {level}");
    }

    state.set(0, 0).unwrap();
    group.update(&state.view(group.channels()).unwrap());
    assert_eq!(group.board().is_high(3), Some(false));
}

#[test]
fn group_reads_only_its_own_channels() {
    let mut group =
        PinGroup::new(2, 4, false, &[10, 11], RelayMode::ActiveHigh, MockBoard::new()).unwrap();
    let mut state = ChannelState::<8>::new();
    state.fill(255);
    state.set(4, 0).unwrap();

    start_and_update(&mut group, &state);

    assert_eq!(group.board().is_high(10), Some(false));
    assert_eq!(group.board().is_high(11), Some(true));
    assert_eq!(group.board().write_count(), 2);
}

// ============================================================================
// PWM
// ============================================================================

#[test]
fn active_low_pwm_writes_complement() {
    let board = MockBoard::new().with_pwm_pins(&[5]);
    let mut group = PinGroup::new(1, 0, true, &[5], RelayMode::ActiveLow, board).unwrap();
    let mut state = ChannelState::<1>::new();
    state.set(0, 100).unwrap();

    start_and_update(&mut group, &state);

    assert_eq!(group.output_mode(0), Some(OutputMode::Pwm));
    assert_eq!(group.board().output(5), Some(PinOutput::Pwm(155)));
}

#[test]
fn active_high_pwm_writes_level_unchanged() {
    let board = MockBoard::new().with_pwm_pins(&[5, 6]);
    let mut group = PinGroup::new(2, 0, true, &[5, 6], RelayMode::ActiveHigh, board).unwrap();
    let mut state = ChannelState::<2>::new();
    state.set(0, 0).unwrap();
    state.set(1, 200).unwrap();

    start_and_update(&mut group, &state);

    assert_eq!(group.board().output(5), Some(PinOutput::Pwm(0)));
    assert_eq!(group.board().output(6), Some(PinOutput::Pwm(200)));
}

#[test]
fn pwm_falls_back_to_digital_on_unsupported_pins() {
    // Only pin 5 can do PWM
    let board = MockBoard::new().with_pwm_pins(&[5]);
    let mut group = PinGroup::new(2, 0, true, &[5, 6], RelayMode::ActiveLow, board).unwrap();
    let mut state = ChannelState::<2>::new();
    state.fill(100);

    start_and_update(&mut group, &state);

    assert_eq!(group.output_mode(0), Some(OutputMode::Pwm));
    assert_eq!(group.output_mode(1), Some(OutputMode::Digital));
    assert_eq!(group.board().mode(6), Some(PinMode::Output));
    assert_eq!(group.board().output(5), Some(PinOutput::Pwm(155)));
    assert_eq!(group.board().output(6), Some(PinOutput::Digital(false)));
    assert!(group.fault().is_none());
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn construction_validates_pins() {
    let board = MockBoard::new().with_max_pin(10);
    assert_eq!(
        PinGroup::new(2, 0, false, &[3, 11], RelayMode::ActiveHigh, board).unwrap_err(),
        ConfigError::InvalidPin(11)
    );
    assert_eq!(
        PinGroup::new(3, 0, false, &[3, 4], RelayMode::ActiveHigh, MockBoard::new()).unwrap_err(),
        ConfigError::PinCountMismatch {
            expected: 3,
            actual: 2
        }
    );
    assert_eq!(
        PinGroup::new(2, 0, false, &[3, 3], RelayMode::ActiveHigh, MockBoard::new()).unwrap_err(),
        ConfigError::DuplicatePin(3)
    );
    assert_eq!(
        PinGroup::new(0, 0, false, &[], RelayMode::ActiveHigh, MockBoard::new()).unwrap_err(),
        ConfigError::EmptyRange
    );
}

#[test]
fn construction_touches_no_hardware() {
    let group = relays(RelayMode::ActiveLow);
    assert_eq!(group.phase(), GroupPhase::Uninitialized);
    assert!(group.board().events.is_empty());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn configuration_precedes_first_write() {
    let board = MockBoard::new().with_pwm_pins(&[5]);
    let mut group = PinGroup::new(2, 0, true, &[5, 6], RelayMode::ActiveHigh, board).unwrap();
    let state = ChannelState::<2>::new();

    start_and_update(&mut group, &state);

    let board = group.board();
    assert!(board.last_configure_index().unwrap() < board.first_write_index().unwrap());
    assert_eq!(
        board.events[0],
        BoardEvent::Configure {
            pin: 5,
            mode: PinMode::Output
        }
    );
}

#[test]
fn update_before_start_is_ignored() {
    let mut group = relays(RelayMode::ActiveHigh);
    let mut state = ChannelState::<2>::new();
    state.fill(1);

    group.update(&state.view(group.channels()).unwrap());

    assert_eq!(group.board().write_count(), 0);
    assert!(group.fault().is_none());
}

// ============================================================================
// Faults
// ============================================================================

#[test]
fn write_failure_is_latched_not_propagated() {
    let mut group = relays(RelayMode::ActiveHigh);
    group.board_mut().fail_writes_on(4);
    let mut state = ChannelState::<2>::new();
    state.fill(1);

    start_and_update(&mut group, &state);
    group.update(&state.view(group.channels()).unwrap());

    // The healthy pin keeps being driven
    assert_eq!(group.board().is_high(3), Some(true));
    let fault = group.fault().unwrap();
    assert_eq!(fault.pin, 4);
    assert_eq!(fault.kind, FaultKind::Write);
    assert_eq!(fault.count, 2);
}

#[test]
fn fault_clears_and_recovers_after_heal() {
    let mut group = relays(RelayMode::ActiveHigh);
    group.board_mut().fail_writes_on(3);
    let mut state = ChannelState::<2>::new();
    state.fill(1);

    start_and_update(&mut group, &state);
    assert!(group.fault().is_some());

    group.board_mut().heal();
    group.clear_fault();
    group.update(&state.view(group.channels()).unwrap());

    assert!(group.fault().is_none());
    assert_eq!(group.board().is_high(3), Some(true));
}

#[test]
fn configure_failure_is_latched() {
    let mut board = MockBoard::new();
    board.fail_configure_on(3);
    let mut group = PinGroup::new(2, 0, false, &[3, 4], RelayMode::ActiveHigh, board).unwrap();

    group.start();

    assert_eq!(group.phase(), GroupPhase::Ready);
    assert_eq!(group.fault().map(|f| f.kind), Some(FaultKind::Configure));
    assert_eq!(group.board().mode(4), Some(PinMode::Output));
}
