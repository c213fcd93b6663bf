//! Mock board for testing without hardware.
//!
//! [`MockBoard`] implements [`Board`] entirely in memory. It remembers how
//! every pin was configured and what was last written to it, and keeps an
//! ordered log of every call so tests can check sequencing (for example that
//! a pin is configured before it is first written).
//!
//! # Example
//!
//! ```rust
//! use rs_relays::{ChannelState, Group, PinGroup, RelayMode};
//! use rs_relays::hal::MockBoard;
//!
//! let board = MockBoard::new();
//! let mut group = PinGroup::new(2, 0, false, &[3, 4], RelayMode::ActiveHigh, board).unwrap();
//!
//! let mut state = ChannelState::<2>::new();
//! state.set_on(0).unwrap();
//!
//! group.start();
//! group.update(&state.view(group.channels()).unwrap());
//!
//! assert_eq!(group.board().is_high(3), Some(true));
//! assert_eq!(group.board().is_high(4), Some(false));
//! ```

use alloc::vec::Vec;

use crate::channel::Level;
use crate::traits::{Board, PinId, PinMode, PinOutput};

/// Highest pin number a default [`MockBoard`] accepts.
pub const MOCK_MAX_PIN: PinId = 39;

/// One recorded call on a [`MockBoard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// A pin was configured.
    Configure {
        /// Pin number.
        pin: PinId,
        /// Requested mode.
        mode: PinMode,
    },
    /// A value was written to a pin.
    Write {
        /// Pin number.
        pin: PinId,
        /// Value written.
        output: PinOutput,
    },
}

/// Failures a [`MockBoard`] can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockBoardError {
    /// The pin is not in the board's valid range.
    InvalidPin(PinId),
    /// The pin cannot do PWM.
    NoPwm(PinId),
    /// The pin was written before being configured for that kind of output.
    NotConfigured(PinId),
    /// A failure injected by the test.
    Injected(PinId),
}

/// In-memory board recording pin configuration and writes.
///
/// Pins `0..=max_pin` are valid; only pins listed in `pwm_pins` support PWM.
/// Use the public fields to inspect state after an operation.
#[derive(Debug)]
pub struct MockBoard {
    /// Highest valid pin number.
    pub max_pin: PinId,
    /// Pins that support PWM.
    pub pwm_pins: Vec<PinId>,
    /// Current mode of each configured pin.
    pub modes: Vec<(PinId, PinMode)>,
    /// Last value written to each pin.
    pub outputs: Vec<(PinId, PinOutput)>,
    /// Every call in order.
    pub events: Vec<BoardEvent>,
    /// Pins whose configuration fails.
    pub fail_configure: Vec<PinId>,
    /// Pins whose writes fail.
    pub fail_writes: Vec<PinId>,
}

impl MockBoard {
    /// Creates a board with pins `0..=MOCK_MAX_PIN` and no PWM support.
    pub fn new() -> Self {
        Self {
            max_pin: MOCK_MAX_PIN,
            pwm_pins: Vec::new(),
            modes: Vec::new(),
            outputs: Vec::new(),
            events: Vec::new(),
            fail_configure: Vec::new(),
            fail_writes: Vec::new(),
        }
    }

    /// Sets the highest valid pin number.
    pub fn with_max_pin(mut self, max_pin: PinId) -> Self {
        self.max_pin = max_pin;
        self
    }

    /// Marks `pins` as PWM capable.
    pub fn with_pwm_pins(mut self, pins: &[PinId]) -> Self {
        self.pwm_pins.extend_from_slice(pins);
        self
    }

    /// Makes configuration of `pin` fail.
    pub fn fail_configure_on(&mut self, pin: PinId) {
        self.fail_configure.push(pin);
    }

    /// Makes writes to `pin` fail.
    pub fn fail_writes_on(&mut self, pin: PinId) {
        self.fail_writes.push(pin);
    }

    /// Stops injecting failures.
    pub fn heal(&mut self) {
        self.fail_configure.clear();
        self.fail_writes.clear();
    }

    /// Mode `pin` is configured in, if any.
    pub fn mode(&self, pin: PinId) -> Option<PinMode> {
        lookup(&self.modes, pin)
    }

    /// Last value written to `pin`, if any.
    pub fn output(&self, pin: PinId) -> Option<PinOutput> {
        lookup(&self.outputs, pin)
    }

    /// Whether `pin` was last driven high, if it was written at all.
    pub fn is_high(&self, pin: PinId) -> Option<bool> {
        self.output(pin).map(|out| out.is_high())
    }

    /// Number of writes recorded so far.
    pub fn write_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BoardEvent::Write { .. }))
            .count()
    }

    /// Index in `events` of the first write, if any.
    pub fn first_write_index(&self) -> Option<usize> {
        self.events
            .iter()
            .position(|e| matches!(e, BoardEvent::Write { .. }))
    }

    /// Index in `events` of the last configuration, if any.
    pub fn last_configure_index(&self) -> Option<usize> {
        self.events
            .iter()
            .rposition(|e| matches!(e, BoardEvent::Configure { .. }))
    }

    fn check(&self, pin: PinId, injected: &[PinId]) -> Result<(), MockBoardError> {
        if pin > self.max_pin {
            Err(MockBoardError::InvalidPin(pin))
        } else if injected.contains(&pin) {
            Err(MockBoardError::Injected(pin))
        } else {
            Ok(())
        }
    }

    fn record_write(&mut self, pin: PinId, output: PinOutput) {
        upsert(&mut self.outputs, pin, output);
        self.events.push(BoardEvent::Write { pin, output });
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Board for MockBoard {
    type Error = MockBoardError;

    fn is_valid_pin(&self, pin: PinId) -> bool {
        pin <= self.max_pin
    }

    fn supports_pwm(&self, pin: PinId) -> bool {
        self.pwm_pins.contains(&pin)
    }

    fn configure_output(&mut self, pin: PinId) -> Result<(), MockBoardError> {
        self.check(pin, &self.fail_configure)?;
        upsert(&mut self.modes, pin, PinMode::Output);
        self.events.push(BoardEvent::Configure {
            pin,
            mode: PinMode::Output,
        });
        Ok(())
    }

    fn configure_pwm(&mut self, pin: PinId) -> Result<(), MockBoardError> {
        self.check(pin, &self.fail_configure)?;
        if !self.supports_pwm(pin) {
            return Err(MockBoardError::NoPwm(pin));
        }
        upsert(&mut self.modes, pin, PinMode::Pwm);
        self.events.push(BoardEvent::Configure {
            pin,
            mode: PinMode::Pwm,
        });
        Ok(())
    }

    fn digital_write(&mut self, pin: PinId, high: bool) -> Result<(), MockBoardError> {
        self.check(pin, &self.fail_writes)?;
        if self.mode(pin).is_none() {
            return Err(MockBoardError::NotConfigured(pin));
        }
        self.record_write(pin, PinOutput::Digital(high));
        Ok(())
    }

    fn pwm_write(&mut self, pin: PinId, duty: Level) -> Result<(), MockBoardError> {
        self.check(pin, &self.fail_writes)?;
        if self.mode(pin) != Some(PinMode::Pwm) {
            return Err(MockBoardError::NotConfigured(pin));
        }
        self.record_write(pin, PinOutput::Pwm(duty));
        Ok(())
    }
}

fn lookup<T: Copy>(entries: &[(PinId, T)], pin: PinId) -> Option<T> {
    entries
        .iter()
        .find(|(p, _)| *p == pin)
        .map(|(_, value)| *value)
}

fn upsert<T>(entries: &mut Vec<(PinId, T)>, pin: PinId, value: T) {
    match entries.iter_mut().find(|(p, _)| *p == pin) {
        Some(entry) => entry.1 = value,
        None => entries.push((pin, value)),
    }
}

// ============================================================================
// Tests
// ============================================================================
