//! [`Board`] adapter over `embedded-hal` 1.0 pins.
//!
//! Most HALs hand out pins as typed, already-configured driver objects
//! rather than raw pin numbers. [`HalBoard`] bridges that to the numbered
//! [`Board`] interface: register each driver under the pin number the group
//! config refers to, then build groups on top of it as usual.
//!
//! # Example
//!
//! ```rust,ignore
//! use rs_relays::hal::{HalBoard, NoPwm};
//! use rs_relays::{PinGroup, RelayMode};
//!
//! let mut board: HalBoard<_, NoPwm, 4> = HalBoard::new();
//! board.add_digital(3, relay_pin_a)?;
//! board.add_digital(4, relay_pin_b)?;
//!
//! let relays = PinGroup::new(2, 0, false, &[3, 4], RelayMode::ActiveLow, board)?;
//! ```

use core::convert::Infallible;

use embedded_hal::digital::{self, OutputPin, PinState};
use embedded_hal::pwm::{self, SetDutyCycle};
use heapless::Vec;

use crate::channel::{Level, MAX_LEVEL};
use crate::error::ConfigError;
use crate::traits::{Board, PinId};

/// A registered output driver.
#[derive(Debug)]
pub enum HalOutput<P, W> {
    /// Plain digital output.
    Digital(P),
    /// PWM channel.
    Pwm(W),
}

/// Failures reported by a [`HalBoard`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalBoardError {
    /// No driver is registered under this pin number.
    UnknownPin(PinId),
    /// A duty cycle was written to a digital-only pin.
    NotPwm(PinId),
    /// The digital driver failed.
    Digital(digital::ErrorKind),
    /// The PWM driver failed.
    Pwm(pwm::ErrorKind),
}

/// Placeholder PWM type for boards with digital outputs only.
#[derive(Debug)]
pub enum NoPwm {}

impl pwm::ErrorType for NoPwm {
    type Error = Infallible;
}

impl SetDutyCycle for NoPwm {
    fn max_duty_cycle(&self) -> u16 {
        match *self {}
    }

    fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Infallible> {
        match *self {}
    }
}

/// Up to `N` `embedded-hal` output drivers addressed by pin number.
#[derive(Debug)]
pub struct HalBoard<P, W, const N: usize> {
    outputs: Vec<(PinId, HalOutput<P, W>), N>,
}

impl<P, W, const N: usize> HalBoard<P, W, N> {
    /// Creates a board with no pins registered.
    pub const fn new() -> Self {
        Self { outputs: Vec::new() }
    }

    /// Registers a digital output under `id`.
    pub fn add_digital(&mut self, id: PinId, pin: P) -> Result<(), ConfigError> {
        self.insert(id, HalOutput::Digital(pin))
    }

    /// Registers a PWM channel under `id`.
    pub fn add_pwm(&mut self, id: PinId, pwm: W) -> Result<(), ConfigError> {
        self.insert(id, HalOutput::Pwm(pwm))
    }

    /// The driver registered under `id`.
    pub fn output(&self, id: PinId) -> Option<&HalOutput<P, W>> {
        self.outputs.iter().find(|(p, _)| *p == id).map(|(_, o)| o)
    }

    /// Number of registered pins.
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Returns true if no pins are registered.
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Releases the registered drivers.
    pub fn release(self) -> Vec<(PinId, HalOutput<P, W>), N> {
        self.outputs
    }

    fn insert(&mut self, id: PinId, output: HalOutput<P, W>) -> Result<(), ConfigError> {
        if self.output(id).is_some() {
            return Err(ConfigError::DuplicatePin(id));
        }
        self.outputs
            .push((id, output))
            .map_err(|_| ConfigError::TooManyChannels {
                count: N + 1,
                max: N,
            })
    }

    fn output_mut(&mut self, id: PinId) -> Result<&mut HalOutput<P, W>, HalBoardError> {
        self.outputs
            .iter_mut()
            .find(|(p, _)| *p == id)
            .map(|(_, o)| o)
            .ok_or(HalBoardError::UnknownPin(id))
    }
}

impl<P, W, const N: usize> Default for HalBoard<P, W, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, W: SetDutyCycle, const N: usize> Board for HalBoard<P, W, N> {
    type Error = HalBoardError;

    fn is_valid_pin(&self, pin: PinId) -> bool {
        self.output(pin).is_some()
    }

    fn supports_pwm(&self, pin: PinId) -> bool {
        matches!(self.output(pin), Some(HalOutput::Pwm(_)))
    }

    fn configure_output(&mut self, pin: PinId) -> Result<(), HalBoardError> {
        // The HAL configured the pin when it handed out the driver.
        self.output_mut(pin).map(|_| ())
    }

    fn configure_pwm(&mut self, pin: PinId) -> Result<(), HalBoardError> {
        match self.output_mut(pin)? {
            HalOutput::Pwm(_) => Ok(()),
            HalOutput::Digital(_) => Err(HalBoardError::NotPwm(pin)),
        }
    }

    fn digital_write(&mut self, pin: PinId, high: bool) -> Result<(), HalBoardError> {
        match self.output_mut(pin)? {
            HalOutput::Digital(p) => p
                .set_state(PinState::from(high))
                .map_err(|e| HalBoardError::Digital(digital::Error::kind(&e))),
            HalOutput::Pwm(w) => {
                let result = if high {
                    w.set_duty_cycle_fully_on()
                } else {
                    w.set_duty_cycle_fully_off()
                };
                result.map_err(|e| HalBoardError::Pwm(pwm::Error::kind(&e)))
            }
        }
    }

    fn pwm_write(&mut self, pin: PinId, duty: Level) -> Result<(), HalBoardError> {
        match self.output_mut(pin)? {
            HalOutput::Pwm(w) => w
                .set_duty_cycle_fraction(u16::from(duty), u16::from(MAX_LEVEL))
                .map_err(|e| HalBoardError::Pwm(pwm::Error::kind(&e))),
            HalOutput::Digital(_) => Err(HalBoardError::NotPwm(pin)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChannelState;
    use crate::traits::Group;
    use crate::{PinGroup, RelayMode};

    #[derive(Debug, Default)]
    struct FakePin {
        high: Option<bool>,
    }

    impl digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = Some(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = Some(true);
            Ok(())
        }
    }

    #[derive(Debug, Default)]
    struct FakePwm {
        duty: u16,
    }

    impl pwm::ErrorType for FakePwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for FakePwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    fn pin_high(board: &HalBoard<FakePin, FakePwm, 4>, id: PinId) -> Option<bool> {
        match board.output(id) {
            Some(HalOutput::Digital(p)) => p.high,
            _ => None,
        }
    }

    fn pwm_duty(board: &HalBoard<FakePin, FakePwm, 4>, id: PinId) -> Option<u16> {
        match board.output(id) {
            Some(HalOutput::Pwm(w)) => Some(w.duty),
            _ => None,
        }
    }

    #[test]
    fn registers_pins() {
        let mut board: HalBoard<FakePin, FakePwm, 4> = HalBoard::new();
        board.add_digital(3, FakePin::default()).unwrap();
        board.add_pwm(5, FakePwm::default()).unwrap();

        assert_eq!(board.len(), 2);
        assert!(board.is_valid_pin(3));
        assert!(!board.is_valid_pin(4));
        assert!(board.supports_pwm(5));
        assert!(!board.supports_pwm(3));
    }

    #[test]
    fn rejects_duplicate_and_overflow() {
        let mut board: HalBoard<FakePin, FakePwm, 2> = HalBoard::new();
        board.add_digital(1, FakePin::default()).unwrap();
        assert_eq!(
            board.add_digital(1, FakePin::default()),
            Err(ConfigError::DuplicatePin(1))
        );
        board.add_digital(2, FakePin::default()).unwrap();
        assert_eq!(
            board.add_digital(3, FakePin::default()),
            Err(ConfigError::TooManyChannels { count: 3, max: 2 })
        );
    }

    #[test]
    fn unknown_pin_errors() {
        let mut board: HalBoard<FakePin, FakePwm, 4> = HalBoard::new();
        assert_eq!(
            board.digital_write(9, true),
            Err(HalBoardError::UnknownPin(9))
        );
    }

    #[test]
    fn pwm_on_digital_pin_errors() {
        let mut board: HalBoard<FakePin, FakePwm, 4> = HalBoard::new();
        board.add_digital(1, FakePin::default()).unwrap();
        assert_eq!(board.configure_pwm(1), Err(HalBoardError::NotPwm(1)));
        assert_eq!(board.pwm_write(1, 10), Err(HalBoardError::NotPwm(1)));
    }

    #[test]
    fn duty_is_scaled_to_driver_range() {
        let mut board: HalBoard<FakePin, FakePwm, 4> = HalBoard::new();
        board.add_pwm(5, FakePwm::default()).unwrap();

        board.pwm_write(5, MAX_LEVEL).unwrap();
        assert_eq!(pwm_duty(&board, 5), Some(1000));
        board.pwm_write(5, 0).unwrap();
        assert_eq!(pwm_duty(&board, 5), Some(0));
        board.digital_write(5, true).unwrap();
        assert_eq!(pwm_duty(&board, 5), Some(1000));
    }

    /// LEDC-like channel with an 8-bit timer (256 duty steps).
    #[derive(Debug, Default)]
    struct EightBitPwm {
        duty: u16,
    }

    impl pwm::ErrorType for EightBitPwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for EightBitPwm {
        fn max_duty_cycle(&self) -> u16 {
            256
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn configure_keeps_idle_level() {
        let mut board: HalBoard<FakePin, FakePwm, 4> = HalBoard::new();
        board.add_digital(3, FakePin { high: Some(true) }).unwrap();

        board.configure_output(3).unwrap();
        assert_eq!(pin_high(&board, 3), Some(true));
    }

    #[test]
    fn eight_bit_timer_scaling() {
        let mut board: HalBoard<FakePin, EightBitPwm, 2> = HalBoard::new();
        board.add_pwm(5, EightBitPwm::default()).unwrap();
        board.configure_pwm(5).unwrap();

        let duty = |board: &HalBoard<FakePin, EightBitPwm, 2>| match board.output(5) {
            Some(HalOutput::Pwm(w)) => Some(w.duty),
            _ => None,
        };
        board.pwm_write(5, 0).unwrap();
        assert_eq!(duty(&board), Some(0));
        board.pwm_write(5, 155).unwrap();
        assert_eq!(duty(&board), Some(155 * 256 / 255));
        board.pwm_write(5, MAX_LEVEL).unwrap();
        assert_eq!(duty(&board), Some(256));
    }

    #[test]
    fn drives_pin_group() {
        let mut board: HalBoard<FakePin, FakePwm, 4> = HalBoard::new();
        board.add_digital(3, FakePin::default()).unwrap();
        board.add_digital(4, FakePin::default()).unwrap();

        let mut group = PinGroup::new(2, 0, false, &[3, 4], RelayMode::ActiveLow, board).unwrap();
        let mut state = ChannelState::<2>::new();
        state.set_on(0).unwrap();

        group.start();
        group.update(&state.view(group.channels()).unwrap());

        assert!(group.fault().is_none());
        assert_eq!(pin_high(group.board(), 3), Some(false));
        assert_eq!(pin_high(group.board(), 4), Some(true));
    }
}
