//! ESP32-C3 outputs on top of [`HalBoard`].
//!
//! Digital outputs are esp-idf-hal `PinDriver`s and PWM outputs are LEDC
//! channels (`LedcDriver`). Both are registered under their GPIO number, so
//! group configs refer to pins the same way the wiring does.
//!
//! Control logic for a PWM pin:
//! - LEDC timer at 5kHz, 8-bit resolution (see [`pwm_timer_config`])
//! - duty `0..=255` is scaled to the timer's duty range by [`HalBoard`]
//!
//! # Example
//!
//! ```ignore
//! use esp_idf_hal::gpio::OutputPin;
//! use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver};
//! use rs_relays::hal::esp32::{pwm_timer_config, Esp32Board};
//!
//! let peripherals = Peripherals::take()?;
//!
//! let mut relays = Esp32Board::new();
//! relays.add_gpio(peripherals.pins.gpio3.downgrade_output(), true)?;
//!
//! let timer = LedcTimerDriver::new(peripherals.ledc.timer0, &pwm_timer_config())?;
//! let mut dimmers = Esp32Board::new();
//! dimmers.add_ledc(5, LedcDriver::new(peripherals.ledc.channel0, &timer, peripherals.pins.gpio5)?)?;
//! ```

use core::fmt;

use esp_idf_hal::gpio::{AnyOutputPin, Output, Pin, PinDriver};
use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, Resolution};
use esp_idf_hal::prelude::*;
use esp_idf_hal::sys::EspError;

use crate::error::ConfigError;
use crate::hal::embedded::HalBoard;
use crate::traits::PinId;

/// Maximum number of pins one [`Esp32Board`] can hold.
pub const MAX_BOARD_PINS: usize = 8;

/// PWM frequency in Hz.
pub const PWM_FREQ_HZ: u32 = 5_000;

/// PWM resolution (8-bit matches the channel level range).
pub const PWM_RESOLUTION: Resolution = Resolution::Bits8;

/// Digital output driver.
pub type Esp32Output<'d> = PinDriver<'d, AnyOutputPin, Output>;

/// ESP32 board: GPIO digital outputs and LEDC PWM channels.
pub type Esp32Board<'d> = HalBoard<Esp32Output<'d>, LedcDriver<'d>, MAX_BOARD_PINS>;

/// LEDC timer configuration shared by every PWM output.
pub fn pwm_timer_config() -> TimerConfig {
    TimerConfig::default()
        .frequency(PWM_FREQ_HZ.Hz())
        .resolution(PWM_RESOLUTION)
}

/// Failures while registering pins on an [`Esp32Board`].
#[derive(Debug)]
pub enum Esp32SetupError {
    /// The ESP-IDF driver refused the pin.
    Driver(EspError),
    /// The board rejected the registration.
    Config(ConfigError),
}

impl From<EspError> for Esp32SetupError {
    fn from(e: EspError) -> Self {
        Self::Driver(e)
    }
}

impl From<ConfigError> for Esp32SetupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl fmt::Display for Esp32SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Driver(e) => write!(f, "driver error: {e}"),
            Self::Config(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Esp32SetupError {}

impl<'d> HalBoard<Esp32Output<'d>, LedcDriver<'d>, MAX_BOARD_PINS> {
    /// Registers `pin` as a digital output under its GPIO number.
    ///
    /// The pin is driven to `idle_high` immediately, so an active-low relay
    /// stays released until the group's first update.
    pub fn add_gpio(
        &mut self,
        pin: AnyOutputPin,
        idle_high: bool,
    ) -> Result<PinId, Esp32SetupError> {
        let id = PinId::try_from(pin.pin()).map_err(|_| ConfigError::InvalidPin(PinId::MAX))?;
        let mut driver = PinDriver::output(pin)?;
        if idle_high {
            driver.set_high()?;
        } else {
            driver.set_low()?;
        }
        self.add_digital(id, driver)?;
        Ok(id)
    }

    /// Registers an LEDC channel that drives GPIO `id`.
    pub fn add_ledc(
        &mut self,
        id: PinId,
        driver: LedcDriver<'d>,
    ) -> Result<(), Esp32SetupError> {
        self.add_pwm(id, driver)?;
        Ok(())
    }
}
