//! Board-support primitives consumed by pin-based groups.
//!
//! [`Board`] is the seam between the portable group logic and the chip: it
//! answers which pins exist and which can do PWM, and performs the three
//! primitive operations (configure, digital write, PWM write) addressed by
//! a physical pin number.
//!
//! # Implementation Notes
//!
//! - Writes are treated as instantaneous; an implementation must not block.
//! - `configure_pwm` is only called after `configure_output` succeeded and
//!   only for pins where `supports_pwm` returned true.
//! - PWM duty uses the full [`Level`] range: `0` is off, [`MAX_LEVEL`] is
//!   fully on.
//!
//! # Example
//!
//! ```rust
//! use rs_relays::hal::MockBoard;
//! use rs_relays::traits::{Board, PinOutput};
//!
//! let mut board = MockBoard::new().with_pwm_pins(&[9]);
//! board.configure_output(9).unwrap();
//! board.configure_pwm(9).unwrap();
//! board.pwm_write(9, 128).unwrap();
//!
//! assert_eq!(board.output(9), Some(PinOutput::Pwm(128)));
//! ```
//!
//! [`MAX_LEVEL`]: crate::channel::MAX_LEVEL

use crate::channel::Level;

/// Physical pin number on the board.
pub type PinId = u8;

/// Pin-level I/O provided by a board-support layer.
pub trait Board {
    /// Error type for pin operations.
    type Error: core::fmt::Debug;

    /// Returns true if `pin` exists and can be driven as an output.
    fn is_valid_pin(&self, pin: PinId) -> bool;

    /// Returns true if `pin` can generate PWM.
    fn supports_pwm(&self, pin: PinId) -> bool;

    /// Put `pin` in push-pull output mode.
    fn configure_output(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Attach a PWM generator to `pin`.
    fn configure_pwm(&mut self, pin: PinId) -> Result<(), Self::Error>;

    /// Drive `pin` high (`true`) or low (`false`).
    fn digital_write(&mut self, pin: PinId, high: bool) -> Result<(), Self::Error>;

    /// Set the PWM duty of `pin`.
    fn pwm_write(&mut self, pin: PinId, duty: Level) -> Result<(), Self::Error>;
}

/// How a pin was configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PinMode {
    /// Plain push-pull output.
    Output,
    /// PWM output.
    Pwm,
}

/// Last value written to a pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PinOutput {
    /// Digital level (`true` = high).
    Digital(bool),
    /// PWM duty.
    Pwm(Level),
}

impl PinOutput {
    /// Returns true for a digital high or a non-zero duty.
    pub const fn is_high(&self) -> bool {
        match self {
            PinOutput::Digital(high) => *high,
            PinOutput::Pwm(duty) => *duty > 0,
        }
    }
}
