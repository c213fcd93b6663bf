//! ESP32-C3 SuperMini board support for relay and PWM output groups.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 SuperMini (RISC-V 160MHz, 4MB Flash)
//! - **Relays**: 2-channel opto-isolated relay module (active low)
//! - **Dimmers**: 2 MOSFET PWM outputs (active high)
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments matching the SuperMini layout.

mod board;

pub use board::{
    pwm_timer_config, Esp32Board, Esp32Output, Esp32SetupError, MAX_BOARD_PINS, PWM_FREQ_HZ,
    PWM_RESOLUTION,
};

/// Pin assignments for SuperMini ESP32-C3.
///
/// These constants match the reference wiring:
/// - Relay module IN1/IN2 on GPIO3, 4
/// - MOSFET gates on GPIO5, 6
pub mod pins {
    use crate::traits::PinId;

    // =========================================================================
    // Relay Module
    // =========================================================================

    /// Relay 1 input (IN1, active low)
    pub const RELAY_1: PinId = 3;

    /// Relay 2 input (IN2, active low)
    pub const RELAY_2: PinId = 4;

    // =========================================================================
    // PWM Outputs
    // =========================================================================

    /// Dimmer 1 MOSFET gate
    pub const DIMMER_1: PinId = 5;

    /// Dimmer 2 MOSFET gate
    pub const DIMMER_2: PinId = 6;
}
