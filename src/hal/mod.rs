//! Board implementations.
//!
//! This module contains concrete implementations of the
//! [`Board`](crate::traits::Board) trait for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: In-memory board for desktop development and tests
//! - `embedded`: Adapter over `embedded-hal` 1.0 pins (requires `embedded-hal` feature)
//! - `esp32`: ESP32-C3 GPIO and LEDC PWM (requires `esp32` feature)

pub mod mock;

#[cfg(feature = "embedded-hal")]
pub mod embedded;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;

#[cfg(feature = "embedded-hal")]
pub use embedded::*;

#[cfg(feature = "esp32")]
pub use esp32::*;
