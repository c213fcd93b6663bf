//! # rs-relays
//!
//! Channel-addressed output groups for embedded controllers: relay modules,
//! MOSFET dimmers and anything else that maps numbered control channels onto
//! physical pins.
//!
//! ## Features
//!
//! - **Group contract**: every device group claims a contiguous channel range
//!   and implements `start` / `update`
//! - **Pin groups**: channels driven one-to-one by GPIO pins, digital or PWM
//! - **Relay polarity**: active-low relay boards are inverted transparently
//! - **Hardware abstraction**: a small [`Board`] trait, with mock, `embedded-hal`
//!   and ESP32 implementations
//! - **Fault latching**: hardware errors never abort a control cycle
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `channel` / `state` - Channel ranges and the desired-state buffer
//! - `traits` - The [`Group`] and [`Board`] contracts
//! - `groups` - Concrete groups ([`PinGroup`])
//! - `controller` - Assembles groups and drives the control cycle
//! - `hal` - Board implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_relays::{OutputController, PinGroup, RelayMode, hal::MockBoard};
//!
//! // Two active-low relays on channels 0-1, two PWM outputs on channels 2-3
//! let board = MockBoard::new().with_pwm_pins(&[5, 6]);
//! let mut relays = PinGroup::new(2, 0, false, &[3, 4], RelayMode::ActiveLow, MockBoard::new()).unwrap();
//! let mut dimmers = PinGroup::new(2, 2, true, &[5, 6], RelayMode::ActiveHigh, board).unwrap();
//!
//! {
//!     let mut controller = OutputController::<4>::new();
//!     controller.add(&mut relays).unwrap();
//!     controller.add(&mut dimmers).unwrap();
//!     controller.start_all().unwrap();
//!
//!     controller.state_mut().set_on(1).unwrap();
//!     controller.state_mut().set(2, 128).unwrap();
//!
//!     // Update in your main loop
//!     controller.update_all().unwrap();
//! }
//!
//! assert_eq!(relays.board().is_high(4), Some(false));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Channel identifiers, levels and contiguous channel ranges.
pub mod channel;
/// Builder-style configuration for groups and the controller.
pub mod config;
/// Controller that owns the desired state and drives every group.
pub mod controller;
/// Configuration and lifecycle error types.
pub mod error;
/// Concrete group implementations.
pub mod groups;
/// Board implementations with a mock for testing.
pub mod hal;
/// Relay polarity handling.
pub mod polarity;
/// Desired-state buffer and per-group views into it.
pub mod state;
/// Core traits for groups and board support.
pub mod traits;

pub use channel::{validate_layout, ChannelId, ChannelRange, Level, MAX_LEVEL};
pub use config::{ControllerConfig, PinGroupConfig};
pub use controller::{GroupStatus, OutputController, MAX_GROUPS};
pub use error::{ConfigError, LifecycleError};
pub use groups::{OutputMode, PinGroup, MAX_GROUP_CHANNELS};
pub use polarity::RelayMode;
pub use state::{ChannelState, ChannelView};
pub use traits::{Board, FaultKind, Group, GroupFault, GroupPhase, PinId, PinMode, PinOutput};
