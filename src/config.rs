//! Builder-style configuration for groups and the controller.
//!
//! Uses `heapless` collections for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`. Configuration is meant to be
//! fixed at build time: build it once at boot and turn it into groups with
//! [`PinGroupConfig::build`].
//!
//! # Example
//!
//! ```rust
//! use rs_relays::config::{ControllerConfig, PinGroupConfig};
//! use rs_relays::hal::MockBoard;
//! use rs_relays::{Group, RelayMode};
//!
//! let controller = ControllerConfig::default().with_update_interval_ms(10);
//! assert_eq!(controller.update_interval_ms, 10);
//!
//! let relays = PinGroupConfig::new(0)
//!     .with_pins(&[3, 4])
//!     .with_relay_mode(RelayMode::ActiveLow)
//!     .with_label("pump relays")
//!     .build(MockBoard::new())
//!     .unwrap();
//! assert_eq!(relays.channels().count(), 2);
//! ```

use heapless::String as HString;
use heapless::Vec as HVec;

use crate::channel::ChannelId;
use crate::error::ConfigError;
use crate::groups::{PinGroup, MAX_GROUP_CHANNELS};
use crate::polarity::RelayMode;
use crate::traits::{Board, Group, PinId};

/// Maximum length for short config strings (labels, names)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    for c in s.chars() {
        if hs.push(c).is_err() {
            break;
        }
    }
    hs
}

// ============================================================================
// Pin Group Config
// ============================================================================

/// Configuration for a [`PinGroup`].
///
/// The channel count is the number of pins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinGroupConfig {
    /// First channel the group claims
    pub starting_channel: ChannelId,
    /// Physical pins, one per channel
    pub pins: HVec<PinId, MAX_GROUP_CHANNELS>,
    /// Drive pins with PWM where the board supports it
    pub use_pwm: bool,
    /// Relay polarity
    pub relay_mode: RelayMode,
    /// Human-readable label for logs
    pub label: ShortString,
    #[cfg_attr(feature = "serde", serde(skip))]
    requested_pins: usize,
}

impl PinGroupConfig {
    /// Start a config for a group beginning at `starting_channel`.
    pub fn new(starting_channel: ChannelId) -> Self {
        Self {
            starting_channel,
            ..Default::default()
        }
    }

    /// Set the pin mapping. More than [`MAX_GROUP_CHANNELS`] pins is
    /// reported by [`build`](Self::build).
    pub fn with_pins(mut self, pins: &[PinId]) -> Self {
        self.pins.clear();
        for &pin in pins.iter().take(MAX_GROUP_CHANNELS) {
            let _ = self.pins.push(pin);
        }
        self.requested_pins = pins.len();
        self
    }

    /// Enable or disable PWM
    pub fn with_pwm(mut self, use_pwm: bool) -> Self {
        self.use_pwm = use_pwm;
        self
    }

    /// Set the relay polarity
    pub fn with_relay_mode(mut self, relay_mode: RelayMode) -> Self {
        self.relay_mode = relay_mode;
        self
    }

    /// Set the label
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = short_string(label);
        self
    }

    /// Number of channels the group will claim.
    pub fn channel_count(&self) -> usize {
        self.pins.len()
    }

    /// Build the group on `board`.
    ///
    /// # Errors
    ///
    /// Any error [`PinGroup::new`] reports. An empty pin list is
    /// [`ConfigError::EmptyRange`].
    pub fn build<B: Board>(&self, board: B) -> Result<PinGroup<B>, ConfigError> {
        if self.requested_pins > self.pins.len() {
            return Err(ConfigError::TooManyChannels {
                count: self.requested_pins,
                max: MAX_GROUP_CHANNELS,
            });
        }
        let group = PinGroup::new(
            self.pins.len() as ChannelId,
            self.starting_channel,
            self.use_pwm,
            &self.pins,
            self.relay_mode,
            board,
        )?;
        if !self.label.is_empty() {
            log::debug!("group '{}' on channels {}", self.label, group.channels());
        }
        Ok(group)
    }
}

// ============================================================================
// Controller Config
// ============================================================================

/// Control loop configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerConfig {
    /// Period between `update_all` calls in milliseconds
    pub update_interval_ms: u32,
    /// Device name for logs
    pub name: ShortString,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: 20,
            name: short_string("rs-relays"),
        }
    }
}

impl ControllerConfig {
    /// Set the control loop period
    pub fn with_update_interval_ms(mut self, ms: u32) -> Self {
        self.update_interval_ms = ms;
        self
    }

    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Control loop frequency in Hz (0 if the interval is 0)
    pub fn update_rate_hz(&self) -> u32 {
        1000u32.checked_div(self.update_interval_ms).unwrap_or(0)
    }
}
