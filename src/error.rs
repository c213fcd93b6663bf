//! Error types for group construction, controller assembly and lifecycle.
//!
//! Configuration errors are fatal at boot: a controller should refuse to run
//! with an invalid channel layout. Hardware errors are deliberately absent
//! here; they never cross the [`Group`](crate::traits::Group) boundary and are
//! reported through [`GroupFault`](crate::traits::GroupFault) instead.

use core::fmt;

use crate::channel::{ChannelId, ChannelRange};
use crate::traits::PinId;

/// Reasons a group or controller layout was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConfigError {
    /// A channel range was declared with zero channels.
    EmptyRange,

    /// `start + count` does not fit in a [`ChannelId`].
    RangeOverflow {
        /// First channel of the rejected range.
        start: ChannelId,
        /// Channel count of the rejected range.
        count: ChannelId,
    },

    /// The pin mapping length differs from the channel count.
    PinCountMismatch {
        /// Number of channels the group claims.
        expected: usize,
        /// Number of pins supplied.
        actual: usize,
    },

    /// The board does not have this pin, or cannot drive it as an output.
    InvalidPin(PinId),

    /// The same physical pin appears twice in one mapping.
    DuplicatePin(PinId),

    /// The group is wider than a single group may be.
    TooManyChannels {
        /// Requested channel count.
        count: usize,
        /// Maximum supported channel count.
        max: usize,
    },

    /// Two groups claim at least one common channel.
    Overlap {
        /// Range already registered with the controller.
        existing: ChannelRange,
        /// Range that was rejected.
        candidate: ChannelRange,
    },

    /// The range extends past the end of the controller's state buffer.
    OutOfState {
        /// Range that was rejected.
        range: ChannelRange,
        /// Number of channels the state buffer holds.
        capacity: usize,
    },

    /// A channel id outside the state buffer was addressed.
    ChannelOutOfRange(ChannelId),

    /// The controller already holds its maximum number of groups.
    TooManyGroups {
        /// Maximum number of groups.
        max: usize,
    },

    /// Groups cannot be added once the controller has started them.
    AlreadyStarted,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRange => write!(f, "channel count must be greater than zero"),
            ConfigError::RangeOverflow { start, count } => {
                write!(f, "channel range {start}+{count} overflows the channel id space")
            }
            ConfigError::PinCountMismatch { expected, actual } => {
                write!(f, "expected {expected} pins, got {actual}")
            }
            ConfigError::InvalidPin(pin) => write!(f, "pin {pin} is not a valid output pin"),
            ConfigError::DuplicatePin(pin) => write!(f, "pin {pin} is mapped more than once"),
            ConfigError::TooManyChannels { count, max } => {
                write!(f, "{count} channels requested, at most {max} per group")
            }
            ConfigError::Overlap {
                existing,
                candidate,
            } => write!(f, "channels {candidate} overlap already claimed {existing}"),
            ConfigError::OutOfState { range, capacity } => {
                write!(f, "channels {range} exceed state capacity of {capacity}")
            }
            ConfigError::ChannelOutOfRange(ch) => write!(f, "channel {ch} is out of range"),
            ConfigError::TooManyGroups { max } => write!(f, "at most {max} groups are supported"),
            ConfigError::AlreadyStarted => write!(f, "controller has already started"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Lifecycle ordering violations reported by the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LifecycleError {
    /// `update_all` was called before `start_all`.
    NotStarted,
    /// `start_all` was called a second time.
    AlreadyStarted,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleError::NotStarted => write!(f, "groups updated before start"),
            LifecycleError::AlreadyStarted => write!(f, "groups already started"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LifecycleError {}
