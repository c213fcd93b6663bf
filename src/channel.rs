//! Channel addressing.
//!
//! Every group claims a contiguous, half-open block of logical channels
//! `[start, start + count)`. Ranges are validated when built, so a
//! [`ChannelRange`] value is always non-empty and never wraps.
//!
//! # Example
//!
//! ```rust
//! use rs_relays::channel::{validate_layout, ChannelRange};
//!
//! let relays = ChannelRange::new(2, 0).unwrap();
//! let dimmers = ChannelRange::new(2, 2).unwrap();
//! assert!(validate_layout(&[relays, dimmers]).is_ok());
//!
//! let stray = ChannelRange::new(2, 1).unwrap();
//! assert!(validate_layout(&[relays, dimmers, stray]).is_err());
//! ```

use core::fmt;
use core::ops::Range;

use crate::error::ConfigError;

/// Logical channel address.
pub type ChannelId = u16;

/// Desired output level of a channel. `0` is off.
///
/// Digital channels treat any non-zero level as on; PWM channels use the
/// full `0..=MAX_LEVEL` intensity range.
pub type Level = u8;

/// Highest intensity level (fully on).
pub const MAX_LEVEL: Level = Level::MAX;

/// A non-empty block of consecutive channels owned by one group.
///
/// Deserialization goes through [`ChannelRange::new`], so invalid ranges are
/// rejected there too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawChannelRange"))]
pub struct ChannelRange {
    count: ChannelId,
    start: ChannelId,
}

/// Unchecked wire form of a [`ChannelRange`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawChannelRange {
    count: ChannelId,
    start: ChannelId,
}

#[cfg(feature = "serde")]
impl TryFrom<RawChannelRange> for ChannelRange {
    type Error = ConfigError;

    fn try_from(raw: RawChannelRange) -> Result<Self, ConfigError> {
        Self::new(raw.count, raw.start)
    }
}

impl ChannelRange {
    /// Builds the range `[start, start + count)`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyRange`] if `count` is zero.
    /// - [`ConfigError::RangeOverflow`] if the end does not fit a [`ChannelId`].
    pub const fn new(count: ChannelId, start: ChannelId) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::EmptyRange);
        }
        if start.checked_add(count).is_none() {
            return Err(ConfigError::RangeOverflow { start, count });
        }
        Ok(Self { count, start })
    }

    /// Number of channels claimed.
    #[inline]
    pub const fn count(&self) -> ChannelId {
        self.count
    }

    /// First channel claimed.
    #[inline]
    pub const fn start(&self) -> ChannelId {
        self.start
    }

    /// One past the last channel claimed.
    #[inline]
    pub const fn end(&self) -> ChannelId {
        // Checked in `new`.
        self.start + self.count
    }

    /// Returns true if `channel` belongs to this range.
    #[inline]
    pub const fn contains(&self, channel: ChannelId) -> bool {
        channel >= self.start && channel < self.end()
    }

    /// Returns true if the two ranges share at least one channel.
    #[inline]
    pub const fn overlaps(&self, other: &ChannelRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Position of `channel` inside this range, if it belongs to it.
    pub fn offset_of(&self, channel: ChannelId) -> Option<usize> {
        self.contains(channel)
            .then(|| usize::from(channel - self.start))
    }

    /// The claimed channels in ascending order.
    pub fn iter(&self) -> Range<ChannelId> {
        self.start..self.end()
    }

    /// The claimed channels as `usize` indexes into a state buffer.
    pub fn as_index_range(&self) -> Range<usize> {
        usize::from(self.start)..usize::from(self.end())
    }
}

impl fmt::Display for ChannelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}

impl IntoIterator for ChannelRange {
    type Item = ChannelId;
    type IntoIter = Range<ChannelId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Checks that no two ranges in `ranges` claim a common channel.
///
/// Reports the first conflicting pair in declaration order: `existing` is the
/// earlier range and `candidate` the later one.
pub fn validate_layout(ranges: &[ChannelRange]) -> Result<(), ConfigError> {
    for (i, candidate) in ranges.iter().enumerate() {
        if let Some(existing) = ranges[..i].iter().find(|r| r.overlaps(candidate)) {
            return Err(ConfigError::Overlap {
                existing: *existing,
                candidate: *candidate,
            });
        }
    }
    Ok(())
}
