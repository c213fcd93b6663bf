//! Desired channel state.
//!
//! The controller owns a single [`ChannelState`] buffer indexed by channel id
//! and is its only writer. Each group is handed a [`ChannelView`] borrowed
//! from that buffer and scoped to the group's own range, so a group can read
//! its desired levels but cannot see or modify anybody else's.
//!
//! # Example
//!
//! ```rust
//! use rs_relays::{ChannelRange, ChannelState};
//!
//! let mut state = ChannelState::<8>::new();
//! state.set(2, 200).unwrap();
//! state.set_on(3).unwrap();
//!
//! let view = state.view(ChannelRange::new(2, 2).unwrap()).unwrap();
//! assert_eq!(view.get(2), Some(200));
//! assert_eq!(view.get(3), Some(255));
//! assert_eq!(view.get(4), None); // not in this group's range
//! ```

use crate::channel::{ChannelId, ChannelRange, Level, MAX_LEVEL};
use crate::error::ConfigError;

/// Controller-owned table of desired levels for `N` channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelState<const N: usize> {
    levels: [Level; N],
}

impl<const N: usize> ChannelState<N> {
    /// Creates a buffer with every channel off.
    pub const fn new() -> Self {
        Self { levels: [0; N] }
    }

    /// Number of channels the buffer holds.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Desired level of `channel`, or `None` if it is outside the buffer.
    #[inline]
    pub fn get(&self, channel: ChannelId) -> Option<Level> {
        self.levels.get(usize::from(channel)).copied()
    }

    /// Sets the desired level of `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ChannelOutOfRange`] if the buffer has no such channel.
    pub fn set(&mut self, channel: ChannelId, level: Level) -> Result<(), ConfigError> {
        let slot = self
            .levels
            .get_mut(usize::from(channel))
            .ok_or(ConfigError::ChannelOutOfRange(channel))?;
        *slot = level;
        Ok(())
    }

    /// Sets `channel` fully on.
    pub fn set_on(&mut self, channel: ChannelId) -> Result<(), ConfigError> {
        self.set(channel, MAX_LEVEL)
    }

    /// Sets `channel` off.
    pub fn set_off(&mut self, channel: ChannelId) -> Result<(), ConfigError> {
        self.set(channel, 0)
    }

    /// Sets every channel in `range` to `level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfState`] without touching the buffer if
    /// the range does not fit.
    pub fn set_range(&mut self, range: ChannelRange, level: Level) -> Result<(), ConfigError> {
        let slots = self
            .levels
            .get_mut(range.as_index_range())
            .ok_or(ConfigError::OutOfState { range, capacity: N })?;
        slots.fill(level);
        Ok(())
    }

    /// Sets every channel to `level`.
    pub fn fill(&mut self, level: Level) {
        self.levels.fill(level);
    }

    /// Turns every channel off.
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Returns true if `range` lies entirely within the buffer.
    #[inline]
    pub fn fits(&self, range: ChannelRange) -> bool {
        usize::from(range.end()) <= N
    }

    /// Read-only view of the channels in `range`.
    ///
    /// Returns `None` if the range does not fit the buffer.
    pub fn view(&self, range: ChannelRange) -> Option<ChannelView<'_>> {
        self.levels
            .get(range.as_index_range())
            .map(|levels| ChannelView { range, levels })
    }

    /// All levels, indexed by channel id.
    #[inline]
    pub fn as_slice(&self) -> &[Level] {
        &self.levels
    }
}

impl<const N: usize> Default for ChannelState<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable window onto the desired levels of one channel range.
///
/// Channels are addressed by their absolute id, the same way the controller
/// addresses them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelView<'a> {
    range: ChannelRange,
    levels: &'a [Level],
}

impl<'a> ChannelView<'a> {
    /// Builds a view over `levels`, which must hold exactly one entry per
    /// channel of `range`.
    ///
    /// Returns `None` if the lengths disagree.
    pub fn new(range: ChannelRange, levels: &'a [Level]) -> Option<Self> {
        (levels.len() == usize::from(range.count())).then_some(Self { range, levels })
    }

    /// The channels this view covers.
    #[inline]
    pub fn range(&self) -> ChannelRange {
        self.range
    }

    /// Desired level of `channel`, or `None` outside the view's range.
    #[inline]
    pub fn get(&self, channel: ChannelId) -> Option<Level> {
        self.range
            .offset_of(channel)
            .and_then(|i| self.levels.get(i).copied())
    }

    /// Levels in channel order, starting at `range().start()`.
    #[inline]
    pub fn values(&self) -> &'a [Level] {
        self.levels
    }

    /// `(channel, level)` pairs in channel order.
    pub fn iter(&self) -> impl Iterator<Item = (ChannelId, Level)> + 'a {
        self.range.iter().zip(self.levels.iter().copied())
    }
}
