//! Relay polarity.
//!
//! Relay modules come in two flavours: boards that energise the coil when the
//! control line is driven high, and boards (most opto-isolated modules) that
//! energise it when the line is pulled low. [`RelayMode`] maps a logical
//! "on" to the physical level for either kind.

use crate::channel::{Level, MAX_LEVEL};

/// Whether a logical "on" drives the output line high or low.
///
/// # Default
///
/// Defaults to [`ActiveHigh`](Self::ActiveHigh).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RelayMode {
    /// Logical on drives the line high.
    #[default]
    ActiveHigh,
    /// Logical on drives the line low.
    ActiveLow,
}

impl RelayMode {
    /// Returns true for [`ActiveLow`](Self::ActiveLow).
    #[inline]
    pub const fn is_inverted(&self) -> bool {
        matches!(self, RelayMode::ActiveLow)
    }

    /// Maps a logical on/off state to the physical line state (`true` = high).
    ///
    /// ```
    /// use rs_relays::RelayMode;
    ///
    /// assert!(RelayMode::ActiveHigh.apply_digital(true));
    /// assert!(!RelayMode::ActiveLow.apply_digital(true));
    /// ```
    #[inline]
    pub const fn apply_digital(&self, on: bool) -> bool {
        on != self.is_inverted()
    }

    /// Maps a logical intensity to the physical PWM duty.
    ///
    /// ```
    /// use rs_relays::RelayMode;
    ///
    /// assert_eq!(RelayMode::ActiveHigh.apply_level(100), 100);
    /// assert_eq!(RelayMode::ActiveLow.apply_level(100), 155);
    /// ```
    #[inline]
    pub const fn apply_level(&self, level: Level) -> Level {
        match self {
            RelayMode::ActiveHigh => level,
            RelayMode::ActiveLow => MAX_LEVEL - level,
        }
    }

    /// Returns the mode as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            RelayMode::ActiveHigh => "active_high",
            RelayMode::ActiveLow => "active_low",
        }
    }

    /// Parse a relay mode from text.
    ///
    /// Accepts `"active_high"`, `"high"`, `"h"` and `"1"` for
    /// [`ActiveHigh`](Self::ActiveHigh) and `"active_low"`, `"low"`, `"l"`
    /// and `"0"` for [`ActiveLow`](Self::ActiveLow). Input is trimmed and
    /// case-insensitive; `-` may be used in place of `_`.
    ///
    /// ```
    /// use rs_relays::RelayMode;
    ///
    /// assert_eq!(RelayMode::from_text("Active-Low"), Some(RelayMode::ActiveLow));
    /// assert_eq!(RelayMode::from_text(" high "), Some(RelayMode::ActiveHigh));
    /// assert_eq!(RelayMode::from_text("sideways"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        let matches_any = |names: &[&str]| {
            names.iter().any(|name| {
                name.len() == s.len()
                    && name
                        .bytes()
                        .zip(s.bytes())
                        .all(|(a, b)| a == b.to_ascii_lowercase() || (a == b'_' && b == b'-'))
            })
        };

        if matches_any(&["active_high", "high", "h", "1"]) {
            Some(RelayMode::ActiveHigh)
        } else if matches_any(&["active_low", "low", "l", "0"]) {
            Some(RelayMode::ActiveLow)
        } else {
            None
        }
    }
}
