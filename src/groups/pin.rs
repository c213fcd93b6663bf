//! Direct-pin output group.
//!
//! [`PinGroup`] drives a block of channels wired straight to controller
//! pins, one pin per channel. Each pin is either a plain digital output or,
//! when the group is built with `use_pwm` and the board supports it, a PWM
//! output. Relay polarity is applied on the way out.
//!
//! | Desired level | Digital, active-high | Digital, active-low | PWM, active-high | PWM, active-low |
//! |---------------|----------------------|---------------------|------------------|-----------------|
//! | `0`           | low                  | high                | `0`              | `255`           |
//! | `v > 0`       | high                 | low                 | `v`              | `255 - v`       |
//!
//! # Fallbacks and faults
//!
//! - A PWM group on a pin without PWM support drives that pin digitally.
//! - A failed PWM configuration also falls back to digital.
//! - Configuration and write failures latch a [`GroupFault`] and are logged;
//!   the remaining channels are still driven.
//! - A pin whose configuration failed is disabled. It is never written, and
//!   clearing the group's fault latches its `Configure` fault again.
//!
//! # Example
//!
//! ```rust
//! use rs_relays::{ChannelState, Group, PinGroup, RelayMode};
//! use rs_relays::hal::MockBoard;
//! use rs_relays::traits::PinOutput;
//!
//! let board = MockBoard::new().with_pwm_pins(&[5]);
//! let mut dimmer = PinGroup::new(1, 0, true, &[5], RelayMode::ActiveLow, board).unwrap();
//!
//! let mut state = ChannelState::<1>::new();
//! state.set(0, 100).unwrap();
//!
//! dimmer.start();
//! dimmer.update(&state.view(dimmer.channels()).unwrap());
//! assert_eq!(dimmer.board().output(5), Some(PinOutput::Pwm(155)));
//! ```

use heapless::Vec;

use crate::channel::{ChannelId, ChannelRange};
use crate::error::ConfigError;
use crate::polarity::RelayMode;
use crate::state::ChannelView;
use crate::traits::{Board, FaultKind, Group, GroupFault, GroupPhase, PinId};

/// Maximum number of channels in one [`PinGroup`].
pub const MAX_GROUP_CHANNELS: usize = 32;

/// How a channel of a [`PinGroup`] is actually being driven.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OutputMode {
    /// On/off output; any non-zero level is on.
    #[default]
    Digital,
    /// Intensity output over the full level range.
    Pwm,
    /// Output configuration failed; the pin is never written.
    Disabled,
}

/// A block of channels mapped one-to-one onto board pins.
#[derive(Debug)]
pub struct PinGroup<B: Board> {
    channels: ChannelRange,
    use_pwm: bool,
    relay_mode: RelayMode,
    pins: Vec<PinId, MAX_GROUP_CHANNELS>,
    modes: Vec<OutputMode, MAX_GROUP_CHANNELS>,
    phase: GroupPhase,
    fault: Option<GroupFault>,
    board: B,
}

impl<B: Board> PinGroup<B> {
    /// Creates a group of `channels` channels starting at `starting_channel`.
    ///
    /// `pins[i]` drives channel `starting_channel + i`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyRange`] / [`ConfigError::RangeOverflow`] for a bad range
    /// - [`ConfigError::TooManyChannels`] above [`MAX_GROUP_CHANNELS`]
    /// - [`ConfigError::PinCountMismatch`] if `pins.len() != channels`
    /// - [`ConfigError::InvalidPin`] for a pin the board cannot drive
    /// - [`ConfigError::DuplicatePin`] if a pin is listed twice
    pub fn new(
        channels: ChannelId,
        starting_channel: ChannelId,
        use_pwm: bool,
        pins: &[PinId],
        relay_mode: RelayMode,
        board: B,
    ) -> Result<Self, ConfigError> {
        let range = ChannelRange::new(channels, starting_channel)?;
        let count = usize::from(channels);

        if count > MAX_GROUP_CHANNELS {
            return Err(ConfigError::TooManyChannels {
                count,
                max: MAX_GROUP_CHANNELS,
            });
        }
        if pins.len() != count {
            return Err(ConfigError::PinCountMismatch {
                expected: count,
                actual: pins.len(),
            });
        }
        for (i, &pin) in pins.iter().enumerate() {
            if !board.is_valid_pin(pin) {
                return Err(ConfigError::InvalidPin(pin));
            }
            if pins[..i].contains(&pin) {
                return Err(ConfigError::DuplicatePin(pin));
            }
        }

        let too_many = ConfigError::TooManyChannels {
            count,
            max: MAX_GROUP_CHANNELS,
        };
        let pins = Vec::from_slice(pins).map_err(|_| too_many)?;
        let mut modes = Vec::new();
        modes
            .resize(count, OutputMode::Digital)
            .map_err(|_| too_many)?;

        Ok(Self {
            channels: range,
            use_pwm,
            relay_mode,
            pins,
            modes,
            phase: GroupPhase::Uninitialized,
            fault: None,
            board,
        })
    }

    /// Physical pins in channel order.
    #[inline]
    pub fn pins(&self) -> &[PinId] {
        &self.pins
    }

    /// Whether PWM was requested for this group.
    #[inline]
    pub fn uses_pwm(&self) -> bool {
        self.use_pwm
    }

    /// The group's relay polarity.
    #[inline]
    pub fn relay_mode(&self) -> RelayMode {
        self.relay_mode
    }

    /// Current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> GroupPhase {
        self.phase
    }

    /// How `channel` is driven. Before `start`, every channel reads as digital.
    pub fn output_mode(&self, channel: ChannelId) -> Option<OutputMode> {
        self.channels
            .offset_of(channel)
            .and_then(|i| self.modes.get(i).copied())
    }

    /// Pin that drives `channel`.
    pub fn pin_for(&self, channel: ChannelId) -> Option<PinId> {
        self.channels
            .offset_of(channel)
            .and_then(|i| self.pins.get(i).copied())
    }

    /// The underlying board.
    #[inline]
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Mutable access to the underlying board.
    #[inline]
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Consumes the group, returning its board.
    pub fn into_board(self) -> B {
        self.board
    }

    fn configure(&mut self, i: usize) {
        let pin = self.pins[i];

        if let Err(e) = self.board.configure_output(pin) {
            log::error!("pin {pin}: output configuration failed: {e:?}");
            self.modes[i] = OutputMode::Disabled;
            self.latch_fault(pin, FaultKind::Configure);
            return;
        }

        self.modes[i] = if !self.use_pwm {
            OutputMode::Digital
        } else if !self.board.supports_pwm(pin) {
            log::warn!("pin {pin}: no PWM support, driving as digital");
            OutputMode::Digital
        } else {
            match self.board.configure_pwm(pin) {
                Ok(()) => OutputMode::Pwm,
                Err(e) => {
                    log::warn!("pin {pin}: PWM setup failed ({e:?}), driving as digital");
                    OutputMode::Digital
                }
            }
        };
    }

    fn latch_fault(&mut self, pin: PinId, kind: FaultKind) {
        if let Some(fault) = self.fault.as_mut() {
            fault.count = fault.count.saturating_add(1);
            return;
        }
        log::warn!("group {}: fault latched on pin {pin} ({kind:?})", self.channels);
        self.fault = Some(GroupFault::new(pin, kind));
    }
}

impl<B: Board> Group for PinGroup<B> {
    fn channels(&self) -> ChannelRange {
        self.channels
    }

    fn phase(&self) -> GroupPhase {
        self.phase
    }

    fn start(&mut self) {
        if self.phase == GroupPhase::Ready {
            log::debug!("group {}: already started", self.channels);
            return;
        }

        for i in 0..self.pins.len() {
            self.configure(i);
        }
        self.phase = GroupPhase::Ready;

        let pwm = self.modes.iter().filter(|m| **m == OutputMode::Pwm).count();
        log::info!(
            "group {} started: {} pins, {} pwm, {}",
            self.channels,
            self.pins.len(),
            pwm,
            self.relay_mode.as_str()
        );
    }

    fn update(&mut self, state: &ChannelView<'_>) {
        if self.phase != GroupPhase::Ready {
            log::warn!("group {}: update before start ignored", self.channels);
            return;
        }

        debug_assert_eq!(state.range(), self.channels, "view for another range");

        for (i, channel) in self.channels.iter().enumerate() {
            let pin = self.pins[i];
            let level = state.get(channel).unwrap_or(0);

            let result = match self.modes[i] {
                OutputMode::Disabled => continue,
                OutputMode::Pwm => self.board.pwm_write(pin, self.relay_mode.apply_level(level)),
                OutputMode::Digital => self
                    .board
                    .digital_write(pin, self.relay_mode.apply_digital(level != 0)),
            };

            if let Err(e) = result {
                log::debug!("pin {pin}: write failed: {e:?}");
                self.latch_fault(pin, FaultKind::Write);
            }
        }
    }

    fn fault(&self) -> Option<GroupFault> {
        self.fault
    }

    /// Clears write faults. A pin that failed configuration stays
    /// disabled, so its `Configure` fault is latched again.
    fn clear_fault(&mut self) {
        self.fault = self
            .pins
            .iter()
            .zip(&self.modes)
            .find(|(_, mode)| **mode == OutputMode::Disabled)
            .map(|(&pin, _)| GroupFault::new(pin, FaultKind::Configure));
    }
}
