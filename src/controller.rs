//! Controller that assembles groups and drives the control cycle.
//!
//! [`OutputController`] owns the desired-state buffer and holds every group
//! as a `&mut dyn Group`. It is responsible for the invariants no single
//! group can check on its own:
//!
//! - no two groups claim the same channel
//! - every group's channels fit the state buffer
//! - `start` runs once on every group before the first `update`
//!
//! # Example
//!
//! ```rust
//! use rs_relays::{OutputController, PinGroup, RelayMode};
//! use rs_relays::hal::MockBoard;
//!
//! let mut relays = PinGroup::new(2, 0, false, &[3, 4], RelayMode::ActiveLow, MockBoard::new()).unwrap();
//! let mut lamps = PinGroup::new(2, 2, false, &[5, 6], RelayMode::ActiveHigh, MockBoard::new()).unwrap();
//!
//! {
//!     let mut controller = OutputController::<4>::new();
//!     controller.add(&mut relays).unwrap();
//!     controller.add(&mut lamps).unwrap();
//!
//!     controller.start_all().unwrap();
//!     controller.state_mut().set_on(0).unwrap();
//!     controller.state_mut().set_on(3).unwrap();
//!
//!     // Main loop: call update_all() every tick (e.g., 20ms)
//!     controller.update_all().unwrap();
//! }
//!
//! assert_eq!(relays.board().is_high(3), Some(false)); // active-low relay on
//! assert_eq!(lamps.board().is_high(6), Some(true));
//! ```

use heapless::Vec;

use crate::channel::ChannelRange;
use crate::error::{ConfigError, LifecycleError};
use crate::state::ChannelState;
use crate::traits::{Group, GroupFault, GroupPhase};

/// Maximum number of groups one controller can hold.
pub const MAX_GROUPS: usize = 16;

/// Owns the desired state for `N` channels and drives a set of groups.
///
/// # Thread Safety
///
/// The controller is meant to be driven from a single control loop. If
/// desired state is ever written from an interrupt, the write must go
/// through a critical section around [`state_mut`](Self::state_mut).
pub struct OutputController<'a, const N: usize> {
    groups: Vec<&'a mut dyn Group, MAX_GROUPS>,
    state: ChannelState<N>,
    started: bool,
}

impl<'a, const N: usize> OutputController<'a, N> {
    /// Create an empty controller with every channel off.
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            state: ChannelState::new(),
            started: false,
        }
    }

    /// Register a group, returning its index.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::AlreadyStarted`] after [`start_all`](Self::start_all)
    /// - [`ConfigError::OutOfState`] if the group's channels exceed `N`
    /// - [`ConfigError::Overlap`] if it shares a channel with a registered group
    /// - [`ConfigError::TooManyGroups`] beyond [`MAX_GROUPS`]
    pub fn add(&mut self, group: &'a mut dyn Group) -> Result<usize, ConfigError> {
        if self.started {
            return Err(ConfigError::AlreadyStarted);
        }

        let candidate = group.channels();
        if !self.state.fits(candidate) {
            return Err(ConfigError::OutOfState {
                range: candidate,
                capacity: N,
            });
        }
        if let Some(existing) = self.ranges().find(|r| r.overlaps(&candidate)) {
            return Err(ConfigError::Overlap {
                existing,
                candidate,
            });
        }

        self.groups
            .push(group)
            .map_err(|_| ConfigError::TooManyGroups { max: MAX_GROUPS })?;
        Ok(self.groups.len() - 1)
    }

    /// Start every group once, in registration order.
    pub fn start_all(&mut self) -> Result<(), LifecycleError> {
        if self.started {
            return Err(LifecycleError::AlreadyStarted);
        }
        for group in self.groups.iter_mut() {
            group.start();
        }
        self.started = true;
        log::info!("{} groups started", self.groups.len());
        Ok(())
    }

    /// Push the current desired state to every group.
    ///
    /// Call once per control tick. Group faults do not interrupt the cycle;
    /// check [`has_fault`](Self::has_fault) afterwards.
    pub fn update_all(&mut self) -> Result<(), LifecycleError> {
        if !self.started {
            return Err(LifecycleError::NotStarted);
        }
        for group in self.groups.iter_mut() {
            // Ranges were checked against the buffer in `add`.
            if let Some(view) = self.state.view(group.channels()) {
                group.update(&view);
            }
        }
        Ok(())
    }

    /// The desired-state buffer.
    #[inline]
    pub fn state(&self) -> &ChannelState<N> {
        &self.state
    }

    /// Mutable access to the desired-state buffer.
    #[inline]
    pub fn state_mut(&mut self) -> &mut ChannelState<N> {
        &mut self.state
    }

    /// Number of registered groups.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Whether [`start_all`](Self::start_all) has run.
    #[inline]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Channel ranges of the registered groups, in registration order.
    pub fn ranges(&self) -> impl Iterator<Item = ChannelRange> + use<'_, 'a, N> {
        self.groups.iter().map(|g| g.channels())
    }

    /// Latched faults as `(group index, fault)` pairs.
    pub fn faults(&self) -> impl Iterator<Item = (usize, GroupFault)> + use<'_, 'a, N> {
        self.groups
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.fault().map(|f| (i, f)))
    }

    /// Check if any group has a latched fault.
    pub fn has_fault(&self) -> bool {
        self.faults().next().is_some()
    }

    /// Clear the latched fault on every group.
    pub fn clear_faults(&mut self) {
        for group in self.groups.iter_mut() {
            group.clear_fault();
        }
    }

    /// Snapshot of one group for diagnostics, as reported by the group.
    pub fn status(&self, index: usize) -> Option<GroupStatus> {
        self.groups.get(index).map(|g| GroupStatus {
            channels: g.channels(),
            phase: g.phase(),
            fault: g.fault(),
        })
    }
}

impl<const N: usize> Default for OutputController<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-group state snapshot for diagnostics.
///
/// Implements `serde::Serialize` when the `serde` feature is enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupStatus {
    /// Channels the group claims.
    pub channels: ChannelRange,
    /// Lifecycle phase.
    pub phase: GroupPhase,
    /// Latched fault, if any.
    pub fault: Option<GroupFault>,
}
