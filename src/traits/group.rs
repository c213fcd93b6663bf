//! The group contract.
//!
//! A group is a block of output channels that shares a controller-facing
//! lifecycle:
//!
//! ```text
//! Uninitialized --start()--> Ready --update()*--> Ready
//! ```
//!
//! `start` runs once at boot to configure the hardware; `update` runs every
//! control tick to push the desired levels out. Neither returns an error.
//! A group that can fail reports it through [`Group::fault`] so the
//! controller (or a watchdog above it) can decide what to do.
//!
//! # Example Implementation
//!
//! ```rust
//! use rs_relays::{ChannelRange, ChannelView, Group, GroupPhase};
//!
//! /// Group that just remembers what it was last told.
//! struct Latch {
//!     channels: ChannelRange,
//!     phase: GroupPhase,
//!     last: [u8; 2],
//! }
//!
//! impl Group for Latch {
//!     fn channels(&self) -> ChannelRange {
//!         self.channels
//!     }
//!
//!     fn phase(&self) -> GroupPhase {
//!         self.phase
//!     }
//!
//!     fn start(&mut self) {
//!         self.phase = GroupPhase::Ready;
//!     }
//!
//!     fn update(&mut self, state: &ChannelView<'_>) {
//!         self.last.copy_from_slice(state.values());
//!     }
//! }
//! ```

use crate::channel::ChannelRange;
use crate::state::ChannelView;
use crate::traits::PinId;

/// A block of output channels driven on the common control cycle.
///
/// The trait is object safe; controllers hold `&mut dyn Group` and never
/// need to know the concrete device type.
pub trait Group {
    /// The channels this group claims. Fixed for the group's lifetime.
    fn channels(&self) -> ChannelRange;

    /// Where the group is in its lifecycle.
    fn phase(&self) -> GroupPhase;

    /// One-time hardware initialization for the owned channels.
    ///
    /// Called exactly once, before the first [`update`](Self::update).
    /// Implementations must not act on desired state here.
    fn start(&mut self);

    /// Refresh the physical outputs from `state`.
    ///
    /// `state` covers exactly [`channels`](Self::channels). Must return in
    /// bounded time.
    fn update(&mut self, state: &ChannelView<'_>);

    /// The latched fault, if the group has hit a hardware problem.
    fn fault(&self) -> Option<GroupFault> {
        None
    }

    /// Clears a latched fault.
    fn clear_fault(&mut self) {}
}

/// Lifecycle phase of a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GroupPhase {
    /// Constructed, `start` not yet called.
    #[default]
    Uninitialized,
    /// Started; `update` may be called.
    Ready,
}

/// What went wrong on a faulted pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FaultKind {
    /// Configuring the pin as an output failed during `start`.
    Configure,
    /// Writing a level to the pin failed during `update`.
    Write,
}

/// First hardware failure a group latched, plus how many followed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupFault {
    /// Pin on which the first failure happened.
    pub pin: PinId,
    /// Kind of the first failure.
    pub kind: FaultKind,
    /// Total failures since the fault was last cleared.
    pub count: u32,
}

impl GroupFault {
    /// A fresh fault with a count of one.
    pub const fn new(pin: PinId, kind: FaultKind) -> Self {
        Self {
            pin,
            kind,
            count: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ChannelState;

    struct Counter {
        channels: ChannelRange,
        starts: usize,
        updates: usize,
        last_sum: u32,
    }

    impl Counter {
        fn new(count: u16, start: u16) -> Self {
            Self {
                channels: ChannelRange::new(count, start).unwrap(),
                starts: 0,
                updates: 0,
                last_sum: 0,
            }
        }
    }

    impl Group for Counter {
        fn channels(&self) -> ChannelRange {
            self.channels
        }

        fn phase(&self) -> GroupPhase {
            if self.starts > 0 {
                GroupPhase::Ready
            } else {
                GroupPhase::Uninitialized
            }
        }

        fn start(&mut self) {
            self.starts += 1;
        }

        fn update(&mut self, state: &ChannelView<'_>) {
            self.updates += 1;
            self.last_sum = state.values().iter().map(|&v| u32::from(v)).sum();
        }
    }

    #[test]
    fn default_fault_is_none() {
        let mut group = Counter::new(1, 0);
        assert!(group.fault().is_none());
        group.clear_fault();
        assert!(group.fault().is_none());
    }

    #[test]
    fn dispatch_through_trait_object() {
        let mut state = ChannelState::<4>::new();
        state.fill(3);

        let mut a = Counter::new(1, 0);
        let mut b = Counter::new(3, 1);
        {
            let mut groups: [&mut dyn Group; 2] = [&mut a, &mut b];
            for group in groups.iter_mut() {
                group.start();
            }
            for group in groups.iter_mut() {
                let view = state.view(group.channels()).unwrap();
                group.update(&view);
            }
        }

        assert_eq!(a.phase(), GroupPhase::Ready);
        assert_eq!((a.starts, a.updates, a.last_sum), (1, 1, 3));
        assert_eq!((b.starts, b.updates, b.last_sum), (1, 1, 9));
    }

    #[test]
    fn group_fault_new_counts_one() {
        let fault = GroupFault::new(7, FaultKind::Write);
        assert_eq!(fault.pin, 7);
        assert_eq!(fault.kind, FaultKind::Write);
        assert_eq!(fault.count, 1);
    }

    #[test]
    fn phase_default_is_uninitialized() {
        assert_eq!(GroupPhase::default(), GroupPhase::Uninitialized);
    }
}
