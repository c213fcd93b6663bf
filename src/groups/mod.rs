//! Concrete [`Group`](crate::traits::Group) implementations.
//!
//! - `pin`: channels wired directly to controller pins ([`PinGroup`])

pub mod pin;

pub use pin::*;
