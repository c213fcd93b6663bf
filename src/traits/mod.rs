//! Trait definitions for output groups and the board-support layer.
//!
//! # Submodules
//!
//! - `group`: the [`Group`] contract every device group implements
//! - `board`: the [`Board`] primitives a group consumes to drive pins
//!
//! A controller only ever sees [`Group`]. Concrete groups such as
//! [`PinGroup`](crate::groups::PinGroup) sit on top of a [`Board`], which is
//! where chip-specific code lives.

pub mod board;
pub mod group;

pub use board::*;
pub use group::*;
