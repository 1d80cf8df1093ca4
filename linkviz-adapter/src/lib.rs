//! Adapter utilities for the `linkviz` crate.
//!
//! The `linkviz` crate is UI-agnostic and focuses on the list, its graph projection, and the
//! animations of each operation. This crate provides small, framework-neutral helpers commonly
//! needed by adapters:
//!
//! - Frame pacing against a millisecond clock (`Player`)
//! - Tween-based gliding of nodes whose position changed between frames
//! - Serialized operation execution with a queue or a single-slot lock (`Controller`)
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod player;
mod tween;

#[cfg(test)]
mod tests;

pub use controller::{Controller, ControllerError, ControllerEvent};
pub use player::{PlaybackOptions, Player};
pub use tween::{Easing, Tween};
