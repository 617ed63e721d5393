//! Adapter utilities for the `vscroll` crate.
//!
//! The `vscroll` crate is UI-agnostic and never schedules work on its own. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Frame scheduling: one recompute per display frame, with a fallback retry after jumps
//! - A controller that drives a `VirtualScroller` from host events and frame ticks
//! - Per-item state that follows item ids across slot recycling
//!
//! This crate is intentionally framework-agnostic (no DOM/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod frame;
mod id_state;


pub use controller::Controller;
pub use frame::{DEFAULT_REFRESH_DELAY_MS, FrameCause, FrameScheduler};
pub use id_state::IdStateStore;
