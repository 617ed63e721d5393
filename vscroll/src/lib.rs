//! A headless windowed-list engine.
//!
//! For frame scheduling (scroll coalescing, retry timers, teardown), see the
//! `vscroll-adapter` crate.
//!
//! The engine renders only the slice of a long ordered list that intersects the viewport,
//! and recycles a bounded pool of render slots while the user scrolls:
//! - [`HeightTable`]: per-item heights and a monotonic cumulative-offset index
//! - [`WindowCalculator`]: viewport → `[start, end)` index window
//! - [`ViewPool`]: slots recycled by item type and stable key
//! - [`ScrollSource`] / [`ResizeSignal`]: normalized scroll and size input
//! - [`DynamicHeightTracker`]: post-layout measurement of rendered items
//!
//! [`VirtualScroller`] wires them together. It is UI-agnostic: the host provides scroll
//! offsets, container sizes and (optionally) measured heights, and renders each slot through
//! a `(item, index, active)` callback.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod dynamic;
mod error;
mod events;
mod height_table;
mod key;
mod options;
mod pool;
mod resize;
mod scroll;
mod scroller;
mod types;
mod window;


pub use dynamic::{DynamicHeightTracker, HeightChange, MeasureState};
pub use error::Error;
pub use events::ScrollerEvent;
pub use height_table::HeightTable;
pub use key::ScrollKey;
pub use options::{
    DEFAULT_BUFFER, HeightSelector, KeySelector, OnEventCallback, ScrollerOptions, TypeSelector,
};
pub use pool::{PoolSource, ReconcileStats, Slot, ViewPool};
pub use resize::ResizeSignal;
pub use scroll::{ListenerTarget, PageGeometry, ScrollMode, ScrollSource};
pub use scroller::{SlotView, UpdateOutcome, VirtualScroller};
pub use types::{
    DEFAULT_ITEM_TYPE, Diagnostics, HostCapabilities, ItemKey, ItemType, Rect, SlotId, SlotKey,
    ViewportRange, Window, WindowLayout,
};
pub use window::{DEFAULT_ITEMS_LIMIT, WindowCalculator};
