#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Map used for every key-addressed table in the engine (bound slots, parked pools,
/// measured heights, trackers).
#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bound required of item keys.
///
/// With `std` this is `Hash + Eq`; without it the engine falls back to ordered maps and
/// needs `Ord` instead.
#[cfg(feature = "std")]
pub trait ScrollKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> ScrollKey for K {}

#[cfg(not(feature = "std"))]
pub trait ScrollKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> ScrollKey for K {}
