#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use vscroll::{ScrollKey, SlotKey};

#[cfg(feature = "std")]
type StateMap<K, S> = HashMap<K, S>;
#[cfg(not(feature = "std"))]
type StateMap<K, S> = BTreeMap<K, S>;

/// Per-item view state keyed by item id.
///
/// Slots are recycled, so state kept on a slot would leak from one item to the next. Keying
/// it by the item's stable id instead makes it follow the item: a slot rebound to a new item
/// picks up that item's state (or a fresh one), and a slot rebound back finds the old state
/// intact.
#[derive(Clone, Debug)]
pub struct IdStateStore<K, S> {
    states: StateMap<K, S>,
}

impl<K: ScrollKey + Clone, S> Default for IdStateStore<K, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ScrollKey + Clone, S> IdStateStore<K, S> {
    pub fn new() -> Self {
        Self {
            states: StateMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, id: &K) -> Option<&S> {
        self.states.get(id)
    }

    pub fn get_mut(&mut self, id: &K) -> Option<&mut S> {
        self.states.get_mut(id)
    }

    /// State of `id`, created with `init` on first access.
    pub fn state(&mut self, id: &K, init: impl FnOnce() -> S) -> &mut S {
        self.states.entry(id.clone()).or_insert_with(init)
    }

    /// State of the item behind a slot binding.
    ///
    /// Positional bindings have no id to key state by: the access is refused with a warning.
    pub fn for_slot_key(&mut self, key: &SlotKey<K>, init: impl FnOnce() -> S) -> Option<&mut S> {
        match key {
            SlotKey::Key(id) => Some(self.state(id, init)),
            SlotKey::Position(_index) => {
                vwarn!(index = *_index, "no item id for id-keyed state");
                None
            }
        }
    }

    pub fn remove(&mut self, id: &K) -> Option<S> {
        self.states.remove(id)
    }

    /// Drops the state of every id for which `keep` returns `false` (e.g. items no longer in
    /// the list).
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.states.retain(|id, _| keep(id));
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }
}
