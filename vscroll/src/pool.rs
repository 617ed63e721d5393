use alloc::vec::Vec;

use crate::key::{KeyMap, ScrollKey};
use crate::{Error, ItemType, SlotId, SlotKey, Window};

/// Read access to the item sequence, as seen by [`ViewPool::reconcile`].
pub trait PoolSource<K> {
    /// Resolved identity of the item at `index`.
    fn slot_key(&self, index: usize) -> SlotKey<K>;

    fn item_type(&self, index: usize) -> ItemType;

    /// Pixel offset of the item at `index`.
    fn top(&self, index: usize) -> u64;

    /// Whether the item at `index` can be rendered yet (variable mode skips zero-height items).
    fn is_renderable(&self, _index: usize) -> bool {
        true
    }

    /// Current index of the item identified by `key`, if it is still in the sequence.
    fn index_of(&self, key: &SlotKey<K>) -> Option<usize>;
}

/// A reusable render unit.
///
/// A parked slot (`is_used() == false`) keeps its last binding so hosts can keep the
/// rendered subtree alive off-screen, but it has no `top`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot<K> {
    id: SlotId,
    index: usize,
    key: SlotKey<K>,
    item_type: ItemType,
    used: bool,
    top: Option<u64>,
}

impl<K> Slot<K> {
    pub fn id(&self) -> SlotId {
        self.id
    }

    /// The index this slot is (or was last) bound to.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn key(&self) -> &SlotKey<K> {
        &self.key
    }

    pub fn item_type(&self) -> ItemType {
        self.item_type
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    pub fn top(&self) -> Option<u64> {
        self.top
    }
}

/// What a reconcile pass did to the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileStats {
    /// `false` when the window jumped and every slot was reassigned in bulk.
    pub continuous: bool,
    /// In-window items that kept the slot already bound to their key.
    pub kept: usize,
    /// Parked slots of the same type bound to a new item.
    pub rebound: usize,
    pub created: usize,
    /// Parked slots of another type bound to a new item (only when the pool is full).
    pub retyped: usize,
    pub parked: usize,
}

impl ReconcileStats {
    /// Number of slots whose binding changed.
    pub fn reassignments(&self) -> usize {
        self.rebound + self.created + self.retyped + self.parked
    }
}

/// A bounded set of render slots, recycled by item type and stable key.
#[derive(Clone, Debug)]
pub struct ViewPool<K> {
    slots: Vec<Slot<K>>,
    bound: KeyMap<SlotKey<K>, SlotId>,
    parked: KeyMap<ItemType, Vec<SlotId>>,
    items_limit: usize,
    window: Option<Window>,
}

impl<K: ScrollKey + Clone> ViewPool<K> {
    pub fn new(items_limit: usize) -> Self {
        Self {
            slots: Vec::new(),
            bound: KeyMap::new(),
            parked: KeyMap::new(),
            items_limit,
            window: None,
        }
    }

    pub fn items_limit(&self) -> usize {
        self.items_limit
    }

    /// Changes the cap. Existing slots are kept even when the new cap is lower; they keep
    /// being recycled but no new slot is created until the pool shrinks below the cap.
    pub fn set_items_limit(&mut self, items_limit: usize) {
        self.items_limit = items_limit;
    }

    /// All slots, in creation order. Parked slots are included.
    pub fn slots(&self) -> &[Slot<K>] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot<K>> {
        self.slots.get(id.0 as usize)
    }

    /// The live slot bound to `key`, if any.
    pub fn slot_for_key(&self, key: &SlotKey<K>) -> Option<&Slot<K>> {
        self.bound.get(key).and_then(|&id| self.slot(id))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.bound.len()
    }

    pub fn parked_count(&self) -> usize {
        self.parked.values().map(Vec::len).sum()
    }

    /// The window of the last successful reconcile.
    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Drops every slot. Only used when the owning scroller is torn down.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.bound.clear();
        self.parked.clear();
        self.window = None;
    }

    /// Brings the pool in line with `window`.
    ///
    /// A window that touches the previous one is reconciled incrementally; anything else is a
    /// jump, where every slot is parked first and then reacquired by type, so no slot can
    /// show its previous position for a frame.
    ///
    /// Fails without touching any slot when `window` is wider than `items_limit`.
    pub fn reconcile(
        &mut self,
        window: Window,
        source: &impl PoolSource<K>,
    ) -> Result<ReconcileStats, Error> {
        if window.len() > self.items_limit {
            return Err(Error::ItemsLimitExceeded {
                requested: window.len(),
                limit: self.items_limit,
            });
        }

        let continuous = self.window.is_none_or(|prev| window.continues_from(&prev));
        let mut stats = ReconcileStats {
            continuous,
            ..ReconcileStats::default()
        };

        for i in 0..self.slots.len() {
            let slot = &self.slots[i];
            if !slot.used {
                continue;
            }
            let relocated = if continuous {
                source.index_of(&slot.key).filter(|&idx| {
                    window.contains(idx)
                        && source.is_renderable(idx)
                        && source.item_type(idx) == slot.item_type
                })
            } else {
                None
            };
            match relocated {
                Some(idx) => self.slots[i].index = idx,
                None => {
                    self.park(SlotId(i as u32));
                    stats.parked += 1;
                }
            }
        }

        for index in window.start..window.end {
            if !source.is_renderable(index) {
                continue;
            }
            let key = source.slot_key(index);
            let id = match self.bound.get(&key).copied() {
                Some(id) => {
                    stats.kept += 1;
                    id
                }
                None => {
                    let item_type = source.item_type(index);
                    let id = self.acquire(index, item_type, &mut stats)?;
                    self.slots[id.0 as usize].item_type = item_type;
                    self.bound.insert(key.clone(), id);
                    id
                }
            };
            let slot = &mut self.slots[id.0 as usize];
            slot.index = index;
            slot.key = key;
            slot.used = true;
            slot.top = Some(source.top(index));
        }

        vtrace!(
            start = window.start,
            end = window.end,
            continuous,
            kept = stats.kept,
            rebound = stats.rebound,
            created = stats.created,
            parked = stats.parked,
            "ViewPool::reconcile"
        );
        self.window = Some(window);
        Ok(stats)
    }

    fn park(&mut self, id: SlotId) {
        let slot = &mut self.slots[id.0 as usize];
        if !slot.used {
            return;
        }
        slot.used = false;
        slot.top = None;
        if self.bound.get(&slot.key) == Some(&id) {
            self.bound.remove(&slot.key);
        }
        self.parked.entry(slot.item_type).or_default().push(id);
    }

    fn acquire(
        &mut self,
        index: usize,
        item_type: ItemType,
        stats: &mut ReconcileStats,
    ) -> Result<SlotId, Error> {
        if let Some(id) = self.take_parked(item_type, index) {
            stats.rebound += 1;
            return Ok(id);
        }

        if self.slots.len() < self.items_limit {
            let id = SlotId(self.slots.len() as u32);
            self.slots.push(Slot {
                id,
                index,
                key: SlotKey::Position(index),
                item_type,
                used: true,
                top: None,
            });
            stats.created += 1;
            return Ok(id);
        }

        if let Some(id) = self.steal_parked() {
            vdebug!(
                slot = id.0,
                item_type,
                "ViewPool: pool full, re-typing a parked slot"
            );
            stats.retyped += 1;
            return Ok(id);
        }

        debug_assert!(false, "ViewPool: live slots exceed items_limit");
        Err(Error::ItemsLimitExceeded {
            requested: self.slots.len() + 1,
            limit: self.items_limit,
        })
    }

    /// Pops a parked slot of `item_type`, preferring one last bound to `index` so a slot whose
    /// item was replaced in place gets rebound in place.
    fn take_parked(&mut self, item_type: ItemType, index: usize) -> Option<SlotId> {
        let list = self.parked.get_mut(&item_type)?;
        let slots = &self.slots;
        let at = list
            .iter()
            .rposition(|id| slots[id.0 as usize].index == index);
        match at {
            Some(at) => Some(list.remove(at)),
            None => list.pop(),
        }
    }

    fn steal_parked(&mut self) -> Option<SlotId> {
        self.parked.values_mut().find_map(|list| list.pop())
    }
}
