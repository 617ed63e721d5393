use alloc::vec::Vec;

use crate::key::{KeyMap, ScrollKey};
use crate::{SlotId, SlotKey};

/// Measurement state of one tracked slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureState {
    #[default]
    Idle,
    /// Scheduled; waits for the next layout pass.
    Pending,
    /// Handed to the host for a geometry read.
    Measuring,
}

/// A measured height that differs from the recorded one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightChange<K> {
    pub slot: SlotId,
    pub key: SlotKey<K>,
    pub previous: Option<u32>,
    pub height: u32,
}

#[derive(Clone, Debug)]
struct ItemTracker<K> {
    key: SlotKey<K>,
    active: bool,
    state: MeasureState,
    force_next: bool,
    pending_vscroll: bool,
}

impl<K> ItemTracker<K> {
    fn update_size(&mut self, context_active: bool) {
        if !(self.active && context_active) {
            self.force_next = true;
            return;
        }
        if self.state == MeasureState::Idle {
            self.state = MeasureState::Pending;
            self.force_next = false;
            self.pending_vscroll = false;
        }
    }
}

/// Measures rendered slots after layout and reports height corrections.
///
/// There is one tracker per mounted slot. Trackers never patch the height table themselves:
/// the owner applies the returned [`HeightChange`]s and schedules a recompute. Updates reach
/// trackers only through [`Self::publish`], which is a one-way fan-out.
#[derive(Clone, Debug)]
pub struct DynamicHeightTracker<K> {
    trackers: KeyMap<SlotId, ItemTracker<K>>,
    context_active: bool,
}

impl<K: ScrollKey + Clone> Default for DynamicHeightTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ScrollKey + Clone> DynamicHeightTracker<K> {
    pub fn new() -> Self {
        Self {
            trackers: KeyMap::new(),
            context_active: true,
        }
    }

    pub fn is_context_active(&self) -> bool {
        self.context_active
    }

    /// A deactivated context (scroller kept alive but hidden) never schedules measurements;
    /// requests made meanwhile are remembered through `force_next`.
    pub fn set_context_active(&mut self, active: bool) {
        self.context_active = active;
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    pub fn state(&self, slot: SlotId) -> Option<MeasureState> {
        self.trackers.get(&slot).map(|t| t.state)
    }

    pub fn is_force_next(&self, slot: SlotId) -> bool {
        self.trackers.get(&slot).is_some_and(|t| t.force_next)
    }

    /// Whether any tracker waits for a layout pass.
    pub fn has_pending(&self) -> bool {
        self.trackers
            .values()
            .any(|t| t.state == MeasureState::Pending)
    }

    /// Brings the tracker of `slot` in line with the slot's binding after a reconcile.
    ///
    /// `recorded` is the height currently recorded for `key`, if any.
    pub fn sync_slot(&mut self, slot: SlotId, key: &SlotKey<K>, active: bool, recorded: Option<u32>) {
        let context_active = self.context_active;
        let Some(t) = self.trackers.get_mut(&slot) else {
            let mut t = ItemTracker {
                key: key.clone(),
                active,
                state: MeasureState::Idle,
                force_next: false,
                pending_vscroll: false,
            };
            if context_active {
                t.update_size(context_active);
            }
            self.trackers.insert(slot, t);
            return;
        };

        if t.key != *key {
            t.key = key.clone();
            match t.state {
                // The in-flight read belongs to the previous item.
                MeasureState::Measuring => t.force_next = true,
                MeasureState::Idle if recorded.is_none() => t.update_size(context_active),
                _ => {}
            }
        }

        if t.active != active {
            t.active = active;
            if active {
                if t.pending_vscroll || t.force_next {
                    t.update_size(context_active);
                }
            } else if t.state == MeasureState::Pending {
                t.force_next = true;
            }
        }
    }

    /// Broadcasts a `vscroll:update` to every tracker.
    ///
    /// Inactive trackers remember forced updates so they re-measure once they become active.
    pub fn publish(&mut self, force: bool, recorded: impl Fn(&SlotKey<K>) -> Option<u32>) {
        vtrace!(force, trackers = self.trackers.len(), "DynamicHeightTracker::publish");
        let context_active = self.context_active;
        for t in self.trackers.values_mut() {
            if !t.active && force {
                t.pending_vscroll = true;
            }
            if t.force_next || force || recorded(&t.key).is_none() {
                t.update_size(context_active);
            }
        }
    }

    /// Reports that the content of `slot` changed in a way that may affect its height.
    pub fn notify_data_changed(&mut self, slot: SlotId) {
        let context_active = self.context_active;
        if let Some(t) = self.trackers.get_mut(&slot) {
            t.update_size(context_active);
        }
    }

    /// Starts a layout pass: returns the slots the host must measure, in slot order.
    ///
    /// Pending trackers whose slot went inactive are not measured; they go back to idle with
    /// `force_next` set, so reactivation measures them right away.
    pub fn begin_layout_pass(&mut self) -> Vec<(SlotId, SlotKey<K>)> {
        let context_active = self.context_active;
        let mut batch = Vec::new();
        for (&slot, t) in self.trackers.iter_mut() {
            if t.state != MeasureState::Pending {
                continue;
            }
            if t.active && context_active {
                t.state = MeasureState::Measuring;
                batch.push((slot, t.key.clone()));
            } else {
                t.state = MeasureState::Idle;
                t.force_next = true;
            }
        }
        batch.sort_by_key(|(slot, _)| *slot);
        batch
    }

    /// Finishes the measurement of `slot`.
    ///
    /// Returns a change only when the slot still shows `key`, the host produced a non-zero
    /// height, and that height differs from `recorded`. Re-measuring an unchanged height is a
    /// no-op.
    pub fn complete_measurement(
        &mut self,
        slot: SlotId,
        key: &SlotKey<K>,
        height: Option<u32>,
        recorded: Option<u32>,
    ) -> Option<HeightChange<K>> {
        let context_active = self.context_active;
        let t = self.trackers.get_mut(&slot)?;
        if t.state != MeasureState::Measuring {
            return None;
        }
        t.state = MeasureState::Idle;

        if t.key != *key {
            if t.force_next {
                t.update_size(context_active);
            }
            return None;
        }

        let height = height.filter(|&h| h > 0)?;
        if recorded == Some(height) {
            return None;
        }
        Some(HeightChange {
            slot,
            key: key.clone(),
            previous: recorded,
            height,
        })
    }

    /// Forgets the tracker of an unmounted slot, dropping any scheduled measurement.
    pub fn remove(&mut self, slot: SlotId) {
        self.trackers.remove(&slot);
    }

    pub fn clear(&mut self) {
        self.trackers.clear();
    }
}
