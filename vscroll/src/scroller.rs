use alloc::vec::Vec;

use crate::dynamic::{DynamicHeightTracker, HeightChange};
use crate::key::{KeyMap, ScrollKey};
use crate::pool::{PoolSource, ReconcileStats, Slot, ViewPool};
use crate::scroll::{PageGeometry, ScrollMode, ScrollSource};
use crate::{
    Diagnostics, Error, HeightTable, HostCapabilities, ItemKey, ItemType, Rect, ResizeSignal,
    ScrollerEvent, ScrollerOptions, SlotId, SlotKey, Window, WindowCalculator,
};

/// Result of one window recompute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateOutcome {
    pub window: Window,
    pub total_height: u64,
    pub stats: ReconcileStats,
}

impl UpdateOutcome {
    /// `false` when the window jumped and every slot was reassigned.
    pub fn continuous(&self) -> bool {
        self.stats.continuous
    }
}

/// One slot as handed to the render callback.
#[derive(Debug)]
pub struct SlotView<'a, T, K> {
    pub slot: &'a Slot<K>,
    pub item: &'a T,
    pub index: usize,
    /// `false` for a parked slot kept mounted off-screen.
    pub active: bool,
}

/// A headless windowed list.
///
/// Owns the item sequence, the height table and the slot pool; the host feeds it scroll and
/// size input and renders whatever [`Self::for_each_view`] reports. Nothing here schedules
/// work: call [`Self::update_visible_items`] when input changed (see `vscroll-adapter` for a
/// frame-driven controller).
#[derive(Clone, Debug)]
pub struct VirtualScroller<T, K = ItemKey> {
    options: ScrollerOptions<T, K>,
    items: Vec<T>,
    keys: Vec<SlotKey<K>>,
    key_index: KeyMap<SlotKey<K>, usize>,
    measured: KeyMap<SlotKey<K>, u32>,
    table: HeightTable,
    calculator: WindowCalculator,
    pool: ViewPool<K>,
    source: ScrollSource,
    resize: ResizeSignal,
    tracker: Option<DynamicHeightTracker<K>>,
    window: Window,
    total_height: u64,
    ready: bool,
    observe_visibility: bool,
    diagnostics: Diagnostics,
}

impl<T, K: ScrollKey + Clone> VirtualScroller<T, K> {
    /// Creates an empty scroller. Fails only for a fixed item height of zero.
    pub fn new(options: ScrollerOptions<T, K>) -> Result<Self, Error> {
        vdebug!(
            item_height = options.item_height,
            buffer = options.buffer,
            items_limit = options.items_limit,
            measure_heights = options.measure_heights,
            "VirtualScroller::new"
        );
        let table = table_for(&options)?;
        Ok(Self {
            items: Vec::new(),
            keys: Vec::new(),
            key_index: KeyMap::new(),
            measured: KeyMap::new(),
            table,
            calculator: WindowCalculator::new(options.items_limit),
            pool: ViewPool::new(options.items_limit),
            source: ScrollSource::new(scroll_mode(options.page_mode)),
            resize: ResizeSignal::new(),
            tracker: options.measure_heights.then(DynamicHeightTracker::new),
            window: Window::EMPTY,
            total_height: 0,
            ready: false,
            observe_visibility: true,
            diagnostics: Diagnostics::default(),
            options,
        })
    }

    pub fn options(&self) -> &ScrollerOptions<T, K> {
        &self.options
    }

    /// Replaces the options. Keys and heights are rebuilt; slots are kept.
    pub fn set_options(&mut self, options: ScrollerOptions<T, K>) -> Result<(), Error> {
        let table = table_for(&options)?;
        self.table = table;
        self.calculator = WindowCalculator::new(options.items_limit);
        self.pool.set_items_limit(options.items_limit);
        self.source.set_mode(scroll_mode(options.page_mode));
        match (options.measure_heights, self.tracker.is_some()) {
            (true, false) => self.tracker = Some(DynamicHeightTracker::new()),
            (false, true) => self.tracker = None,
            _ => {}
        }
        self.options = options;
        self.rebuild_keys();
        self.rebuild_heights();
        Ok(())
    }

    /// Replaces the item sequence wholesale.
    ///
    /// The height table is rebuilt from scratch. Recorded heights are dropped, except, with
    /// `retain_measurements`, those of keyed items still in the sequence. Heights recorded
    /// by position never carry over. With measurement enabled a forced `vscroll:update` goes
    /// out so every rendered item is measured again. Call [`Self::update_visible_items`]
    /// afterwards.
    pub fn set_items(&mut self, items: Vec<T>) {
        vdebug!(count = items.len(), "VirtualScroller::set_items");
        self.items = items;
        if self.options.retain_measurements {
            self.measured.retain(|key, _| !key.is_positional());
        } else {
            self.measured.clear();
        }
        self.rebuild_keys();
        self.rebuild_heights();
        if self.tracker.is_some() {
            self.publish_vscroll_update(true);
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Resolved identity of the item at `index`.
    pub fn key_at(&self, index: usize) -> Option<&SlotKey<K>> {
        self.keys.get(index)
    }

    pub fn index_of_key(&self, key: &SlotKey<K>) -> Option<usize> {
        self.key_index.get(key).copied()
    }

    pub fn diagnostics(&self) -> Diagnostics {
        self.diagnostics
    }

    pub fn height_table(&self) -> &HeightTable {
        &self.table
    }

    pub fn pool(&self) -> &ViewPool<K> {
        &self.pool
    }

    pub fn slots(&self) -> &[Slot<K>] {
        self.pool.slots()
    }

    pub fn scroll_source(&self) -> &ScrollSource {
        &self.source
    }

    pub fn tracker(&self) -> Option<&DynamicHeightTracker<K>> {
        self.tracker.as_ref()
    }

    /// Window of the last successful recompute.
    pub fn window(&self) -> Window {
        self.window
    }

    /// Scrollable height as of the last successful recompute.
    pub fn total_height(&self) -> u64 {
        self.total_height
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Marks the scroller as mounted in a host that can (or cannot) observe visibility.
    pub fn mount(&mut self, capabilities: HostCapabilities) {
        self.ready = true;
        self.observe_visibility = capabilities.observe_visibility;
        if !capabilities.observe_visibility {
            vwarn!("host cannot observe visibility; lazy activation is disabled");
        }
    }

    /// Drops every slot and tracker. The item sequence and measurements are kept.
    pub fn unmount(&mut self) {
        self.ready = false;
        self.pool.clear();
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.clear();
        }
        self.resize.reset();
        self.window = Window::EMPTY;
    }

    pub fn set_element_scroll(&mut self, scroll_top: u64, client_height: u32) {
        self.source.set_element_scroll(scroll_top, client_height);
    }

    pub fn set_page_geometry(&mut self, page: PageGeometry) {
        self.source.set_page_geometry(page);
    }

    pub fn set_page_mode(&mut self, page_mode: bool) {
        self.options.page_mode = page_mode;
        self.source.set_mode(scroll_mode(page_mode));
    }

    /// Feeds a container size observation. Returns `true` when a recompute is needed.
    ///
    /// With measurement enabled a resize also drops every measured height and rebuilds the
    /// table from declared heights, since the content may have reflowed: until the rendered
    /// items are measured again, the layout falls back to declared (or minimum) heights.
    /// Fixed and declared-height tables are not touched.
    pub fn handle_resize(&mut self, size: Rect) -> bool {
        if !self.resize.observe(size) {
            return false;
        }
        vtrace!(width = size.width, height = size.height, "VirtualScroller::handle_resize");
        self.emit(ScrollerEvent::Resize);
        if self.tracker.is_some() {
            self.force_remeasure();
        }
        self.ready
    }

    /// Feeds a visibility observation. Returns `true` when a recompute should be scheduled.
    pub fn handle_visibility_change(&mut self, is_visible: bool, bounds: Rect) -> bool {
        if !self.ready || !self.observe_visibility {
            return false;
        }
        if is_visible || !bounds.is_empty() {
            self.emit(ScrollerEvent::Visible);
            if self.tracker.is_some() {
                self.publish_vscroll_update(false);
            }
            true
        } else {
            self.emit(ScrollerEvent::Hidden);
            false
        }
    }

    /// Offset of item `index`; also recorded as the new scroll position.
    pub fn scroll_to_item(&mut self, index: usize) -> u64 {
        let offset = self.table.offset_of(index.min(self.table.len()));
        self.scroll_to_position(offset);
        offset
    }

    pub fn scroll_to_position(&mut self, offset: u64) {
        self.source.scroll_to_position(offset);
    }

    /// Recomputes the window and reconciles the slot pool against it.
    ///
    /// On error nothing changes: no slot is touched and the previous window stays current.
    pub fn update_visible_items(&mut self) -> Result<UpdateOutcome, Error> {
        let range = self.source.current_range().expand(self.options.buffer);
        let layout = self.calculator.compute(range, &self.table)?;
        let source = ItemsView {
            items: &self.items,
            keys: &self.keys,
            key_index: &self.key_index,
            table: &self.table,
            type_of: &*self.options.type_of,
        };
        let stats = self.pool.reconcile(layout.window, &source)?;
        self.window = layout.window;
        self.total_height = layout.total_height;
        self.sync_trackers();

        if self.options.emit_update {
            self.emit(ScrollerEvent::Update {
                start: layout.window.start,
                end: layout.window.end,
            });
        }
        Ok(UpdateOutcome {
            window: layout.window,
            total_height: layout.total_height,
            stats,
        })
    }

    /// Calls `f` for every slot that currently shows an item, parked slots included
    /// (reported with `active == false`).
    pub fn for_each_view(&self, mut f: impl FnMut(SlotView<'_, T, K>)) {
        for slot in self.pool.slots() {
            let index = slot.index();
            let Some(item) = self.items.get(index) else {
                continue;
            };
            if self.keys[index] != *slot.key() {
                continue;
            }
            f(SlotView {
                slot,
                item,
                index,
                active: slot.is_used(),
            });
        }
    }

    /// Runs the render callback `(item, index, active)` over [`Self::for_each_view`].
    pub fn render<R>(&self, mut render: impl FnMut(&T, usize, bool) -> R) -> Vec<(SlotId, R)> {
        let mut out = Vec::with_capacity(self.pool.len());
        self.for_each_view(|view| {
            out.push((view.slot.id(), render(view.item, view.index, view.active)));
        });
        out
    }

    pub fn measured_height(&self, key: &SlotKey<K>) -> Option<u32> {
        self.measured.get(key).copied()
    }

    /// Sets the height of the item at `index` and records it against the item's key.
    ///
    /// Returns the applied delta (`0` when unchanged, out of range, or in fixed mode). A zero
    /// height is ignored: rebuilds never keep one, so it would not survive the next rebuild.
    pub fn set_item_height(&mut self, index: usize, height: u32) -> i64 {
        if height == 0 {
            vwarn!(index, "ignoring zero item height");
            return 0;
        }
        let Some(key) = self.keys.get(index).cloned() else {
            return 0;
        };
        self.measured.insert(key, height);
        self.table.patch(index, height)
    }

    /// Records a measured height for `key` and patches its table entry.
    ///
    /// Returns `true` when the table changed. Repeating a measurement is a no-op; keys not in
    /// the current sequence and zero heights are ignored.
    pub fn measure_keyed(&mut self, key: SlotKey<K>, height: u32) -> bool {
        let Some(index) = self.key_index.get(&key).copied() else {
            return false;
        };
        if height == 0 {
            return false;
        }
        self.measured.insert(key, height);
        self.table.patch(index, height) != 0
    }

    /// Drops every measured height and rebuilds the table from declared heights.
    pub fn reset_measurements(&mut self) {
        self.measured.clear();
        self.rebuild_heights();
    }

    /// Drops measured heights and asks every rendered item to measure itself again.
    pub fn force_remeasure(&mut self) {
        self.reset_measurements();
        self.publish_vscroll_update(true);
    }

    /// Broadcasts `vscroll:update` to every tracked slot.
    pub fn publish_vscroll_update(&mut self, force: bool) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        let measured = &self.measured;
        tracker.publish(force, |key| measured.get(key).copied());
        self.emit(ScrollerEvent::VScrollUpdate { force });
    }

    /// Reports a content change in `slot` that may affect its height.
    pub fn notify_data_changed(&mut self, slot: SlotId) {
        if let Some(tracker) = self.tracker.as_mut() {
            tracker.notify_data_changed(slot);
        }
    }

    /// Activates or deactivates measurement (e.g. while the scroller is cached off-screen).
    pub fn set_active(&mut self, active: bool) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        if tracker.is_context_active() == active {
            return;
        }
        tracker.set_context_active(active);
        if active {
            self.publish_vscroll_update(false);
        }
    }

    /// Runs one layout pass: every pending slot is measured through `measure`, and changed
    /// heights are committed to the table.
    ///
    /// Returns the number of changes that moved the layout; a non-zero result means the
    /// window must be recomputed. A first measurement equal to the height already in the
    /// table is recorded but not counted.
    pub fn flush_measurements(
        &mut self,
        mut measure: impl FnMut(SlotId, &SlotKey<K>) -> Option<u32>,
    ) -> usize {
        let Some(tracker) = self.tracker.as_mut() else {
            return 0;
        };
        let batch = tracker.begin_layout_pass();
        let mut changes = Vec::new();
        for (slot, key) in batch {
            let height = measure(slot, &key);
            let recorded = self.measured.get(&key).copied();
            if let Some(change) = tracker.complete_measurement(slot, &key, height, recorded) {
                changes.push(change);
            }
        }

        let mut committed = 0;
        for change in changes {
            if self.apply_height_change(change) {
                committed += 1;
            }
        }
        if committed > 0 {
            vtrace!(committed, "VirtualScroller::flush_measurements");
        }
        committed
    }

    fn apply_height_change(&mut self, change: HeightChange<K>) -> bool {
        let HeightChange { key, height, .. } = change;
        let moved = self.measure_keyed(key.clone(), height);
        if moved && self.options.emit_item_resize {
            self.emit(ScrollerEvent::ItemResize { key });
        }
        moved
    }

    fn sync_trackers(&mut self) {
        let Some(tracker) = self.tracker.as_mut() else {
            return;
        };
        for slot in self.pool.slots() {
            let recorded = self.measured.get(slot.key()).copied();
            tracker.sync_slot(slot.id(), slot.key(), slot.is_used(), recorded);
        }
    }

    fn emit(&self, event: ScrollerEvent<K>) {
        if let Some(cb) = &self.options.on_event {
            cb(&event);
        }
    }

    fn rebuild_keys(&mut self) {
        self.keys.clear();
        self.key_index.clear();
        self.keys.reserve(self.items.len());
        let mut diagnostics = Diagnostics::default();

        for (index, item) in self.items.iter().enumerate() {
            let key = match (self.options.key_of)(item) {
                Some(k) => {
                    let key = SlotKey::Key(k);
                    if self.key_index.contains_key(&key) {
                        vwarn!(index, "duplicate item key; falling back to positional identity");
                        diagnostics.duplicate_keys += 1;
                        SlotKey::Position(index)
                    } else {
                        key
                    }
                }
                None => {
                    vwarn!(index, "item has no key; falling back to positional identity");
                    diagnostics.missing_keys += 1;
                    SlotKey::Position(index)
                }
            };
            self.key_index.insert(key.clone(), index);
            self.keys.push(key);
        }
        self.diagnostics = diagnostics;

        let key_index = &self.key_index;
        self.measured.retain(|key, _| key_index.contains_key(key));
    }

    fn rebuild_heights(&mut self) {
        let measured = &self.measured;
        let height_of = &self.options.height_of;
        let heights = self
            .items
            .iter()
            .zip(&self.keys)
            .map(|(item, key)| measured.get(key).copied().or_else(|| height_of(item)));
        self.table.rebuild(heights, self.options.min_item_height);
    }
}

fn table_for<T, K>(options: &ScrollerOptions<T, K>) -> Result<HeightTable, Error> {
    match options.item_height {
        Some(h) if !options.measure_heights => HeightTable::fixed(0, h),
        Some(_) => {
            vwarn!("measure_heights is set; ignoring the fixed item_height");
            Ok(HeightTable::variable())
        }
        None => Ok(HeightTable::variable()),
    }
}

fn scroll_mode(page_mode: bool) -> ScrollMode {
    if page_mode {
        ScrollMode::Page
    } else {
        ScrollMode::Element
    }
}

struct ItemsView<'a, T, K> {
    items: &'a [T],
    keys: &'a [SlotKey<K>],
    key_index: &'a KeyMap<SlotKey<K>, usize>,
    table: &'a HeightTable,
    type_of: &'a (dyn Fn(&T) -> ItemType + Send + Sync),
}

impl<T, K: ScrollKey + Clone> PoolSource<K> for ItemsView<'_, T, K> {
    fn slot_key(&self, index: usize) -> SlotKey<K> {
        self.keys[index].clone()
    }

    fn item_type(&self, index: usize) -> ItemType {
        (self.type_of)(&self.items[index])
    }

    fn top(&self, index: usize) -> u64 {
        self.table.offset_of(index)
    }

    fn is_renderable(&self, index: usize) -> bool {
        self.table.is_fixed() || self.table.height(index).is_some_and(|h| h > 0)
    }

    fn index_of(&self, key: &SlotKey<K>) -> Option<usize> {
        self.key_index.get(key).copied()
    }
}
