use alloc::sync::Arc;

use crate::window::DEFAULT_ITEMS_LIMIT;
use crate::{DEFAULT_ITEM_TYPE, ItemKey, ItemType, ScrollerEvent};

/// Default buffer, in pixels, added above and below the viewport.
pub const DEFAULT_BUFFER: u32 = 200;

/// Reads an item's stable key. `None` makes the engine fall back to positional identity.
pub type KeySelector<T, K> = Arc<dyn Fn(&T) -> Option<K> + Send + Sync>;

/// Reads an item's type; slots are only recycled between items of the same type.
pub type TypeSelector<T> = Arc<dyn Fn(&T) -> ItemType + Send + Sync>;

/// Reads an item's declared height, if known up front.
pub type HeightSelector<T> = Arc<dyn Fn(&T) -> Option<u32> + Send + Sync>;

/// A callback receiving every notification the scroller emits.
pub type OnEventCallback<K> = Arc<dyn Fn(&ScrollerEvent<K>) + Send + Sync>;

/// Configuration for [`crate::VirtualScroller`].
///
/// Cheap to clone: selectors and callbacks live behind `Arc`s.
pub struct ScrollerOptions<T, K = ItemKey> {
    pub key_of: KeySelector<T, K>,
    pub type_of: TypeSelector<T>,
    pub height_of: HeightSelector<T>,

    /// `Some(h)` renders every item `h` pixels tall and skips the height table entirely.
    /// `None` enables variable-height mode.
    pub item_height: Option<u32>,

    /// Height used for items with no declared or measured height.
    pub min_item_height: u32,

    /// Pixels added on both sides of the viewport before computing the window.
    pub buffer: u32,

    /// Hard cap on simultaneously live slots. Exceeding it is an error, not a truncation.
    pub items_limit: usize,

    /// Follow whole-document scrolling instead of the scroller's own element.
    pub page_mode: bool,

    /// Emit [`ScrollerEvent::Update`] after every recompute.
    pub emit_update: bool,

    /// Measure rendered slots and feed their real heights back into the height table.
    ///
    /// Implies variable-height mode.
    pub measure_heights: bool,

    /// Keep recorded heights of keyed items that are still present when the item sequence
    /// is replaced. By default a replacement clears them (and, in measured mode, everything
    /// in view is re-measured). Heights of departed keys and of positional items are always
    /// dropped.
    pub retain_measurements: bool,

    /// Emit [`ScrollerEvent::ItemResize`] when a measured height changes.
    pub emit_item_resize: bool,

    pub on_event: Option<OnEventCallback<K>>,
}

impl<T, K> Clone for ScrollerOptions<T, K> {
    fn clone(&self) -> Self {
        Self {
            key_of: Arc::clone(&self.key_of),
            type_of: Arc::clone(&self.type_of),
            height_of: Arc::clone(&self.height_of),
            item_height: self.item_height,
            min_item_height: self.min_item_height,
            buffer: self.buffer,
            items_limit: self.items_limit,
            page_mode: self.page_mode,
            emit_update: self.emit_update,
            measure_heights: self.measure_heights,
            retain_measurements: self.retain_measurements,
            emit_item_resize: self.emit_item_resize,
            on_event: self.on_event.clone(),
        }
    }
}

impl<T, K> ScrollerOptions<T, K> {
    /// Options for a variable-height list keyed by `key_of`.
    ///
    /// Heights default to `min_item_height` until declared (see [`Self::with_height_of`]) or
    /// measured.
    pub fn new(
        min_item_height: u32,
        key_of: impl Fn(&T) -> Option<K> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key_of: Arc::new(key_of),
            type_of: Arc::new(|_: &T| DEFAULT_ITEM_TYPE),
            height_of: Arc::new(|_: &T| None),
            item_height: None,
            min_item_height,
            buffer: DEFAULT_BUFFER,
            items_limit: DEFAULT_ITEMS_LIMIT,
            page_mode: false,
            emit_update: false,
            measure_heights: false,
            retain_measurements: false,
            emit_item_resize: false,
            on_event: None,
        }
    }

    /// Options for a list where every item is `item_height` pixels tall.
    pub fn fixed(
        item_height: u32,
        key_of: impl Fn(&T) -> Option<K> + Send + Sync + 'static,
    ) -> Self {
        Self::new(0, key_of).with_item_height(Some(item_height))
    }

    /// Options for a list whose heights are measured after rendering.
    pub fn dynamic(
        min_item_height: u32,
        key_of: impl Fn(&T) -> Option<K> + Send + Sync + 'static,
    ) -> Self {
        Self::new(min_item_height, key_of).with_measure_heights(true)
    }

    pub fn with_key_of(mut self, key_of: impl Fn(&T) -> Option<K> + Send + Sync + 'static) -> Self {
        self.key_of = Arc::new(key_of);
        self
    }

    pub fn with_type_of(mut self, type_of: impl Fn(&T) -> ItemType + Send + Sync + 'static) -> Self {
        self.type_of = Arc::new(type_of);
        self
    }

    pub fn with_height_of(
        mut self,
        height_of: impl Fn(&T) -> Option<u32> + Send + Sync + 'static,
    ) -> Self {
        self.height_of = Arc::new(height_of);
        self
    }

    pub fn with_item_height(mut self, item_height: Option<u32>) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_min_item_height(mut self, min_item_height: u32) -> Self {
        self.min_item_height = min_item_height;
        self
    }

    pub fn with_buffer(mut self, buffer: u32) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_items_limit(mut self, items_limit: usize) -> Self {
        self.items_limit = items_limit;
        self
    }

    pub fn with_page_mode(mut self, page_mode: bool) -> Self {
        self.page_mode = page_mode;
        self
    }

    pub fn with_emit_update(mut self, emit_update: bool) -> Self {
        self.emit_update = emit_update;
        self
    }

    pub fn with_measure_heights(mut self, measure_heights: bool) -> Self {
        self.measure_heights = measure_heights;
        self
    }

    pub fn with_retain_measurements(mut self, retain_measurements: bool) -> Self {
        self.retain_measurements = retain_measurements;
        self
    }

    pub fn with_emit_item_resize(mut self, emit_item_resize: bool) -> Self {
        self.emit_item_resize = emit_item_resize;
        self
    }

    pub fn with_on_event(
        mut self,
        on_event: Option<impl Fn(&ScrollerEvent<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_event = on_event.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T, K> core::fmt::Debug for ScrollerOptions<T, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollerOptions")
            .field("item_height", &self.item_height)
            .field("min_item_height", &self.min_item_height)
            .field("buffer", &self.buffer)
            .field("items_limit", &self.items_limit)
            .field("page_mode", &self.page_mode)
            .field("emit_update", &self.emit_update)
            .field("measure_heights", &self.measure_heights)
            .field("retain_measurements", &self.retain_measurements)
            .field("emit_item_resize", &self.emit_item_resize)
            .finish_non_exhaustive()
    }
}
