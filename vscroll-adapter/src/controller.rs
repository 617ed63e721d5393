use alloc::vec::Vec;

use vscroll::{
    Error, HostCapabilities, ItemKey, PageGeometry, Rect, ScrollKey, ScrollerOptions, SlotId,
    SlotKey, UpdateOutcome, VirtualScroller,
};

use crate::FrameScheduler;

/// A framework-neutral controller that wraps a [`VirtualScroller`] and schedules its work
/// on display frames.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_page_scroll` / `on_resize` / `on_visibility_change` when UI events occur
/// - `tick(now_ms, measure)` once per display frame, after layout
///
/// Within a tick the order is fixed: the fallback timer is polled, pending slots are
/// measured and their heights committed, then the window is recomputed at most once.
#[derive(Clone, Debug)]
pub struct Controller<T, K = ItemKey> {
    scroller: VirtualScroller<T, K>,
    frames: FrameScheduler,
}

impl<T, K: ScrollKey + Clone> Controller<T, K> {
    pub fn new(options: ScrollerOptions<T, K>) -> Result<Self, Error> {
        Ok(Self::from_scroller(VirtualScroller::new(options)?))
    }

    pub fn from_scroller(scroller: VirtualScroller<T, K>) -> Self {
        Self {
            scroller,
            frames: FrameScheduler::default(),
        }
    }

    pub fn with_refresh_delay_ms(mut self, refresh_delay_ms: u64) -> Self {
        self.frames.set_refresh_delay_ms(refresh_delay_ms);
        self
    }

    pub fn scroller(&self) -> &VirtualScroller<T, K> {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut VirtualScroller<T, K> {
        &mut self.scroller
    }

    pub fn into_scroller(self) -> VirtualScroller<T, K> {
        self.scroller
    }

    pub fn frames(&self) -> &FrameScheduler {
        &self.frames
    }

    pub fn is_torn_down(&self) -> bool {
        self.frames.is_torn_down()
    }

    /// Call this once the host has mounted the scroller. Schedules the first recompute.
    pub fn mount(&mut self, capabilities: HostCapabilities) {
        if self.is_torn_down() {
            return;
        }
        self.scroller.mount(capabilities);
        self.frames.request_refresh();
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        if self.is_torn_down() {
            return;
        }
        self.scroller.set_items(items);
        self.frames.request_refresh();
    }

    /// Call this when the element scroll offset (or its visible height) changes.
    pub fn on_scroll(&mut self, scroll_top: u64, client_height: u32) {
        if self.is_torn_down() {
            return;
        }
        self.scroller.set_element_scroll(scroll_top, client_height);
        self.frames.request_scroll();
    }

    /// Page-mode counterpart of [`Self::on_scroll`].
    pub fn on_page_scroll(&mut self, page: PageGeometry) {
        if self.is_torn_down() {
            return;
        }
        self.scroller.set_page_geometry(page);
        self.frames.request_scroll();
    }

    pub fn on_resize(&mut self, size: Rect) {
        if self.is_torn_down() {
            return;
        }
        if self.scroller.handle_resize(size) {
            self.frames.request_refresh();
        }
    }

    pub fn on_visibility_change(&mut self, is_visible: bool, bounds: Rect) {
        if self.is_torn_down() {
            return;
        }
        if self.scroller.handle_visibility_change(is_visible, bounds) {
            self.frames.request_refresh();
        }
    }

    /// Activates or deactivates the scroller while it is kept alive off-screen.
    pub fn set_active(&mut self, active: bool) {
        if self.is_torn_down() {
            return;
        }
        self.scroller.set_active(active);
        if active {
            self.frames.request_refresh();
        }
    }

    pub fn notify_data_changed(&mut self, slot: SlotId) {
        if !self.is_torn_down() {
            self.scroller.notify_data_changed(slot);
        }
    }

    /// Computes the offset of `index`, records it and schedules the matching recompute.
    ///
    /// Returns the offset; the host applies it to its scroll container.
    pub fn scroll_to_item(&mut self, index: usize) -> u64 {
        let offset = self.scroller.scroll_to_item(index);
        self.frames.request_scroll();
        offset
    }

    pub fn scroll_to_position(&mut self, offset: u64) {
        self.scroller.scroll_to_position(offset);
        self.frames.request_scroll();
    }

    /// Advances the controller by one frame.
    ///
    /// `measure` reads the rendered height of a slot (`None` when it cannot be read yet); it
    /// is only called in measured-height mode. Returns the recompute outcome when a
    /// recompute ran this frame.
    ///
    /// A failed recompute consumes the frame and leaves the previous window in place.
    pub fn tick(
        &mut self,
        now_ms: u64,
        measure: impl FnMut(SlotId, &SlotKey<K>) -> Option<u32>,
    ) -> Result<Option<UpdateOutcome>, Error> {
        if self.is_torn_down() {
            return Ok(None);
        }

        self.frames.poll_timer(now_ms);

        let committed = self.scroller.flush_measurements(measure);
        if committed > 0 {
            self.frames.request_refresh();
        }

        let Some(cause) = self.frames.take_frame() else {
            return Ok(None);
        };
        let outcome = self.scroller.update_visible_items().inspect_err(|_err| {
            vwarn!(now_ms, error = %_err, "Controller::tick recompute failed");
        })?;
        self.frames.finish_frame(cause, outcome.continuous(), now_ms);
        vtrace!(
            now_ms,
            cause = ?cause,
            start = outcome.window.start,
            end = outcome.window.end,
            "Controller::tick"
        );
        Ok(Some(outcome))
    }

    /// Cancels every scheduled recompute, the fallback timer and all pending measurements,
    /// and drops the slots. Later events and ticks are ignored.
    pub fn teardown(&mut self) {
        self.frames.cancel_all();
        self.scroller.unmount();
    }
}
