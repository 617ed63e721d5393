/// Delay before a scroll-triggered recompute that jumped is retried.
pub const DEFAULT_REFRESH_DELAY_MS: u64 = 100;

/// Why a frame recompute was scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrameCause {
    /// Scroll input (or the fallback retry, which replays one).
    Scroll,
    /// Resize, visibility, item replacement or a committed measurement.
    Refresh,
}

/// Coalesces recompute requests into at most one per display frame.
///
/// The host calls [`Self::take_frame`] once per frame. Scroll requests made between two
/// frames collapse into a single trailing recompute; a scroll recompute that turns out to be
/// a jump arms a fallback timer that replays the scroll `refresh_delay_ms` later, so a
/// window computed from a mid-flight offset gets corrected once scrolling settles.
///
/// After [`Self::cancel_all`] nothing is ever scheduled again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameScheduler {
    refresh_delay_ms: u64,
    requested: Option<FrameCause>,
    retry_at: Option<u64>,
    torn_down: bool,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_DELAY_MS)
    }
}

impl FrameScheduler {
    pub fn new(refresh_delay_ms: u64) -> Self {
        Self {
            refresh_delay_ms,
            requested: None,
            retry_at: None,
            torn_down: false,
        }
    }

    pub fn refresh_delay_ms(&self) -> u64 {
        self.refresh_delay_ms
    }

    pub fn set_refresh_delay_ms(&mut self, refresh_delay_ms: u64) {
        self.refresh_delay_ms = refresh_delay_ms;
    }

    /// Whether a recompute waits for the next frame.
    pub fn is_frame_requested(&self) -> bool {
        self.requested.is_some()
    }

    /// Deadline of the armed fallback timer.
    pub fn retry_deadline(&self) -> Option<u64> {
        self.retry_at
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Schedules a scroll recompute. Returns `false` when it was folded into an
    /// already-scheduled frame (or the scheduler is torn down).
    pub fn request_scroll(&mut self) -> bool {
        self.request(FrameCause::Scroll)
    }

    /// Schedules a non-scroll recompute. See [`Self::request_scroll`] for the return value.
    pub fn request_refresh(&mut self) -> bool {
        self.request(FrameCause::Refresh)
    }

    fn request(&mut self, cause: FrameCause) -> bool {
        if self.torn_down {
            return false;
        }
        match self.requested {
            None => {
                self.requested = Some(cause);
                true
            }
            // A frame carrying scroll input keeps its scroll semantics.
            Some(FrameCause::Refresh) if cause == FrameCause::Scroll => {
                self.requested = Some(cause);
                false
            }
            Some(_) => false,
        }
    }

    /// Fires the fallback timer if its deadline has passed. Returns `true` when it fired;
    /// a fired timer schedules a scroll recompute.
    pub fn poll_timer(&mut self, now_ms: u64) -> bool {
        match self.retry_at {
            Some(at) if !self.torn_down && now_ms >= at => {
                self.retry_at = None;
                vtrace!(now_ms, "FrameScheduler: fallback retry fired");
                self.request(FrameCause::Scroll);
                true
            }
            _ => false,
        }
    }

    /// Consumes the scheduled recompute for this frame, if any.
    pub fn take_frame(&mut self) -> Option<FrameCause> {
        if self.torn_down {
            return None;
        }
        self.requested.take()
    }

    /// Records the outcome of the recompute taken with [`Self::take_frame`].
    ///
    /// A non-continuous scroll recompute (re)arms the fallback timer.
    pub fn finish_frame(&mut self, cause: FrameCause, continuous: bool, now_ms: u64) {
        if self.torn_down || cause != FrameCause::Scroll || continuous {
            return;
        }
        self.retry_at = Some(now_ms.saturating_add(self.refresh_delay_ms));
    }

    /// Cancels the scheduled frame and the fallback timer, for good.
    pub fn cancel_all(&mut self) {
        self.requested = None;
        self.retry_at = None;
        self.torn_down = true;
    }
}
