use crate::Rect;

/// Detects container size changes.
///
/// The first observation only records a baseline; every later observation that differs
/// fires. Firing invalidates the current window, never the height table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResizeSignal {
    last: Option<Rect>,
}

impl ResizeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `size` differs from the previous observation.
    pub fn observe(&mut self, size: Rect) -> bool {
        match self.last.replace(size) {
            None => false,
            Some(prev) => prev != size,
        }
    }

    pub fn last(&self) -> Option<Rect> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
