/// Default stable key type for items.
pub type ItemKey = u64;

/// Groups items that can share a render slot. Slots are never rebound across types
/// without being counted as re-typed.
pub type ItemType = u64;

/// Item type used when the caller does not partition items.
pub const DEFAULT_ITEM_TYPE: ItemType = 0;

/// The half-open index range `[start, end)` that must be backed by live slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub start: usize,
    pub end: usize, // exclusive
}

impl Window {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Whether moving from `prev` to `self` can be reconciled incrementally.
    ///
    /// Touching windows count as continuous: `[0, 10)` followed by `[10, 20)` only parks and
    /// reacquires, which is what a jump would do anyway.
    pub fn continues_from(&self, prev: &Window) -> bool {
        self.start <= prev.end && self.end >= prev.start
    }
}

/// A viewport span in list coordinates: `[top, bottom)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportRange {
    pub top: u64,
    pub bottom: u64,
}

impl ViewportRange {
    pub fn new(top: u64, bottom: u64) -> Self {
        Self {
            top,
            bottom: bottom.max(top),
        }
    }

    pub fn height(&self) -> u64 {
        self.bottom.saturating_sub(self.top)
    }

    /// Grows the range by `buffer` pixels on both sides (the top saturates at zero).
    pub fn expand(self, buffer: u32) -> Self {
        let buffer = buffer as u64;
        Self {
            top: self.top.saturating_sub(buffer),
            bottom: self.bottom.saturating_add(buffer),
        }
    }
}

/// Output of the window computation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowLayout {
    pub window: Window,
    /// Full scrollable height; hosts size their scroll container with it.
    pub total_height: u64,
}

/// Container size as reported by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Pool-local slot identifier. Stable for the lifetime of the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotId(pub u32);

/// Resolved identity of an item.
///
/// Items without a usable key are identified by position, which still renders correctly
/// but may remount when the list is reordered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SlotKey<K> {
    Key(K),
    Position(usize),
}

impl<K> SlotKey<K> {
    pub fn key(&self) -> Option<&K> {
        match self {
            Self::Key(k) => Some(k),
            Self::Position(_) => None,
        }
    }

    pub fn is_positional(&self) -> bool {
        matches!(self, Self::Position(_))
    }
}

/// What the host runtime can observe. Used by [`crate::VirtualScroller::mount`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostCapabilities {
    /// Whether the host can report when the scroller enters or leaves the page viewport.
    pub observe_visibility: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            observe_visibility: true,
        }
    }
}

/// Key problems seen by the most recent item rebuild.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    pub missing_keys: usize,
    pub duplicate_keys: usize,
}
