use alloc::vec::Vec;

use crate::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Fixed { item_height: u32, count: usize },
    Variable,
}

/// Per-item heights plus a monotonic cumulative-offset index.
///
/// In variable mode `cumulative[i] = cumulative[i - 1] + height[i]`, so `cumulative[i]` is the
/// end offset of item `i`. Fixed mode stores nothing per item and answers every query with
/// arithmetic; the contract is the same.
#[derive(Clone, Debug)]
pub struct HeightTable {
    mode: Mode,
    heights: Vec<u32>,
    cumulative: Vec<u64>,
}

impl HeightTable {
    /// A fixed-height table of `count` items.
    pub fn fixed(count: usize, item_height: u32) -> Result<Self, Error> {
        if item_height == 0 {
            return Err(Error::ZeroItemHeight);
        }
        Ok(Self {
            mode: Mode::Fixed { item_height, count },
            heights: Vec::new(),
            cumulative: Vec::new(),
        })
    }

    /// An empty variable-height table.
    pub fn variable() -> Self {
        Self {
            mode: Mode::Variable,
            heights: Vec::new(),
            cumulative: Vec::new(),
        }
    }

    /// Builds a variable-height table in one pass. See [`Self::rebuild`].
    pub fn from_heights(
        heights: impl IntoIterator<Item = Option<u32>>,
        min_item_height: u32,
    ) -> Self {
        let mut table = Self::variable();
        table.rebuild(heights, min_item_height);
        table
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.mode, Mode::Fixed { .. })
    }

    /// The declared height in fixed mode.
    pub fn item_height(&self) -> Option<u32> {
        match self.mode {
            Mode::Fixed { item_height, .. } => Some(item_height),
            Mode::Variable => None,
        }
    }

    /// Recomputes the whole table.
    ///
    /// Each entry is the item's declared height; `None` and `0` fall back to
    /// `min_item_height`. In fixed mode only the number of entries matters.
    pub fn rebuild(
        &mut self,
        heights: impl IntoIterator<Item = Option<u32>>,
        min_item_height: u32,
    ) {
        let heights = heights.into_iter();
        match &mut self.mode {
            Mode::Fixed { count, .. } => {
                *count = heights.count();
            }
            Mode::Variable => {
                self.heights.clear();
                self.cumulative.clear();
                let (lower, _) = heights.size_hint();
                self.heights.reserve(lower);
                self.cumulative.reserve(lower);

                let mut acc = 0u64;
                for h in heights {
                    let h = match h {
                        Some(h) if h > 0 => h,
                        _ => min_item_height,
                    };
                    acc = acc.saturating_add(h as u64);
                    self.heights.push(h);
                    self.cumulative.push(acc);
                }
            }
        }
        vtrace!(len = self.len(), total = self.total(), "HeightTable::rebuild");
    }

    /// Sets the height of one item and shifts every later cumulative offset by the delta.
    ///
    /// Returns the applied delta; `0` when the height is unchanged, the index is out of range,
    /// or the table is in fixed mode.
    pub fn patch(&mut self, index: usize, new_height: u32) -> i64 {
        if self.is_fixed() {
            vwarn!(index, new_height, "HeightTable::patch ignored in fixed-height mode");
            return 0;
        }
        let Some(cur) = self.heights.get(index).copied() else {
            return 0;
        };
        if cur == new_height {
            return 0;
        }
        self.heights[index] = new_height;
        let delta = new_height as i64 - cur as i64;
        for c in &mut self.cumulative[index..] {
            *c = if delta > 0 {
                c.saturating_add(delta as u64)
            } else {
                c.saturating_sub((-delta) as u64)
            };
        }
        vtrace!(index, new_height, delta, "HeightTable::patch");
        delta
    }

    /// Returns the lowest index whose cumulative offset exceeds `offset`, i.e. the item that
    /// covers `offset`. Returns `len()` when `offset` is at or past the end.
    pub fn locate(&self, offset: u64) -> usize {
        match self.mode {
            Mode::Fixed { item_height, count } => {
                let index = offset / item_height as u64;
                usize::try_from(index).unwrap_or(usize::MAX).min(count)
            }
            Mode::Variable => self.cumulative.partition_point(|&c| c <= offset),
        }
    }

    pub fn len(&self) -> usize {
        match self.mode {
            Mode::Fixed { count, .. } => count,
            Mode::Variable => self.heights.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self, index: usize) -> Option<u32> {
        match self.mode {
            Mode::Fixed { item_height, count } => (index < count).then_some(item_height),
            Mode::Variable => self.heights.get(index).copied(),
        }
    }

    /// Cumulative offset of `index` (the end of item `index`).
    pub fn cumulative(&self, index: usize) -> Option<u64> {
        match self.mode {
            Mode::Fixed { item_height, count } => {
                (index < count).then(|| (index as u64 + 1) * item_height as u64)
            }
            Mode::Variable => self.cumulative.get(index).copied(),
        }
    }

    /// Start offset of item `index`. Indices past the end map to `total()`.
    pub fn offset_of(&self, index: usize) -> u64 {
        match self.mode {
            Mode::Fixed { item_height, count } => index.min(count) as u64 * item_height as u64,
            Mode::Variable => {
                if index == 0 {
                    0
                } else {
                    self.cumulative
                        .get(index - 1)
                        .copied()
                        .unwrap_or_else(|| self.total())
                }
            }
        }
    }

    pub fn end_of(&self, index: usize) -> u64 {
        self.cumulative(index).unwrap_or_else(|| self.total())
    }

    /// Full scrollable height.
    pub fn total(&self) -> u64 {
        match self.mode {
            Mode::Fixed { item_height, count } => count as u64 * item_height as u64,
            Mode::Variable => self.cumulative.last().copied().unwrap_or(0),
        }
    }
}
