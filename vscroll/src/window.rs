use crate::{Error, HeightTable, ViewportRange, Window, WindowLayout};

/// Default cap on simultaneously live slots.
pub const DEFAULT_ITEMS_LIMIT: usize = 1000;

/// Maps a (buffered) viewport onto the index window that must be rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowCalculator {
    items_limit: usize,
}

impl Default for WindowCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_LIMIT)
    }
}

impl WindowCalculator {
    pub fn new(items_limit: usize) -> Self {
        Self { items_limit }
    }

    pub fn items_limit(&self) -> usize {
        self.items_limit
    }

    /// Computes the window for `range`, which must already include the buffer margin.
    ///
    /// The window holds exactly the items whose `[offset, offset + height)` span intersects
    /// `[range.top, range.bottom)`. Fails when that window is wider than `items_limit`.
    pub fn compute(&self, range: ViewportRange, table: &HeightTable) -> Result<WindowLayout, Error> {
        let n = table.len();
        if n == 0 {
            return Ok(WindowLayout::default());
        }

        if range.bottom <= range.top {
            let at = table.locate(range.top);
            return Ok(WindowLayout {
                window: Window::new(at, at),
                total_height: table.total(),
            });
        }

        let window = match table.item_height() {
            Some(h) => {
                let h = h as u64;
                let start = to_index(range.top / h).min(n);
                let end = to_index(range.bottom.div_ceil(h)).min(n);
                Window::new(start.min(end), end)
            }
            None => {
                let start = table.locate(range.top);
                let mut d = start;
                while d < n && table.end_of(d) < range.bottom {
                    d += 1;
                }
                let end = if start >= n { n } else { (d + 1).min(n) };
                Window::new(start, end)
            }
        };

        if window.len() > self.items_limit {
            vwarn!(
                start = window.start,
                end = window.end,
                limit = self.items_limit,
                "window wider than items_limit; is the scroll container bounded?"
            );
            return Err(Error::ItemsLimitExceeded {
                requested: window.len(),
                limit: self.items_limit,
            });
        }

        Ok(WindowLayout {
            window,
            total_height: table.total(),
        })
    }
}

fn to_index(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}
