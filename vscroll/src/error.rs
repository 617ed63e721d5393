use core::fmt;

/// Errors reported by window recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The window (or the slot pool backing it) would need more than `limit` live slots.
    ///
    /// This almost always means the scroll container has no bounded height, so the whole
    /// list would be rendered at once.
    ItemsLimitExceeded { requested: usize, limit: usize },
    /// Fixed-height mode was configured with an item height of zero.
    ZeroItemHeight,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ItemsLimitExceeded { requested, limit } => write!(
                f,
                "rendered items limit reached ({requested} > {limit}); make sure the scroll \
                 container has a bounded height and actually scrolls"
            ),
            Self::ZeroItemHeight => f.write_str("fixed item height must be greater than zero"),
        }
    }
}

impl core::error::Error for Error {}
