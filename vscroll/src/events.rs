use crate::SlotKey;

/// Notifications emitted by [`crate::VirtualScroller`] through `ScrollerOptions::on_event`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollerEvent<K> {
    /// The container size changed.
    Resize,
    /// The scroller entered the page viewport.
    Visible,
    /// The scroller left the page viewport.
    Hidden,
    /// The window changed (only with `emit_update`).
    Update { start: usize, end: usize },
    /// Measured-height consumers should re-check their items.
    VScrollUpdate { force: bool },
    /// A measured item height changed (only with `emit_item_resize`).
    ItemResize { key: SlotKey<K> },
}
