use crate::ViewportRange;

/// Where scroll input comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollMode {
    /// The scroller's own scrollable element.
    #[default]
    Element,
    /// The whole document scrolls and the list is one block inside it.
    Page,
}

/// Where the host should attach its scroll/resize listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListenerTarget {
    Element,
    Document,
}

/// Container position relative to the page viewport (page mode input).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageGeometry {
    /// Container top relative to the page viewport; negative once scrolled past.
    pub rect_top: i64,
    pub rect_height: u64,
    pub window_height: u32,
}

/// Normalizes element and page scrolling into a `[top, bottom)` range in list coordinates.
///
/// The host pushes raw geometry in; nothing here touches a UI object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollSource {
    mode: ScrollMode,
    scroll_top: u64,
    client_height: u32,
    page: PageGeometry,
}

impl ScrollSource {
    pub fn new(mode: ScrollMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ScrollMode) {
        self.mode = mode;
    }

    pub fn listener_target(&self) -> ListenerTarget {
        match self.mode {
            ScrollMode::Element => ListenerTarget::Element,
            ScrollMode::Page => ListenerTarget::Document,
        }
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn client_height(&self) -> u32 {
        self.client_height
    }

    pub fn page_geometry(&self) -> PageGeometry {
        self.page
    }

    /// Records the element's scroll offset and visible height.
    pub fn set_element_scroll(&mut self, scroll_top: u64, client_height: u32) {
        self.scroll_top = scroll_top;
        self.client_height = client_height;
    }

    pub fn set_page_geometry(&mut self, page: PageGeometry) {
        self.page = page;
    }

    /// Records a programmatic scroll; the host applies the same offset to its element.
    pub fn scroll_to_position(&mut self, offset: u64) {
        self.scroll_top = offset;
    }

    pub fn current_range(&self) -> ViewportRange {
        match self.mode {
            ScrollMode::Element => ViewportRange::new(
                self.scroll_top,
                self.scroll_top.saturating_add(self.client_height as u64),
            ),
            ScrollMode::Page => page_range(self.page),
        }
    }
}

/// The part of the container that intersects the page viewport, clamped to
/// `[0, rect_height]`.
fn page_range(page: PageGeometry) -> ViewportRange {
    let height = page.rect_height as i128;
    let mut top = -(page.rect_top as i128);
    let mut visible = page.window_height as i128;
    if top < 0 {
        visible += top;
        top = 0;
    }
    if top + visible > height {
        visible = height - top;
    }
    let top = top.clamp(0, height);
    let bottom = (top + visible.max(0)).clamp(top, height);
    ViewportRange::new(top as u64, bottom as u64)
}
