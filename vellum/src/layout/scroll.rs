//! Horizontal scroll viewport for content wider than the available space.

use serde::Serialize;

/// Scroll state of one horizontally scrolling container.
///
/// `offset` is how far the content is shifted left; it stays within
/// `0..=max` once [`HorizontalScroll::clamp`] or [`HorizontalScroll::scroll_by`]
/// has run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct HorizontalScroll {
    /// Current scroll offset (0 = leading edge visible).
    pub offset: f32,
    /// Maximum scroll offset (content width minus viewport width).
    pub max: f32,
}

impl HorizontalScroll {
    /// Scroll state for `content_width` shown through `viewport_width`.
    pub fn new(offset: f32, content_width: f32, viewport_width: f32) -> Self {
        let mut scroll = Self {
            offset,
            max: (content_width - viewport_width).max(0.0),
        };
        scroll.clamp();
        scroll
    }

    /// Scroll by a delta (positive = reveal content further right).
    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = (self.offset + delta).clamp(0.0, self.max);
    }

    /// Pull the offset back into range after the content size changed.
    pub fn clamp(&mut self) {
        if !self.offset.is_finite() {
            self.offset = 0.0;
        }
        self.offset = self.offset.clamp(0.0, self.max);
    }

    /// Whether the content overflows the viewport.
    pub fn is_scrollable(&self) -> bool {
        self.max > 0.0
    }
}
