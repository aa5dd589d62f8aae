//! Metrics and spacing shared by the layout modules.

use serde::Serialize;

use crate::primitives::{Point, Size};

/// Advance of one monospace column at [`BASE_FONT_SIZE`].
pub const CHAR_WIDTH: f32 = 8.4;
/// Height of one text line at [`BASE_FONT_SIZE`].
pub const LINE_HEIGHT: f32 = 18.0;
pub const BASE_FONT_SIZE: f32 = 14.0;

/// Vertical gap between document blocks.
pub const BLOCK_SPACING: f32 = 12.0;

/// Space between a box's edge and its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const ZERO: Self = Self::all(0.0);

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// `horizontal` on the left and right, `vertical` on the top and bottom.
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Size of a box holding `content` inside this padding.
    pub fn outer_size(&self, content: Size) -> Size {
        Size::new(content.width + self.horizontal(), content.height + self.vertical())
    }

    /// Where content starts inside a box whose corner is `origin`.
    pub fn content_origin(&self, origin: Point) -> Point {
        Point::new(origin.x + self.left, origin.y + self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_box() {
        let padding = Padding::symmetric(13.0, 6.0);
        assert_eq!(padding.outer_size(Size::new(10.0, 18.0)), Size::new(36.0, 30.0));
        assert_eq!(padding.content_origin(Point::new(1.0, 1.0)), Point::new(14.0, 7.0));
        assert_eq!(Padding::ZERO.outer_size(Size::new(3.0, 4.0)), Size::new(3.0, 4.0));
    }
}
