//! Core primitive types for Vellum.
//!
//! These types are used throughout the library for geometry and color.
//! Coordinates are in points with y growing downward.

use std::ops::Sub;

use serde::Serialize;

use crate::error::StyleError;

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// A 2D size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A rectangle in layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// The empty rectangle: identity element of [`Rect::union`].
    pub const NULL: Self = Self {
        x: f32::INFINITY,
        y: f32::INFINITY,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Whether this is the null rectangle (an empty union).
    #[inline]
    pub fn is_null(&self) -> bool {
        self.x.is_infinite() || self.y.is_infinite()
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// Compute the smallest rectangle that contains both `self` and `other`.
    ///
    /// The null rectangle contributes nothing.
    #[inline]
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_null() {
            return *other;
        }
        if other.is_null() {
            return *self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.max_x().max(other.max_x());
        let bottom = self.max_y().max(other.max_y());
        Rect { x, y, width: right - x, height: bottom - y }
    }

    /// Shrink by `dx` on the left and right and `dy` on the top and bottom.
    ///
    /// Negative values grow the rectangle.
    #[inline]
    pub fn inset_by(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width - 2.0 * dx,
            height: self.height - 2.0 * dy,
        }
    }

    /// Translate this rectangle by an offset.
    #[inline]
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..*self
        }
    }
}

/// RGBA color with components in 0.0-1.0 range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Create a color from RGB values (0.0-1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA values (0-255).
    #[inline]
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, StyleError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || StyleError::InvalidColor(hex.to_string());
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba8(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (byte(self.r), byte(self.g), byte(self.b), byte(self.a));
        if a == 255 {
            format!("#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }

    /// Whether drawing this color has no visible effect.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_union_with_null() {
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Rect::NULL.union(&rect), rect);
        assert_eq!(rect.union(&Rect::NULL), rect);
        assert!(Rect::NULL.union(&Rect::NULL).is_null());
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 5.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 15.0, 25.0));
    }

    #[test]
    fn test_rect_negative_inset_grows() {
        let rect = Rect::new(5.0, 5.0, 3.0, 4.0).inset_by(-1.0, -1.0);
        assert_eq!(rect, Rect::new(4.0, 4.0, 5.0, 6.0));
        assert_eq!(rect.max_x(), 9.0);
        assert_eq!(rect.max_y(), 10.0);
    }

    #[test]
    fn test_color_hex_round_trip() {
        let color = Color::from_hex("#3366cc").unwrap();
        assert_eq!(color.to_hex(), "#3366cc");
        let translucent = Color::from_hex("ff000080").unwrap();
        assert_eq!(translucent.to_hex(), "#ff000080");
    }

    #[test]
    fn test_color_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("").is_err());
    }
}
