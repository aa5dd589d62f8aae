//! Text measurement.
//!
//! The engine never shapes text itself; it asks a [`TextMeasure`] for sizes.
//! [`MonospaceMeasure`] is the built-in implementation used by the CLI and
//! the tests.

use unicode_width::UnicodeWidthChar;

use crate::layout::length::{CHAR_WIDTH, LINE_HEIGHT};
use crate::primitives::Size;

/// Measures text and breaks it into lines.
pub trait TextMeasure {
    /// Width of a single line of text.
    fn line_width(&self, line: &str) -> f32;

    fn line_height(&self) -> f32;

    /// Size of `text` laid out without wrapping. Explicit newlines start new
    /// lines; empty text still occupies one line.
    fn measure(&self, text: &str) -> Size {
        let mut width = 0.0f32;
        let mut lines = 0usize;
        for line in text.split('\n') {
            width = width.max(self.line_width(line));
            lines += 1;
        }
        Size::new(width, lines as f32 * self.line_height())
    }

    /// Greedy word wrap of `text` to `max_width`.
    ///
    /// Explicit newlines are kept, words wider than `max_width` are broken
    /// by character.
    fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        let mut result = Vec::new();

        for paragraph in text.split('\n') {
            if self.line_width(paragraph) <= max_width {
                result.push(paragraph.to_string());
                continue;
            }

            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                if self.line_width(word) > max_width {
                    if !line.is_empty() {
                        result.push(std::mem::take(&mut line));
                    }
                    for ch in word.chars() {
                        let mut candidate = line.clone();
                        candidate.push(ch);
                        if !line.is_empty() && self.line_width(&candidate) > max_width {
                            result.push(std::mem::take(&mut line));
                            line.push(ch);
                        } else {
                            line = candidate;
                        }
                    }
                } else if line.is_empty() {
                    line = word.to_string();
                } else if self.line_width(&line) + self.line_width(" ") + self.line_width(word) <= max_width {
                    line.push(' ');
                    line.push_str(word);
                } else {
                    result.push(std::mem::replace(&mut line, word.to_string()));
                }
            }
            if !line.is_empty() {
                result.push(line);
            }
        }

        if result.is_empty() {
            result.push(String::new());
        }
        result
    }
}

/// Fixed-pitch measurement: every column of display width is `char_width`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub char_width: f32,
    pub line_height: f32,
}

impl MonospaceMeasure {
    pub fn new(char_width: f32, line_height: f32) -> Self {
        Self { char_width, line_height }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self::new(CHAR_WIDTH, LINE_HEIGHT)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn line_width(&self, line: &str) -> f32 {
        display_width(line) * self.char_width
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Display width of `text` in terminal columns (wide CJK counts as 2).
pub fn display_width(text: &str) -> f32 {
    text.chars()
        .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as f32)
        .sum()
}
