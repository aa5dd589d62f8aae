//! Table styling and its JSON configuration form.

use serde::{Deserialize, Serialize};

use crate::error::StyleError;
use crate::layout::length::Padding;
use crate::primitives::Color;
use crate::table::background::TableBackgroundStyle;
use crate::table::border::TableBorderSelector;

const DEFAULT_BORDER_COLOR: &str = "#d0d7de";
const DEFAULT_EVEN_ROW: &str = "#ffffff";
const DEFAULT_ODD_ROW: &str = "#f6f8fa";

/// Border appearance. `width` doubles as the grid spacing and padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableBorderStyle {
    pub visible_borders: TableBorderSelector,
    pub color: Color,
    pub width: f32,
}

impl Default for TableBorderStyle {
    fn default() -> Self {
        Self {
            visible_borders: TableBorderSelector::AllBorders,
            color: Color::rgba8(0xd0, 0xd7, 0xde, 0xff),
            width: 1.0,
        }
    }
}

/// Per-cell appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableCellStyle {
    pub padding: Padding,
}

impl Default for TableCellStyle {
    fn default() -> Self {
        Self {
            padding: Padding::symmetric(13.0, 6.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableStyle {
    pub border: TableBorderStyle,
    pub background: TableBackgroundStyle,
    pub cell: TableCellStyle,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            border: TableBorderStyle::default(),
            background: TableBackgroundStyle::alternating_rows(
                Color::WHITE,
                Color::rgba8(0xf6, 0xf8, 0xfa, 0xff),
            ),
            cell: TableCellStyle::default(),
        }
    }
}

// =========================================================================
// Configuration
// =========================================================================

/// Serialized form of [`TableStyle`]. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableStyleConfig {
    pub borders: TableBorderSelector,
    pub border_color: String,
    pub border_width: f32,
    pub background: BackgroundConfig,
    pub cell_padding: PaddingConfig,
}

impl Default for TableStyleConfig {
    fn default() -> Self {
        Self {
            borders: TableBorderSelector::AllBorders,
            border_color: DEFAULT_BORDER_COLOR.to_string(),
            border_width: 1.0,
            background: BackgroundConfig::default(),
            cell_padding: PaddingConfig::default(),
        }
    }
}

/// Background preset and its colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackgroundConfig {
    Clear,
    AlternatingRows { even: String, odd: String },
    AlternatingRowsWithHeader { header: String, even: String, odd: String },
    AlternatingColumns { even: String, odd: String },
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        BackgroundConfig::AlternatingRows {
            even: DEFAULT_EVEN_ROW.to_string(),
            odd: DEFAULT_ODD_ROW.to_string(),
        }
    }
}

impl TryFrom<&BackgroundConfig> for TableBackgroundStyle {
    type Error = StyleError;

    fn try_from(config: &BackgroundConfig) -> Result<Self, Self::Error> {
        Ok(match config {
            BackgroundConfig::Clear => TableBackgroundStyle::clear(),
            BackgroundConfig::AlternatingRows { even, odd } => {
                TableBackgroundStyle::alternating_rows(Color::from_hex(even)?, Color::from_hex(odd)?)
            }
            BackgroundConfig::AlternatingRowsWithHeader { header, even, odd } => {
                TableBackgroundStyle::alternating_rows_with_header(
                    Color::from_hex(header)?,
                    Color::from_hex(even)?,
                    Color::from_hex(odd)?,
                )
            }
            BackgroundConfig::AlternatingColumns { even, odd } => {
                TableBackgroundStyle::alternating_columns(Color::from_hex(even)?, Color::from_hex(odd)?)
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaddingConfig {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self {
            horizontal: 13.0,
            vertical: 6.0,
        }
    }
}

fn non_negative(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

impl TryFrom<TableStyleConfig> for TableStyle {
    type Error = StyleError;

    fn try_from(config: TableStyleConfig) -> Result<Self, Self::Error> {
        if !non_negative(config.border_width) {
            return Err(StyleError::InvalidBorderWidth(config.border_width));
        }
        let PaddingConfig { horizontal, vertical } = config.cell_padding;
        if let Some(bad) = [horizontal, vertical].into_iter().find(|v| !non_negative(*v)) {
            return Err(StyleError::InvalidPadding(bad));
        }

        Ok(TableStyle {
            border: TableBorderStyle {
                visible_borders: config.borders,
                color: Color::from_hex(&config.border_color)?,
                width: config.border_width,
            },
            background: TableBackgroundStyle::try_from(&config.background)?,
            cell: TableCellStyle {
                padding: Padding::symmetric(horizontal, vertical),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_default_style() {
        let style = TableStyle::try_from(TableStyleConfig::default()).unwrap();
        let default = TableStyle::default();
        assert_eq!(style.border, default.border);
        assert_eq!(style.cell, default.cell);
        assert_eq!(style.background.background(1, 0), default.background.background(1, 0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: TableStyleConfig =
            serde_json::from_str(r#"{ "borders": "inside_borders", "border_width": 2 }"#).unwrap();
        assert_eq!(config.borders, TableBorderSelector::InsideBorders);
        assert_eq!(config.border_width, 2.0);
        assert_eq!(config.border_color, DEFAULT_BORDER_COLOR);
        assert_eq!(config.cell_padding, PaddingConfig::default());
    }

    #[test]
    fn test_background_preset_from_json() {
        let config: TableStyleConfig = serde_json::from_str(
            r##"{ "background": { "kind": "alternating_rows_with_header", "header": "#000000", "even": "#ffffff", "odd": "#eeeeee" } }"##,
        )
        .unwrap();
        let style = TableStyle::try_from(config).unwrap();
        assert_eq!(style.background.background(0, 3), Color::BLACK);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = TableStyleConfig {
            border_width: -1.0,
            ..Default::default()
        };
        assert_eq!(
            TableStyle::try_from(config).unwrap_err(),
            StyleError::InvalidBorderWidth(-1.0)
        );

        let config = TableStyleConfig {
            border_color: "blue".into(),
            ..Default::default()
        };
        assert!(matches!(TableStyle::try_from(config), Err(StyleError::InvalidColor(_))));

        let config = TableStyleConfig {
            cell_padding: PaddingConfig { horizontal: 1.0, vertical: f32::NAN },
            ..Default::default()
        };
        assert!(matches!(TableStyle::try_from(config), Err(StyleError::InvalidPadding(_))));
    }
}
