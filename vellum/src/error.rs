//! Style error types.
//!
//! Layout itself never fails; only user-supplied styling can be rejected.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("invalid color: {0:?} (expected #rrggbb or #rrggbbaa)")]
    InvalidColor(String),

    #[error("border width must be a finite, non-negative number, got {0}")]
    InvalidBorderWidth(f32),

    #[error("cell padding must be finite and non-negative, got {0}")]
    InvalidPadding(f32),
}
