//! Split container layout mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Layout of the canvas: free-form, or one of the fixed split containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Free-form canvas.
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl SplitMode {
    pub fn is_split(self) -> bool {
        self != SplitMode::None
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitMode::None => write!(f, "none"),
            SplitMode::Horizontal => write!(f, "horizontal"),
            SplitMode::Vertical => write!(f, "vertical"),
        }
    }
}

/// Layout errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("remove free-form widgets first ({count} on the canvas) before switching to a {mode} split")]
    FreeformWidgetsPresent { mode: SplitMode, count: usize },
}

/// Result type for layout changes.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Decide whether the canvas may switch from its current layout to `requested`.
///
/// Leaving a split is always allowed. Entering one needs an empty widget
/// collection.
pub fn check_transition(requested: SplitMode, widget_count: usize) -> LayoutResult<()> {
    if requested.is_split() && widget_count > 0 {
        return Err(LayoutError::FreeformWidgetsPresent {
            mode: requested,
            count: widget_count,
        });
    }
    Ok(())
}
