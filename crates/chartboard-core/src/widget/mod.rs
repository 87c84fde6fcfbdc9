//! Chart widgets placed on the canvas.
//!
//! A widget is pure data: geometry plus an opaque chart payload. Selection,
//! transform tools and indexing live elsewhere and are derived from the
//! widget collection.

mod id;
mod registry;

pub use id::IdGenerator;
pub use registry::WidgetRegistry;

use crate::transform::{MIN_HEIGHT, MIN_WIDTH};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

/// Unique identifier for widgets.
pub type WidgetId = u64;

/// Widget collection errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("widget id {0} appears more than once")]
    DuplicateId(WidgetId),
    #[error("widget {id} is {width}x{height}, below the 50x50 minimum")]
    TooSmall { id: WidgetId, width: f64, height: f64 },
    #[error("widget {id} has a non-finite position, size or scale")]
    NonFinite { id: WidgetId },
    #[error("widget {id} carries a pending scale of ({x}, {y}) outside a gesture")]
    PendingScale { id: WidgetId, x: f64, y: f64 },
    #[error("no widget ids left")]
    IdsExhausted,
}

/// Result type for widget collection changes.
pub type WidgetResult<T> = Result<T, WidgetError>;

/// Check a whole collection before it replaces the canvas contents.
///
/// Ids must be unique and every widget must pass [`ChartWidget::validate`].
/// A pending scale is only accepted while a gesture is in progress.
pub fn validate_widgets(widgets: &[ChartWidget], in_gesture: bool) -> WidgetResult<()> {
    let mut seen = HashSet::with_capacity(widgets.len());
    for widget in widgets {
        if !seen.insert(widget.id) {
            return Err(WidgetError::DuplicateId(widget.id));
        }
        widget.validate()?;
        if !in_gesture && !widget.is_unit_scale() {
            return Err(WidgetError::PendingScale {
                id: widget.id,
                x: widget.scale.x,
                y: widget.scale.y,
            });
        }
    }
    Ok(())
}

/// How a widget's layout is managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetMode {
    /// Free-form placement, driven by the transform tool.
    #[default]
    Absolute,
    /// Laid out externally; never gets a transform tool.
    Responsive,
}

/// What to draw, as handed over by the component panel.
///
/// None of these fields are interpreted by the core. They are copied along
/// with the widget and passed to the charting collaborator untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartTemplate {
    /// Visualization options for the chart library.
    pub option: Value,
    /// Preview image shown in the layer list.
    #[serde(default)]
    pub img_src: String,
    /// Chart type tag (`"bar"`, `"pie"`, ...).
    #[serde(default, rename = "type")]
    pub chart_type: String,
    #[serde(default)]
    pub series_item_template: Value,
    /// Control descriptors for the settings panel.
    #[serde(default)]
    pub controls: Value,
}

impl ChartTemplate {
    pub fn new(chart_type: impl Into<String>, option: Value) -> Self {
        Self {
            option,
            chart_type: chart_type.into(),
            ..Default::default()
        }
    }
}

/// A chart placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartWidget {
    pub id: WidgetId,
    /// Unscaled top-left offset (`left`, `top`).
    pub position: Point,
    /// Unscaled size.
    pub size: Size,
    /// In-gesture scale; `(1, 1)` whenever no gesture is active.
    pub scale: Vec2,
    #[serde(default)]
    pub mode: WidgetMode,
    /// Whether the payload's colors follow the global palette.
    #[serde(default)]
    pub color_from_global: bool,
    #[serde(flatten)]
    pub template: ChartTemplate,
}

impl ChartWidget {
    /// Create an absolute-mode widget at unit scale.
    pub fn new(id: WidgetId, position: Point, size: Size, template: ChartTemplate) -> Self {
        Self {
            id,
            position,
            size,
            scale: Vec2::new(1.0, 1.0),
            mode: WidgetMode::Absolute,
            color_from_global: false,
            template,
        }
    }

    /// Set the layout mode.
    pub fn with_mode(mut self, mode: WidgetMode) -> Self {
        self.mode = mode;
        self
    }

    /// Copy of this widget under a different id.
    pub fn with_id(&self, id: WidgetId) -> Self {
        Self { id, ..self.clone() }
    }

    /// Copy of this widget moved by `offset`, keeping the id.
    pub fn offset_by(&self, offset: Vec2) -> Self {
        Self {
            position: self.position + offset,
            ..self.clone()
        }
    }

    pub fn is_absolute(&self) -> bool {
        self.mode == WidgetMode::Absolute
    }

    /// Check that no gesture scale is pending.
    pub fn is_unit_scale(&self) -> bool {
        self.scale == Vec2::new(1.0, 1.0)
    }

    /// Check geometry: finite numbers and at least the minimum size.
    pub fn validate(&self) -> WidgetResult<()> {
        if !(self.position.is_finite() && self.size.is_finite() && self.scale.is_finite()) {
            return Err(WidgetError::NonFinite { id: self.id });
        }
        if self.size.width < MIN_WIDTH || self.size.height < MIN_HEIGHT {
            return Err(WidgetError::TooSmall {
                id: self.id,
                width: self.size.width,
                height: self.size.height,
            });
        }
        Ok(())
    }
}
