//! Transform math for the on-canvas resize/move tool.
//!
//! Everything here is pure: pointer positions and deltas go in, handle or
//! widget geometry comes out. The canvas controller owns the state.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum width of a transform handle, in unscaled canvas units.
pub const MIN_WIDTH: f64 = 50.0;
/// Minimum height of a transform handle, in unscaled canvas units.
pub const MIN_HEIGHT: f64 = 50.0;

/// Which grip of the transform tool is being dragged.
///
/// The eight edge/corner grips resize; `Middle` is the tool body and only
/// translates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SideType {
    Left,
    Right,
    Top,
    Bottom,
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
    Middle,
}

impl SideType {
    /// All grips, corners first.
    pub const ALL: [SideType; 9] = [
        SideType::LeftTop,
        SideType::RightTop,
        SideType::LeftBottom,
        SideType::RightBottom,
        SideType::Left,
        SideType::Right,
        SideType::Top,
        SideType::Bottom,
        SideType::Middle,
    ];

    /// Check if this grip resizes (anything but the body).
    pub fn is_resize(self) -> bool {
        self != SideType::Middle
    }

    /// Grip location relative to the box, as fractions of its size.
    pub fn anchor(self) -> (f64, f64) {
        match self {
            SideType::LeftTop => (0.0, 0.0),
            SideType::Top => (0.5, 0.0),
            SideType::RightTop => (1.0, 0.0),
            SideType::Left => (0.0, 0.5),
            SideType::Middle => (0.5, 0.5),
            SideType::Right => (1.0, 0.5),
            SideType::LeftBottom => (0.0, 1.0),
            SideType::Bottom => (0.5, 1.0),
            SideType::RightBottom => (1.0, 1.0),
        }
    }
}

/// Bounding box of a transform handle in unscaled canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleGeometry {
    /// Top-left corner (`left`, `top`).
    pub position: Point,
    pub size: Size,
}

impl HandleGeometry {
    pub fn new(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    /// Check that the box is at least `MIN_WIDTH` x `MIN_HEIGHT`.
    pub fn meets_minimum(&self) -> bool {
        self.size.width >= MIN_WIDTH && self.size.height >= MIN_HEIGHT
    }

    pub fn as_rect(&self) -> kurbo::Rect {
        kurbo::Rect::from_origin_size(self.position, self.size)
    }
}

/// Scale and position to apply to a widget so it renders inside a handle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WidgetGeometry {
    pub scale: Vec2,
    pub position: Point,
}

/// Convert a pointer position to canvas-local unscaled coordinates.
pub fn pointer_to_canvas(pointer: Point, canvas_origin: Point, zoom: f64) -> Point {
    let local = pointer - canvas_origin;
    Point::new(local.x / zoom, local.y / zoom)
}

/// Apply a drag of `delta` (unscaled) on grip `side` to `initial`.
///
/// The result is always computed from `initial`, never from the widget, so
/// repeated events within one gesture cannot drift.
pub fn apply_resize(side: SideType, delta: Vec2, initial: HandleGeometry) -> HandleGeometry {
    let mut size = initial.size;
    let mut position = initial.position;

    match side {
        SideType::Right => {
            size.width += delta.x;
        }
        SideType::Bottom => {
            size.height += delta.y;
        }
        SideType::Top => {
            size.height -= delta.y;
            position.y += delta.y;
        }
        SideType::Left => {
            size.width -= delta.x;
            position.x += delta.x;
        }
        SideType::RightTop => {
            size.width += delta.x;
            size.height -= delta.y;
            position.y += delta.y;
        }
        SideType::LeftTop => {
            size.width -= delta.x;
            size.height -= delta.y;
            position.x += delta.x;
            position.y += delta.y;
        }
        SideType::LeftBottom => {
            size.width -= delta.x;
            size.height += delta.y;
            position.x += delta.x;
        }
        SideType::RightBottom => {
            size.width += delta.x;
            size.height += delta.y;
        }
        SideType::Middle => {
            position.x += delta.x;
            position.y += delta.y;
        }
    }

    HandleGeometry { position, size }
}

/// Map a handle back onto a widget whose unscaled size is `base`.
///
/// A scale transform anchors at the element's center, so the unscaled origin
/// sits `base * (scale - 1) / 2` inside the scaled box.
pub fn handle_to_widget_geometry(handle: HandleGeometry, base: Size) -> WidgetGeometry {
    let scale = Vec2::new(
        handle.size.width / base.width,
        handle.size.height / base.height,
    );
    let position = Point::new(
        handle.position.x + base.width * (scale.x - 1.0) / 2.0,
        handle.position.y + base.height * (scale.y - 1.0) / 2.0,
    );
    WidgetGeometry { scale, position }
}

/// Inverse of [`handle_to_widget_geometry`]: the scaled bounding box a widget
/// renders into.
pub fn widget_to_handle_geometry(position: Point, size: Size, scale: Vec2) -> HandleGeometry {
    HandleGeometry {
        position: Point::new(
            position.x - size.width * (scale.x - 1.0) / 2.0,
            position.y - size.height * (scale.y - 1.0) / 2.0,
        ),
        size: Size::new(scale.x * size.width, scale.y * size.height),
    }
}
