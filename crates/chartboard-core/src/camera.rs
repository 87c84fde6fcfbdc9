//! Canvas zoom and placement inside the viewport.

use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed zoom.
pub const MIN_SCALE: f64 = 0.01;
/// Largest allowed zoom.
pub const MAX_SCALE: f64 = 10.0;

/// Padding used on an axis where the zoomed canvas overflows the viewport.
pub const OVERFLOW_PADDING: f64 = 50.0;

/// Clamp a zoom value to `[MIN_SCALE, MAX_SCALE]`.
pub fn clamp_zoom(scale: f64) -> f64 {
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}

/// Zoom after one wheel event, or `None` if the bound absorbs it.
///
/// Scrolling down (`delta_y > 0`) zooms out.
pub fn wheel_zoom(current: f64, delta_y: f64, step: f64) -> Option<f64> {
    let step = if delta_y > 0.0 { -step } else { step };
    step_zoom(current, step)
}

/// Zoom after adding `step`, or `None` if nothing changes.
pub fn step_zoom(current: f64, step: f64) -> Option<f64> {
    let next = clamp_zoom(current + step);
    if (next - current).abs() < f64::EPSILON {
        None
    } else {
        Some(next)
    }
}

/// Where the canvas sits on screen.
///
/// The canvas is centered in the viewport; its top-left corner is the origin
/// pointer events are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Size of the area hosting the canvas, in screen pixels.
    pub viewport: Size,
    /// Screen position of the viewport's top-left corner.
    pub viewport_origin: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            viewport_origin: Point::ZERO,
        }
    }
}

impl Camera {
    pub fn new(viewport_origin: Point, viewport: Size) -> Self {
        Self {
            viewport,
            viewport_origin,
        }
    }

    /// Padding that centers a canvas of `canvas` size at `zoom`.
    pub fn padding(&self, canvas: Size, zoom: f64) -> Vec2 {
        let axis = |view: f64, content: f64| {
            let pad = (view - content * zoom) / 2.0;
            if pad < 0.0 { OVERFLOW_PADDING } else { pad }
        };
        Vec2::new(
            axis(self.viewport.width, canvas.width),
            axis(self.viewport.height, canvas.height),
        )
    }

    /// Screen position of the canvas' top-left corner.
    pub fn canvas_origin(&self, canvas: Size, zoom: f64) -> Point {
        self.viewport_origin + self.padding(canvas, zoom)
    }

    /// Convert a screen point to unscaled canvas coordinates.
    pub fn screen_to_canvas(&self, screen: Point, canvas: Size, zoom: f64) -> Point {
        crate::transform::pointer_to_canvas(screen, self.canvas_origin(canvas, zoom), zoom)
    }

    /// Convert an unscaled canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, point: Point, canvas: Size, zoom: f64) -> Point {
        let origin = self.canvas_origin(canvas, zoom);
        Point::new(origin.x + point.x * zoom, origin.y + point.y * zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_direction() {
        let out = wheel_zoom(1.0, 120.0, 0.05).unwrap();
        assert!((out - 0.95).abs() < 1e-9);
        let inn = wheel_zoom(1.0, -120.0, 0.05).unwrap();
        assert!((inn - 1.05).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_absorbed_at_bounds() {
        assert_eq!(wheel_zoom(MAX_SCALE, -1.0, 0.05), None);
        assert_eq!(wheel_zoom(MIN_SCALE, 1.0, 0.05), None);
        assert_eq!(wheel_zoom(0.03, 1.0, 0.05), Some(MIN_SCALE));
    }

    #[test]
    fn test_clamp_zoom() {
        assert_eq!(clamp_zoom(100.0), MAX_SCALE);
        assert_eq!(clamp_zoom(0.0), MIN_SCALE);
        assert_eq!(clamp_zoom(f64::NAN), MIN_SCALE);
        assert_eq!(clamp_zoom(2.5), 2.5);
    }

    #[test]
    fn test_padding_centers_canvas() {
        let camera = Camera::new(Point::ZERO, Size::new(1000.0, 800.0));
        let pad = camera.padding(Size::new(800.0, 600.0), 1.0);
        assert_eq!(pad, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_padding_falls_back_when_overflowing() {
        let camera = Camera::new(Point::ZERO, Size::new(1000.0, 800.0));
        let pad = camera.padding(Size::new(800.0, 600.0), 2.0);
        assert_eq!(pad, Vec2::new(OVERFLOW_PADDING, OVERFLOW_PADDING));
    }

    #[test]
    fn test_screen_canvas_roundtrip() {
        let camera = Camera::new(Point::new(200.0, 40.0), Size::new(1000.0, 800.0));
        let canvas = Size::new(800.0, 600.0);
        let p = Point::new(123.0, 45.0);
        let screen = camera.canvas_to_screen(p, canvas, 0.5);
        let back = camera.screen_to_canvas(screen, canvas, 0.5);
        assert!((back.x - p.x).abs() < 1e-9);
        assert!((back.y - p.y).abs() < 1e-9);
    }
}
