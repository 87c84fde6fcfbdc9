//! Lifecycle glue between widgets and the chart library.

use crate::widget::ChartWidget;
use kurbo::Size;
use serde_json::Value;

/// The chart library seen from the core.
pub trait ChartRenderer {
    /// Create a chart of `size` pixels showing `option`.
    fn init(&mut self, option: &Value, size: Size);

    /// Tear the chart down.
    fn dispose(&mut self);
}

/// Keeps one chart instance in step with one widget.
///
/// The chart is sized from the widget's unscaled size; in-gesture scale is a
/// render transform and never triggers a rebuild.
#[derive(Debug)]
pub struct ChartHost<R: ChartRenderer> {
    renderer: R,
    mounted: Option<Size>,
}

impl<R: ChartRenderer> ChartHost<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            mounted: None,
        }
    }

    /// Create the chart for `widget`.
    pub fn mount(&mut self, widget: &ChartWidget) {
        if self.mounted.is_some() {
            self.renderer.dispose();
        }
        self.renderer.init(&widget.template.option, widget.size);
        self.mounted = Some(widget.size);
    }

    /// Bring the chart in line with `widget`. Returns `true` if it was rebuilt.
    pub fn update(&mut self, widget: &ChartWidget) -> bool {
        match self.mounted {
            Some(size) if size == widget.size => false,
            _ => {
                log::debug!(
                    "Rebuilding chart {} at {}x{}",
                    widget.id,
                    widget.size.width,
                    widget.size.height
                );
                self.mount(widget);
                true
            }
        }
    }

    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            self.renderer.dispose();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

impl<R: ChartRenderer> Drop for ChartHost<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}
