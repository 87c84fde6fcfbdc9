//! Id to index lookup for the widget collection.

use super::{ChartWidget, WidgetId};
use std::collections::HashMap;

/// Maps widget ids to their current position in the collection.
///
/// The map is never patched: whoever replaces the collection calls
/// [`WidgetRegistry::rebuild`] in the same step.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    index: HashMap<WidgetId, usize>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry for `widgets`.
    pub fn from_widgets(widgets: &[ChartWidget]) -> Self {
        let mut registry = Self::new();
        registry.rebuild(widgets);
        registry
    }

    /// Clear and repopulate the map from `widgets` in one pass.
    pub fn rebuild(&mut self, widgets: &[ChartWidget]) {
        self.index.clear();
        self.index.reserve(widgets.len());
        for (idx, widget) in widgets.iter().enumerate() {
            self.index.insert(widget.id, idx);
        }
    }

    /// Position of `id`, or `None` if the widget is gone.
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
