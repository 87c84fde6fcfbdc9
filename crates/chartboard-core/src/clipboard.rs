//! In-process clipboard for widgets.

use crate::widget::{ChartWidget, IdGenerator, WidgetId};
use kurbo::Vec2;

/// Snapshot of copied widgets.
///
/// Entries keep the ids of their originals; every paste hands out fresh ids,
/// so the same snapshot can be pasted any number of times.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    entries: Vec<ChartWidget>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every selected widget, shifted by `offset`.
    ///
    /// Widgets are taken in collection order. An empty selection leaves the
    /// previous snapshot in place. Returns the number of entries captured.
    pub fn copy(&mut self, selected: &[WidgetId], widgets: &[ChartWidget], offset: Vec2) -> usize {
        if selected.is_empty() {
            log::debug!("Copy ignored: nothing selected");
            return 0;
        }

        self.entries = widgets
            .iter()
            .filter(|w| selected.contains(&w.id))
            .map(|w| w.offset_by(offset))
            .collect();
        log::debug!("Copied {} widget(s) to clipboard", self.entries.len());
        self.entries.len()
    }

    /// Produce one new widget per entry, each under a fresh id.
    ///
    /// Returns `None` if the generator runs out of ids part way through.
    pub fn paste(&self, ids: &mut IdGenerator) -> Option<Vec<ChartWidget>> {
        self.entries
            .iter()
            .map(|entry| ids.next_id().map(|id| entry.with_id(id)))
            .collect()
    }

    pub fn entries(&self) -> &[ChartWidget] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
