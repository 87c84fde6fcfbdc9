//! Widget id generation.

use super::WidgetId;

#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Hands out strictly increasing widget ids.
///
/// Ids start from wall-clock milliseconds so they read as creation times, but
/// every id is at least one above the previous one, which keeps batches
/// created within the same millisecond distinct.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: WidgetId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next unused id, or `None` once the id space above `last` is used up.
    pub fn next_id(&mut self) -> Option<WidgetId> {
        let id = now_millis().max(self.last.checked_add(1)?);
        self.last = id;
        Some(id)
    }

    /// Record an id that was created elsewhere so later ids stay above it.
    pub fn observe(&mut self, id: WidgetId) {
        self.last = self.last.max(id);
    }

    /// The most recent id handed out or observed.
    pub fn last(&self) -> WidgetId {
        self.last
    }
}

fn now_millis() -> WidgetId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as WidgetId)
        .unwrap_or(0)
}
