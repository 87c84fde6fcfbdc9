//! Drag-and-drop contracts.
//!
//! Pointer capture and ghost images belong to whatever transport drives the
//! drag (a native pointer layer, a browser backend, a test harness). The core
//! only implements the behaviors below and reads drag state through
//! [`DragMonitor`].

use crate::layout::{LayoutError, SplitMode};
use crate::widget::{ChartTemplate, WidgetId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Kinds of draggable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragItemKind {
    /// A chart from the component panel.
    ChartPreview,
    /// A split container from the component panel.
    Split,
    /// A row of the layer list.
    LayerItem,
}

/// Payload carried by an active drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DragItem {
    ChartPreview(ChartTemplate),
    Split(SplitMode),
    LayerItem { index: usize },
}

impl DragItem {
    pub fn kind(&self) -> DragItemKind {
        match self {
            DragItem::ChartPreview(_) => DragItemKind::ChartPreview,
            DragItem::Split(_) => DragItemKind::Split,
            DragItem::LayerItem { .. } => DragItemKind::LayerItem,
        }
    }
}

/// Read access to the drag in progress.
pub trait DragMonitor {
    /// The dragged item, if a drag is active.
    fn item(&self) -> Option<&DragItem>;

    /// Pointer position in screen coordinates.
    fn client_offset(&self) -> Option<Point>;

    /// Whether a nested target already handled the drop.
    fn did_drop(&self) -> bool;
}

/// Something the user can pick up.
pub trait DragSource {
    fn begin_drag(&mut self) -> DragItem;

    fn end_drag(&mut self, _item: &DragItem, _dropped: bool) {}
}

/// What a drop did.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// A widget was created.
    Placed(WidgetId),
    /// The canvas switched layout mode.
    SplitChanged(SplitMode),
    /// The drop was refused and should be reported to the user.
    Rejected(LayoutError),
    /// Nothing happened.
    Ignored,
}

/// Something items can be dropped on.
pub trait DropTarget {
    fn accepts(&self, kind: DragItemKind) -> bool;

    /// Called while an item hovers over the target. Returns `true` if state changed.
    fn hover(&mut self, _monitor: &dyn DragMonitor) -> bool {
        false
    }

    fn drop(&mut self, monitor: &dyn DragMonitor) -> DropOutcome;
}

/// Synthetic drag transport driven by explicit calls.
#[derive(Debug, Clone, Default)]
pub struct PointerMonitor {
    item: Option<DragItem>,
    offset: Option<Point>,
    dropped: bool,
}

impl PointerMonitor {
    /// Start dragging `source` at `at`.
    pub fn begin(source: &mut impl DragSource, at: Point) -> Self {
        Self {
            item: Some(source.begin_drag()),
            offset: Some(at),
            dropped: false,
        }
    }

    /// Monitor for an item that did not come from a [`DragSource`].
    pub fn with_item(item: DragItem, at: Point) -> Self {
        Self {
            item: Some(item),
            offset: Some(at),
            dropped: false,
        }
    }

    pub fn move_to(&mut self, at: Point) {
        self.offset = Some(at);
    }

    /// Hover over `target` if it accepts the item.
    pub fn hover_over(&mut self, target: &mut dyn DropTarget) -> bool {
        match &self.item {
            Some(item) if target.accepts(item.kind()) => target.hover(self),
            _ => false,
        }
    }

    /// Drop on `target`. Later targets see `did_drop() == true`.
    pub fn drop_on(&mut self, target: &mut dyn DropTarget) -> DropOutcome {
        let outcome = match &self.item {
            Some(item) if target.accepts(item.kind()) => target.drop(self),
            _ => DropOutcome::Ignored,
        };
        if outcome != DropOutcome::Ignored {
            self.dropped = true;
        }
        outcome
    }

    /// Finish the drag and notify `source`.
    pub fn end(mut self, source: &mut impl DragSource) {
        if let Some(item) = self.item.take() {
            source.end_drag(&item, self.dropped);
        }
    }
}

impl DragMonitor for PointerMonitor {
    fn item(&self) -> Option<&DragItem> {
        self.item.as_ref()
    }

    fn client_offset(&self) -> Option<Point> {
        self.offset
    }

    fn did_drop(&self) -> bool {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Palette {
        ended: Option<bool>,
    }

    impl DragSource for Palette {
        fn begin_drag(&mut self) -> DragItem {
            DragItem::Split(SplitMode::Vertical)
        }

        fn end_drag(&mut self, _item: &DragItem, dropped: bool) {
            self.ended = Some(dropped);
        }
    }

    struct Bin {
        drops: usize,
    }

    impl DropTarget for Bin {
        fn accepts(&self, kind: DragItemKind) -> bool {
            kind == DragItemKind::Split
        }

        fn drop(&mut self, monitor: &dyn DragMonitor) -> DropOutcome {
            if monitor.did_drop() {
                return DropOutcome::Ignored;
            }
            self.drops += 1;
            DropOutcome::SplitChanged(SplitMode::Vertical)
        }
    }

    struct LayerOnly;

    impl DropTarget for LayerOnly {
        fn accepts(&self, kind: DragItemKind) -> bool {
            kind == DragItemKind::LayerItem
        }

        fn drop(&mut self, _monitor: &dyn DragMonitor) -> DropOutcome {
            panic!("should not receive split items");
        }
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut source = Palette { ended: None };
        let mut monitor = PointerMonitor::begin(&mut source, Point::new(5.0, 5.0));
        assert_eq!(monitor.item().map(DragItem::kind), Some(DragItemKind::Split));

        let mut inner = Bin { drops: 0 };
        let mut outer = Bin { drops: 0 };
        assert_eq!(
            monitor.drop_on(&mut inner),
            DropOutcome::SplitChanged(SplitMode::Vertical)
        );
        assert_eq!(monitor.drop_on(&mut outer), DropOutcome::Ignored);
        assert_eq!(outer.drops, 0);

        monitor.end(&mut source);
        assert_eq!(source.ended, Some(true));
    }

    #[test]
    fn test_target_filters_kinds() {
        let mut monitor = PointerMonitor::with_item(DragItem::Split(SplitMode::Horizontal), Point::ZERO);
        assert_eq!(monitor.drop_on(&mut LayerOnly), DropOutcome::Ignored);
        assert!(!monitor.did_drop());
    }
}
