//! Drag-to-reorder for the layer list.

use crate::dnd::{DragItem, DragSource};
use crate::widget::WidgetId;
use kurbo::{Point, Rect};

/// A row of the layer list as laid out on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerRow {
    pub id: WidgetId,
    pub index: usize,
    /// Screen bounds of the row.
    pub bounds: Rect,
}

impl DragSource for LayerRow {
    fn begin_drag(&mut self) -> DragItem {
        DragItem::LayerItem { index: self.index }
    }
}

/// State of one reorder drag.
///
/// Tracks where the dragged row currently sits; updated on every move so
/// later hovers compare against the row's new index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderGesture {
    drag_index: usize,
}

impl ReorderGesture {
    pub fn new(drag_index: usize) -> Self {
        Self { drag_index }
    }

    /// Gesture for a layer-item drag, or `None` for other items.
    pub fn from_item(item: &DragItem) -> Option<Self> {
        match item {
            DragItem::LayerItem { index } => Some(Self::new(*index)),
            _ => None,
        }
    }

    /// Current index of the dragged row.
    pub fn drag_index(&self) -> usize {
        self.drag_index
    }

    /// Decide whether hovering `pointer` over the row at `hover_index` should
    /// move the dragged row there.
    ///
    /// Dragging down only moves once the pointer is below the row's vertical
    /// middle, dragging up once it is above it.
    pub fn should_move(&self, hover_index: usize, row: Rect, pointer: Point) -> bool {
        let drag_index = self.drag_index;
        if drag_index == hover_index {
            return false;
        }

        let hover_middle_y = (row.y1 - row.y0) / 2.0;
        let hover_client_y = pointer.y - row.y0;

        if drag_index < hover_index && hover_client_y < hover_middle_y {
            return false;
        }
        if drag_index > hover_index && hover_client_y > hover_middle_y {
            return false;
        }
        true
    }

    /// Apply a hover to `items`. Returns `true` if the list changed.
    pub fn hover<T>(&mut self, items: &mut Vec<T>, hover_index: usize, row: Rect, pointer: Point) -> bool {
        if hover_index >= items.len() || self.drag_index >= items.len() {
            return false;
        }
        if !self.should_move(hover_index, row, pointer) {
            return false;
        }
        move_item(items, self.drag_index, hover_index);
        self.drag_index = hover_index;
        true
    }
}

/// Move the entry at `from` to `to`, shifting the entries in between.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from == to || from >= items.len() || to >= items.len() {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(index: usize) -> Rect {
        let top = index as f64 * 40.0;
        Rect::new(0.0, top, 200.0, top + 40.0)
    }

    #[test]
    fn test_same_index_is_noop() {
        let mut items = vec!['a', 'b', 'c'];
        let mut gesture = ReorderGesture::new(1);
        assert!(!gesture.hover(&mut items, 1, row(1), Point::new(10.0, 45.0)));
        assert_eq!(items, vec!['a', 'b', 'c']);
    }

    #[test]
    fn test_drag_down_waits_for_midpoint() {
        let mut items = vec!['a', 'b', 'c'];
        let mut gesture = ReorderGesture::new(0);
        // Upper half of row 1.
        assert!(!gesture.hover(&mut items, 1, row(1), Point::new(10.0, 50.0)));
        // Lower half of row 1.
        assert!(gesture.hover(&mut items, 1, row(1), Point::new(10.0, 70.0)));
        assert_eq!(items, vec!['b', 'a', 'c']);
        assert_eq!(gesture.drag_index(), 1);
    }

    #[test]
    fn test_drag_up_to_top() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        let mut gesture = ReorderGesture::new(2);
        assert!(gesture.hover(&mut items, 1, row(1), Point::new(10.0, 45.0)));
        assert!(gesture.hover(&mut items, 0, row(0), Point::new(10.0, 5.0)));
        assert_eq!(items, vec!['c', 'a', 'b', 'd']);
        assert_eq!(gesture.drag_index(), 0);
    }

    #[test]
    fn test_drag_up_below_midpoint_ignored() {
        let mut items = vec!['a', 'b', 'c'];
        let mut gesture = ReorderGesture::new(2);
        assert!(!gesture.hover(&mut items, 1, row(1), Point::new(10.0, 75.0)));
        assert_eq!(gesture.drag_index(), 2);
    }

    #[test]
    fn test_out_of_range_hover() {
        let mut items = vec!['a'];
        let mut gesture = ReorderGesture::new(0);
        assert!(!gesture.hover(&mut items, 4, row(4), Point::new(0.0, 200.0)));
    }

    #[test]
    fn test_begin_drag_carries_index() {
        let mut layer = LayerRow {
            id: 9,
            index: 3,
            bounds: row(3),
        };
        let item = layer.begin_drag();
        assert_eq!(ReorderGesture::from_item(&item), Some(ReorderGesture::new(3)));
    }
}
