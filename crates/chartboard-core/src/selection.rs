//! Selection state and the transform tools derived from it.

use crate::transform::{HandleGeometry, SideType, widget_to_handle_geometry};
use crate::widget::{ChartWidget, WidgetId};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grip hit tolerance in unscaled canvas units.
pub const HANDLE_HIT_TOLERANCE: f64 = 6.0;

/// Identifier of a pane inside the split container.
pub type SplitPaneId = u32;

/// What the user has picked on the canvas.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Selected widgets in selection order (not z-order).
    ids: Vec<WidgetId>,
    /// Widget highlighted from the layer list.
    highlighted: Option<WidgetId>,
    /// Active pane of the split container.
    active_split_pane: Option<SplitPaneId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids in selection order.
    pub fn ids(&self) -> &[WidgetId] {
        &self.ids
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Replace the selection with a single widget.
    pub fn select(&mut self, id: WidgetId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Replace the selection with `ids`, dropping repeats.
    pub fn set(&mut self, ids: impl IntoIterator<Item = WidgetId>) {
        self.ids.clear();
        for id in ids {
            self.add(id);
        }
    }

    /// Append a widget to the selection.
    pub fn add(&mut self, id: WidgetId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: WidgetId) {
        self.ids.retain(|&s| s != id);
    }

    /// Forget the selected widgets.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn highlighted(&self) -> Option<WidgetId> {
        self.highlighted
    }

    pub fn set_highlighted(&mut self, id: Option<WidgetId>) {
        self.highlighted = id;
    }

    pub fn active_split_pane(&self) -> Option<SplitPaneId> {
        self.active_split_pane
    }

    pub fn set_active_split_pane(&mut self, pane: Option<SplitPaneId>) {
        self.active_split_pane = pane;
    }

    /// Clear selection, highlight and active pane.
    pub fn reset(&mut self) {
        self.ids.clear();
        self.highlighted = None;
        self.active_split_pane = None;
    }
}

/// The draggable box shown around a selected widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformHandle {
    pub id: WidgetId,
    pub position: Point,
    pub size: Size,
}

impl TransformHandle {
    /// Handle matching the rendered, scaled bounding box of `widget`.
    pub fn for_widget(widget: &ChartWidget) -> Self {
        let geometry = widget_to_handle_geometry(widget.position, widget.size, widget.scale);
        Self {
            id: widget.id,
            position: geometry.position,
            size: geometry.size,
        }
    }

    pub fn geometry(&self) -> HandleGeometry {
        HandleGeometry::new(self.position, self.size)
    }

    /// Location of a grip in canvas coordinates.
    pub fn grip(&self, side: SideType) -> Point {
        let (fx, fy) = side.anchor();
        Point::new(
            self.position.x + self.size.width * fx,
            self.position.y + self.size.height * fy,
        )
    }

    /// Which grip (if any) `point` lands on.
    ///
    /// Edge and corner grips win over the body; points inside the box that
    /// miss every grip hit `Middle`.
    pub fn side_at(&self, point: Point, tolerance: f64) -> Option<SideType> {
        let hit = SideType::ALL
            .iter()
            .copied()
            .filter(|side| side.is_resize())
            .find(|&side| {
                let grip = self.grip(side);
                let dx = point.x - grip.x;
                let dy = point.y - grip.y;
                dx * dx + dy * dy <= tolerance * tolerance
            });
        if hit.is_some() {
            return hit;
        }
        if self.geometry().as_rect().contains(point) {
            Some(SideType::Middle)
        } else {
            None
        }
    }
}

/// Transform handles keyed by widget id.
pub type TransformTools = BTreeMap<WidgetId, TransformHandle>;

/// Derive one handle per selected absolute-mode widget.
///
/// Always recomputed from scratch; callers must not patch the result.
pub fn sync_transform_tools(widgets: &[ChartWidget], selection: &Selection) -> TransformTools {
    widgets
        .iter()
        .filter(|w| w.is_absolute() && selection.contains(w.id))
        .map(|w| (w.id, TransformHandle::for_widget(w)))
        .collect()
}

/// Find the grip under `point` across all handles.
///
/// Handles are tried top to bottom in the stacking order of `widgets`, so
/// where two grips overlap the one on the topmost widget wins.
pub fn hit_test_tools(
    widgets: &[ChartWidget],
    tools: &TransformTools,
    point: Point,
    tolerance: f64,
) -> Option<(WidgetId, SideType)> {
    let hits: Vec<(WidgetId, SideType)> = widgets
        .iter()
        .rev()
        .filter_map(|w| tools.get(&w.id))
        .filter_map(|tool| tool.side_at(point, tolerance).map(|side| (tool.id, side)))
        .collect();
    // Resize grips first so a corner overlapping another widget's body wins.
    hits.iter()
        .find(|(_, side)| side.is_resize())
        .or_else(|| hits.first())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::{ChartTemplate, WidgetMode};
    use kurbo::Vec2;

    fn widget(id: WidgetId) -> ChartWidget {
        ChartWidget::new(
            id,
            Point::new(100.0, 100.0),
            Size::new(300.0, 300.0),
            ChartTemplate::default(),
        )
    }

    #[test]
    fn test_selection_order_and_dedup() {
        let mut sel = Selection::new();
        sel.add(3);
        sel.add(1);
        sel.add(3);
        assert_eq!(sel.ids(), &[3, 1]);
        sel.select(9);
        assert_eq!(sel.ids(), &[9]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut sel = Selection::new();
        sel.set([1, 2]);
        sel.set_highlighted(Some(1));
        sel.set_active_split_pane(Some(0));
        sel.reset();
        assert!(sel.is_empty());
        assert_eq!(sel.highlighted(), None);
        assert_eq!(sel.active_split_pane(), None);
    }

    #[test]
    fn test_tools_only_for_selected_absolute() {
        let widgets = vec![
            widget(1),
            widget(2).with_mode(WidgetMode::Responsive),
            widget(3),
        ];
        let mut sel = Selection::new();
        sel.set([1, 2]);
        let tools = sync_transform_tools(&widgets, &sel);
        assert_eq!(tools.len(), 1);
        assert!(tools.contains_key(&1));
        assert!(!tools.contains_key(&2));
        assert!(!tools.contains_key(&3));
    }

    #[test]
    fn test_unit_scale_tool_matches_widget() {
        let w = widget(1);
        let tool = TransformHandle::for_widget(&w);
        assert_eq!(tool.position, w.position);
        assert_eq!(tool.size, w.size);
    }

    #[test]
    fn test_scaled_tool_covers_rendered_box() {
        let mut w = widget(1);
        w.scale = Vec2::new(2.0, 0.5);
        w.position = Point::new(250.0, 175.0);
        let tool = TransformHandle::for_widget(&w);
        assert!((tool.position.x - 100.0).abs() < 1e-9);
        assert!((tool.position.y - 250.0).abs() < 1e-9);
        assert!((tool.size.width - 600.0).abs() < 1e-9);
        assert!((tool.size.height - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_side_at() {
        let tool = TransformHandle::for_widget(&widget(1));
        assert_eq!(tool.side_at(Point::new(101.0, 99.0), 6.0), Some(SideType::LeftTop));
        assert_eq!(tool.side_at(Point::new(400.0, 250.0), 6.0), Some(SideType::Right));
        assert_eq!(tool.side_at(Point::new(250.0, 402.0), 6.0), Some(SideType::Bottom));
        assert_eq!(tool.side_at(Point::new(200.0, 200.0), 6.0), Some(SideType::Middle));
        assert_eq!(tool.side_at(Point::new(10.0, 10.0), 6.0), None);
    }

    #[test]
    fn test_hit_test_tools_prefers_grips() {
        let mut other = widget(2);
        other.position = Point::new(300.0, 300.0);
        let widgets = vec![widget(1), other];
        let mut sel = Selection::new();
        sel.set([1, 2]);
        let tools = sync_transform_tools(&widgets, &sel);
        // Bottom-right corner of widget 1 lies inside widget 2's body.
        assert_eq!(
            hit_test_tools(&widgets, &tools, Point::new(400.0, 400.0), HANDLE_HIT_TOLERANCE),
            Some((1, SideType::RightBottom))
        );
    }

    #[test]
    fn test_hit_test_tools_topmost_wins() {
        let mut left = widget(1);
        left.position = Point::ZERO;
        left.size = Size::new(100.0, 100.0);
        let mut right = widget(2);
        right.position = Point::new(100.0, 0.0);
        right.size = Size::new(100.0, 100.0);
        let mut sel = Selection::new();
        sel.set([1, 2]);

        // Widget 1's right grip and widget 2's left grip share (100, 50).
        let seam = Point::new(100.0, 50.0);
        let widgets = vec![left.clone(), right.clone()];
        let tools = sync_transform_tools(&widgets, &sel);
        for _ in 0..10 {
            assert_eq!(
                hit_test_tools(&widgets, &tools, seam, HANDLE_HIT_TOLERANCE),
                Some((2, SideType::Left))
            );
        }

        let widgets = vec![right, left];
        let tools = sync_transform_tools(&widgets, &sel);
        assert_eq!(
            hit_test_tools(&widgets, &tools, seam, HANDLE_HIT_TOLERANCE),
            Some((1, SideType::Right))
        );
    }
}
