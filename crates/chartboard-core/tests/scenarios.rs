//! End-to-end editing scenarios driven through the public API.

use chartboard_core::transform::{apply_resize, handle_to_widget_geometry, widget_to_handle_geometry};
use chartboard_core::{
    CanvasEvent, ChartTemplate, ChartWidget, DragItem, Editor, KeyEvent, LayoutError, Modifiers,
    PointerMonitor, SideType, SplitMode, TransformHandle, WidgetId, WidgetRegistry,
};
use kurbo::{Point, Rect, Size, Vec2};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashSet;

fn chart(id: WidgetId, left: f64, top: f64, width: f64, height: f64) -> ChartWidget {
    ChartWidget::new(
        id,
        Point::new(left, top),
        Size::new(width, height),
        ChartTemplate::new("bar", json!({ "series": [{ "data": [1, 2, 3] }] })),
    )
}

fn editor_with(widgets: Vec<ChartWidget>) -> Editor {
    let mut editor = Editor::default();
    editor.canvas.replace_widgets(widgets).unwrap();
    editor
}

#[test]
fn test_right_grip_drag() {
    let mut editor = editor_with(vec![chart(1, 100.0, 100.0, 300.0, 300.0)]);
    editor.handle_canvas_event(&CanvasEvent::WidgetClick {
        id: 1,
        modifiers: Modifiers::NONE,
    });

    editor.handle_canvas_event(&CanvasEvent::HandleDown {
        position: Point::new(400.0, 250.0),
        side: SideType::Right,
    });
    editor.handle_canvas_event(&CanvasEvent::PointerMove {
        position: Point::new(450.0, 250.0),
    });

    let tool = editor.canvas.transform_tools()[&1];
    assert!((tool.size.width - 350.0).abs() < 1e-9);
    assert!((tool.size.height - 300.0).abs() < 1e-9);

    editor.handle_canvas_event(&CanvasEvent::PointerUp {
        position: Point::new(450.0, 250.0),
    });
    let widget = editor.canvas.widget(1).unwrap();
    assert!((widget.size.width - 350.0).abs() < 1e-9);
    assert!((widget.size.height - 300.0).abs() < 1e-9);
    assert!(widget.is_unit_scale());
    assert_eq!(widget.position, Point::new(100.0, 100.0));
}

#[test]
fn test_copy_then_paste_twice() {
    let mut editor = editor_with(vec![
        chart(1, 0.0, 0.0, 300.0, 300.0),
        chart(2, 400.0, 0.0, 300.0, 300.0),
        chart(3, 0.0, 400.0, 300.0, 300.0),
    ]);
    editor.canvas.set_selection([1, 2]);
    editor.handle_key(&KeyEvent::new("c", Modifiers::ctrl()));

    let first = editor.paste();
    assert_eq!(editor.canvas.selection().ids(), first.as_slice());
    let second = editor.paste();
    assert_eq!(editor.canvas.selection().ids(), second.as_slice());

    assert_eq!(editor.canvas.len(), 7);
    let new_ids: HashSet<_> = first.iter().chain(&second).copied().collect();
    assert_eq!(new_ids.len(), 4);
    assert!(new_ids.iter().all(|id| ![1, 2, 3].contains(id)));

    let all_ids: HashSet<_> = editor.canvas.widgets().iter().map(|w| w.id).collect();
    assert_eq!(all_ids.len(), 7);
}

#[test]
fn test_layer_drag_to_top() {
    let mut editor = editor_with(vec![
        chart(10, 0.0, 0.0, 100.0, 100.0),
        chart(20, 0.0, 0.0, 100.0, 100.0),
        chart(30, 0.0, 0.0, 100.0, 100.0),
        chart(40, 0.0, 0.0, 100.0, 100.0),
    ]);
    let row = |index: usize| {
        let top = index as f64 * 32.0;
        Rect::new(0.0, top, 240.0, top + 32.0)
    };

    let mut monitor = PointerMonitor::with_item(DragItem::LayerItem { index: 2 }, Point::ZERO);
    let mut gesture = None;
    for hover in [1, 0] {
        // Always above the hovered row's midpoint.
        monitor.move_to(Point::new(20.0, row(hover).y0 + 4.0));
        assert!(editor.hover_layer(&monitor, &mut gesture, hover, row(hover)));
    }

    let order: Vec<_> = editor.canvas.widgets().iter().map(|w| w.id).collect();
    assert_eq!(order, vec![30, 10, 20, 40]);
    for (index, widget) in editor.canvas.widgets().iter().enumerate() {
        assert_eq!(editor.canvas.registry().index_of(widget.id), Some(index));
    }
}

#[test]
fn test_minimum_size_keeps_widget_bit_identical() {
    let sides = [
        (SideType::Left, Vec2::new(280.0, 0.0)),
        (SideType::Right, Vec2::new(-280.0, 0.0)),
        (SideType::Top, Vec2::new(0.0, 260.0)),
        (SideType::Bottom, Vec2::new(0.0, -260.0)),
        (SideType::LeftTop, Vec2::new(10.0, 290.0)),
        (SideType::RightBottom, Vec2::new(-255.0, 0.0)),
    ];
    for (side, delta) in sides {
        let mut editor = editor_with(vec![chart(1, 100.0, 100.0, 300.0, 300.0)]);
        editor.canvas.set_selection([1]);
        let before = editor.canvas.widgets().to_vec();

        editor.canvas.handle_pointer_down(Point::ZERO, side);
        editor.canvas.pointer_move(Point::new(delta.x, delta.y));
        assert_eq!(editor.canvas.widgets(), before.as_slice(), "side {:?}", side);
    }
}

#[test]
fn test_zoom_never_leaves_bounds() {
    let mut editor = Editor::default();
    for _ in 0..400 {
        editor.handle_canvas_event(&CanvasEvent::Wheel { delta_y: -100.0 });
    }
    assert_eq!(editor.canvas.settings().canvas_scale, 10.0);
    for _ in 0..400 {
        editor.handle_canvas_event(&CanvasEvent::Wheel { delta_y: 100.0 });
    }
    assert_eq!(editor.canvas.settings().canvas_scale, 0.01);
}

#[test]
fn test_registry_matches_every_replacement() {
    let mut editor = Editor::default();
    for n in [5usize, 2, 0, 7] {
        let widgets: Vec<_> = (0..n)
            .map(|i| chart(100 + i as WidgetId * 3, 0.0, 0.0, 100.0, 100.0))
            .collect();
        editor.canvas.replace_widgets(widgets.clone()).unwrap();
        assert_eq!(editor.canvas.registry().len(), n);
        for (index, widget) in widgets.iter().enumerate() {
            assert_eq!(editor.canvas.registry().index_of(widget.id), Some(index));
        }
        assert_eq!(WidgetRegistry::from_widgets(&widgets).len(), n);
    }
}

#[test]
fn test_split_gate_leaves_board_alone() {
    let mut editor = editor_with(vec![chart(1, 0.0, 0.0, 300.0, 300.0)]);
    let before = editor.canvas.widgets().to_vec();

    let err = editor.canvas.set_split(SplitMode::Horizontal).unwrap_err();
    assert_eq!(
        err,
        LayoutError::FreeformWidgetsPresent {
            mode: SplitMode::Horizontal,
            count: 1
        }
    );
    assert_eq!(editor.canvas.split_mode(), SplitMode::None);
    assert_eq!(editor.canvas.widgets(), before.as_slice());
}

#[test]
fn test_unit_scale_handle_is_widget_box() {
    let widget = chart(1, 12.5, 40.0, 220.0, 130.0);
    let tool = TransformHandle::for_widget(&widget);
    assert_eq!(tool.position, widget.position);
    assert_eq!(tool.size, widget.size);
}

#[test]
fn test_resize_round_trip_for_every_side() {
    let widget = chart(1, 100.0, 80.0, 300.0, 200.0);
    let handle = widget_to_handle_geometry(widget.position, widget.size, widget.scale);
    let deltas = [Vec2::new(17.0, -9.0), Vec2::new(-30.0, 25.0)];

    for side in SideType::ALL {
        for delta in deltas {
            let resized = apply_resize(side, delta, handle);
            assert!(resized.meets_minimum());
            let geometry = handle_to_widget_geometry(resized, widget.size);
            let back = widget_to_handle_geometry(geometry.position, widget.size, geometry.scale);
            assert!((back.position.x - resized.position.x).abs() < 1e-9);
            assert!((back.position.y - resized.position.y).abs() < 1e-9);
            assert!((back.size.width - resized.size.width).abs() < 1e-9);
            assert!((back.size.height - resized.size.height).abs() < 1e-9);
        }
    }
}

#[test]
fn test_panel_drop_then_duplicate() {
    let mut editor = Editor::default();
    let outcome = editor.drop_at(
        DragItem::ChartPreview(ChartTemplate::new("pie", json!({ "series": [] }))),
        Point::new(640.0, 400.0),
    );
    let chartboard_core::DropOutcome::Placed(id) = outcome else {
        panic!("drop should place a chart, got {:?}", outcome);
    };

    let copy = editor.canvas.duplicate(id).unwrap();
    let original = editor.canvas.widget(id).unwrap().clone();
    let duplicate = editor.canvas.widget(copy).unwrap();
    assert_eq!(duplicate.position, original.position + Vec2::new(10.0, 10.0));
    assert_eq!(duplicate.template, original.template);
    assert_eq!(editor.canvas.selection().ids(), &[copy]);
}
