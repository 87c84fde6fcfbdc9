//! Canvas state and the pointer-driven transform controller.

use crate::camera::{Camera, step_zoom, wheel_zoom};
use crate::dnd::{DragItem, DragItemKind, DragMonitor, DropOutcome, DropTarget};
use crate::layout::{LayoutResult, SplitMode, check_transition};
use crate::reorder::ReorderGesture;
use crate::selection::{
    HANDLE_HIT_TOLERANCE, Selection, SplitPaneId, TransformTools, hit_test_tools, sync_transform_tools,
};
use crate::settings::{EditorConfig, GlobalSettings, SettingsPatch};
use crate::transform::{SideType, apply_resize, handle_to_widget_geometry};
use crate::widget::{
    ChartTemplate, ChartWidget, IdGenerator, WidgetError, WidgetId, WidgetMode, WidgetRegistry,
    WidgetResult, validate_widgets,
};
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State of the resize/move gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    Idle,
    /// A transform-tool grip is being dragged.
    Active(SideType),
}

/// Everything the renderer needs to draw one widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView<'a> {
    pub id: WidgetId,
    pub position: Point,
    pub size: Size,
    pub scale: Vec2,
    /// Stacking order; the collection index.
    pub z_index: usize,
    /// Drawn with the highlight mask.
    pub masked: bool,
    pub option: &'a Value,
}

/// The canvas: widget collection, selection and the gesture in progress.
///
/// Every change to the collection goes through a path that rebuilds the
/// registry and re-derives the transform tools before returning.
#[derive(Debug, Clone)]
pub struct Canvas {
    widgets: Vec<ChartWidget>,
    registry: WidgetRegistry,
    selection: Selection,
    tools: TransformTools,
    split: SplitMode,
    settings: GlobalSettings,
    config: EditorConfig,
    camera: Camera,
    ids: IdGenerator,
    gesture: GestureState,
    last_pointer: Point,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(EditorConfig::default(), GlobalSettings::default())
    }
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(config: EditorConfig, settings: GlobalSettings) -> Self {
        Self::with_registry(WidgetRegistry::new(), config, settings)
    }

    /// Create an empty canvas that indexes widgets through `registry`.
    pub fn with_registry(
        mut registry: WidgetRegistry,
        config: EditorConfig,
        settings: GlobalSettings,
    ) -> Self {
        registry.rebuild(&[]);
        Self {
            widgets: Vec::new(),
            registry,
            selection: Selection::new(),
            tools: TransformTools::new(),
            split: SplitMode::None,
            settings,
            config,
            camera: Camera::default(),
            ids: IdGenerator::new(),
            gesture: GestureState::Idle,
            last_pointer: Point::ZERO,
        }
    }

    // --- State access ---

    pub fn widgets(&self) -> &[ChartWidget] {
        &self.widgets
    }

    /// Look a widget up by id.
    pub fn widget(&self, id: WidgetId) -> Option<&ChartWidget> {
        self.registry.index_of(id).and_then(|idx| self.widgets.get(idx))
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Transform handles for the current selection.
    pub fn transform_tools(&self) -> &TransformTools {
        &self.tools
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn split_mode(&self) -> SplitMode {
        self.split
    }

    pub fn gesture(&self) -> GestureState {
        self.gesture
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn id_generator(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    // --- State replacement ---

    /// Replace the widget collection.
    ///
    /// Rejects duplicate ids, widgets below the minimum size and non-finite
    /// geometry. Outside a gesture every widget must also be at unit scale.
    /// On error the canvas is left as it was.
    pub fn replace_widgets(&mut self, widgets: Vec<ChartWidget>) -> WidgetResult<()> {
        let in_gesture = self.gesture != GestureState::Idle;
        if let Err(err) = validate_widgets(&widgets, in_gesture) {
            log::warn!("Widget collection rejected: {}", err);
            return Err(err);
        }
        self.widgets = widgets;
        self.collection_changed();
        Ok(())
    }

    /// Replace the selection.
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = WidgetId>) {
        self.selection.set(ids);
        self.sync_tools();
    }

    fn collection_changed(&mut self) {
        for widget in &self.widgets {
            self.ids.observe(widget.id);
        }
        self.registry.rebuild(&self.widgets);
        self.sync_tools();
    }

    fn sync_tools(&mut self) {
        self.tools = sync_transform_tools(&self.widgets, &self.selection);
    }

    /// Merge a settings update.
    pub fn update_settings(&mut self, patch: SettingsPatch) {
        self.settings.merge(patch);
    }

    // --- Pointer gesture ---

    /// Record the pointer position at the start of a press.
    pub fn pointer_down(&mut self, position: Point) {
        self.last_pointer = position;
    }

    /// Press on a transform-tool grip: starts a resize/move gesture.
    pub fn handle_pointer_down(&mut self, position: Point, side: SideType) {
        self.pointer_down(position);
        self.gesture = GestureState::Active(side);
        log::debug!("Transform gesture started ({:?})", side);
    }

    /// Drag step. Returns `true` if any widget changed.
    ///
    /// The delta is measured from the previous event, so every call moves the
    /// baseline to `position`.
    pub fn pointer_move(&mut self, position: Point) -> bool {
        let GestureState::Active(side) = self.gesture else {
            return false;
        };

        let zoom = self.settings.canvas_scale;
        let delta = (position - self.last_pointer) / zoom;
        self.last_pointer = position;

        let mut changed = false;
        for id in self.selection.ids().to_vec() {
            let Some(index) = self.registry.index_of(id) else {
                log::debug!("Widget {} vanished mid-gesture; skipping", id);
                continue;
            };
            let Some(tool) = self.tools.get(&id) else {
                continue;
            };

            let resized = apply_resize(side, delta, tool.geometry());
            if !resized.meets_minimum() {
                log::debug!(
                    "Resize of {} below minimum ({}x{}); ignored",
                    id,
                    resized.size.width,
                    resized.size.height
                );
                continue;
            }

            let widget = &mut self.widgets[index];
            let geometry = handle_to_widget_geometry(resized, widget.size);
            widget.position = geometry.position;
            widget.scale = geometry.scale;
            changed = true;
        }

        if changed {
            self.collection_changed();
        }
        changed
    }

    /// Release. Folds the gesture scale into the widgets' size.
    ///
    /// Returns `true` if any widget had a pending scale or offset to fold.
    /// Moves are applied as they happen, so a pure move or a press without
    /// movement ends the gesture and reports `false`.
    pub fn pointer_up(&mut self) -> bool {
        let GestureState::Active(side) = self.gesture else {
            return false;
        };
        self.gesture = GestureState::Idle;

        let mut changed = false;
        for id in self.selection.ids().to_vec() {
            let (Some(index), Some(tool)) = (self.registry.index_of(id), self.tools.get(&id)) else {
                continue;
            };
            let widget = &mut self.widgets[index];
            if widget.is_unit_scale() && widget.position == tool.position {
                continue;
            }
            widget.size = Size::new(
                widget.scale.x * widget.size.width,
                widget.scale.y * widget.size.height,
            );
            widget.position = tool.position;
            widget.scale = Vec2::new(1.0, 1.0);
            changed = true;
        }

        if changed {
            self.collection_changed();
            log::debug!("Transform gesture committed ({:?})", side);
        } else {
            log::debug!("Transform gesture ended without changes ({:?})", side);
        }
        changed
    }

    /// Zoom one step per wheel event. Returns `false` at the bounds.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        match wheel_zoom(self.settings.canvas_scale, delta_y, self.config.wheel_step) {
            Some(scale) => {
                self.update_settings(SettingsPatch::scale(scale));
                true
            }
            None => {
                log::debug!("Zoom at bound ({}); wheel ignored", self.settings.canvas_scale);
                false
            }
        }
    }

    /// Set the zoom from the slider.
    pub fn zoom_to(&mut self, scale: f64) {
        self.update_settings(SettingsPatch::scale(scale));
    }

    /// Slider plus (`true`) or minus (`false`) button.
    pub fn zoom_step(&mut self, zoom_in: bool) -> bool {
        let step = if zoom_in { self.config.slider_step } else { -self.config.slider_step };
        match step_zoom(self.settings.canvas_scale, step) {
            Some(scale) => {
                self.update_settings(SettingsPatch::scale(scale));
                true
            }
            None => false,
        }
    }

    // --- Clicks and selection ---

    /// Click on a widget. Shift-clicks leave the selection alone, ctrl-clicks
    /// extend it, plain clicks replace it.
    pub fn widget_click(&mut self, id: WidgetId, shift: bool, ctrl: bool) {
        if shift {
            return;
        }
        if ctrl {
            self.selection.add(id);
        } else {
            self.selection.select(id);
        }
        self.sync_tools();
    }

    /// Click on the background: clear selection, highlight and active pane.
    pub fn background_click(&mut self) {
        self.selection.reset();
        self.sync_tools();
    }

    /// Highlight a widget from the layer list, or clear the highlight.
    pub fn highlight(&mut self, id: Option<WidgetId>) {
        self.selection.set_highlighted(id);
    }

    /// Layer list checkbox: add to or remove from the selection.
    pub fn set_checked(&mut self, id: WidgetId, checked: bool) {
        if checked {
            self.selection.add(id);
        } else {
            self.selection.remove(id);
        }
        self.sync_tools();
    }

    // --- Collection edits ---

    /// Add a new chart. Its payload picks up the global palette.
    pub fn append_chart(
        &mut self,
        template: ChartTemplate,
        position: Point,
        size: Size,
    ) -> WidgetResult<WidgetId> {
        // Checked before an id is spent.
        ChartWidget::new(0, position, size, ChartTemplate::default()).validate()?;
        let id = self.ids.next_id().ok_or(WidgetError::IdsExhausted)?;
        let mut template = template;
        if let Value::Object(option) = &mut template.option {
            option.insert("color".to_string(), Value::from(self.settings.palette_hex()));
        }
        let mut widget = ChartWidget::new(id, position, size, template);
        widget.color_from_global = true;

        self.widgets.push(widget);
        self.collection_changed();
        log::info!("Added chart {} at ({}, {})", id, position.x, position.y);
        Ok(id)
    }

    /// Place a chart centered on a screen point. Ignored while split.
    pub fn drop_chart(&mut self, template: ChartTemplate, client: Point) -> Option<WidgetId> {
        if self.split.is_split() {
            log::debug!("Chart drop ignored: split layout active");
            return None;
        }
        let zoom = self.settings.canvas_scale;
        let center = self.camera.screen_to_canvas(client, self.settings.canvas_size, zoom);
        let size = self.config.drop_size;
        let position = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
        match self.append_chart(template, position, size) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("Chart drop failed: {}", err);
                None
            }
        }
    }

    /// Copy a widget next to itself and select the copy.
    pub fn duplicate(&mut self, id: WidgetId) -> Option<WidgetId> {
        let source = self.widget(id)?.clone();
        let Some(new_id) = self.ids.next_id() else {
            log::warn!("Cannot duplicate chart {}: {}", id, WidgetError::IdsExhausted);
            return None;
        };
        let mut copy = source.with_id(new_id).offset_by(self.config.duplicate_offset);
        copy.scale = Vec2::new(1.0, 1.0);
        copy.mode = WidgetMode::Absolute;

        self.widgets.push(copy);
        self.selection.select(new_id);
        self.collection_changed();
        log::info!("Duplicated chart {} as {}", id, new_id);
        Some(new_id)
    }

    /// Append already-built widgets and select exactly them.
    pub fn append_widgets(&mut self, widgets: Vec<ChartWidget>) -> Vec<WidgetId> {
        let ids: Vec<WidgetId> = widgets.iter().map(|w| w.id).collect();
        self.widgets.extend(widgets);
        self.selection.set(ids.iter().copied());
        self.collection_changed();
        ids
    }

    /// Remove every selected widget. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let before = self.widgets.len();
        let selection = &self.selection;
        self.widgets.retain(|w| !selection.contains(w.id));
        let removed = before - self.widgets.len();

        self.selection.clear();
        self.collection_changed();
        log::info!("Deleted {} chart(s)", removed);
        removed
    }

    /// Remove one widget (transform tool trash button) and clear the selection.
    pub fn delete_widget(&mut self, id: WidgetId) -> bool {
        let Some(index) = self.registry.index_of(id) else {
            return false;
        };
        self.widgets.remove(index);
        self.selection.clear();
        self.collection_changed();
        log::info!("Deleted chart {}", id);
        true
    }

    /// Layer-list hover during a reorder drag.
    pub fn hover_layer(
        &mut self,
        gesture: &mut ReorderGesture,
        hover_index: usize,
        row: Rect,
        pointer: Point,
    ) -> bool {
        let moved = gesture.hover(&mut self.widgets, hover_index, row, pointer);
        if moved {
            self.collection_changed();
        }
        moved
    }

    // --- Split layout ---

    /// Switch layout mode. Entering a split needs an empty canvas.
    pub fn set_split(&mut self, mode: SplitMode) -> LayoutResult<()> {
        if let Err(err) = check_transition(mode, self.widgets.len()) {
            log::warn!("{}", err);
            return Err(err);
        }
        if !mode.is_split() {
            self.selection.set_active_split_pane(None);
        }
        if self.split != mode {
            log::info!("Layout switched to {}", mode);
        }
        self.split = mode;
        Ok(())
    }

    /// Make a split pane the active one.
    pub fn choose_split_pane(&mut self, pane: SplitPaneId) {
        self.selection.set_active_split_pane(Some(pane));
    }

    // --- Rendering projection ---

    /// Widgets to draw, back to front. Empty while a split layout is shown.
    pub fn render_list(&self) -> Vec<ChartView<'_>> {
        if self.split.is_split() {
            return Vec::new();
        }
        let highlighted = self.selection.highlighted();
        self.widgets
            .iter()
            .enumerate()
            .map(|(z_index, w)| ChartView {
                id: w.id,
                position: w.position,
                size: w.size,
                scale: w.scale,
                z_index,
                masked: highlighted == Some(w.id),
                option: &w.template.option,
            })
            .collect()
    }

    /// Grip of a visible transform tool under a screen point.
    pub fn grip_at(&self, screen: Point) -> Option<SideType> {
        let tools = self.visible_tools()?;
        let point = self
            .camera
            .screen_to_canvas(screen, self.settings.canvas_size, self.settings.canvas_scale);
        hit_test_tools(&self.widgets, tools, point, HANDLE_HIT_TOLERANCE).map(|(_, side)| side)
    }

    /// Transform tools to draw. Empty while a split layout is shown.
    pub fn visible_tools(&self) -> Option<&TransformTools> {
        if self.split.is_split() {
            None
        } else {
            Some(&self.tools)
        }
    }
}

impl DropTarget for Canvas {
    fn accepts(&self, kind: DragItemKind) -> bool {
        matches!(kind, DragItemKind::ChartPreview | DragItemKind::Split)
    }

    fn drop(&mut self, monitor: &dyn DragMonitor) -> DropOutcome {
        match monitor.item() {
            Some(DragItem::ChartPreview(template)) => {
                let Some(client) = monitor.client_offset() else {
                    return DropOutcome::Ignored;
                };
                match self.drop_chart(template.clone(), client) {
                    Some(id) => DropOutcome::Placed(id),
                    None => DropOutcome::Ignored,
                }
            }
            Some(DragItem::Split(mode)) => {
                if monitor.did_drop() {
                    return DropOutcome::Ignored;
                }
                match self.set_split(*mode) {
                    Ok(()) => DropOutcome::SplitChanged(*mode),
                    Err(err) => DropOutcome::Rejected(err),
                }
            }
            _ => DropOutcome::Ignored,
        }
    }
}
