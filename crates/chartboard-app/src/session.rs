//! Session scripts: a starting board plus a list of user actions to replay.

use chartboard_core::{
    Camera, CanvasEvent, ChartTemplate, ChartWidget, DragItem, DropOutcome, Editor, EditorConfig,
    GlobalSettings, KeyEvent, Notification, PointerMonitor, Selection, SettingsPatch, SplitMode,
    WidgetError, WidgetId,
};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// App errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid session script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid starting board: {0}")]
    Widgets(#[from] WidgetError),
    #[error("No session script given (usage: chartboard <session.json> | --shortcuts)")]
    MissingScript,
}

/// Result type for app operations.
pub type AppResult<T> = Result<T, AppError>;

/// One hover step of a layer-list drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerHover {
    pub index: usize,
    /// Screen bounds of the hovered row.
    pub row: Rect,
    pub pointer: Point,
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Pointer, wheel or click on the canvas.
    Canvas(CanvasEvent),
    Key(KeyEvent),
    /// Drag a chart preview from the component panel and drop it.
    DropChart { template: ChartTemplate, at: Point },
    /// Drag a split container from the component panel and drop it.
    DropSplit { mode: SplitMode },
    /// Split mode chosen from a menu rather than dropped.
    Split { mode: SplitMode },
    ChoosePane { pane: u32 },
    /// Drag layer row `from` across the given rows.
    LayerDrag { from: usize, hovers: Vec<LayerHover> },
    Highlight { id: Option<WidgetId> },
    Check { id: WidgetId, checked: bool },
    Duplicate { id: WidgetId },
    Trash { id: WidgetId },
    Zoom { scale: f64 },
    ZoomStep { zoom_in: bool },
    Settings(SettingsPatch),
    Viewport { origin: Point, size: Size },
}

/// A replayable editing session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub config: EditorConfig,
    pub settings: GlobalSettings,
    pub widgets: Vec<ChartWidget>,
    pub events: Vec<SessionEvent>,
}

impl Session {
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Run every event against a fresh editor.
    ///
    /// Fails before any event runs if the starting board is invalid.
    pub fn replay(self) -> AppResult<Editor> {
        let mut editor = Editor::new(self.config, self.settings);
        if !self.widgets.is_empty() {
            editor.canvas.replace_widgets(self.widgets)?;
        }
        for (step, event) in self.events.iter().enumerate() {
            log::debug!("Step {}: {:?}", step, event);
            let seen = editor.notifications().len();
            apply(&mut editor, event);
            for note in &editor.notifications()[seen..] {
                log::warn!("Step {}: {}", step, note.message);
            }
        }
        Ok(editor)
    }
}

fn apply(editor: &mut Editor, event: &SessionEvent) {
    match event {
        SessionEvent::Canvas(event) => {
            editor.handle_canvas_event(event);
        }
        SessionEvent::Key(key) => {
            if editor.handle_key(key).is_none() {
                log::debug!("Key {:?} not handled", key.key);
            }
        }
        SessionEvent::DropChart { template, at } => {
            let outcome = editor.drop_at(DragItem::ChartPreview(template.clone()), *at);
            if outcome == DropOutcome::Ignored {
                log::debug!("Chart drop at ({}, {}) ignored", at.x, at.y);
            }
        }
        SessionEvent::DropSplit { mode } => {
            editor.drop_at(DragItem::Split(*mode), Point::ZERO);
        }
        SessionEvent::Split { mode } => {
            editor.request_split(*mode);
        }
        SessionEvent::ChoosePane { pane } => editor.canvas.choose_split_pane(*pane),
        SessionEvent::LayerDrag { from, hovers } => {
            let mut monitor = PointerMonitor::with_item(DragItem::LayerItem { index: *from }, Point::ZERO);
            let mut gesture = None;
            for hover in hovers {
                monitor.move_to(hover.pointer);
                editor.hover_layer(&monitor, &mut gesture, hover.index, hover.row);
            }
        }
        SessionEvent::Highlight { id } => editor.canvas.highlight(*id),
        SessionEvent::Check { id, checked } => editor.canvas.set_checked(*id, *checked),
        SessionEvent::Duplicate { id } => {
            editor.canvas.duplicate(*id);
        }
        SessionEvent::Trash { id } => {
            editor.canvas.delete_widget(*id);
        }
        SessionEvent::Zoom { scale } => editor.canvas.zoom_to(*scale),
        SessionEvent::ZoomStep { zoom_in } => {
            editor.canvas.zoom_step(*zoom_in);
        }
        SessionEvent::Settings(patch) => editor.canvas.update_settings(patch.clone()),
        SessionEvent::Viewport { origin, size } => {
            editor.canvas.set_camera(Camera::new(*origin, *size));
        }
    }
}

/// Board state after a replay, as printed by the binary.
#[derive(Debug, Serialize)]
pub struct BoardReport<'a> {
    pub settings: &'a GlobalSettings,
    pub split: SplitMode,
    pub selection: &'a Selection,
    pub widgets: &'a [ChartWidget],
    pub notifications: Vec<Notification>,
}

impl<'a> BoardReport<'a> {
    pub fn new(editor: &'a mut Editor) -> Self {
        let notifications = editor.take_notifications();
        let editor: &'a Editor = editor;
        let canvas = &editor.canvas;
        Self {
            settings: canvas.settings(),
            split: canvas.split_mode(),
            selection: canvas.selection(),
            widgets: canvas.widgets(),
            notifications,
        }
    }

    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
