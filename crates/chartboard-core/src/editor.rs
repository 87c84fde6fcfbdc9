//! Editor facade: canvas plus keyboard, clipboard and user notifications.

use crate::canvas::Canvas;
use crate::clipboard::Clipboard;
use crate::dnd::{DragItem, DragMonitor, DropOutcome, PointerMonitor};
use crate::input::{CanvasEvent, EventResponse, KeyEvent, Shortcut};
use crate::layout::SplitMode;
use crate::reorder::ReorderGesture;
use crate::settings::{EditorConfig, GlobalSettings};
use crate::widget::{WidgetError, WidgetId};
use kurbo::{Point, Rect};
use serde::Serialize;

/// Severity of a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// A message for the user, e.g. a rejected layout change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }
}

/// The editing surface as the host application sees it.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    pub canvas: Canvas,
    clipboard: Clipboard,
    notifications: Vec<Notification>,
}

impl Editor {
    pub fn new(config: EditorConfig, settings: GlobalSettings) -> Self {
        Self {
            canvas: Canvas::new(config, settings),
            clipboard: Clipboard::new(),
            notifications: Vec::new(),
        }
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Pending notifications, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Dispatch a canvas event.
    pub fn handle_canvas_event(&mut self, event: &CanvasEvent) -> EventResponse {
        let canvas = &mut self.canvas;
        match *event {
            CanvasEvent::PointerDown { position } => match canvas.grip_at(position) {
                Some(side) => {
                    canvas.handle_pointer_down(position, side);
                    EventResponse::stop()
                }
                None => {
                    canvas.pointer_down(position);
                    EventResponse::PASS
                }
            },
            CanvasEvent::HandleDown { position, side } => {
                canvas.handle_pointer_down(position, side);
                EventResponse::stop()
            }
            CanvasEvent::PointerMove { position } => {
                canvas.pointer_move(position);
                EventResponse::PASS
            }
            CanvasEvent::PointerUp { .. } => {
                canvas.pointer_up();
                EventResponse::PASS
            }
            CanvasEvent::Wheel { delta_y } => {
                canvas.wheel(delta_y);
                EventResponse::prevent()
            }
            CanvasEvent::WidgetClick { id, modifiers } => {
                canvas.widget_click(id, modifiers.shift, modifiers.ctrl);
                EventResponse::stop()
            }
            CanvasEvent::BackgroundClick => {
                canvas.background_click();
                EventResponse::PASS
            }
        }
    }

    /// Handle a key press. Returns the shortcut that ran, if any.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<Shortcut> {
        let shortcut = Shortcut::from_key(event)?;
        if shortcut.needs_freeform() && self.canvas.split_mode().is_split() {
            log::debug!("{:?} ignored: split layout active", shortcut);
            return None;
        }
        match shortcut {
            Shortcut::Delete => {
                self.canvas.delete_selected();
            }
            Shortcut::Copy => {
                self.copy_selection();
            }
            Shortcut::Paste => {
                self.paste();
            }
        }
        Some(shortcut)
    }

    /// Snapshot the selected widgets. Returns how many were copied.
    pub fn copy_selection(&mut self) -> usize {
        let offset = self.canvas.config().duplicate_offset;
        let selected = self.canvas.selection().ids().to_vec();
        self.clipboard.copy(&selected, self.canvas.widgets(), offset)
    }

    /// Append a fresh copy of the clipboard and select it.
    pub fn paste(&mut self) -> Vec<WidgetId> {
        if self.clipboard.is_empty() {
            return Vec::new();
        }
        let Some(widgets) = self.clipboard.paste(self.canvas.id_generator()) else {
            log::warn!("Paste skipped: {}", WidgetError::IdsExhausted);
            return Vec::new();
        };
        let ids = self.canvas.append_widgets(widgets);
        log::info!("Pasted {} chart(s)", ids.len());
        ids
    }

    /// Switch layout mode, reporting a refusal to the user.
    pub fn request_split(&mut self, mode: SplitMode) -> bool {
        match self.canvas.set_split(mode) {
            Ok(()) => true,
            Err(err) => {
                self.notifications.push(Notification::warning(err.to_string()));
                false
            }
        }
    }

    /// Drop the monitored item on the canvas.
    pub fn drop_item(&mut self, monitor: &mut PointerMonitor) -> DropOutcome {
        let outcome = monitor.drop_on(&mut self.canvas);
        if let DropOutcome::Rejected(err) = &outcome {
            self.notifications.push(Notification::warning(err.to_string()));
        }
        outcome
    }

    /// Layer-list hover for a reorder drag carried by `monitor`.
    pub fn hover_layer(
        &mut self,
        monitor: &PointerMonitor,
        gesture: &mut Option<ReorderGesture>,
        hover_index: usize,
        row: Rect,
    ) -> bool {
        if gesture.is_none() {
            *gesture = monitor.item().and_then(ReorderGesture::from_item);
        }
        let (Some(gesture), Some(pointer)) = (gesture.as_mut(), monitor.client_offset()) else {
            return false;
        };
        self.canvas.hover_layer(gesture, hover_index, row, pointer)
    }

    /// Drop `item` at a screen point in one step.
    pub fn drop_at(&mut self, item: DragItem, client: Point) -> DropOutcome {
        let mut monitor = PointerMonitor::with_item(item, client);
        self.drop_item(&mut monitor)
    }
}
