//! Input events delivered to the editor.

use crate::transform::SideType;
use crate::widget::WidgetId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }
}

/// Pointer, wheel and click events on the canvas root.
///
/// Positions are screen (client) coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// Mouse pressed on the canvas background or a widget.
    PointerDown { position: Point },
    /// Mouse pressed on a grip of a transform tool.
    HandleDown { position: Point, side: SideType },
    PointerMove { position: Point },
    PointerUp { position: Point },
    Wheel { delta_y: f64 },
    /// Click that landed on a widget.
    WidgetClick {
        id: WidgetId,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Click that landed on the background.
    BackgroundClick,
}

/// What the host should do with the native event after dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress the browser default (page scroll for wheel events).
    pub prevent_default: bool,
    /// Keep the event from reaching outer handlers.
    pub stop_propagation: bool,
}

impl EventResponse {
    pub const PASS: EventResponse = EventResponse {
        prevent_default: false,
        stop_propagation: false,
    };

    pub fn stop() -> Self {
        Self {
            stop_propagation: true,
            ..Self::PASS
        }
    }

    pub fn prevent() -> Self {
        Self {
            prevent_default: true,
            ..Self::PASS
        }
    }
}

/// Where keyboard focus was when a key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusTarget {
    /// Nothing focused; the document body receives keys.
    #[default]
    Body,
    /// A text field or other editable control.
    Input,
}

/// Keyboard event type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub target: FocusTarget,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            target: FocusTarget::Body,
        }
    }

    pub fn in_input(mut self) -> Self {
        self.target = FocusTarget::Input;
        self
    }
}

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shortcut {
    Delete,
    Copy,
    Paste,
}

impl Shortcut {
    /// Map a key event to a shortcut. Events aimed at input fields map to nothing.
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        if event.target != FocusTarget::Body {
            return None;
        }
        let key = event.key.to_lowercase();
        match key.as_str() {
            "delete" => Some(Shortcut::Delete),
            "c" if event.modifiers.ctrl => Some(Shortcut::Copy),
            "v" if event.modifiers.ctrl => Some(Shortcut::Paste),
            _ => None,
        }
    }

    /// Whether the shortcut only applies to the free-form canvas.
    pub fn needs_freeform(self) -> bool {
        matches!(self, Shortcut::Copy | Shortcut::Paste)
    }

    /// Human readable key combination.
    pub fn keys(self) -> &'static str {
        match self {
            Shortcut::Delete => "Delete",
            Shortcut::Copy => "Ctrl+C",
            Shortcut::Paste => "Ctrl+V",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Shortcut::Delete => "Delete selected charts",
            Shortcut::Copy => "Copy selected charts",
            Shortcut::Paste => "Paste copied charts",
        }
    }

    pub const ALL: [Shortcut; 3] = [Shortcut::Delete, Shortcut::Copy, Shortcut::Paste];
}
