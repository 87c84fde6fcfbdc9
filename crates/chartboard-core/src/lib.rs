//! Chartboard Core Library
//!
//! Platform-agnostic canvas state for the Chartboard dashboard editor: chart
//! widgets, selection, transform tools, zoom, split layout and the
//! drag-and-drop contracts that feed them.

pub mod camera;
pub mod canvas;
pub mod chart_host;
pub mod clipboard;
pub mod dnd;
pub mod editor;
pub mod input;
pub mod layout;
pub mod reorder;
pub mod selection;
pub mod settings;
pub mod transform;
pub mod widget;

pub use camera::{Camera, MAX_SCALE, MIN_SCALE};
pub use canvas::{Canvas, ChartView, GestureState};
pub use chart_host::{ChartHost, ChartRenderer};
pub use clipboard::Clipboard;
pub use dnd::{DragItem, DragItemKind, DragMonitor, DragSource, DropOutcome, DropTarget, PointerMonitor};
pub use editor::{Editor, Notification, NotificationLevel};
pub use input::{CanvasEvent, EventResponse, FocusTarget, KeyEvent, Modifiers, Shortcut};
pub use layout::{LayoutError, LayoutResult, SplitMode};
pub use reorder::{LayerRow, ReorderGesture};
pub use selection::{Selection, TransformHandle, TransformTools};
pub use settings::{EditorConfig, GlobalSettings, SerializableColor, SettingsPatch, ZoomType};
pub use transform::{HandleGeometry, MIN_HEIGHT, MIN_WIDTH, SideType, WidgetGeometry};
pub use widget::{
    ChartTemplate, ChartWidget, IdGenerator, WidgetError, WidgetId, WidgetMode, WidgetRegistry,
    WidgetResult, validate_widgets,
};
