//! Global canvas settings and editor configuration.

use crate::camera::clamp_zoom;
use kurbo::{Size, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => Some(Self::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
                255,
            )),
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    /// Format as `#rrggbb` (alpha is dropped).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

const DEFAULT_PALETTE: [&str; 8] = [
    "#c23531", "#2f4554", "#61a0a8", "#d48265", "#91c7ae", "#749f83", "#ca8622", "#bda29a",
];

/// How the finished dashboard is fitted to its display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomType {
    /// Scale uniformly so the width fills the display.
    #[default]
    Width,
    /// Scale uniformly so the height fills the display.
    Height,
    /// Stretch both axes independently.
    Full,
}

impl ZoomType {
    /// Scale factors that fit `canvas` into `display`.
    pub fn fit(self, canvas: Size, display: Size) -> Vec2 {
        let sx = display.width / canvas.width;
        let sy = display.height / canvas.height;
        match self {
            ZoomType::Width => Vec2::new(sx, sx),
            ZoomType::Height => Vec2::new(sy, sy),
            ZoomType::Full => Vec2::new(sx, sy),
        }
    }
}

/// Canvas-wide settings, independent of the widget collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettings {
    pub canvas_size: Size,
    /// Zoom factor, kept within `[MIN_SCALE, MAX_SCALE]`.
    pub canvas_scale: f64,
    pub is_border: bool,
    pub colors: Vec<SerializableColor>,
    pub zoom_type: ZoomType,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            canvas_size: Size::new(800.0, 600.0),
            canvas_scale: 1.0,
            is_border: true,
            colors: DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| SerializableColor::from_hex(hex))
                .collect(),
            zoom_type: ZoomType::default(),
        }
    }
}

/// Partial update for [`GlobalSettings`]; `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub canvas_size: Option<Size>,
    pub canvas_scale: Option<f64>,
    pub is_border: Option<bool>,
    pub colors: Option<Vec<SerializableColor>>,
    pub zoom_type: Option<ZoomType>,
}

impl SettingsPatch {
    pub fn scale(scale: f64) -> Self {
        Self {
            canvas_scale: Some(scale),
            ..Default::default()
        }
    }
}

impl GlobalSettings {
    /// Merge `patch` into the settings. The zoom is clamped to its bounds.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(size) = patch.canvas_size {
            self.canvas_size = size;
        }
        if let Some(scale) = patch.canvas_scale {
            self.canvas_scale = clamp_zoom(scale);
        }
        if let Some(is_border) = patch.is_border {
            self.is_border = is_border;
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(zoom_type) = patch.zoom_type {
            self.zoom_type = zoom_type;
        }
    }

    /// Palette as hex strings, in the form chart payloads expect.
    pub fn palette_hex(&self) -> Vec<String> {
        self.colors.iter().map(SerializableColor::to_hex).collect()
    }
}

/// Tunables for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Offset applied to duplicated and pasted widgets.
    pub duplicate_offset: Vec2,
    /// Size of a widget dropped from the component panel.
    pub drop_size: Size,
    /// Zoom change per wheel event.
    pub wheel_step: f64,
    /// Zoom change per slider plus/minus click.
    pub slider_step: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            duplicate_offset: Vec2::new(10.0, 10.0),
            drop_size: Size::new(300.0, 300.0),
            wheel_step: 0.05,
            slider_step: 0.3,
        }
    }
}
