use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::config::WhiteboardConfig;
use crate::shape::ShapeKind;

/// Every tool the toolbar offers. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pencil,
    Brush,
    Eraser,
    Text,
    Circle,
    Rectangle,
    Polygon,
    Grab,
    Fill,
}

impl Tool {
    pub const ALL: [Tool; 9] = [
        Tool::Pencil,
        Tool::Brush,
        Tool::Eraser,
        Tool::Text,
        Tool::Circle,
        Tool::Rectangle,
        Tool::Polygon,
        Tool::Grab,
        Tool::Fill,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Pencil => "pencil",
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
            Tool::Text => "text",
            Tool::Circle => "circle",
            Tool::Rectangle => "rectangle",
            Tool::Polygon => "polygon",
            Tool::Grab => "grab",
            Tool::Fill => "fill",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            Tool::Pencil => "✏ Pencil",
            Tool::Brush => "🖌 Brush",
            Tool::Eraser => "⌫ Eraser",
            Tool::Text => "T Text",
            Tool::Circle => "○ Circle",
            Tool::Rectangle => "▭ Rectangle",
            Tool::Polygon => "⬠ Polygon",
            Tool::Grab => "✋ Grab",
            Tool::Fill => "🪣 Fill",
        }
    }

    /// Tools that lay down a path while the pointer moves.
    pub fn is_freehand(self) -> bool {
        matches!(self, Tool::Pencil | Tool::Brush | Tool::Eraser)
    }

    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Polygon => Some(ShapeKind::Polygon),
            _ => None,
        }
    }

    pub fn cursor(self) -> egui::CursorIcon {
        match self {
            Tool::Grab => egui::CursorIcon::Grab,
            Tool::Text => egui::CursorIcon::Text,
            Tool::Fill | Tool::Pencil | Tool::Brush | Tool::Eraser => egui::CursorIcon::Default,
            Tool::Circle | Tool::Rectangle | Tool::Polygon => egui::CursorIcon::Crosshair,
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// User-chosen drawing state: tool, color and brush size.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSettings {
    tool: Tool,
    color: Color32,
    brush_size: f32,
    brush_min: f32,
    brush_max: f32,
    background: Color32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self::new(&WhiteboardConfig::default())
    }
}

impl ToolSettings {
    pub fn new(config: &WhiteboardConfig) -> Self {
        let config = config.clone().sanitized();
        Self {
            tool: Tool::default(),
            color: config.default_color(),
            brush_size: config.brush_size.clamp(config.brush_size_min, config.brush_size_max),
            brush_min: config.brush_size_min,
            brush_max: config.brush_size_max,
            background: config.background_color(),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            log::info!("Tool selected: {tool}");
            self.tool = tool;
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Alpha is dropped; everything is painted fully opaque.
    pub fn set_color(&mut self, color: Color32) {
        self.color = Color32::from_rgb(color.r(), color.g(), color.b());
    }

    pub fn brush_size(&self) -> f32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size.clamp(self.brush_min, self.brush_max);
    }

    pub fn brush_range(&self) -> std::ops::RangeInclusive<f32> {
        self.brush_min..=self.brush_max
    }

    /// Line width the active tool draws with. Pencil is always one pixel.
    pub fn stroke_width(&self) -> f32 {
        match self.tool {
            Tool::Pencil => 1.0,
            _ => self.brush_size,
        }
    }

    /// Color the active tool draws with. Eraser paints the background.
    pub fn stroke_color(&self) -> Color32 {
        match self.tool {
            Tool::Eraser => self.background,
            _ => self.color,
        }
    }
}
