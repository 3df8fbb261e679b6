use egui::{Pos2, Rect, Vec2};

use crate::config::WhiteboardConfig;

/// On-screen presentation of the canvas: a zoom factor and a pan offset.
///
/// The pixel buffer is never touched by this; it only decides where the canvas
/// lands on screen and maps pointer positions back into buffer coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f32,
    pan: Vec2,
    /// Screen position of the canvas's top-left corner before zoom/pan.
    origin: Pos2,
    zoom_min: f32,
    zoom_max: f32,
    zoom_step: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&WhiteboardConfig::default())
    }
}

impl Viewport {
    pub fn new(config: &WhiteboardConfig) -> Self {
        let config = config.clone().sanitized();
        Self {
            zoom: 1.0_f32.clamp(config.zoom_min, config.zoom_max),
            pan: Vec2::ZERO,
            origin: Pos2::ZERO,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            zoom_step: config.zoom_step,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom + self.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom - self.zoom_step);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.zoom_min, self.zoom_max);
        log::debug!("Zoom set to {:.2}", self.zoom);
    }

    /// Accumulate a screen-space drag delta into the pan offset.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0_f32.clamp(self.zoom_min, self.zoom_max);
        self.pan = Vec2::ZERO;
    }

    /// Where a canvas-space point is drawn on screen.
    pub fn canvas_to_screen(&self, canvas: Pos2) -> Pos2 {
        self.origin + self.pan + canvas.to_vec2() * self.zoom
    }

    /// Which canvas-space point sits under a screen position.
    pub fn screen_to_canvas(&self, screen: Pos2) -> Pos2 {
        ((screen - self.origin - self.pan) / self.zoom).to_pos2()
    }

    /// Screen rectangle covered by a canvas of the given pixel size.
    pub fn canvas_rect(&self, size: Vec2) -> Rect {
        Rect::from_min_max(
            self.canvas_to_screen(Pos2::ZERO),
            self.canvas_to_screen(size.to_pos2()),
        )
    }
}
