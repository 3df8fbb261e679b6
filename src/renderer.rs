// src/renderer.rs
use eframe::egui::{self, Color32, Pos2, Rect, TextureHandle, TextureOptions};
use uuid::Uuid;

use crate::shape::Shape;
use crate::surface::Surface;
use crate::whiteboard::Whiteboard;

/// Shows the whiteboard's surface on screen.
///
/// The surface is uploaded into a texture whenever its revision changes, then
/// painted through the viewport transform. Zoom and pan only affect this step;
/// the buffer itself is never scaled or moved.
#[derive(Default)]
pub struct Renderer {
    texture: Option<TextureHandle>,
    /// Surface id and revision the texture was last uploaded from.
    uploaded: Option<(Uuid, u64)>,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("has_texture", &self.texture.is_some())
            .field("uploaded", &self.uploaded)
            .finish()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload the surface if it changed since the last upload. A replaced
    /// surface always counts as changed, whatever its revision.
    ///
    /// Returns:
    ///     bool: True if a new texture upload happened
    pub fn sync_texture(&mut self, ctx: &egui::Context, surface: &Surface) -> bool {
        let key = (surface.id(), surface.revision());
        if self.texture.is_some() && self.uploaded == Some(key) {
            return false;
        }

        let image = egui::ColorImage::from_rgba_unmultiplied(
            [surface.width() as usize, surface.height() as usize],
            surface.image().as_raw(),
        );
        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                self.texture = Some(ctx.load_texture("whiteboard_surface", image, TextureOptions::NEAREST));
            }
        }
        self.uploaded = Some(key);
        true
    }

    /// Renders the canvas and any in-progress shape preview
    ///
    /// Args:
    ///     ctx (egui::Context): The egui context for the current frame
    ///     painter (egui::Painter): The painter to draw with
    ///     whiteboard (Whiteboard): The session being shown
    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, whiteboard: &Whiteboard) {
        let Some(surface) = whiteboard.surface() else {
            return;
        };
        self.sync_texture(ctx, surface);

        let viewport = whiteboard.viewport();
        let rect = viewport.canvas_rect(surface.size());
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        if let Some((kind, start, current)) = whiteboard.state().shape_drag() {
            let shape = Shape::from_drag(kind, start, current, whiteboard.config().polygon_sides);
            let points: Vec<Pos2> = shape
                .outline()
                .into_iter()
                .map(|p| viewport.canvas_to_screen(p))
                .collect();
            let settings = whiteboard.settings();
            painter.add(egui::Shape::line(
                points,
                egui::Stroke::new(settings.brush_size() * viewport.zoom(), settings.color()),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_uploaded_once_per_revision() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::new();
        let mut surface = Surface::new(8, 8, Color32::WHITE);

        assert!(renderer.sync_texture(&ctx, &surface));
        assert!(!renderer.sync_texture(&ctx, &surface));

        surface.clear();
        assert!(renderer.sync_texture(&ctx, &surface));
    }

    #[test]
    fn test_render_without_surface_is_noop() {
        let ctx = egui::Context::default();
        let painter = egui::Painter::new(
            ctx.clone(),
            egui::LayerId::background(),
            Rect::from_min_size(Pos2::ZERO, egui::vec2(100.0, 100.0)),
        );
        let whiteboard = Whiteboard::new(Default::default());
        let mut renderer = Renderer::new();

        renderer.render(&ctx, &painter, &whiteboard);
        assert!(renderer.texture.is_none());
    }

    #[test]
    fn test_replaced_surface_is_uploaded() {
        let ctx = egui::Context::default();
        let mut renderer = Renderer::new();
        let first = Surface::new(8, 8, Color32::WHITE);
        let second = Surface::new(16, 4, Color32::WHITE);
        assert_eq!(first.revision(), second.revision());

        assert!(renderer.sync_texture(&ctx, &first));
        assert!(renderer.sync_texture(&ctx, &second));
        assert_eq!(renderer.texture.as_ref().map(|t| t.size()), Some([16, 4]));
        assert!(!renderer.sync_texture(&ctx, &second));
    }
}
