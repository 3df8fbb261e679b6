use std::io::Cursor;

use egui::{Color32, Pos2, Rect, Vec2};
use image::{ImageFormat, Rgba, RgbaImage};
use uuid::Uuid;

use crate::error::{Result, WhiteboardError};
use crate::fill::flood_fill;
use crate::shape::Shape;
use crate::text::TextRasterizer;

/// Convert a UI color to an opaque buffer pixel.
pub fn to_pixel(color: Color32) -> Rgba<u8> {
    Rgba([color.r(), color.g(), color.b(), 255])
}

/// The pixel buffer everything is painted into.
///
/// Coordinates are canvas pixels: `(x, y)` covers `[x, x + 1) x [y, y + 1)`.
#[derive(Debug, Clone)]
pub struct Surface {
    /// Distinguishes this buffer from any surface created before or after it.
    id: Uuid,
    pixels: RgbaImage,
    background: Rgba<u8>,
    /// Bumped on every mutation so viewers know when to re-upload.
    revision: u64,
}

impl Surface {
    /// A fresh surface cleared to `background`.
    pub fn new(width: u32, height: u32, background: Color32) -> Self {
        let background = to_pixel(background);
        Self {
            id: Uuid::new_v4(),
            pixels: RgbaImage::from_pixel(width.max(1), height.max(1), background),
            background,
            revision: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn background(&self) -> Color32 {
        let [r, g, b, _] = self.background.0;
        Color32::from_rgb(r, g, b)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        (x < self.width() && y < self.height()).then(|| *self.pixels.get_pixel(x, y))
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        let background = self.background;
        self.pixels.pixels_mut().for_each(|p| *p = background);
        self.touch();
    }

    /// Paint a round-capped line segment of the given width.
    pub fn stroke_segment(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let radius = (width / 2.0).max(0.5);
        let radius_sq = radius * radius;
        let color = to_pixel(color);

        let bounds = Rect::from_two_pos(from, to).expand(radius);
        let Some((x_range, y_range)) = self.clip(bounds) else {
            return;
        };
        for y in y_range {
            for x in x_range.clone() {
                let center = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                if distance_sq_to_segment(center, from, to) <= radius_sq {
                    self.pixels.put_pixel(x, y, color);
                }
            }
        }
        self.touch();
    }

    /// Paint every segment of a polyline. A single point becomes a dot.
    pub fn stroke_polyline(&mut self, points: &[Pos2], width: f32, color: Color32) {
        match points {
            [] => {}
            [point] => self.stroke_segment(*point, *point, width, color),
            _ => {
                for pair in points.windows(2) {
                    self.stroke_segment(pair[0], pair[1], width, color);
                }
            }
        }
    }

    /// Outline a shape; shapes are never filled.
    pub fn stroke_shape(&mut self, shape: &Shape, width: f32, color: Color32) {
        self.stroke_polyline(&shape.outline(), width, color);
    }

    pub fn fill_text(&mut self, rasterizer: &TextRasterizer, text: &str, origin: Pos2, size: f32, color: Color32) {
        rasterizer.draw(&mut self.pixels, text, origin, size, to_pixel(color));
        self.touch();
    }

    /// Flood fill from the pixel under `at`. Returns how many pixels changed.
    pub fn flood_fill(&mut self, at: Pos2, color: Color32) -> usize {
        if at.x < 0.0 || at.y < 0.0 {
            return 0;
        }
        let filled = flood_fill(&mut self.pixels, at.x as u32, at.y as u32, to_pixel(color));
        if filled > 0 {
            self.touch();
        }
        filled
    }

    /// Encode the whole buffer as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut bytes = Cursor::new(Vec::new());
        self.pixels
            .write_to(&mut bytes, ImageFormat::Png)
            .map_err(WhiteboardError::Encode)?;
        Ok(bytes.into_inner())
    }

    /// Replace the buffer contents with a decoded snapshot of the same size.
    pub fn replace_pixels(&mut self, pixels: RgbaImage) -> Result<()> {
        if pixels.dimensions() != self.pixels.dimensions() {
            return Err(WhiteboardError::SnapshotSize {
                expected: self.pixels.dimensions(),
                found: pixels.dimensions(),
            });
        }
        self.pixels = pixels;
        self.touch();
        Ok(())
    }

    /// Integer pixel ranges of `bounds` that fall inside the buffer.
    fn clip(&self, bounds: Rect) -> Option<(std::ops::Range<u32>, std::ops::Range<u32>)> {
        let x0 = bounds.min.x.floor().max(0.0) as i64;
        let y0 = bounds.min.y.floor().max(0.0) as i64;
        let x1 = (bounds.max.x.ceil() as i64).min(self.width() as i64);
        let y1 = (bounds.max.y.ceil() as i64).min(self.height() as i64);
        (x0 < x1 && y0 < y1).then(|| (x0 as u32..x1 as u32, y0 as u32..y1 as u32))
    }
}

fn distance_sq_to_segment(point: Pos2, from: Pos2, to: Pos2) -> f32 {
    let along = to - from;
    let length_sq = along.length_sq();
    let t = if length_sq > 0.0 {
        ((point - from).dot(along) / length_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    point.distance_sq(from + along * t)
}
