use ab_glyph::{Font as _, FontArc, GlyphId, PxScale, ScaleFont as _, point};
use egui::Pos2;
use image::{Rgba, RgbaImage};

use crate::error::{Result, WhiteboardError};

/// Rasterizes strings straight into an RGBA buffer.
#[derive(Clone)]
pub struct TextRasterizer {
    font: FontArc,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer").finish_non_exhaustive()
    }
}

impl TextRasterizer {
    pub fn new(font: FontArc) -> Self {
        Self { font }
    }

    /// Use the first proportional font egui ships with.
    pub fn from_egui_defaults() -> Result<Self> {
        let definitions = egui::FontDefinitions::default();
        let name = definitions
            .families
            .get(&egui::FontFamily::Proportional)
            .and_then(|names| names.first())
            .ok_or(WhiteboardError::MissingFont)?;
        let data = definitions
            .font_data
            .get(name)
            .ok_or(WhiteboardError::MissingFont)?;
        let font = FontArc::try_from_vec(data.font.to_vec()).map_err(|err| {
            log::warn!("Font {name} is unusable: {err}");
            WhiteboardError::MissingFont
        })?;
        Ok(Self::new(font))
    }

    /// Scale at which `size` pixels is one em, like a CSS `font-size`.
    ///
    /// `PxScale` measures ascent to descent, which is taller than the em box
    /// for most fonts.
    pub fn em_scale(&self, size: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                PxScale::from(size * self.font.height_unscaled() / units_per_em)
            }
            _ => PxScale::from(size),
        }
    }

    /// Draw `text` with its baseline starting at `origin`, blending glyph coverage
    /// over what is already there. `size` is the em size in pixels.
    /// Returns how many pixels were touched.
    pub fn draw(&self, buffer: &mut RgbaImage, text: &str, origin: Pos2, size: f32, color: Rgba<u8>) -> usize {
        let (width, height) = buffer.dimensions();
        let scale = self.em_scale(size);
        let scaled = self.font.as_scaled(scale);

        let mut touched = 0;
        let mut caret = origin.x;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars().filter(|c| !c.is_control()) {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, origin.y));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                if coverage <= 0.0 || x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
                    return;
                }
                let pixel = buffer.get_pixel_mut(x as u32, y as u32);
                *pixel = blend(*pixel, color, coverage.min(1.0));
                touched += 1;
            });
        }
        touched
    }
}

fn blend(under: Rgba<u8>, over: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let mix = |a: u8, b: u8| (a as f32 * (1.0 - coverage) + b as f32 * coverage).round() as u8;
    Rgba([
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
        mix(under[3], over[3]),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_extremes() {
        let white = Rgba([255, 255, 255, 255]);
        let red = Rgba([255, 0, 0, 255]);
        assert_eq!(blend(white, red, 1.0), red);
        assert_eq!(blend(white, red, 0.0), white);
        assert_eq!(blend(white, red, 0.5), Rgba([255, 128, 128, 255]));
    }

    #[test]
    fn test_draws_glyphs_near_baseline() {
        let rasterizer = TextRasterizer::from_egui_defaults().unwrap();
        let white = Rgba([255, 255, 255, 255]);
        let mut buffer = RgbaImage::from_pixel(120, 60, white);

        let touched = rasterizer.draw(&mut buffer, "Hi", Pos2::new(10.0, 40.0), 24.0, Rgba([0, 0, 0, 255]));

        assert!(touched > 0);
        let changed: Vec<_> = buffer
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != white)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(changed.iter().all(|&(x, y)| x >= 10 && y <= 41));
    }

    #[test]
    fn test_text_outside_buffer_is_clipped() {
        let rasterizer = TextRasterizer::from_egui_defaults().unwrap();
        let mut buffer = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
        let before = buffer.clone();

        rasterizer.draw(&mut buffer, "far away", Pos2::new(500.0, 500.0), 16.0, Rgba([0, 0, 0, 255]));

        assert_eq!(buffer, before);
    }

    #[test]
    fn test_size_is_em_size() {
        let rasterizer = TextRasterizer::from_egui_defaults().unwrap();
        let units_per_em = rasterizer.font.units_per_em().unwrap();
        let scale = rasterizer.em_scale(40.0);
        assert!((scale.y * units_per_em / rasterizer.font.height_unscaled() - 40.0).abs() < 1e-3);
        assert!(scale.y > 40.0);

        // Cap height of the default font is about 0.69 em
        let white = Rgba([255, 255, 255, 255]);
        let mut buffer = RgbaImage::from_pixel(80, 80, white);
        rasterizer.draw(&mut buffer, "H", Pos2::new(10.0, 60.0), 40.0, Rgba([0, 0, 0, 255]));
        let rows: Vec<u32> = buffer
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != white)
            .map(|(_, y, _)| y)
            .collect();
        let ink_height = rows.iter().max().unwrap() - rows.iter().min().unwrap() + 1;
        assert!(ink_height >= 26, "H is only {ink_height}px tall");
    }
}
