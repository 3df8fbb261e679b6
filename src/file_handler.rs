use std::sync::Arc;

use eframe::egui;
use uuid::Uuid;

/// A file the user dropped onto the file panel.
///
/// Kept apart from the drawing surface entirely; nothing here is ever painted
/// onto the canvas.
#[derive(Clone)]
pub struct UploadedFile {
    pub id: Uuid,
    pub name: String,
    pub mime: String,
    pub bytes: Arc<[u8]>,
    preview: Option<egui::TextureHandle>,
    preview_failed: bool,
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
            preview: None,
            preview_failed: false,
        }
    }

    /// Check if a file is an image based on MIME type or extension
    pub fn is_image(&self) -> bool {
        if !self.mime.is_empty() {
            return self.mime.starts_with("image/");
        }
        std::path::Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
    }

    /// Decoded preview texture, created on first use. `None` for non-images
    /// and images that fail to decode.
    pub fn preview(&mut self, ctx: &egui::Context) -> Option<&egui::TextureHandle> {
        if self.preview.is_none() && !self.preview_failed && self.is_image() {
            match image::load_from_memory(&self.bytes) {
                Ok(img) => {
                    let rgba = img.to_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    log::debug!("Decoded preview for {}: {}x{}", self.name, size[0], size[1]);
                    self.preview = Some(ctx.load_texture(
                        format!("upload_{}", self.id),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                }
                Err(err) => {
                    log::warn!("Failed to decode preview for {}: {}", self.name, err);
                    self.preview_failed = true;
                }
            }
        }
        self.preview.as_ref()
    }
}

/// Collects files dropped onto the window into the upload list
#[derive(Debug, Default)]
pub struct FileHandler {
    files: Vec<UploadedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut [UploadedFile] {
        &mut self.files
    }

    pub fn add(&mut self, file: UploadedFile) {
        log::info!("File uploaded: {} ({} bytes)", file.name, file.bytes.len());
        self.files.push(file);
    }

    pub fn remove(&mut self, id: Uuid) -> Option<UploadedFile> {
        let index = self.files.iter().position(|file| file.id == id)?;
        Some(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Take any newly dropped files from the UI context.
    /// Returns how many files were added.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> usize {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let before = self.files.len();
        for file in dropped {
            if let Some(upload) = Self::read_dropped_file(file) {
                self.add(upload);
            }
        }
        self.files.len() - before
    }

    fn read_dropped_file(file: egui::DroppedFile) -> Option<UploadedFile> {
        let name = if let Some(path) = &file.path {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        };

        if let Some(bytes) = file.bytes {
            return Some(UploadedFile::new(name, file.mime, bytes));
        }

        // For native platforms, we can load the file from the path
        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(path) = &file.path {
                return match std::fs::read(path) {
                    Ok(bytes) => Some(UploadedFile::new(name, file.mime, bytes)),
                    Err(err) => {
                        log::error!("Failed to read dropped file: {}: {}", path.display(), err);
                        None
                    }
                };
            }
        }

        log::warn!("Dropped file has no accessible data: {}", name);
        None
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, Id, LayerId, Order, TextStyle};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let text = ctx.input(|i| {
            let mut text = "Dropping files:\n".to_owned();
            for file in &i.raw.hovered_files {
                if let Some(path) = &file.path {
                    text += &format!("\n{}", path.display());
                } else {
                    text += "\n(Path not available)";
                }
            }
            text
        });

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            TextStyle::Heading.resolve(&ctx.style()),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_detection() {
        assert!(UploadedFile::new("a.bin", "image/png", Vec::<u8>::new()).is_image());
        assert!(UploadedFile::new("photo.JPG", "", Vec::<u8>::new()).is_image());
        assert!(!UploadedFile::new("notes.txt", "", Vec::<u8>::new()).is_image());
        assert!(!UploadedFile::new("x.png", "text/plain", Vec::<u8>::new()).is_image());
    }

    #[test]
    fn test_add_and_remove() {
        let mut handler = FileHandler::new();
        let file = UploadedFile::new("a.txt", "text/plain", b"hello".to_vec());
        let id = file.id;
        handler.add(file);
        handler.add(UploadedFile::new("b.txt", "text/plain", b"bye".to_vec()));

        let removed = handler.remove(id).unwrap();
        assert_eq!(removed.name, "a.txt");
        assert_eq!(handler.files().len(), 1);
        assert!(handler.remove(id).is_none());
    }

    #[test]
    fn test_broken_image_has_no_preview() {
        let ctx = egui::Context::default();
        let mut file = UploadedFile::new("broken.png", "image/png", vec![1u8, 2, 3]);
        assert!(file.preview(&ctx).is_none());
        assert!(file.preview(&ctx).is_none());
    }
}
