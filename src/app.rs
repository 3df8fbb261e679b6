use crate::config::WhiteboardConfig;
use crate::file_handler::FileHandler;
use crate::input::InputHandler;
use crate::panels;
use crate::profile::Profile;
use crate::renderer::Renderer;
use crate::whiteboard::Whiteboard;

/// Which page of the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    File,
    #[default]
    Draw,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::File, Tab::Draw];

    pub fn label(self) -> &'static str {
        match self {
            Tab::File => "File",
            Tab::Draw => "Draw",
        }
    }
}

pub struct WhiteboardApp {
    pub(crate) whiteboard: Whiteboard,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    pub(crate) files: FileHandler,
    pub(crate) profile: Profile,
    pub(crate) active_tab: Tab,
    /// Text typed into the prompt so far.
    pub(crate) text_input: String,
}

impl Default for WhiteboardApp {
    fn default() -> Self {
        Self::with_config(WhiteboardConfig::default())
    }
}

impl WhiteboardApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>, config: WhiteboardConfig) -> Self {
        Self::with_config(config)
    }

    pub fn with_config(config: WhiteboardConfig) -> Self {
        let profile = config.profile.clone().unwrap_or_default();
        Self {
            whiteboard: Whiteboard::new(config),
            renderer: Renderer::new(),
            input: InputHandler::default(),
            files: FileHandler::new(),
            profile,
            active_tab: Tab::Draw,
            text_input: String::new(),
        }
    }

    pub fn whiteboard(&self) -> &Whiteboard {
        &self.whiteboard
    }

    pub fn whiteboard_mut(&mut self) -> &mut Whiteboard {
        &mut self.whiteboard
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            log::info!("Switched to {} tab", tab.label());
            self.active_tab = tab;
        }
    }

    /// The surface is created the first time the draw tab is shown.
    fn ensure_surface(&mut self) {
        if self.whiteboard.surface().is_none() {
            let config = self.whiteboard.config();
            let (width, height) = (config.canvas_width, config.canvas_height);
            self.whiteboard.initialize(width, height);
        }
    }

    pub fn undo(&mut self) {
        self.whiteboard.undo();
    }

    pub fn redo(&mut self) {
        self.whiteboard.redo();
    }

    /// Encode the canvas and hand it to the user as a PNG file.
    pub fn export(&mut self) {
        let Some(png) = self.whiteboard.export_png() else {
            return;
        };
        let file_name = self.whiteboard.config().export_file_name.clone();
        if let Err(err) = save_download(&png, &file_name) {
            log::warn!("Could not save {file_name}: {err:?}");
        } else {
            log::info!("Exported {file_name} ({} bytes)", png.len());
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        use egui::{Key, KeyboardShortcut, Modifiers};

        let redo_shift = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let redo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
        let export = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);

        let (do_redo, do_undo, do_export) = ctx.input_mut(|i| {
            let do_redo = i.consume_shortcut(&redo_shift) || i.consume_shortcut(&redo);
            (do_redo, i.consume_shortcut(&undo), i.consume_shortcut(&export))
        });
        if do_redo {
            self.redo();
        }
        if do_undo {
            self.undo();
        }
        if do_export {
            self.export();
        }
    }
}

impl eframe::App for WhiteboardApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::header(self, ctx);

        match self.active_tab {
            Tab::Draw => {
                self.ensure_surface();
                // Finish any undo/redo restore before this frame's input.
                self.whiteboard.settle();
                if !self.whiteboard.state().is_awaiting_text() {
                    self.handle_shortcuts(ctx);
                }
                panels::tools_panel(self, ctx);
                panels::central_panel(self, ctx);
                panels::text_prompt(self, ctx);
            }
            Tab::File => {
                self.files.check_for_dropped_files(ctx);
                self.files.preview_files_being_dropped(ctx);
                panels::files_panel(self, ctx);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_download(bytes: &[u8], file_name: &str) -> std::io::Result<()> {
    std::fs::write(file_name, bytes)
}

#[cfg(target_arch = "wasm32")]
fn save_download(bytes: &[u8], file_name: &str) -> Result<(), eframe::wasm_bindgen::JsValue> {
    use eframe::wasm_bindgen::{JsCast as _, JsValue};

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.unchecked_into();
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    web_sys::Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_created_on_first_draw() {
        let mut app = WhiteboardApp::with_config(WhiteboardConfig {
            canvas_width: 32,
            canvas_height: 16,
            ..Default::default()
        });
        assert!(app.whiteboard().surface().is_none());

        app.ensure_surface();
        let surface = app.whiteboard().surface().unwrap();
        assert_eq!((surface.width(), surface.height()), (32, 16));
    }

    #[test]
    fn test_profile_comes_from_config() {
        let app = WhiteboardApp::with_config(WhiteboardConfig {
            profile: Some(Profile::new("lin", "lin@example.com")),
            ..Default::default()
        });
        assert_eq!(app.profile.initial(), "L");
        assert_eq!(app.active_tab, Tab::Draw);
    }
}
