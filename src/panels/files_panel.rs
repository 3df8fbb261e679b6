use egui::load::SizedTexture;

use crate::WhiteboardApp;

const CARD_WIDTH: f32 = 200.0;

/// The upload list. Entirely separate from the drawing surface.
pub fn files_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Files");
            ui.label("Drop files onto the window to upload them.");
            if ui
                .add_enabled(!app.files.files().is_empty(), egui::Button::new("Clear all"))
                .clicked()
            {
                app.files.clear();
            }
        });
        ui.separator();

        if app.files.files().is_empty() {
            ui.centered_and_justified(|ui| {
                ui.weak("No files uploaded.");
            });
            return;
        }

        let mut removed = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for file in app.files.files_mut() {
                    ui.group(|ui| {
                        ui.set_width(CARD_WIDTH);
                        ui.vertical(|ui| {
                            ui.strong(&file.name);
                            ui.small(format!("{} bytes", file.bytes.len()));
                            let id = file.id;
                            if let Some(texture) = file.preview(ctx) {
                                ui.add(
                                    egui::Image::from_texture(SizedTexture::from_handle(texture))
                                        .max_width(CARD_WIDTH),
                                );
                            }
                            if ui.small_button("Remove").clicked() {
                                removed = Some(id);
                            }
                        });
                    });
                }
            });
        });

        if let Some(id) = removed {
            app.files.remove(id);
        }
    });
}
