use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::WhiteboardApp;
use crate::tools::Tool;

pub fn tools_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let active = app.whiteboard.settings().tool();
            for tool in Tool::ALL {
                if ui.selectable_label(active == tool, tool.label()).clicked() {
                    app.whiteboard.set_tool(tool);
                }
            }
            ui.separator();

            // Brush size and color
            let mut brush_size = app.whiteboard.settings().brush_size();
            let range = app.whiteboard.settings().brush_range();
            if ui
                .add(egui::Slider::new(&mut brush_size, range).step_by(1.0).text("Size"))
                .changed()
            {
                app.whiteboard.settings_mut().set_brush_size(brush_size);
            }

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = app.whiteboard.settings().color();
                if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    app.whiteboard.settings_mut().set_color(color);
                }
            });
            ui.separator();

            // View
            ui.horizontal(|ui| {
                if ui.button("🔍+").on_hover_text("Zoom in").clicked() {
                    app.whiteboard.zoom_in();
                }
                if ui.button("🔍-").on_hover_text("Zoom out").clicked() {
                    app.whiteboard.zoom_out();
                }
                ui.label(format!("{:.0}%", app.whiteboard.viewport().zoom() * 100.0));
            });
            if ui.button("Reset view").clicked() {
                app.whiteboard.viewport_mut().reset();
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                if ui.add_enabled(app.whiteboard.can_undo(), egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(app.whiteboard.can_redo(), egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });

            if let Some(history) = app.whiteboard.history() {
                ui.horizontal(|ui| {
                    ui.small(format!("Undo stack: {}", history.undo_stack().len()));
                    ui.small(format!("Redo stack: {}", history.redo_stack().len()));
                });
                ui.small(format!("History size: {} KiB", history.byte_len() / 1024));
            }
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("💾 Export").clicked() {
                    app.export();
                }
                if ui.button("🗑 Clear").clicked() {
                    app.whiteboard.clear();
                }
            });

            ui.separator();
            ui.small(format!("State: {}", app.whiteboard.state().name()));
        });
}
