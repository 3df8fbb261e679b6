use egui::{Color32, Sense};

use crate::WhiteboardApp;

const BACKDROP: Color32 = Color32::from_gray(60);

pub fn central_panel(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let panel_rect = response.rect;
        painter.rect_filled(panel_rect, 0.0, BACKDROP);

        app.whiteboard.viewport_mut().set_origin(panel_rect.min);
        app.input.set_canvas_rect(panel_rect);

        // The text prompt is modal; the canvas ignores the pointer meanwhile.
        let events = app.input.process_input(ctx);
        if !app.whiteboard.state().is_awaiting_text() {
            for event in events {
                app.whiteboard.handle_event(event);
            }
        }

        if response.hovered() {
            ctx.set_cursor_icon(app.whiteboard.settings().tool().cursor());
        }

        app.renderer.render(ctx, &painter, &app.whiteboard);

        if app.whiteboard.state().is_active_gesture() || app.whiteboard.is_restore_pending() {
            ctx.request_repaint();
        }
    });
}
