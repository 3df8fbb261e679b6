use egui::{Align2, Key};

use crate::WhiteboardApp;

/// Modal asking for the string the text tool should place.
pub fn text_prompt(app: &mut WhiteboardApp, ctx: &egui::Context) {
    if app.whiteboard.text_prompt().is_none() {
        return;
    }

    let mut answer: Option<Option<String>> = None;
    egui::Window::new("Enter text")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            let edit = ui.text_edit_singleline(&mut app.text_input);
            if !edit.has_focus() && !edit.lost_focus() {
                edit.request_focus();
            }
            let entered = edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            ui.horizontal(|ui| {
                if ui.button("OK").clicked() || entered {
                    answer = Some(Some(std::mem::take(&mut app.text_input)));
                }
                if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(Key::Escape)) {
                    answer = Some(None);
                }
            });
        });

    if let Some(text) = answer {
        app.text_input.clear();
        app.whiteboard.submit_text(text.as_deref());
    }
}
