use egui::{Align, Align2, Color32, FontId, Layout, Sense};

use crate::WhiteboardApp;
use crate::app::Tab;

const AVATAR_COLOR: Color32 = Color32::from_rgb(192, 132, 252);

pub fn header(app: &mut WhiteboardApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Whiteboard");
            ui.separator();

            for tab in Tab::ALL {
                if ui.selectable_label(app.active_tab == tab, tab.label()).clicked() {
                    app.set_active_tab(tab);
                }
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.vertical(|ui| {
                    ui.label(&app.profile.username);
                    ui.small(&app.profile.email);
                });

                let (rect, _) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), Sense::hover());
                ui.painter().circle_filled(rect.center(), 16.0, AVATAR_COLOR);
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    app.profile.initial(),
                    FontId::proportional(18.0),
                    Color32::WHITE,
                );
            });
        });
    });
}
