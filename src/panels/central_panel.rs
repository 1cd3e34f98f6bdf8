use eframe::egui;

use crate::SketchApp;

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let available_size = ui.available_size();
        let (response, painter) = ui.allocate_painter(available_size, egui::Sense::drag());
        let canvas_rect = response.rect;

        app.handle_input(ctx, canvas_rect);
        app.render_canvas(ctx, &painter, canvas_rect);
    });
}
