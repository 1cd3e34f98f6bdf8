use eframe::egui::{self, Slider};

use crate::SketchApp;

pub fn tools_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            let finished = app.controller().is_finished();

            ui.heading("Pen");
            ui.add_enabled_ui(!finished, |ui| {
                let mut settings = *app.controller().settings();

                ui.horizontal(|ui| {
                    ui.label("Color:");
                    if egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut settings.color,
                        egui::color_picker::Alpha::OnlyBlend,
                    )
                    .changed()
                    {
                        app.controller_mut().set_color(settings.color);
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Thickness:");
                    if ui.add(Slider::new(&mut settings.thickness, 1.0..=50.0)).changed() {
                        app.controller_mut().set_thickness(settings.thickness);
                    }
                });

                if ui.checkbox(&mut settings.erase_mode, "⌫ Eraser").changed() {
                    app.controller_mut().set_erase_mode(settings.erase_mode);
                }

                ui.horizontal(|ui| {
                    ui.label("Background:");
                    if egui::color_picker::color_edit_button_srgba(
                        ui,
                        &mut settings.background_color,
                        egui::color_picker::Alpha::OnlyBlend,
                    )
                    .changed()
                    {
                        app.controller_mut()
                            .set_background_color(settings.background_color);
                    }
                });
            });

            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                let can_undo = app.controller().can_undo();
                let can_redo = app.controller().can_redo();

                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.controller_mut().undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
                if ui.add_enabled(!finished, egui::Button::new("Clear")).clicked() {
                    app.controller_mut().clear();
                }
            });

            let history = app.controller().history();
            ui.horizontal(|ui| {
                ui.label(format!("Strokes: {}", history.strokes().len()));
                ui.label(format!("Redo stack size: {}", history.redo_len()));
            });

            ui.separator();

            if finished {
                ui.label("Drawing finished.");
                if ui.button("💾 Save PNG").clicked() {
                    app.export_png();
                }
            } else if ui.button("✔ Finish").clicked() {
                app.finish();
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
}
