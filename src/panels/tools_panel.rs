use egui::{Button, RichText, SelectableLabel};

use crate::SketchApp;

/// Label picker, submit/clear/predict buttons and the status line.
///
/// Every button is inert while a request is in flight.
pub fn controls_panel(app: &mut SketchApp, ui: &mut egui::Ui) {
    let busy = app.controller.is_busy();
    let canvas_size = app.canvas_size;

    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        ui.heading("Training");

        ui.horizontal_wrapped(|ui| {
            for label in &app.labels {
                let is_selected = app.controller.selected_label() == Some(label.as_str());
                if ui
                    .add_enabled(!busy, SelectableLabel::new(is_selected, label.as_str()))
                    .clicked()
                {
                    log::info!("Label selected from UI: {}", label);
                    app.controller.select_label(label);
                }
            }
        });

        if app.controller.selected_label().is_some()
            && ui.add_enabled(!busy, Button::new("Submit Training")).clicked()
        {
            app.controller.train(canvas_size);
        }

        ui.separator();

        ui.horizontal(|ui| {
            if ui.add_enabled(!busy, Button::new("Clear")).clicked() {
                app.controller.clear();
            }
            if ui
                .add_enabled(app.controller.can_predict(), Button::new("Predict"))
                .clicked()
            {
                app.controller.predict(canvas_size);
            }
        });

        if busy {
            ui.spinner();
        }
        ui.label(RichText::new(app.controller.status()).heading());
    });
}
