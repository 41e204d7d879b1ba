use egui::{Color32, Sense, Stroke};

use crate::SketchApp;

/// The drawing surface: routes pointer input to the canvas and paints it.
pub fn canvas_panel(app: &mut SketchApp, ui: &mut egui::Ui) {
    let desired_size = egui::vec2(ui.available_width(), app.canvas_height);
    let (response, painter) = ui.allocate_painter(desired_size, Sense::drag());
    let canvas_rect = response.rect;

    // Handle input
    app.input.set_canvas_rect(canvas_rect);
    let canvas = app.controller.canvas_mut();
    for event in app.input.process_input(ui.ctx()) {
        canvas.apply(&event);
    }
    if canvas.take_redraw_request() {
        ui.ctx().request_repaint();
    }

    // Render the canvas
    app.renderer.render(&painter, canvas_rect, app.controller.canvas());
    painter.rect_stroke(canvas_rect, 0.0, Stroke::new(1.0, Color32::BLACK));

    app.canvas_size = canvas_rect.size();
}
