// src/renderer.rs
use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke as EguiStroke};

use crate::canvas::Canvas;
use crate::stroke::Stroke;
use crate::raster::DEFAULT_LINE_WIDTH;

/// Paints the live canvas: finished strokes plus the one being drawn.
#[derive(Debug, Clone, Copy)]
pub struct CanvasRenderer {
    background: Color32,
    ink: Color32,
    line_width: f32,
}

impl Default for CanvasRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_WIDTH)
    }
}

impl CanvasRenderer {
    pub fn new(line_width: f32) -> Self {
        Self {
            background: Color32::WHITE,
            ink: Color32::BLACK,
            line_width,
        }
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Renders the canvas into `rect`
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with
    ///     rect (egui::Rect): Screen rectangle of the canvas; stroke points are relative to its corner
    ///     canvas (Canvas): The strokes to draw
    pub fn render(&self, painter: &Painter, rect: Rect, canvas: &Canvas) {
        painter.rect_filled(rect, 0.0, self.background);

        for stroke in canvas.strokes() {
            self.paint_stroke(painter, rect, stroke);
        }
        if let Some(current) = canvas.current_stroke() {
            self.paint_stroke(painter, rect, &current.to_stroke());
        }
    }

    fn paint_stroke(&self, painter: &Painter, rect: Rect, stroke: &Stroke) {
        let radius = self.line_width / 2.0;
        let screen_points: Vec<Pos2> = stroke.points().iter().map(|p| rect.min + p.to_vec2()).collect();
        let (Some(&first), Some(&last)) = (screen_points.first(), screen_points.last()) else {
            return;
        };

        if stroke.is_dot() {
            painter.circle_filled(first, radius, self.ink);
            return;
        }

        // egui lines have butt ends; cap both ends with a dot
        painter.circle_filled(first, radius, self.ink);
        painter.circle_filled(last, radius, self.ink);
        painter.add(Shape::line(
            screen_points,
            EguiStroke::new(self.line_width, self.ink),
        ));
    }
}
