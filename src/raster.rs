use std::io::Cursor;

use egui::{Rect, Vec2};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use tiny_skia::{Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

use crate::canvas::Canvas;
use crate::error::RasterError;
use crate::stroke::Stroke;

pub const DEFAULT_PADDING: f32 = 20.0;
pub const DEFAULT_MIN_SIZE: f32 = 100.0;
pub const DEFAULT_LINE_WIDTH: f32 = 3.0;

/// How a drawing is framed and stroked when it becomes an image
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterPolicy {
    /// Margin added around the drawing on every side, in canvas units
    pub padding: f32,
    /// Smallest allowed width or height before the frame falls back to a centered square
    pub min_size: f32,
    pub line_width: f32,
    /// Include the stroke still being dragged in the submitted image
    pub include_in_progress: bool,
    /// Output pixels per canvas unit
    pub scale: f32,
}

impl Default for RasterPolicy {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            min_size: DEFAULT_MIN_SIZE,
            line_width: DEFAULT_LINE_WIDTH,
            include_in_progress: false,
            scale: 1.0,
        }
    }
}

/// An opaque black-on-white bitmap of the drawing.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pixels: RgbImage,
    bounds: Rect,
}

impl RasterImage {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The canvas-space rectangle this image covers
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels.get_pixel(x, y).0
    }

    pub fn to_png(&self) -> Result<Vec<u8>, RasterError> {
        let mut bytes = Vec::new();
        self.pixels.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}

/// Renders canvas strokes into a [`RasterImage`]
#[derive(Clone, Copy, Debug, Default)]
pub struct Rasterizer {
    policy: RasterPolicy,
}

impl Rasterizer {
    pub fn new(policy: RasterPolicy) -> Self {
        Self { policy }
    }

    /// Frame for the image: the drawing plus padding, or a minimum-size square centered on the
    /// live canvas when the padded drawing is too small in either direction.
    pub fn target_bounds(&self, drawn: Rect, live_canvas_size: Vec2) -> Rect {
        let padded = drawn.expand(self.policy.padding);
        let min_size = self.policy.min_size;
        if padded.width() < min_size || padded.height() < min_size {
            let center = (live_canvas_size / 2.0).to_pos2();
            Rect::from_center_size(center, Vec2::splat(min_size))
        } else {
            padded
        }
    }

    /// Rasterize the canvas. Returns `None` if nothing has been drawn.
    ///
    /// The stroke in progress is only drawn when the policy asks for it; it is never sealed.
    pub fn render(&self, canvas: &Canvas, live_canvas_size: Vec2) -> Option<RasterImage> {
        if canvas.is_empty() {
            return None;
        }
        let drawn = canvas.bounds().current()?;
        let bounds = self.target_bounds(drawn, live_canvas_size);

        let scale = self.policy.scale;
        let width = ((bounds.width() * scale).round() as u32).max(1);
        let height = ((bounds.height() * scale).round() as u32).max(1);
        let mut pixmap = Pixmap::new(width, height)?;
        pixmap.fill(Color::WHITE);

        // Canvas space to image space: bounds' corner lands on the origin
        let transform = Transform::from_translate(-bounds.min.x, -bounds.min.y).post_scale(scale, scale);

        for stroke in canvas.strokes() {
            self.paint_stroke(&mut pixmap, stroke, transform);
        }
        if self.policy.include_in_progress {
            if let Some(current) = canvas.current_stroke() {
                self.paint_stroke(&mut pixmap, &current.to_stroke(), transform);
            }
        }

        log::debug!(
            "Rasterized {} strokes into {}x{} image",
            canvas.strokes().len(),
            width,
            height
        );
        Some(RasterImage {
            pixels: to_rgb(&pixmap)?,
            bounds,
        })
    }

    /// Connected segments with round caps and joins; a tap becomes a filled dot.
    fn paint_stroke(&self, pixmap: &mut Pixmap, stroke: &Stroke, transform: Transform) {
        let mut paint = Paint::default();
        paint.set_color(Color::BLACK);
        paint.anti_alias = true;

        let Some((first, rest)) = stroke.points().split_first() else {
            return;
        };

        if stroke.is_dot() {
            let radius = self.policy.line_width / 2.0;
            if let Some(dot) = PathBuilder::from_circle(first.x, first.y, radius) {
                pixmap.fill_path(&dot, &paint, FillRule::Winding, transform, None);
            }
            return;
        }

        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in rest {
            builder.line_to(point.x, point.y);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let line = tiny_skia::Stroke {
            width: self.policy.line_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &line, transform, None);
    }
}

// The pixmap is opaque, so its premultiplied channels are the plain RGB values
fn to_rgb(pixmap: &Pixmap) -> Option<RgbImage> {
    let rgb: Vec<u8> = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|rgba| [rgba[0], rgba[1], rgba[2]])
        .collect();
    RgbImage::from_raw(pixmap.width(), pixmap.height(), rgb)
}
