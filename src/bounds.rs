use egui::{Pos2, Rect};

/// Running bounding box of every point recorded on the canvas.
///
/// Empty until the first point is observed. After that it only grows until [`reset`](Self::reset).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundsTracker {
    bounds: Option<Rect>,
}

impl BoundsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grow the bounds to cover `point`.
    pub fn observe(&mut self, point: Pos2) {
        let point_rect = Rect::from_min_max(point, point);
        self.bounds = Some(match self.bounds {
            Some(bounds) => bounds.union(point_rect),
            None => point_rect,
        });
    }

    pub fn reset(&mut self) {
        self.bounds = None;
    }

    /// The minimal rectangle covering all observed points, `None` if nothing was observed.
    pub fn current(&self) -> Option<Rect> {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }
}
