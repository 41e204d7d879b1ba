use egui::Pos2;

use crate::bounds::BoundsTracker;
use crate::input::InputEvent;
use crate::stroke::{MutableStroke, Stroke};

/// All strokes of one drawing session, plus the bounds that cover them.
///
/// Mutated only from the UI thread, in pointer-event order.
#[derive(Debug, Default)]
pub struct Canvas {
    strokes: Vec<Stroke>,
    current: Option<MutableStroke>,
    bounds: BoundsTracker,
    needs_redraw: bool,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke at `point`. An unfinished stroke is dropped.
    pub fn begin(&mut self, point: Pos2) {
        if self.current.is_some() {
            log::debug!("Discarding unfinished stroke");
        }
        self.current = Some(MutableStroke::starting_at(point));
        self.bounds.observe(point);
        self.needs_redraw = true;
    }

    /// Add `point` to the stroke in progress, if any.
    pub fn extend(&mut self, point: Pos2) {
        let Some(stroke) = &mut self.current else {
            return;
        };
        stroke.add_point(point);
        self.bounds.observe(point);
        self.needs_redraw = true;
    }

    /// Add `point` and seal the stroke in progress, if any.
    pub fn end(&mut self, point: Pos2) {
        let Some(mut stroke) = self.current.take() else {
            return;
        };
        stroke.add_point(point);
        self.bounds.observe(point);
        self.strokes.push(stroke.into_stroke());
        self.needs_redraw = true;
        log::debug!("Stroke finalized ({} total)", self.strokes.len());
    }

    /// Forget every stroke and the bounds.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.current = None;
        self.bounds.reset();
        self.needs_redraw = true;
    }

    /// Feed a pointer event. Events without a position are ignored.
    pub fn apply(&mut self, event: &InputEvent) {
        let Some(point) = event.position() else {
            log::debug!("Ignoring pointer event without position: {event:?}");
            return;
        };
        match event {
            InputEvent::PointerDown { .. } => self.begin(point),
            InputEvent::PointerMove { .. } => self.extend(point),
            InputEvent::PointerUp { .. } => self.end(point),
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn current_stroke(&self) -> Option<&MutableStroke> {
        self.current.as_ref()
    }

    pub fn bounds(&self) -> &BoundsTracker {
        &self.bounds
    }

    /// True if nothing was drawn, finished or not.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.current.is_none()
    }

    /// Returns whether the canvas changed since the last call.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
