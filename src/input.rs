use egui::{Context, Pos2, Rect};

/// Pointer events the canvas understands.
///
/// Positions are canvas-local (origin at the canvas' top-left corner). A position can be
/// missing when the platform reports a press or release without a location; the canvas ignores
/// such events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed inside the canvas
    PointerDown { position: Option<Pos2> },
    /// Pointer moved while a stroke is being drawn
    PointerMove { position: Option<Pos2> },
    /// Primary button released after drawing
    PointerUp { position: Option<Pos2> },
}

impl InputEvent {
    pub fn position(&self) -> Option<Pos2> {
        match self {
            InputEvent::PointerDown { position }
            | InputEvent::PointerMove { position }
            | InputEvent::PointerUp { position } => *position,
        }
    }
}

/// Converts raw egui pointer input into canvas [`InputEvent`]s
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    canvas_rect: Rect,
    drawing: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            canvas_rect,
            drawing: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process this frame's pointer input and generate canvas events
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let pointer = &input.pointer;
            let pos = pointer.interact_pos();

            if pointer.primary_pressed() {
                let origin = pointer.press_origin().or(pos);
                if origin.is_some_and(|p| self.canvas_rect.contains(p)) {
                    self.drawing = true;
                    events.push(InputEvent::PointerDown {
                        position: origin.map(|p| self.to_local(p)),
                    });
                    self.last_pointer_pos = origin;
                }
            }

            if self.drawing && pointer.primary_down() && pos.is_some() && pos != self.last_pointer_pos {
                events.push(InputEvent::PointerMove {
                    position: pos.map(|p| self.to_local(p)),
                });
                self.last_pointer_pos = pos;
            }

            if self.drawing && pointer.primary_released() {
                // Touch screens may not report a position on lift
                let release = pos.or(self.last_pointer_pos);
                events.push(InputEvent::PointerUp {
                    position: release.map(|p| self.to_local(p)),
                });
                self.drawing = false;
                self.last_pointer_pos = None;
            }
        });

        events
    }
}
