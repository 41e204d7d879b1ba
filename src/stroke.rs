use egui::Pos2;

// Finalized stroke, never changes once sealed
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    points: Vec<Pos2>,
}

// Stroke still being dragged out by the pointer
#[derive(Clone, Debug, Default)]
pub struct MutableStroke {
    points: Vec<Pos2>,
}

impl Stroke {
    pub fn new(points: Vec<Pos2>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A tap: every point sits on the same spot, so it renders as a dot rather than a line.
    pub fn is_dot(&self) -> bool {
        match self.points.split_first() {
            Some((first, rest)) => rest.iter().all(|p| p == first),
            None => false,
        }
    }
}

impl MutableStroke {
    // Start a stroke at the pointer-down position
    pub fn starting_at(point: Pos2) -> Self {
        Self { points: vec![point] }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    // Seal the stroke
    pub fn into_stroke(self) -> Stroke {
        Stroke::new(self.points)
    }

    // Snapshot for rendering without sealing
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.points.clone())
    }
}
