use std::sync::Arc;

use egui::Vec2;
use futures::channel::oneshot;
use tokio::runtime::Handle;
use uuid::Uuid;

use crate::canvas::Canvas;
use crate::client::Classifier;
use crate::error::{ClassifierError, ClassifierResult, RasterError};
use crate::raster::Rasterizer;

pub const IDLE_STATUS: &str = "Draw a shape...";
pub const NO_DRAWING_STATUS: &str = "Error getting drawing";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    Train { label: String },
    Predict,
}

struct PendingRequest {
    id: Uuid,
    kind: RequestKind,
    receiver: oneshot::Receiver<ClassifierResult<String>>,
}

/// Owns the canvas and drives train/predict submissions.
///
/// At most one request is in flight; while it is, `is_busy` is true and every action is refused.
/// Results come back over a oneshot channel and are applied by [`poll`](Self::poll) on the UI
/// thread.
pub struct SubmissionController {
    canvas: Canvas,
    rasterizer: Rasterizer,
    classifier: Arc<dyn Classifier>,
    runtime: Handle,
    repaint: Option<egui::Context>,
    selected_label: Option<String>,
    status: String,
    busy: bool,
    pending: Option<PendingRequest>,
}

impl SubmissionController {
    pub fn new(classifier: Arc<dyn Classifier>, rasterizer: Rasterizer, runtime: Handle) -> Self {
        Self {
            canvas: Canvas::new(),
            rasterizer,
            classifier,
            runtime,
            repaint: None,
            selected_label: None,
            status: IDLE_STATUS.to_owned(),
            busy: false,
            pending: None,
        }
    }

    /// Wake the UI when a background request finishes
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected_label.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn can_predict(&self) -> bool {
        !self.busy && self.selected_label.is_none()
    }

    /// Toggle the training label. Picking the selected label again deselects it.
    pub fn select_label(&mut self, label: &str) {
        if self.busy {
            return;
        }
        if self.selected_label.as_deref() == Some(label) {
            self.selected_label = None;
            self.status = IDLE_STATUS.to_owned();
        } else {
            self.selected_label = Some(label.to_owned());
            self.status = format!("Selected: {label}\nDraw and Submit");
        }
    }

    /// Reset the drawing and the label selection
    pub fn clear(&mut self) {
        if self.busy {
            return;
        }
        self.canvas.clear();
        self.selected_label = None;
        self.status = IDLE_STATUS.to_owned();
    }

    /// Upload the drawing as a training sample for the selected label
    pub fn train(&mut self, live_canvas_size: Vec2) {
        if self.busy {
            return;
        }
        let Some(label) = self.selected_label.clone() else {
            log::warn!("Train requested without a label");
            return;
        };
        let Some(png) = self.capture(live_canvas_size) else {
            return;
        };

        self.status = format!("Training as {label}...");
        let classifier = Arc::clone(&self.classifier);
        let task_label = label.clone();
        self.dispatch(RequestKind::Train { label }, async move {
            classifier
                .train(png, &task_label)
                .await
                .map(|response| response.summary())
        });
    }

    /// Ask the server what the drawing is
    pub fn predict(&mut self, live_canvas_size: Vec2) {
        if !self.can_predict() {
            return;
        }
        let Some(png) = self.capture(live_canvas_size) else {
            return;
        };

        self.status = "Predicting...".to_owned();
        let classifier = Arc::clone(&self.classifier);
        self.dispatch(RequestKind::Predict, async move {
            classifier.predict(png).await.map(|response| response.summary())
        });
    }

    // Rasterize and encode the drawing for upload
    fn snapshot(&self, live_canvas_size: Vec2) -> ClassifierResult<Vec<u8>> {
        let image = self
            .rasterizer
            .render(&self.canvas, live_canvas_size)
            .ok_or(RasterError::EmptyCanvas)?;
        Ok(image.to_png()?)
    }

    // Snapshot, reporting failure in the status line
    fn capture(&mut self, live_canvas_size: Vec2) -> Option<Vec<u8>> {
        match self.snapshot(live_canvas_size) {
            Ok(png) => Some(png),
            Err(err) => {
                log::warn!("Could not capture drawing: {err}");
                self.status = NO_DRAWING_STATUS.to_owned();
                None
            }
        }
    }

    fn dispatch<F>(&mut self, kind: RequestKind, request: F)
    where
        F: std::future::Future<Output = ClassifierResult<String>> + Send + 'static,
    {
        let id = Uuid::new_v4();
        let (sender, receiver) = oneshot::channel();
        let repaint = self.repaint.clone();
        log::info!("Submission {id}: {kind:?}");

        self.runtime.spawn(async move {
            let outcome = request.await;
            // The controller may be gone; nothing to report to then
            let _ = sender.send(outcome);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        self.busy = true;
        self.pending = Some(PendingRequest { id, kind, receiver });
    }

    /// Apply the result of a finished request, if any. Call once per frame.
    ///
    /// Returns true when a request completed during this call.
    pub fn poll(&mut self) -> bool {
        let Some(pending) = &mut self.pending else {
            return false;
        };
        let outcome = match pending.receiver.try_recv() {
            Ok(Some(outcome)) => outcome,
            Ok(None) => return false,
            Err(oneshot::Canceled) => Err(ClassifierError::TaskDropped),
        };
        let Some(PendingRequest { id, kind, .. }) = self.pending.take() else {
            return false;
        };
        self.finish(id, kind, outcome);
        true
    }

    fn finish(&mut self, id: Uuid, kind: RequestKind, outcome: ClassifierResult<String>) {
        self.busy = false;
        match (kind, outcome) {
            (RequestKind::Train { label }, Ok(message)) => {
                log::info!("Submission {id}: trained as {label}");
                self.canvas.clear();
                self.selected_label = None;
                self.status = message;
            }
            (RequestKind::Predict, Ok(message)) => {
                log::info!("Submission {id}: prediction received");
                self.status = message;
            }
            (RequestKind::Train { .. }, Err(err)) => {
                log::error!("Submission {id}: training failed: {err}");
                self.status = format!("Error training: {err}");
            }
            (RequestKind::Predict, Err(err)) => {
                log::error!("Submission {id}: prediction failed: {err}");
                self.status = format!("Error predicting: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{PredictionResponse, TrainingResponse};
    use async_trait::async_trait;
    use egui::{pos2, vec2};
    use std::time::Duration;

    struct StubClassifier;

    #[async_trait]
    impl Classifier for StubClassifier {
        async fn train(&self, _png: Vec<u8>, label: &str) -> ClassifierResult<TrainingResponse> {
            Ok(TrainingResponse {
                status: "ok".to_owned(),
                message: format!("Trained {label}"),
                total_samples: 1,
            })
        }

        async fn predict(&self, _png: Vec<u8>) -> ClassifierResult<PredictionResponse> {
            Err(ClassifierError::ServerError { status_code: 503 })
        }
    }

    struct CrashingClassifier;

    #[async_trait]
    impl Classifier for CrashingClassifier {
        async fn train(&self, _png: Vec<u8>, _label: &str) -> ClassifierResult<TrainingResponse> {
            panic!("classifier task crashed");
        }

        async fn predict(&self, _png: Vec<u8>) -> ClassifierResult<PredictionResponse> {
            panic!("classifier task crashed");
        }
    }

    fn controller() -> SubmissionController {
        SubmissionController::new(Arc::new(StubClassifier), Rasterizer::default(), Handle::current())
    }

    fn draw_line(controller: &mut SubmissionController) {
        let canvas = controller.canvas_mut();
        canvas.begin(pos2(50.0, 50.0));
        canvas.extend(pos2(150.0, 120.0));
        canvas.end(pos2(250.0, 200.0));
    }

    async fn settle(controller: &mut SubmissionController) {
        for _ in 0..200 {
            if controller.poll() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("request never finished");
    }

    #[tokio::test]
    async fn test_label_toggle() {
        let mut controller = controller();
        controller.select_label("Circle");
        assert_eq!(controller.selected_label(), Some("Circle"));
        assert_eq!(controller.status(), "Selected: Circle\nDraw and Submit");
        assert!(!controller.can_predict());

        controller.select_label("Circle");
        assert_eq!(controller.selected_label(), None);
        assert_eq!(controller.status(), IDLE_STATUS);
    }

    #[tokio::test]
    async fn test_clear_resets_drawing_and_label() {
        let mut controller = controller();
        controller.select_label("Triangle");
        draw_line(&mut controller);

        controller.clear();
        assert!(controller.canvas().is_empty());
        assert!(controller.canvas().bounds().is_empty());
        assert_eq!(controller.selected_label(), None);
        assert_eq!(controller.status(), IDLE_STATUS);
    }

    #[tokio::test]
    async fn test_empty_canvas_is_not_sent() {
        let mut controller = controller();
        controller.predict(vec2(400.0, 300.0));
        assert_eq!(controller.status(), NO_DRAWING_STATUS);
        assert!(!controller.is_busy());
    }

    #[tokio::test]
    async fn test_empty_canvas_snapshot_is_invalid_image() {
        let controller = controller();
        let err = controller.snapshot(vec2(400.0, 300.0)).unwrap_err();
        assert!(matches!(
            err,
            ClassifierError::InvalidImage(RasterError::EmptyCanvas)
        ));
    }

    #[tokio::test]
    async fn test_snapshot_is_png() {
        let mut controller = controller();
        draw_line(&mut controller);
        let png = controller.snapshot(vec2(400.0, 300.0)).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[tokio::test]
    async fn test_dropped_task_is_reported_and_clears_busy() {
        let mut controller = SubmissionController::new(
            Arc::new(CrashingClassifier),
            Rasterizer::default(),
            Handle::current(),
        );
        draw_line(&mut controller);

        controller.predict(vec2(400.0, 300.0));
        assert!(controller.is_busy());
        settle(&mut controller).await;

        assert!(!controller.is_busy());
        assert!(controller.status().starts_with("Error predicting:"));
        assert_eq!(
            controller.status(),
            "Error predicting: Request was dropped before it finished"
        );
    }

    #[tokio::test]
    async fn test_train_without_label_does_nothing() {
        let mut controller = controller();
        draw_line(&mut controller);
        controller.train(vec2(400.0, 300.0));
        assert!(!controller.is_busy());
        assert_eq!(controller.status(), IDLE_STATUS);
    }

    #[tokio::test]
    async fn test_successful_training_clears_canvas() {
        let mut controller = controller();
        controller.select_label("Square");
        draw_line(&mut controller);

        controller.train(vec2(400.0, 300.0));
        assert!(controller.is_busy());
        assert_eq!(controller.status(), "Training as Square...");

        // Busy: everything else is refused
        controller.clear();
        controller.select_label("Line");
        assert_eq!(controller.canvas().strokes().len(), 1);
        assert_eq!(controller.selected_label(), Some("Square"));

        settle(&mut controller).await;
        assert!(!controller.is_busy());
        assert_eq!(controller.status(), "Trained Square (Total: 1)");
        assert!(controller.canvas().is_empty());
        assert_eq!(controller.selected_label(), None);
    }

    #[tokio::test]
    async fn test_failed_prediction_keeps_drawing() {
        let mut controller = controller();
        draw_line(&mut controller);

        controller.predict(vec2(400.0, 300.0));
        assert_eq!(controller.status(), "Predicting...");
        settle(&mut controller).await;

        assert!(!controller.is_busy());
        assert_eq!(controller.status(), "Error predicting: Server returned status 503");
        assert_eq!(controller.canvas().strokes().len(), 1);
    }
}
