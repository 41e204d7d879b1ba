use std::sync::Arc;

use egui::Vec2;
use tokio::runtime::Handle;

use crate::client::ClassifierClient;
use crate::config::AppConfig;
use crate::error::ClassifierResult;
use crate::input::InputHandler;
use crate::panels;
use crate::raster::Rasterizer;
use crate::renderer::CanvasRenderer;
use crate::submission::SubmissionController;

pub struct SketchApp {
    pub(crate) controller: SubmissionController,
    pub(crate) renderer: CanvasRenderer,
    pub(crate) input: InputHandler,
    pub(crate) labels: Vec<String>,
    pub(crate) canvas_height: f32,
    // Size of the canvas as laid out last frame
    pub(crate) canvas_size: Vec2,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        runtime: Handle,
    ) -> ClassifierResult<Self> {
        let client = ClassifierClient::new(config)?;
        log::info!("Classifier server: {}", client.base_url());

        let controller = SubmissionController::new(
            Arc::new(client),
            Rasterizer::new(config.raster),
            runtime,
        )
        .with_repaint(cc.egui_ctx.clone());

        Ok(Self {
            controller,
            renderer: CanvasRenderer::new(config.raster.line_width),
            input: InputHandler::new(egui::Rect::NOTHING),
            labels: config.labels.clone(),
            canvas_height: config.canvas_height,
            canvas_size: Vec2::ZERO,
        })
    }
}

impl eframe::App for SketchApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Sketch Classifier");
            panels::canvas_panel(self, ui);
            panels::controls_panel(self, ui);
        });
    }
}
