#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use sketch_classifier::{AppConfig, SketchApp};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = AppConfig::load()?;
    // Network requests run here, off the UI thread
    let runtime = tokio::runtime::Runtime::new()?;
    let handle = runtime.handle().clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 680.0])
            .with_min_inner_size([320.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sketch Classifier",
        native_options,
        Box::new(move |cc| Ok(Box::new(SketchApp::new(cc, &config, handle)?))),
    )?;
    Ok(())
}
