#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod bounds;
pub mod canvas;
pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod stroke;
pub mod submission;

pub use app::SketchApp;
pub use bounds::BoundsTracker;
pub use canvas::Canvas;
pub use client::{Classifier, ClassifierClient, PredictionResponse, TrainingResponse};
pub use config::AppConfig;
pub use error::{ClassifierError, ClassifierResult, ConfigError, RasterError};
pub use input::{InputEvent, InputHandler};
pub use raster::{RasterImage, RasterPolicy, Rasterizer};
pub use renderer::CanvasRenderer;
pub use stroke::{MutableStroke, Stroke};
pub use submission::SubmissionController;
