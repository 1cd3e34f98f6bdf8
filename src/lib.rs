#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod history;
pub mod input;
pub mod panels;
pub mod picture;
pub mod renderer;
pub mod stroke;

pub use app::SketchApp;
pub use canvas::{Canvas, PixmapCanvas};
pub use config::CanvasConfig;
pub use controller::{ControllerState, DrawController, DrawSettings};
pub use error::{ConfigError, DrawError, ExportError};
pub use event::{DrawEvent, EventHandler, SubscriptionId};
pub use history::StrokeHistory;
pub use input::{CanvasInput, InputHandler};
pub use picture::PictureDetails;
pub use renderer::CanvasRenderer;
pub use stroke::{BlendMode, PaintStyle, PaintingStyle, Stroke, StrokeId};
