#![warn(clippy::all, rust_2018_idioms)]

use sketch_pad::{CanvasConfig, SketchApp};

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = CanvasConfig::from_env();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([320.0, 240.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Sketch Pad",
        native_options,
        Box::new(|cc| Ok(Box::new(SketchApp::new(cc, config)))),
    )
}
