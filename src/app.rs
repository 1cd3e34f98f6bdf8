use std::path::PathBuf;
use std::sync::Arc;

use eframe::egui;
use futures::channel::oneshot;
use log::{info, warn};

use crate::config::CanvasConfig;
use crate::controller::{DrawController, DrawSettings};
use crate::error::ExportError;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::CanvasRenderer;

/// Key for the persisted pen settings. The drawing itself is never saved.
const SETTINGS_KEY: &str = "sketch_pad_settings";

pub struct SketchApp {
    controller: DrawController,
    renderer: CanvasRenderer,
    input: InputHandler,
    canvas_rect: Option<egui::Rect>,
    export_path: PathBuf,
    export_result: Option<oneshot::Receiver<String>>,
    status: Option<String>,
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: CanvasConfig) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<DrawSettings>(storage, SETTINGS_KEY))
            .map(|settings| DrawSettings {
                erase_mode: false,
                ..settings
            })
            .unwrap_or_else(|| config.draw_settings());

        Self::with_controller(DrawController::with_settings(settings), config.export_path)
    }

    pub fn with_controller(controller: DrawController, export_path: PathBuf) -> Self {
        Self {
            controller,
            renderer: CanvasRenderer::new(),
            input: InputHandler::new(egui::Rect::NOTHING),
            canvas_rect: None,
            export_path,
            export_result: None,
            status: None,
        }
    }

    pub fn controller(&self) -> &DrawController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut DrawController {
        &mut self.controller
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn redo(&mut self) {
        if let Err(err) = self.controller.redo() {
            warn!("Redo failed: {err}");
            self.status = Some(err.to_string());
        }
    }

    /// Freeze the drawing at the last measured canvas size.
    pub fn finish(&mut self) {
        let size = self.canvas_rect.map(|rect| rect.size());
        match self.controller.finish(size) {
            Ok(picture) => {
                self.status = Some(format!("Finished at {}x{}", picture.width(), picture.height()));
            }
            Err(err) => {
                warn!("Finish failed: {err}");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Encode the finished picture off the UI thread and write it to the
    /// configured export path.
    pub fn export_png(&mut self) {
        let Some(picture) = self.controller.picture() else {
            return;
        };
        let picture = Arc::clone(picture);
        let path = self.export_path.clone();
        let (tx, rx) = oneshot::channel();

        std::thread::spawn(move || {
            let message = match picture.write_png(&path) {
                Ok(()) => {
                    info!("Saved picture to {}", path.display());
                    format!("Saved {}", path.display())
                }
                Err(err) => {
                    warn!("Failed to save {}: {err}", path.display());
                    err.to_string()
                }
            };
            let _ = tx.send(message);
        });

        self.status = Some("Saving…".to_owned());
        self.export_result = Some(rx);
    }

    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        self.canvas_rect = Some(canvas_rect);
        self.input.set_canvas_rect(canvas_rect);
        for event in self.input.process_input(ctx) {
            event.apply(&mut self.controller);
        }
    }

    pub fn render_canvas(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: egui::Rect) {
        self.renderer.render(ctx, painter, rect, &self.controller);
    }

    fn poll_export(&mut self) {
        let Some(rx) = &mut self.export_result else {
            return;
        };
        match rx.try_recv() {
            Ok(Some(message)) => {
                self.status = Some(message);
                self.export_result = None;
            }
            Ok(None) => {}
            Err(_) => {
                self.status = Some(ExportError::WorkerLost.to_string());
                self.export_result = None;
            }
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, self.controller.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_export();
        tools_panel(self, ctx);
        central_panel(self, ctx);
        if self.export_result.is_some() {
            ctx.request_repaint();
        }
    }
}
