use eframe::egui::{self, Color32, ColorImage, Rect, TextureHandle, TextureOptions};
use log::debug;

use crate::canvas::PixmapCanvas;
use crate::controller::DrawController;

/// Live view of a [`DrawController`] as an egui texture.
///
/// The drawing is re-rasterized only when the controller's revision or the
/// canvas size changes. A finished controller shows its frozen picture.
#[derive(Default)]
pub struct CanvasRenderer {
    texture: Option<TextureHandle>,
    /// (revision, width, height) of the current texture
    cached: Option<(u64, u32, u32)>,
}

impl std::fmt::Debug for CanvasRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasRenderer")
            .field("cached", &self.cached)
            .finish()
    }
}

impl CanvasRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize the controller at `width` x `height`.
    pub fn rasterize(controller: &DrawController, width: u32, height: u32) -> Option<ColorImage> {
        if let Some(picture) = controller.picture() {
            return Some(picture.to_color_image());
        }
        let mut canvas = PixmapCanvas::new(width, height)?;
        controller.render(&mut canvas, egui::vec2(width as f32, height as f32));
        Some(ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            &canvas.to_rgba8(),
        ))
    }

    fn needs_update(&self, key: (u64, u32, u32)) -> bool {
        self.texture.is_none() || self.cached != Some(key)
    }

    /// Paint the drawing into `rect`.
    pub fn render(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect, controller: &DrawController) {
        let width = rect.width().floor().max(0.0) as u32;
        let height = rect.height().floor().max(0.0) as u32;
        let key = (controller.revision(), width, height);

        if self.needs_update(key) {
            match Self::rasterize(controller, width, height) {
                Some(image) => {
                    debug!("Rasterized canvas revision {} at {width}x{height}", key.0);
                    match &mut self.texture {
                        Some(texture) => texture.set(image, TextureOptions::LINEAR),
                        None => {
                            self.texture = Some(ctx.load_texture("sketch_canvas", image, TextureOptions::LINEAR));
                        }
                    }
                    self.cached = Some(key);
                }
                None => return,
            }
        }

        if let Some(texture) = &self.texture {
            let tex_size = texture.size_vec2();
            let image_rect = Rect::from_min_size(rect.min, tex_size);
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }
}
