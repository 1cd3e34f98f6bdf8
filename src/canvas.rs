use egui::{Color32, Pos2, Rect};
use tiny_skia::{FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Transform};

use crate::stroke::{BlendMode, PaintStyle};

/// A drawing surface the stroke history can paint onto.
pub trait Canvas {
    /// Draw a polyline through `points` with `style`.
    fn draw_stroke(&mut self, points: &[Pos2], style: &PaintStyle);

    /// Fill `rect` with `style`, but only where the surface is still
    /// transparent, so it lands behind everything already drawn.
    fn fill_behind(&mut self, rect: Rect, style: &PaintStyle);
}

/// Raster surface backed by a tiny-skia pixmap.
pub struct PixmapCanvas {
    pixmap: Pixmap,
}

impl PixmapCanvas {
    /// Returns `None` for zero-sized or oversized surfaces.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Pixmap::new(width, height).map(|pixmap| Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    /// Unpremultiplied RGBA8 pixels, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        unpremultiply(&self.pixmap)
    }

    /// Unpremultiplied color of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color32> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            Color32::from_rgba_unmultiplied(c.red(), c.green(), c.blue(), c.alpha())
        })
    }
}

pub(crate) fn unpremultiply(pixmap: &Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

fn paint_for(style: &PaintStyle) -> Paint<'static> {
    let [r, g, b, a] = style.color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint.blend_mode = match style.blend_mode {
        BlendMode::Normal => tiny_skia::BlendMode::SourceOver,
        BlendMode::Erase => tiny_skia::BlendMode::Clear,
    };
    paint
}

impl Canvas for PixmapCanvas {
    fn draw_stroke(&mut self, points: &[Pos2], style: &PaintStyle) {
        let paint = paint_for(style);

        match points {
            [] => {}
            // A tap leaves a round dot as wide as the pen.
            [dot] => {
                let radius = (style.stroke_width / 2.0).max(0.5);
                if let Some(path) = PathBuilder::from_circle(dot.x, dot.y, radius) {
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            [first, rest @ ..] => {
                let mut pb = PathBuilder::new();
                pb.move_to(first.x, first.y);
                for p in rest {
                    pb.line_to(p.x, p.y);
                }
                let Some(path) = pb.finish() else {
                    return;
                };

                let stroke = tiny_skia::Stroke {
                    width: style.stroke_width,
                    line_cap: LineCap::Round,
                    line_join: LineJoin::Round,
                    ..Default::default()
                };
                self.pixmap
                    .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
    }

    fn fill_behind(&mut self, rect: Rect, style: &PaintStyle) {
        let Some(rect) = tiny_skia::Rect::from_xywh(rect.min.x, rect.min.y, rect.width(), rect.height())
        else {
            return;
        };
        let mut paint = paint_for(style);
        paint.blend_mode = tiny_skia::BlendMode::DestinationOver;
        self.pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sized_canvas_is_rejected() {
        assert!(PixmapCanvas::new(0, 10).is_none());
        assert!(PixmapCanvas::new(10, 0).is_none());
        assert!(PixmapCanvas::new(4, 4).is_some());
    }

    #[test]
    fn test_fill_behind_keeps_existing_pixels() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas.draw_stroke(
            &[Pos2::new(0.0, 10.0), Pos2::new(20.0, 10.0)],
            &PaintStyle::stroke(Color32::RED, 4.0),
        );
        canvas.fill_behind(
            Rect::from_min_size(Pos2::ZERO, egui::vec2(20.0, 20.0)),
            &PaintStyle::fill(Color32::WHITE),
        );

        assert_eq!(canvas.pixel(10, 10), Some(Color32::RED));
        assert_eq!(canvas.pixel(10, 2), Some(Color32::WHITE));
    }

    #[test]
    fn test_eraser_clears_pixels() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas.draw_stroke(
            &[Pos2::new(0.0, 10.0), Pos2::new(20.0, 10.0)],
            &PaintStyle::stroke(Color32::BLUE, 6.0),
        );
        canvas.draw_stroke(
            &[Pos2::new(10.0, 0.0), Pos2::new(10.0, 20.0)],
            &PaintStyle::eraser(6.0),
        );

        assert_eq!(canvas.pixel(10, 10), Some(Color32::TRANSPARENT));
        assert_eq!(canvas.pixel(2, 10), Some(Color32::BLUE));
    }

    #[test]
    fn test_single_point_draws_a_dot() {
        let mut canvas = PixmapCanvas::new(20, 20).unwrap();
        canvas.draw_stroke(&[Pos2::new(10.0, 10.0)], &PaintStyle::stroke(Color32::BLACK, 8.0));

        assert_eq!(canvas.pixel(10, 10), Some(Color32::BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(Color32::TRANSPARENT));
    }
}
