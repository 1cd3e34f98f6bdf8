use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;
use futures::Future;
use image::{ImageFormat, RgbaImage};
use log::debug;
use tiny_skia::Pixmap;

use crate::canvas::unpremultiply;
use crate::error::ExportError;

/// The frozen result of [`crate::DrawController::finish`].
///
/// Cheap to share; the pixels are never modified after creation.
#[derive(Debug, Clone)]
pub struct PictureDetails {
    pixmap: Arc<Pixmap>,
    width: u32,
    height: u32,
}

impl PictureDetails {
    pub(crate) fn new(pixmap: Pixmap) -> Self {
        let (width, height) = (pixmap.width(), pixmap.height());
        Self {
            pixmap: Arc::new(pixmap),
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Unpremultiplied RGBA8 pixels, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        unpremultiply(&self.pixmap)
    }

    pub fn to_rgba_image(&self) -> Result<RgbaImage, ExportError> {
        RgbaImage::from_raw(self.width, self.height, self.to_rgba8()).ok_or(
            ExportError::BufferMismatch {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// For showing the finished picture in an egui texture.
    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.to_rgba8(),
        )
    }

    /// Encode as PNG and write it to `path`, blocking the caller.
    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let path = path.as_ref();
        std::fs::write(path, png_bytes(&self.pixmap)?)?;
        debug!("Wrote picture to {}", path.display());
        Ok(())
    }

    /// Encode as PNG on a worker thread.
    ///
    /// Nothing happens until the future is polled. Dropping the future
    /// cancels the export; a worker that has not started yet will skip the
    /// encoding entirely.
    pub fn encode_png(&self) -> impl Future<Output = Result<Vec<u8>, ExportError>> + Send + use<> {
        let pixmap = Arc::clone(&self.pixmap);
        async move {
            let (tx, rx) = oneshot::channel();
            thread::spawn(move || {
                if tx.is_canceled() {
                    debug!("PNG export cancelled before encoding started");
                    return;
                }
                let _ = tx.send(png_bytes(&pixmap));
            });
            rx.await.map_err(|_| ExportError::WorkerLost)?
        }
    }
}

fn png_bytes(pixmap: &Pixmap) -> Result<Vec<u8>, ExportError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let image = RgbaImage::from_raw(width, height, unpremultiply(pixmap))
        .ok_or(ExportError::BufferMismatch { width, height })?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    debug!("Encoded {width}x{height} picture into {} PNG bytes", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    fn red_picture() -> PictureDetails {
        let mut pixmap = Pixmap::new(3, 2).unwrap();
        pixmap.fill(tiny_skia::Color::from_rgba8(255, 0, 0, 255));
        PictureDetails::new(pixmap)
    }

    #[test]
    fn test_rgba_image_matches_size() {
        let image = red_picture().to_rgba_image().unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.get_pixel(2, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_png_export_decodes() {
        let picture = red_picture();
        let bytes = block_on(picture.encode_png()).unwrap();

        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_write_png_to_file() {
        let path = std::env::temp_dir().join(format!("sketch_pad_{}.png", uuid::Uuid::new_v4()));
        red_picture().write_png(&path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_write_png_into_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join(format!("sketch_pad_missing_{}", uuid::Uuid::new_v4()))
            .join("out.png");
        let err = red_picture().write_png(&path).unwrap_err();
        assert!(matches!(err, ExportError::Write(_)));
    }

    #[test]
    fn test_export_can_run_repeatedly() {
        let picture = red_picture();
        let first = block_on(picture.encode_png()).unwrap();
        let second = block_on(picture.encode_png()).unwrap();
        assert_eq!(first, second);
    }
}
