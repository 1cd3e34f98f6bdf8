use thiserror::Error;

/// Errors raised synchronously by history and controller operations.
///
/// None of these leave the history or the controller in a modified state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error("no size measurement is available for the canvas")]
    NotAttached,
    #[error("cannot finish a canvas of size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },
    #[error("nothing to redo")]
    EmptyRedo,
}

/// Errors from converting a finished picture into encoded image bytes.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to encode picture: {0}")]
    Encoding(#[from] image::ImageError),
    #[error("picture buffer does not match its {width}x{height} size")]
    BufferMismatch { width: u32, height: u32 },
    #[error("failed to write picture: {0}")]
    Write(#[from] std::io::Error),
    #[error("encoding worker stopped before producing a result")]
    WorkerLost,
}

/// Errors loading a [`crate::config::CanvasConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type DrawResult<T> = Result<T, DrawError>;
