use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a stroke's pixels combine with what is already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BlendMode {
    /// Source-over: the stroke is painted on top.
    #[default]
    Normal,
    /// Clears everything under the stroke so the background shows through.
    Erase,
}

/// Whether a style outlines a path or floods an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaintingStyle {
    #[default]
    Stroke,
    /// Only used by the background.
    Fill,
}

/// Immutable paint settings, copied into every stroke when it begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    pub color: Color32,
    pub blend_mode: BlendMode,
    pub stroke_width: f32,
    pub style: PaintingStyle,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self::stroke(Color32::BLACK, 5.0)
    }
}

impl PaintStyle {
    /// A normal solid-color stroke style.
    pub fn stroke(color: Color32, stroke_width: f32) -> Self {
        Self {
            color,
            blend_mode: BlendMode::Normal,
            stroke_width: sanitize_width(stroke_width),
            style: PaintingStyle::Stroke,
        }
    }

    /// An erasing stroke style. The color is always transparent.
    pub fn eraser(stroke_width: f32) -> Self {
        Self {
            color: Color32::TRANSPARENT,
            blend_mode: BlendMode::Erase,
            stroke_width: sanitize_width(stroke_width),
            style: PaintingStyle::Stroke,
        }
    }

    /// A flat fill, used for the canvas background.
    pub fn fill(color: Color32) -> Self {
        Self {
            color,
            blend_mode: BlendMode::Normal,
            stroke_width: 0.0,
            style: PaintingStyle::Fill,
        }
    }

    pub fn is_eraser(&self) -> bool {
        self.blend_mode == BlendMode::Erase
    }
}

/// Negative and NaN widths collapse to zero.
pub(crate) fn sanitize_width(width: f32) -> f32 {
    if width.is_nan() { 0.0 } else { width.max(0.0) }
}

/// Stable identity of a stroke, preserved across undo and redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrokeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One continuous pointer drag and the style it was drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Pos2>,
    style: PaintStyle,
}

impl Stroke {
    /// Start a stroke at `start` with a snapshot of `style`.
    pub fn begin(start: Pos2, style: PaintStyle) -> Self {
        Self {
            id: StrokeId::new(),
            points: vec![start],
            style,
        }
    }

    pub(crate) fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn style(&self) -> &PaintStyle {
        &self.style
    }
}
