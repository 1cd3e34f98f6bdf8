use egui::{Pos2, Rect, Vec2};
use log::{debug, info};

use crate::canvas::Canvas;
use crate::error::{DrawError, DrawResult};
use crate::stroke::{PaintStyle, Stroke};

/// Committed strokes, the redo stack and the in-progress drag.
///
/// The stroke being dragged is already part of the committed sequence (it is
/// always the last entry) but it is not undoable and is not counted by
/// [`StrokeHistory::has_strokes`] until the drag ends.
#[derive(Debug, Clone)]
pub struct StrokeHistory {
    /// Paint order, earliest first
    strokes: Vec<Stroke>,
    /// Strokes removed by undo, most recent on top
    redo_stack: Vec<Stroke>,
    in_drag: bool,
    paint: PaintStyle,
    background: PaintStyle,
}

impl Default for StrokeHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeHistory {
    /// Empty history with the default pen and a transparent background.
    pub fn new() -> Self {
        Self {
            strokes: Vec::new(),
            redo_stack: Vec::new(),
            in_drag: false,
            paint: PaintStyle::default(),
            background: PaintStyle::fill(egui::Color32::TRANSPARENT),
        }
    }

    /// Start a stroke at `point` with the current paint. Returns false if a
    /// stroke is already being dragged.
    pub fn begin(&mut self, point: Pos2) -> bool {
        if self.in_drag {
            debug!("Ignoring begin at {point:?}: a stroke is already active");
            return false;
        }
        let stroke = Stroke::begin(point, self.paint);
        debug!("Stroke {} started at {point:?}", stroke.id());
        self.strokes.push(stroke);
        self.in_drag = true;
        true
    }

    /// Append `point` to the active stroke.
    pub fn extend(&mut self, point: Pos2) -> bool {
        if !self.in_drag {
            return false;
        }
        match self.strokes.last_mut() {
            Some(stroke) => {
                stroke.add_point(point);
                true
            }
            None => false,
        }
    }

    /// Finish the active stroke. It stays in the committed sequence.
    pub fn end(&mut self) {
        if self.in_drag {
            if let Some(stroke) = self.strokes.last() {
                debug!("Stroke {} ended with {} points", stroke.id(), stroke.points().len());
            }
        }
        self.in_drag = false;
    }

    /// Move the most recent stroke onto the redo stack.
    pub fn undo(&mut self) -> bool {
        if self.in_drag {
            debug!("Ignoring undo while dragging");
            return false;
        }
        match self.strokes.pop() {
            Some(stroke) => {
                info!("Undo stroke {}", stroke.id());
                self.redo_stack.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Move the most recently undone stroke back on top of the drawing.
    ///
    /// Does nothing while a stroke is being dragged, since the active stroke
    /// must remain the last one.
    pub fn redo(&mut self) -> DrawResult<bool> {
        if self.redo_stack.is_empty() {
            return Err(DrawError::EmptyRedo);
        }
        if self.in_drag {
            debug!("Ignoring redo while dragging");
            return Ok(false);
        }
        if let Some(stroke) = self.redo_stack.pop() {
            info!("Redo stroke {}", stroke.id());
            self.strokes.push(stroke);
        }
        Ok(true)
    }

    /// Drop every stroke, including the redo stack.
    pub fn clear(&mut self) -> bool {
        if self.in_drag {
            debug!("Ignoring clear while dragging");
            return false;
        }
        info!(
            "Clearing {} strokes and {} redoable strokes",
            self.strokes.len(),
            self.redo_stack.len()
        );
        self.strokes.clear();
        self.redo_stack.clear();
        true
    }

    /// Style used by the next stroke. Existing strokes keep their own.
    pub fn set_paint(&mut self, style: PaintStyle) {
        self.paint = style;
    }

    pub fn set_background(&mut self, style: PaintStyle) {
        self.background = style;
    }

    /// Paint every stroke in drawing order, then the background behind them.
    pub fn render(&self, canvas: &mut dyn Canvas, size: Vec2) {
        for stroke in &self.strokes {
            canvas.draw_stroke(stroke.points(), stroke.style());
        }
        canvas.fill_behind(Rect::from_min_size(Pos2::ZERO, size), &self.background);
    }

    fn finished_len(&self) -> usize {
        self.strokes.len() - usize::from(self.in_drag && !self.strokes.is_empty())
    }

    /// True when nothing but (at most) the stroke being dragged exists.
    pub fn is_empty(&self) -> bool {
        self.finished_len() == 0
    }

    pub fn has_strokes(&self) -> bool {
        self.finished_len() > 0
    }

    pub fn has_redoable(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_dragging(&self) -> bool {
        self.in_drag
    }

    /// Committed strokes in paint order, including the active one.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        if self.in_drag { self.strokes.last() } else { None }
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn paint(&self) -> &PaintStyle {
        &self.paint
    }

    pub fn background(&self) -> &PaintStyle {
        &self.background
    }
}
