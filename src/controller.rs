use std::sync::Arc;

use egui::{Color32, Pos2, Vec2};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::canvas::{Canvas, PixmapCanvas};
use crate::error::{DrawError, DrawResult};
use crate::event::{DrawEvent, EventBus, EventHandler, SubscriptionId};
use crate::history::StrokeHistory;
use crate::picture::PictureDetails;
use crate::stroke::{sanitize_width, PaintStyle};

/// User-facing pen settings. Persisted between app runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawSettings {
    pub color: Color32,
    pub thickness: f32,
    pub erase_mode: bool,
    pub background_color: Color32,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            color: Color32::BLACK,
            thickness: 5.0,
            erase_mode: false,
            background_color: Color32::WHITE,
        }
    }
}

impl DrawSettings {
    /// The pen these settings describe. Erase mode ignores the color.
    pub fn paint_style(&self) -> PaintStyle {
        if self.erase_mode {
            PaintStyle::eraser(self.thickness)
        } else {
            PaintStyle::stroke(self.color, self.thickness)
        }
    }

    pub fn background_style(&self) -> PaintStyle {
        PaintStyle::fill(self.background_color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Editing,
    /// Terminal. The drawing is frozen into a cached picture.
    Finished,
}

/// Owns the stroke history and the pen settings, and freezes the drawing
/// into a picture on [`DrawController::finish`].
#[derive(Debug)]
pub struct DrawController {
    history: StrokeHistory,
    settings: DrawSettings,
    finished: Option<Arc<PictureDetails>>,
    events: EventBus,
    revision: u64,
}

impl Default for DrawController {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawController {
    pub fn new() -> Self {
        Self::with_settings(DrawSettings::default())
    }

    pub fn with_settings(settings: DrawSettings) -> Self {
        let settings = DrawSettings {
            thickness: sanitize_width(settings.thickness),
            ..settings
        };
        let mut history = StrokeHistory::new();
        history.set_paint(settings.paint_style());
        history.set_background(settings.background_style());
        Self {
            history,
            settings,
            finished: None,
            events: EventBus::new(),
            revision: 0,
        }
    }

    /// Observers are notified after every change, in subscription order.
    pub fn subscribe(&mut self, handler: impl EventHandler + 'static) -> SubscriptionId {
        self.events.subscribe(Box::new(handler))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    fn notify(&mut self, event: DrawEvent) {
        self.revision += 1;
        self.events.emit(event);
    }

    pub fn set_color(&mut self, color: Color32) {
        self.settings.color = color;
        self.update_paint();
    }

    pub fn set_thickness(&mut self, thickness: f32) {
        self.settings.thickness = sanitize_width(thickness);
        self.update_paint();
    }

    pub fn set_erase_mode(&mut self, erase_mode: bool) {
        self.settings.erase_mode = erase_mode;
        self.update_paint();
    }

    pub fn set_background_color(&mut self, color: Color32) {
        self.settings.background_color = color;
        let background = self.settings.background_style();
        self.history.set_background(background);
        self.notify(DrawEvent::BackgroundChanged(background));
    }

    fn update_paint(&mut self) {
        let paint = self.settings.paint_style();
        self.history.set_paint(paint);
        self.notify(DrawEvent::PaintChanged(paint));
    }

    /// Pointer down, in canvas-local coordinates.
    pub fn begin_at(&mut self, point: Pos2) {
        if self.is_finished() {
            return;
        }
        self.history.begin(point);
        self.notify(DrawEvent::StrokeStarted { point });
    }

    pub fn move_to(&mut self, point: Pos2) {
        if self.is_finished() {
            return;
        }
        self.history.extend(point);
        self.notify(DrawEvent::StrokeExtended { point });
    }

    pub fn end_stroke(&mut self) {
        if self.is_finished() {
            return;
        }
        self.history.end();
        self.notify(DrawEvent::StrokeEnded);
    }

    pub fn undo(&mut self) {
        if self.is_finished() {
            return;
        }
        if self.history.undo() {
            self.notify(DrawEvent::Undone);
        }
    }

    /// Fails with [`DrawError::EmptyRedo`] when nothing was undone.
    /// Observers only hear about a redo that actually restored a stroke.
    pub fn redo(&mut self) -> DrawResult<()> {
        if self.is_finished() {
            return Ok(());
        }
        if self.history.redo()? {
            self.notify(DrawEvent::Redone);
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.is_finished() {
            return;
        }
        if self.history.clear() {
            self.notify(DrawEvent::Cleared);
        }
    }

    /// Freeze the drawing into a picture of `measured_size`.
    ///
    /// Once this has succeeded every later call returns the same cached
    /// picture, whatever size is passed.
    pub fn finish(&mut self, measured_size: Option<Vec2>) -> DrawResult<Arc<PictureDetails>> {
        if let Some(picture) = &self.finished {
            return Ok(Arc::clone(picture));
        }

        let size = measured_size.ok_or_else(|| {
            warn!("Cannot finish drawing: canvas size is unknown");
            DrawError::NotAttached
        })?;
        let invalid = DrawError::InvalidSize {
            width: size.x,
            height: size.y,
        };
        if !size.x.is_finite() || !size.y.is_finite() {
            warn!("Cannot finish drawing at size {size:?}");
            return Err(invalid);
        }

        let (width, height) = (size.x.floor().max(0.0) as u32, size.y.floor().max(0.0) as u32);
        let Some(mut canvas) = PixmapCanvas::new(width, height) else {
            warn!("Cannot finish drawing at size {size:?}");
            return Err(invalid);
        };
        self.history
            .render(&mut canvas, egui::vec2(width as f32, height as f32));

        let picture = Arc::new(PictureDetails::new(canvas.into_pixmap()));
        info!(
            "Finished drawing with {} strokes at {width}x{height}",
            self.history.strokes().len()
        );
        self.finished = Some(Arc::clone(&picture));
        self.notify(DrawEvent::Finished { width, height });
        Ok(picture)
    }

    /// Live redraw entry point.
    pub fn render(&self, canvas: &mut dyn Canvas, size: Vec2) {
        self.history.render(canvas, size);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    pub fn state(&self) -> ControllerState {
        if self.is_finished() {
            ControllerState::Finished
        } else {
            ControllerState::Editing
        }
    }

    pub fn picture(&self) -> Option<&Arc<PictureDetails>> {
        self.finished.as_ref()
    }

    pub fn history(&self) -> &StrokeHistory {
        &self.history
    }

    pub fn settings(&self) -> &DrawSettings {
        &self.settings
    }

    pub fn paint_style(&self) -> &PaintStyle {
        self.history.paint()
    }

    /// Bumped on every notification.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        !self.is_finished() && !self.history.is_dragging() && self.history.has_strokes()
    }

    pub fn can_redo(&self) -> bool {
        !self.is_finished() && self.history.has_redoable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::BlendMode;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_erase_mode_overrides_color() {
        let mut controller = DrawController::new();
        controller.set_color(Color32::RED);
        controller.set_erase_mode(true);

        assert_eq!(controller.paint_style().blend_mode, BlendMode::Erase);
        assert_eq!(controller.paint_style().color, Color32::TRANSPARENT);

        controller.set_erase_mode(false);
        assert_eq!(controller.paint_style().color, Color32::RED);
        assert_eq!(controller.settings().color, Color32::RED);
    }

    #[test]
    fn test_every_setter_notifies() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut controller = DrawController::new();
        {
            let events = Rc::clone(&events);
            controller.subscribe(move |event: &DrawEvent| events.borrow_mut().push(event.clone()));
        }

        controller.set_color(Color32::BLUE);
        controller.set_thickness(2.0);
        controller.set_erase_mode(true);
        controller.set_background_color(Color32::YELLOW);

        let events = events.borrow();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0], DrawEvent::PaintChanged(PaintStyle::stroke(Color32::BLUE, 5.0)));
        assert_eq!(events[2], DrawEvent::PaintChanged(PaintStyle::eraser(2.0)));
        assert_eq!(events[3], DrawEvent::BackgroundChanged(PaintStyle::fill(Color32::YELLOW)));
        assert_eq!(controller.revision(), 4);
    }

    #[test]
    fn test_finish_requires_a_size() {
        let mut controller = DrawController::new();
        assert_eq!(controller.finish(None).unwrap_err(), DrawError::NotAttached);
        assert_eq!(controller.state(), ControllerState::Editing);
    }

    #[test]
    fn test_finish_rejects_sub_pixel_size() {
        let mut controller = DrawController::new();
        let err = controller.finish(Some(egui::vec2(0.5, 40.0))).unwrap_err();
        assert!(matches!(err, DrawError::InvalidSize { .. }));

        let err = controller.finish(Some(egui::vec2(f32::INFINITY, 40.0))).unwrap_err();
        assert!(matches!(err, DrawError::InvalidSize { .. }));
        assert!(!controller.is_finished());
    }

    #[test]
    fn test_finish_floors_the_measured_size() {
        let mut controller = DrawController::new();
        let picture = controller.finish(Some(egui::vec2(40.9, 30.2))).unwrap();
        assert_eq!((picture.width(), picture.height()), (40, 30));
    }

    #[test]
    fn test_settings_from_config_are_sanitized() {
        let controller = DrawController::with_settings(DrawSettings {
            thickness: -4.0,
            ..Default::default()
        });
        assert_eq!(controller.settings().thickness, 0.0);
        assert_eq!(controller.paint_style().stroke_width, 0.0);
        assert_eq!(controller.history().background().color, Color32::WHITE);
    }
}
