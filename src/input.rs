use egui::{Context, PointerButton, Pos2, Rect};

use crate::controller::DrawController;

/// Pointer input translated into canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasInput {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp,
}

impl CanvasInput {
    /// Forward this input to the controller.
    pub fn apply(self, controller: &mut DrawController) {
        match self {
            CanvasInput::PointerDown(pos) => controller.begin_at(pos),
            CanvasInput::PointerMove(pos) => controller.move_to(pos),
            CanvasInput::PointerUp => controller.end_stroke(),
        }
    }
}

/// Converts raw egui pointer state into [`CanvasInput`]s.
///
/// Only the primary button draws. A press outside the canvas is ignored, but
/// a drag that started inside keeps reporting positions when it leaves.
pub struct InputHandler {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    pressed: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pointer_pos: None,
            pressed: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    pub fn canvas_rect(&self) -> Rect {
        self.canvas_rect
    }

    /// Screen position to canvas-local position.
    pub fn to_local(&self, pos: Pos2) -> Pos2 {
        (pos - self.canvas_rect.min).to_pos2()
    }

    /// Process one frame of pointer state.
    pub fn process(&mut self, pointer: Option<Pos2>, pressed: bool, released: bool) -> Vec<CanvasInput> {
        let mut events = Vec::new();

        if pressed && !self.pressed {
            if let Some(pos) = pointer.filter(|p| self.canvas_rect.contains(*p)) {
                events.push(CanvasInput::PointerDown(self.to_local(pos)));
                self.pressed = true;
                self.last_pointer_pos = Some(pos);
            }
        }

        if self.pressed {
            if let Some(pos) = pointer {
                if Some(pos) != self.last_pointer_pos {
                    events.push(CanvasInput::PointerMove(self.to_local(pos)));
                    self.last_pointer_pos = Some(pos);
                }
            }
            if released {
                events.push(CanvasInput::PointerUp);
                self.pressed = false;
                self.last_pointer_pos = None;
            }
        }

        events
    }

    /// Read this frame's pointer state from egui.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<CanvasInput> {
        let (pointer, pressed, released) = ctx.input(|input| {
            (
                input.pointer.interact_pos(),
                input.pointer.button_pressed(PointerButton::Primary),
                input.pointer.button_released(PointerButton::Primary),
            )
        });
        self.process(pointer, pressed, released)
    }
}
