use egui::Pos2;

use crate::stroke::PaintStyle;

/// What changed. Observers typically just request a redraw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    StrokeStarted { point: Pos2 },
    StrokeExtended { point: Pos2 },
    StrokeEnded,
    Undone,
    Redone,
    Cleared,
    PaintChanged(PaintStyle),
    BackgroundChanged(PaintStyle),
    Finished { width: u32, height: u32 },
}
