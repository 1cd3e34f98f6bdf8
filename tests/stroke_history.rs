use egui::{Color32, Pos2};
use sketch_pad::{BlendMode, DrawController, DrawError, StrokeHistory};

fn draw(history: &mut StrokeHistory, points: &[(f32, f32)]) {
    let mut iter = points.iter().map(|&(x, y)| Pos2::new(x, y));
    if let Some(first) = iter.next() {
        history.begin(first);
        for p in iter {
            history.extend(p);
        }
        history.end();
    }
}

#[test]
fn test_stroke_count_grows_once_per_cycle() {
    let mut history = StrokeHistory::new();
    assert!(!history.has_strokes());

    for i in 0..5 {
        let offset = i as f32 * 10.0;
        history.begin(Pos2::new(offset, offset));
        // A stray second pointer must not nest a stroke.
        history.begin(Pos2::new(99.0, 99.0));
        history.extend(Pos2::new(offset + 1.0, offset + 2.0));
        history.end();

        assert!(history.has_strokes());
        assert_eq!(history.strokes().len(), i + 1);
    }
}

#[test]
fn test_undo_then_redo_restores_identical_strokes() {
    let mut history = StrokeHistory::new();
    draw(&mut history, &[(0.0, 0.0), (5.0, 5.0), (9.0, 1.0)]);
    history.set_paint(sketch_pad::PaintStyle::stroke(Color32::RED, 2.0));
    draw(&mut history, &[(3.0, 3.0), (4.0, 4.0)]);

    let before = history.strokes().to_vec();
    assert!(history.undo());
    assert_eq!(history.strokes().len(), 1);
    assert_eq!(history.redo(), Ok(true));

    assert_eq!(history.strokes(), before.as_slice());
    assert!(!history.has_redoable());
}

#[test]
fn test_undo_redo_scenario() {
    let mut history = StrokeHistory::new();
    history.begin(Pos2::new(10.0, 10.0));
    history.extend(Pos2::new(20.0, 20.0));
    history.end();
    history.undo();

    assert!(!history.has_strokes());
    assert!(history.has_redoable());

    history.redo().unwrap();
    assert!(history.has_strokes());
    assert_eq!(
        history.strokes()[0].points(),
        &[Pos2::new(10.0, 10.0), Pos2::new(20.0, 20.0)]
    );
}

#[test]
fn test_redo_with_nothing_undone() {
    let mut history = StrokeHistory::new();
    assert_eq!(history.redo(), Err(DrawError::EmptyRedo));
    assert!(history.is_empty());
}

#[test]
fn test_clear_is_refused_while_dragging() {
    let mut history = StrokeHistory::new();
    draw(&mut history, &[(0.0, 0.0), (1.0, 1.0)]);
    draw(&mut history, &[(2.0, 2.0), (3.0, 3.0)]);
    history.undo();

    history.begin(Pos2::new(7.0, 7.0));
    assert!(!history.clear());
    assert!(!history.is_empty());

    history.end();
    assert!(history.clear());
    assert!(history.is_empty());
    assert!(!history.has_redoable());
}

#[test]
fn test_erase_mode_stroke_captures_eraser_style() {
    let mut controller = DrawController::new();
    controller.set_color(Color32::from_rgb(200, 10, 10));
    controller.set_erase_mode(true);

    controller.begin_at(Pos2::new(1.0, 1.0));
    controller.move_to(Pos2::new(8.0, 8.0));
    controller.end_stroke();

    let style = controller.history().strokes()[0].style();
    assert_eq!(style.blend_mode, BlendMode::Erase);
    assert_eq!(style.color, Color32::TRANSPARENT);
}
