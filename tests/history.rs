use egui::Vec2;
use photobooth_frame::command::Command;
use photobooth_frame::config::EditorConfig;
use photobooth_frame::scene::LayerId;
use photobooth_frame::state::{Confirm, EditorContext};

struct Answers {
    confirm: bool,
    values: Vec<&'static str>,
}

impl Confirm for Answers {
    fn confirm(&mut self, _message: &str) -> bool {
        self.confirm
    }

    fn prompt(&mut self, _message: &str, _default: &str) -> Option<String> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.remove(0).to_owned())
        }
    }
}

fn run_operations(editor: &mut EditorContext) -> usize {
    let commands = vec![
        Command::AddPhoto,
        Command::AddPhoto,
        Command::Rotate { layer_id: LayerId(2), degrees: 30.0 },
        Command::Rescale { layer_id: LayerId(3), factor: 2.0 },
        Command::MoveBy { layer_id: LayerId(2), delta: Vec2::new(10.0, -4.0) },
        Command::ToggleVisibility(LayerId(1)),
        Command::MoveToBottom(LayerId(3)),
        Command::AddFrameLayer,
        Command::ResizeCanvas { width: 300.0, height: 900.0 },
        Command::DeleteLayer(LayerId(2)),
    ];
    let count = commands.len();
    for command in commands {
        editor.execute(command).unwrap();
    }
    count
}

#[test]
fn undo_all_then_redo_all_round_trips() {
    let mut editor = EditorContext::default();
    let initial = editor.scene().snapshot();

    let count = run_operations(&mut editor);
    let final_state = editor.scene().snapshot();

    for _ in 0..count {
        assert!(editor.undo());
    }
    assert_eq!(editor.scene().snapshot(), initial);
    assert!(!editor.undo());

    for _ in 0..count {
        assert!(editor.redo());
    }
    assert_eq!(editor.scene().snapshot(), final_state);
    assert!(!editor.redo());
}

#[test]
fn commit_after_undo_discards_redo_branch() {
    let mut editor = EditorContext::default();
    editor.execute(Command::AddPhoto).unwrap();
    editor.execute(Command::AddPhoto).unwrap();
    editor.execute(Command::AddPhoto).unwrap();

    editor.undo();
    editor.undo();
    assert!(editor.can_redo());

    editor.execute(Command::AddFrameLayer).unwrap();
    assert!(!editor.can_redo());
    let before = editor.scene().snapshot();
    assert!(!editor.redo());
    assert_eq!(editor.scene().snapshot(), before);
}

#[test]
fn failed_operations_are_not_recorded() {
    let mut editor = EditorContext::default();
    let entries = editor.history().len();
    assert!(editor.execute(Command::Rotate { layer_id: LayerId(1), degrees: 10.0 }).is_err());
    assert!(editor.execute(Command::MoveToTop(LayerId(1))).is_err());
    assert!(editor.execute(Command::DeleteLayer(LayerId(77))).is_err());
    assert_eq!(editor.history().len(), entries);
}

#[test]
fn history_is_bounded() {
    let config = EditorConfig {
        history_limit: 5,
        ..EditorConfig::default()
    };
    let mut editor = EditorContext::new(config);
    for _ in 0..8 {
        editor.execute(Command::AddPhoto).unwrap();
    }
    assert_eq!(editor.history().len(), 5);

    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 4);
    assert_eq!(editor.scene().photos().len(), 4);
}

#[test]
fn selection_survives_undo_only_if_layer_exists() {
    let mut editor = EditorContext::default();
    editor.execute(Command::AddPhoto).unwrap();
    editor.execute(Command::AddPhoto).unwrap();
    editor.select(Some(LayerId(2))).unwrap();

    editor
        .execute(Command::Rotate { layer_id: LayerId(2), degrees: 15.0 })
        .unwrap();
    editor.undo();
    assert_eq!(editor.scene().selected_layer_id(), Some(LayerId(2)));

    editor.select(Some(LayerId(3))).unwrap();
    editor.undo();
    assert_eq!(editor.scene().selected_layer_id(), None);
}

#[test]
fn undo_does_not_reuse_ids() {
    let mut editor = EditorContext::default();
    editor.execute(Command::AddPhoto).unwrap();
    editor.undo();
    editor.execute(Command::AddPhoto).unwrap();
    let layer = &editor.scene().layers()[1];
    assert_eq!(layer.id, LayerId(3));
}

#[test]
fn cancelled_clear_changes_nothing() {
    let mut editor = EditorContext::default();
    editor.execute(Command::AddPhoto).unwrap();
    let before = editor.scene().snapshot();
    let entries = editor.history().len();

    let mut decline = Answers { confirm: false, values: vec![] };
    assert!(editor.clear_all(&mut decline).is_err());
    assert_eq!(editor.scene().snapshot(), before);
    assert_eq!(editor.history().len(), entries);

    let mut accept = Answers { confirm: true, values: vec![] };
    editor.clear_all(&mut accept).unwrap();
    assert!(editor.scene().photos().is_empty());
    assert!(editor.undo());
    assert_eq!(editor.scene().photos().len(), 1);
}

#[test]
fn resize_prompt_parses_or_aborts() {
    let mut editor = EditorContext::default();

    let mut bad = Answers { confirm: true, values: vec!["wide", "900"] };
    assert!(editor.resize_canvas_prompt(&mut bad).is_err());
    assert_eq!(editor.scene().canvas_size(), Vec2::new(276.0, 828.0));
    assert!(editor.notice().is_some());

    let mut cancelled = Answers { confirm: true, values: vec!["400"] };
    assert!(editor.resize_canvas_prompt(&mut cancelled).is_err());
    assert_eq!(editor.scene().canvas_size(), Vec2::new(276.0, 828.0));

    let mut good = Answers { confirm: true, values: vec![" 400 ", "1200"] };
    editor.resize_canvas_prompt(&mut good).unwrap();
    assert_eq!(editor.scene().canvas_size(), Vec2::new(400.0, 1200.0));
}
