use std::collections::VecDeque;

use crate::state::Confirm;

/// A modal question waiting for the user
#[derive(Debug, Clone, PartialEq)]
pub enum PendingDialog {
    ClearAll,
    ResizeCanvas { width: String, height: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Open,
    Confirmed,
    Cancelled,
}

/// Answers collected by the modal window, replayed to the editor through
/// [`Confirm`] once the user has decided.
#[derive(Debug, Default)]
pub struct DialogAnswers {
    confirmed: bool,
    values: VecDeque<String>,
}

impl DialogAnswers {
    pub fn cancelled() -> Self {
        Self::default()
    }

    pub fn confirmed(values: impl IntoIterator<Item = String>) -> Self {
        Self {
            confirmed: true,
            values: values.into_iter().collect(),
        }
    }

    pub fn from_dialog(dialog: &PendingDialog, outcome: DialogOutcome) -> Self {
        if outcome != DialogOutcome::Confirmed {
            return Self::cancelled();
        }
        match dialog {
            PendingDialog::ClearAll => Self::confirmed([]),
            PendingDialog::ResizeCanvas { width, height } => {
                Self::confirmed([width.clone(), height.clone()])
            }
        }
    }
}

impl Confirm for DialogAnswers {
    fn confirm(&mut self, _message: &str) -> bool {
        self.confirmed
    }

    fn prompt(&mut self, _message: &str, _default: &str) -> Option<String> {
        if !self.confirmed {
            return None;
        }
        self.values.pop_front()
    }
}

/// Show the modal for `dialog`, editing its text fields in place
pub fn show_dialog(ctx: &egui::Context, dialog: &mut PendingDialog) -> DialogOutcome {
    let mut outcome = DialogOutcome::Open;
    let title = match dialog {
        PendingDialog::ClearAll => "Clear all",
        PendingDialog::ResizeCanvas { .. } => "Resize canvas",
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            match dialog {
                PendingDialog::ClearAll => {
                    ui.label("Remove all photos and extra frame layers?");
                }
                PendingDialog::ResizeCanvas { width, height } => {
                    egui::Grid::new("resize_canvas_grid")
                        .num_columns(2)
                        .show(ui, |ui| {
                            ui.label("Width:");
                            ui.text_edit_singleline(width);
                            ui.end_row();
                            ui.label("Height:");
                            ui.text_edit_singleline(height);
                            ui.end_row();
                        });
                }
            }
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    outcome = DialogOutcome::Confirmed;
                }
                if ui.button("Cancel").clicked() {
                    outcome = DialogOutcome::Cancelled;
                }
            });
        });

    if outcome == DialogOutcome::Open && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        outcome = DialogOutcome::Cancelled;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_answers_replay_in_order() {
        let dialog = PendingDialog::ResizeCanvas {
            width: "300".to_owned(),
            height: "900".to_owned(),
        };
        let mut answers = DialogAnswers::from_dialog(&dialog, DialogOutcome::Confirmed);
        assert_eq!(answers.prompt("Canvas width", "276").as_deref(), Some("300"));
        assert_eq!(answers.prompt("Canvas height", "828").as_deref(), Some("900"));
    }

    #[test]
    fn cancelled_dialog_declines_everything() {
        let mut answers = DialogAnswers::from_dialog(&PendingDialog::ClearAll, DialogOutcome::Cancelled);
        assert!(!answers.confirm("Clear?"));
        assert_eq!(answers.prompt("Width", "1"), None);
    }
}
