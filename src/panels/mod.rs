mod central_panel;
mod dialog;
mod layers_panel;
mod tools_panel;

pub use central_panel::{central_panel, fit_canvas};
pub use dialog::{DialogAnswers, DialogOutcome, PendingDialog, show_dialog};
pub use layers_panel::{SceneJsonView, layers_panel};
pub use tools_panel::tools_panel;

use crate::PhotoboothApp;

/// Dismissible banner for the editor's pending notice
pub fn notice_banner(app: &mut PhotoboothApp, ctx: &egui::Context) {
    let Some(notice) = app.editor.lock().notice().map(str::to_owned) else {
        return;
    };
    egui::TopBottomPanel::top("notice_banner").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.colored_label(ui.visuals().warn_fg_color, notice);
            if ui.small_button("Dismiss").clicked() {
                app.editor.lock().dismiss_notice();
            }
        });
    });
}
