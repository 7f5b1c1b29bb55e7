use crate::PhotoboothApp;
use crate::app::{ROTATE_STEP, SCALE_STEP};
use crate::command::Command;
use crate::panels::PendingDialog;

pub fn tools_panel(app: &mut PhotoboothApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let (photo_count, max_photos, can_undo, can_redo, selection) = {
                let editor = app.editor.lock();
                let scene = editor.scene();
                (
                    scene.photos().len(),
                    scene.config().max_photos,
                    editor.can_undo(),
                    editor.can_redo(),
                    scene.selected_layer().map(|layer| (layer.is_frame(), layer.locked)),
                )
            };

            ui.label(format!("Photos: {photo_count}/{max_photos}"));
            if ui.button("Add photo").clicked() {
                app.execute(Command::AddPhoto);
            }
            if ui.button("Add frame layer").clicked() {
                app.execute(Command::AddFrameLayer);
            }
            ui.separator();

            // Undo/Redo section
            ui.horizontal(|ui| {
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.undo();
                }
                if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                    app.redo();
                }
            });
            ui.separator();

            ui.label("Selected layer");
            let editable = matches!(selection, Some((_, false)));
            let photo_editable = matches!(selection, Some((false, false)));
            ui.add_enabled_ui(photo_editable, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("⟲ Rotate").clicked() {
                        app.execute_on_selection(|layer_id| Command::Rotate {
                            layer_id,
                            degrees: -ROTATE_STEP,
                        });
                    }
                    if ui.button("⟳ Rotate").clicked() {
                        app.execute_on_selection(|layer_id| Command::Rotate {
                            layer_id,
                            degrees: ROTATE_STEP,
                        });
                    }
                });
                ui.horizontal(|ui| {
                    if ui.button("− Scale").clicked() {
                        app.execute_on_selection(|layer_id| Command::Rescale {
                            layer_id,
                            factor: 1.0 / SCALE_STEP,
                        });
                    }
                    if ui.button("+ Scale").clicked() {
                        app.execute_on_selection(|layer_id| Command::Rescale {
                            layer_id,
                            factor: SCALE_STEP,
                        });
                    }
                });
            });
            if ui.add_enabled(editable, egui::Button::new("Center")).clicked() {
                app.execute_on_selection(Command::CenterLayer);
            }
            ui.separator();

            ui.label("Canvas");
            if ui.button("Resize canvas…").clicked() {
                app.open_resize_dialog();
            }
            if ui.button("Clear all…").clicked() {
                app.open_dialog(PendingDialog::ClearAll);
            }
            if ui.button("Export PNG").clicked() {
                app.export();
            }
            ui.separator();

            history_list(app, ui);
        });
}

fn history_list(app: &PhotoboothApp, ui: &mut egui::Ui) {
    ui.label("History");
    let editor = app.editor.lock();
    let history = editor.history();
    let cursor = history.cursor();
    egui::ScrollArea::vertical()
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for (index, entry) in history.entries().iter().enumerate() {
                let current = cursor == Some(index);
                let text = egui::RichText::new(&entry.label);
                let text = match cursor {
                    Some(cursor) if index > cursor => text.weak(),
                    _ if current => text.strong(),
                    _ => text,
                };
                ui.label(text);
            }
        });
}
