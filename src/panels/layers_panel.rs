use crate::PhotoboothApp;
use crate::command::Command;
use crate::scene::{Layer, LayerId};
use crate::state::EditorContext;

enum LayerAction {
    Select(LayerId),
    Run(Command),
    Delete(LayerId),
}

/// Pretty JSON of the scene, rebuilt only when the editor version moves
#[derive(Default)]
pub struct SceneJsonView {
    cached: Option<(u64, String)>,
}

impl SceneJsonView {
    pub fn text(&mut self, editor: &EditorContext) -> &str {
        let version = editor.version();
        if self.cached.as_ref().is_none_or(|(seen, _)| *seen != version) {
            let json = editor.scene().to_json().unwrap_or_else(|err| {
                log::warn!("Cannot serialize scene: {err}");
                String::new()
            });
            self.cached = Some((version, json));
        }
        self.cached.as_ref().map_or("", |(_, json)| json.as_str())
    }
}

pub fn layers_panel(app: &mut PhotoboothApp, ctx: &egui::Context) {
    egui::SidePanel::right("layers_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Layers");
            ui.separator();

            let mut action = None;
            {
                let editor = app.editor.lock();
                let scene = editor.scene();
                let selected = scene.selected_layer_id();

                // top of the stack first, like the canvas reads
                let rows: Vec<&Layer> = scene.layers_by_z().into_iter().rev().collect();
                for (row, layer) in rows.iter().enumerate() {
                    let block = ui
                        .vertical(|ui| {
                            layer_rows(ui, layer, selected, &editor, &mut action);
                        })
                        .response;

                    if let Some(insert_row) = hovered_insert_row(ui, &block, row) {
                        if let Some(dragged) = block.dnd_release_payload::<LayerId>() {
                            if let Some(from_row) = rows.iter().position(|layer| layer.id == *dragged) {
                                action = Some(LayerAction::Run(Command::MoveLayer {
                                    layer_id: *dragged,
                                    to: stack_position(rows.len(), from_row, insert_row),
                                }));
                            }
                        }
                    }
                    ui.separator();
                }
            }

            egui::CollapsingHeader::new("Scene JSON")
                .default_open(false)
                .show(ui, |ui| {
                    let editor = app.editor.lock();
                    let json = app.scene_json.text(&editor);
                    egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                        ui.monospace(json);
                    });
                });

            match action {
                Some(LayerAction::Select(id)) => {
                    let _ = app.editor.lock().select(Some(id));
                }
                Some(LayerAction::Run(command)) => app.execute(command),
                Some(LayerAction::Delete(id)) => {
                    let _ = app.editor.lock().delete_layer(id);
                }
                None => {}
            }
        });
}

fn layer_rows(
    ui: &mut egui::Ui,
    layer: &Layer,
    selected: Option<LayerId>,
    editor: &EditorContext,
    action: &mut Option<LayerAction>,
) {
    ui.horizontal(|ui| {
        ui.dnd_drag_source(egui::Id::new(("layer_drag", layer.id)), layer.id, |ui| {
            ui.label("↕");
        })
        .response
        .on_hover_text("Drag to reorder");

        let eye = if layer.visible { "👁" } else { "—" };
        if ui.small_button(eye).on_hover_text("Toggle visibility").clicked() {
            *action = Some(LayerAction::Run(Command::ToggleVisibility(layer.id)));
        }
        let lock = if layer.locked { "🔒" } else { "🔓" };
        if ui.small_button(lock).on_hover_text("Toggle lock").clicked() {
            *action = Some(LayerAction::Run(Command::ToggleLocked(layer.id)));
        }

        let label = format!("{} (z {})", layer.name, layer.z_index);
        if ui.selectable_label(selected == Some(layer.id), label).clicked() {
            *action = Some(LayerAction::Select(layer.id));
        }
    });
    ui.horizontal(|ui| {
        ui.add_space(64.0);
        if ui.small_button("Top").clicked() {
            *action = Some(LayerAction::Run(Command::MoveToTop(layer.id)));
        }
        if ui.small_button("Bottom").clicked() {
            *action = Some(LayerAction::Run(Command::MoveToBottom(layer.id)));
        }
        if ui.small_button("🗑").on_hover_text("Delete layer").clicked() {
            *action = Some(LayerAction::Delete(layer.id));
        }
    });
    if let Some(name) = image_label(layer.id, editor) {
        ui.weak(name);
    }
}

/// Row a dragged layer would be inserted before, drawing the insertion line
fn hovered_insert_row(ui: &egui::Ui, block: &egui::Response, row: usize) -> Option<usize> {
    let pointer = ui.input(|i| i.pointer.interact_pos())?;
    block.dnd_hover_payload::<LayerId>()?;

    let rect = block.rect;
    let stroke = egui::Stroke::new(2.0, ui.visuals().selection.stroke.color);
    if pointer.y < rect.center().y {
        ui.painter().hline(rect.x_range(), rect.top(), stroke);
        Some(row)
    } else {
        ui.painter().hline(rect.x_range(), rect.bottom(), stroke);
        Some(row + 1)
    }
}

/// Convert a drop in the top-first list into a bottom-to-top stack position
fn stack_position(count: usize, from_row: usize, insert_row: usize) -> usize {
    let target_row = insert_row - usize::from(from_row < insert_row);
    count - 1 - target_row
}

/// Name of the image shown by a layer, if it has one
fn image_label(layer_id: LayerId, editor: &EditorContext) -> Option<String> {
    let scene = editor.scene();
    let layer = scene.layer(layer_id)?;
    let name = if layer.is_frame() {
        scene.frame().image_name()?.to_owned()
    } else {
        scene.photo_for_layer(layer_id)?.image.as_ref()?.name().to_owned()
    };
    Some(format!("    {name}"))
}
