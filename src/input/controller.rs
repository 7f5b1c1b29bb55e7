use egui::{Rect, Vec2};
use log::debug;

use super::InputEvent;
use crate::geometry::screen_to_canvas;
use crate::state::{EditorContext, GestureState};

/// Turns pointer events into editor operations.
///
/// Moves during a drag bypass history; the gesture commits once when the
/// pointer is released or leaves the canvas, and only if something moved.
#[derive(Debug, Default)]
pub struct InteractionController {
    gesture: GestureState,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    /// Handle one event. `display_rect` is where the canvas is shown on
    /// screen. Returns true when the scene or selection changed.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        display_rect: Rect,
        editor: &mut EditorContext,
    ) -> bool {
        let canvas_size = editor.scene().canvas_size();
        let to_canvas = |position| screen_to_canvas(position, display_rect, canvas_size);

        match event {
            InputEvent::PointerDown { position } => {
                let Some(point) = to_canvas(position) else {
                    return false;
                };
                let scene = editor.scene();
                let draggable = scene
                    .selected_layer()
                    .filter(|layer| !layer.locked)
                    .filter(|layer| scene.hit_test_layer(layer.id, point));
                if let Some(layer) = draggable {
                    debug!("Drag start on layer {}", layer.id);
                    self.gesture = GestureState::Dragging {
                        layer_id: layer.id,
                        last: point,
                        moved: false,
                    };
                }
                false
            }
            InputEvent::PointerMove { position } => {
                let GestureState::Dragging { layer_id, last, .. } = self.gesture else {
                    return false;
                };
                let Some(point) = to_canvas(position) else {
                    return false;
                };
                let delta: Vec2 = point - last;
                if delta == Vec2::ZERO {
                    return false;
                }
                if editor.drag_by(layer_id, delta).is_err() {
                    // the layer vanished or got locked mid-gesture
                    self.finish(editor);
                    return false;
                }
                self.gesture = GestureState::Dragging {
                    layer_id,
                    last: point,
                    moved: true,
                };
                true
            }
            InputEvent::PointerUp { .. } | InputEvent::PointerLeave => self.finish(editor),
            InputEvent::Click { position } => {
                let Some(point) = to_canvas(position) else {
                    return false;
                };
                let hit = editor.scene().hit_test_topmost(point);
                debug!("Click at {point:?} selects {hit:?}");
                editor.select(hit).is_ok()
            }
        }
    }

    /// End any gesture in progress, committing it if it moved anything
    fn finish(&mut self, editor: &mut EditorContext) -> bool {
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            GestureState::Dragging {
                layer_id,
                moved: true,
                ..
            } => {
                editor.commit(&format!("Move {layer_id}"));
                debug!("Drag end on layer {layer_id}");
                true
            }
            _ => false,
        }
    }
}
