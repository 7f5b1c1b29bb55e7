mod controller;

pub use controller::InteractionController;

use egui::{Pos2, Response};

/// Pointer events in client (screen) coordinates.
///
/// Drag start and click are separate bindings: a press-release without a move
/// produces `PointerDown`, `PointerUp` and `Click`, and only `Click` changes
/// the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Pos2 },
    PointerMove { position: Pos2 },
    PointerUp { position: Pos2 },
    /// Pointer left the canvas, possibly with the button still held
    PointerLeave,
    Click { position: Pos2 },
}

/// Converts egui's per-frame pointer state for the canvas widget into
/// [`InputEvent`]s.
#[derive(Debug, Default)]
pub struct InputHandler {
    was_hovered: bool,
    last_pointer_pos: Option<Pos2>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process this frame's input for the canvas response
    pub fn process(&mut self, response: &Response) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let hovered = response.hovered() || response.dragged();

        response.ctx.input(|input| {
            let pointer = &input.pointer;
            let pos = pointer.interact_pos().or_else(|| pointer.hover_pos());

            if hovered && pointer.primary_pressed() {
                if let Some(position) = pos {
                    events.push(InputEvent::PointerDown { position });
                }
            }

            if pointer.primary_down() {
                if let Some(position) = pointer.hover_pos() {
                    if self.last_pointer_pos != Some(position) {
                        events.push(InputEvent::PointerMove { position });
                    }
                }
            }

            if pointer.primary_released() {
                if let Some(position) = pos {
                    events.push(InputEvent::PointerUp { position });
                }
            }

            self.last_pointer_pos = pointer.hover_pos();
        });

        if response.clicked() {
            if let Some(position) = response.interact_pointer_pos() {
                events.push(InputEvent::Click { position });
            }
        }

        if self.was_hovered && !hovered {
            events.push(InputEvent::PointerLeave);
        }
        self.was_hovered = hovered;

        events
    }
}
