//! Pointer gesture state for the canvas.
//!
//! ```text
//! ┌──────────┐ pointer down on selected,   ┌────────────┐
//! │          │ unlocked layer              │            │ pointer move
//! │   Idle   ├────────────────────────────►│  Dragging  ├──────┐
//! │          │                             │            │◄─────┘
//! │          │◄────────────────────────────┤            │
//! └──────────┘ pointer up / leave (commit) └────────────┘
//! ```
//!
//! Clicks never enter `Dragging`; selection changes are routed separately.

use egui::Pos2;

use crate::scene::LayerId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging {
        layer_id: LayerId,
        /// Last pointer position in canvas space
        last: Pos2,
        /// Whether any move has been applied since the press
        moved: bool,
    },
}

impl GestureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, GestureState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging { .. })
    }
}
