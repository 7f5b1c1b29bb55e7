use egui::Vec2;

use super::CommandResult;
use crate::image_source::ImageRef;
use crate::scene::{LayerId, Scene};

/// Every undoable scene mutation. Each successful execution becomes one
/// history entry.
#[derive(Clone, PartialEq)]
pub enum Command {
    AddPhoto,
    AddFrameLayer,
    DeleteLayer(LayerId),
    ToggleVisibility(LayerId),
    ToggleLocked(LayerId),
    MoveToTop(LayerId),
    MoveToBottom(LayerId),
    /// Reorder to a position counted from the bottom of the stack
    MoveLayer { layer_id: LayerId, to: usize },
    Rotate { layer_id: LayerId, degrees: f32 },
    Rescale { layer_id: LayerId, factor: f32 },
    MoveBy { layer_id: LayerId, delta: Vec2 },
    CenterLayer(LayerId),
    ResizeCanvas { width: f32, height: f32 },
    ClearAll,
    /// Place a loaded image on a photo, or on the frame for frame layers
    SetImage {
        layer_id: LayerId,
        image: Option<ImageRef>,
    },
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SetImage { layer_id, image } => f
                .debug_struct("SetImage")
                .field("layer_id", layer_id)
                .field("image", &image.as_ref().map(|image| image.name()))
                .finish(),
            other => f.write_str(&other.label()),
        }
    }
}

impl Command {
    /// Apply to the scene. On error the scene is unchanged.
    pub fn execute(&self, scene: &mut Scene) -> CommandResult {
        match self {
            Command::AddPhoto => scene.add_photo().map(|_| ()),
            Command::AddFrameLayer => {
                scene.add_frame_layer();
                Ok(())
            }
            Command::DeleteLayer(id) => scene.delete_layer(*id),
            Command::ToggleVisibility(id) => scene.toggle_visibility(*id),
            Command::ToggleLocked(id) => scene.toggle_locked(*id),
            Command::MoveToTop(id) => scene.move_to_top(*id),
            Command::MoveToBottom(id) => scene.move_to_bottom(*id),
            Command::MoveLayer { layer_id, to } => scene.move_layer(*layer_id, *to),
            Command::Rotate { layer_id, degrees } => scene.rotate(*layer_id, *degrees),
            Command::Rescale { layer_id, factor } => scene.rescale(*layer_id, *factor),
            Command::MoveBy { layer_id, delta } => scene.move_by(*layer_id, *delta),
            Command::CenterLayer(id) => scene.center_layer(*id),
            Command::ResizeCanvas { width, height } => scene.resize_canvas(*width, *height),
            Command::ClearAll => {
                scene.clear_all();
                Ok(())
            }
            Command::SetImage { layer_id, image } => scene.set_image(*layer_id, image.clone()),
        }
    }

    /// Short human-readable name for the history list
    pub fn label(&self) -> String {
        match self {
            Command::AddPhoto => "Add photo".to_owned(),
            Command::AddFrameLayer => "Add frame layer".to_owned(),
            Command::DeleteLayer(id) => format!("Delete layer {id}"),
            Command::ToggleVisibility(id) => format!("Toggle visibility {id}"),
            Command::ToggleLocked(id) => format!("Toggle lock {id}"),
            Command::MoveToTop(id) => format!("Bring {id} to top"),
            Command::MoveToBottom(id) => format!("Send {id} to bottom"),
            Command::MoveLayer { layer_id, to } => format!("Reorder {layer_id} to {to}"),
            Command::Rotate { layer_id, degrees } => format!("Rotate {layer_id} by {degrees}°"),
            Command::Rescale { layer_id, factor } => format!("Scale {layer_id} x{factor}"),
            Command::MoveBy { layer_id, .. } => format!("Move {layer_id}"),
            Command::CenterLayer(id) => format!("Center {id}"),
            Command::ResizeCanvas { width, height } => format!("Resize canvas {width}x{height}"),
            Command::ClearAll => "Clear all".to_owned(),
            Command::SetImage { layer_id, .. } => format!("Set image on {layer_id}"),
        }
    }
}
