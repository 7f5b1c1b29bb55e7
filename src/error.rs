use thiserror::Error;

use crate::scene::LayerId;

/// Errors produced by editor operations.
///
/// None of these are fatal. The editor context turns every one of them into a
/// no-op (and, for capacity and lock errors, a user-facing notice).
#[derive(Debug, Error)]
pub enum EditorError {
    /// Photo limit reached on add
    #[error("Maximum of {max} photos reached")]
    CapacityReached { max: usize },

    /// Mutation attempted on a locked layer
    #[error("Layer {0} is locked")]
    LayerLocked(LayerId),

    /// Operation targets a layer that no longer exists
    #[error("Layer {0} not found")]
    LayerNotFound(LayerId),

    /// Photo-only operation aimed at a frame layer
    #[error("Layer {0} is not a photo layer")]
    NotAPhotoLayer(LayerId),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidCanvasSize { width: f32, height: f32 },

    #[error("Not a number: {0:?}")]
    InvalidNumber(String),

    /// The operation would not change anything
    #[error("Nothing to change")]
    Unchanged,

    /// The user declined a confirmation prompt
    #[error("Cancelled")]
    Cancelled,

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    /// Canvas too large to rasterize in memory
    #[error("Canvas {width}x{height} is too large to export")]
    ExportTooLarge { width: f32, height: f32 },

    #[error("Failed to encode export: {0}")]
    Export(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// Whether the host should show this error to the user
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::CapacityReached { .. }
                | Self::LayerLocked(_)
                | Self::InvalidCanvasSize { .. }
                | Self::InvalidNumber(_)
                | Self::ImageLoad(_)
                | Self::ExportTooLarge { .. }
        )
    }
}

pub type EditorResult<T> = Result<T, EditorError>;
