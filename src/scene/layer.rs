use serde::{Deserialize, Serialize};
use std::fmt;

use super::PhotoId;

/// A unique identifier for a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub usize);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a layer presents. Photo layers own exactly one photo; frame layers
/// all share the scene's single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Frame,
    Photo(PhotoId),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub kind: LayerKind,
    /// Display name of the layer
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    /// Ordering key. Higher draws later and is hit-tested first. Values are
    /// never compacted, so they drift as layers are reordered.
    pub z_index: i64,
}

impl Layer {
    pub fn new(id: LayerId, kind: LayerKind, name: impl Into<String>, z_index: i64) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            visible: true,
            locked: false,
            z_index,
        }
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.kind, LayerKind::Frame)
    }

    pub fn photo_id(&self) -> Option<PhotoId> {
        match self.kind {
            LayerKind::Photo(photo_id) => Some(photo_id),
            LayerKind::Frame => None,
        }
    }
}
