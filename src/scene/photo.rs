use egui::{Color32, Pos2, Vec2};
use serde::Serialize;
use std::fmt;

use crate::geometry::{self, Transform};
use crate::image_source::ImageRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
pub struct PhotoId(pub usize);

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placeable photo slot. Geometry lives here; ordering and lock state live
/// on the owning layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photo {
    pub id: PhotoId,
    /// Center in canvas space
    pub position: Pos2,
    /// Unscaled footprint
    pub size: Vec2,
    /// Degrees, always in `[0, 360)`
    pub rotation: f32,
    pub scale: f32,
    pub color: Color32,
    pub image: Option<ImageRef>,
}

impl Photo {
    pub fn new(id: PhotoId, position: Pos2, size: Vec2, color: Color32) -> Self {
        Self {
            id,
            position,
            size,
            rotation: 0.0,
            scale: 1.0,
            color,
            image: None,
        }
    }

    pub fn transform(&self) -> Transform {
        geometry::photo_transform(self.position, self.rotation, self.scale)
    }

    pub fn hit_test(&self, point: Pos2) -> bool {
        geometry::hit_test_photo(self.position, self.size, self.scale, point)
    }

    pub fn rotate_by(&mut self, delta_degrees: f32) {
        self.rotation = normalize_degrees(self.rotation + delta_degrees);
    }
}

/// Wrap an angle into `[0, 360)`, keeping negative inputs positive
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
