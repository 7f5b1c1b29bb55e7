use egui::{Pos2, Rect, Vec2};
use serde::Serialize;

use crate::geometry;
use crate::image_source::ImageRef;

/// The background frame. There is one per scene, shared by every frame layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Top-left corner in canvas space
    pub position: Pos2,
    pub size: Vec2,
    pub image: Option<ImageRef>,
}

impl Frame {
    pub fn new(size: Vec2) -> Self {
        Self {
            position: Pos2::ZERO,
            size,
            image: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    pub fn hit_test(&self, point: Pos2) -> bool {
        geometry::hit_test_frame(self.position, self.size, point)
    }

    /// Display name of the loaded frame image, if any
    pub fn image_name(&self) -> Option<&str> {
        self.image.as_ref().map(|image| image.name())
    }
}
