use egui::{Align2, Color32, Pos2, Rect, Stroke, Vec2};
use uuid::Uuid;

use super::Surface;
use crate::geometry::{Transform, TransformStack};
use crate::image_source::ImageRef;

/// A draw call captured together with the transform active at the time
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(Color32),
    FillRect {
        rect: Rect,
        color: Color32,
        transform: Transform,
    },
    StrokeRect {
        rect: Rect,
        stroke: Stroke,
        transform: Transform,
    },
    Image {
        image_id: Uuid,
        rect: Rect,
        transform: Transform,
    },
    Text {
        text: String,
        pos: Pos2,
        transform: Transform,
    },
}

/// Surface that records draw calls instead of producing pixels
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    transforms: TransformStack,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every text string drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded ops and reset the transform stack
    pub fn reset(&mut self) {
        self.ops.clear();
        self.transforms.reset();
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color32) {
        self.ops.push(DrawOp::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.ops.push(DrawOp::FillRect {
            rect,
            color,
            transform: *self.transforms.current(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeRect {
            rect,
            stroke,
            transform: *self.transforms.current(),
        });
    }

    fn draw_image(&mut self, image: &ImageRef, rect: Rect) {
        self.ops.push(DrawOp::Image {
            image_id: image.id(),
            rect,
            transform: *self.transforms.current(),
        });
    }

    fn draw_text(&mut self, text: &str, pos: Pos2, _align: Align2, _size: f32, _color: Color32) {
        self.ops.push(DrawOp::Text {
            text: text.to_owned(),
            pos,
            transform: *self.transforms.current(),
        });
    }

    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        self.transforms.translate(offset);
    }

    fn rotate(&mut self, radians: f32) {
        self.transforms.rotate(radians);
    }

    fn scale(&mut self, factor: f32) {
        self.transforms.scale(factor);
    }

    fn transform(&mut self, transform: &Transform) {
        self.transforms.apply(transform);
    }
}
