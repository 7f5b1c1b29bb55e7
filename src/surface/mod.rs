//! Immediate-mode drawing surfaces consumed by the [`crate::Renderer`].
//!
//! The contract mirrors a 2D canvas context: rect and image primitives drawn
//! through a current transform that can be saved, restored and extended.

mod egui_surface;
mod glyphs;
mod raster;
mod recording;

pub use egui_surface::EguiSurface;
pub use raster::RasterSurface;
pub use recording::{DrawOp, RecordingSurface};

use egui::{Align2, Color32, Pos2, Rect, Stroke, Vec2};

use crate::geometry::Transform;
use crate::image_source::ImageRef;

pub trait Surface {
    /// Fill the whole surface, ignoring the current transform
    fn clear(&mut self, color: Color32);

    fn fill_rect(&mut self, rect: Rect, color: Color32);

    /// Outline centered on the rect's edges
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    /// Draw `image` stretched over `rect`
    fn draw_image(&mut self, image: &ImageRef, rect: Rect);

    /// `size` is the text height in local units
    fn draw_text(&mut self, text: &str, pos: Pos2, align: Align2, size: f32, color: Color32);

    fn save(&mut self);

    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);

    fn rotate(&mut self, radians: f32);

    fn scale(&mut self, factor: f32);

    /// Compose an arbitrary transform onto the current one
    fn transform(&mut self, transform: &Transform);
}
