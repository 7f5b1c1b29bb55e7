use egui::{Align2, Color32, Pos2, Rect, Stroke, Vec2};

use crate::geometry::local_footprint;
use crate::scene::{Frame, Layer, LayerKind, Photo, Scene};
use crate::surface::Surface;

const FRAME_FILL: Color32 = Color32::from_rgb(245, 240, 230);
const FRAME_BORDER: Color32 = Color32::from_rgb(120, 110, 100);
const FRAME_TICK: Color32 = Color32::from_rgb(215, 205, 190);
const FRAME_TICK_SPACING: f32 = 24.0;

/// Draws a [`Scene`] onto any [`Surface`].
///
/// Rendering only reads the scene, so it is safe to call every frame. Layers
/// are painted bottom to top; invisible layers are skipped.
#[derive(Debug, Clone)]
pub struct Renderer {
    selection_color: Color32,
    locked_selection_color: Color32,
    selection_width: f32,
    handle_size: f32,
    label_size: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            selection_color: Color32::from_rgb(0, 120, 215),
            locked_selection_color: Color32::from_rgb(220, 60, 60),
            selection_width: 2.0,
            handle_size: 8.0,
            label_size: 16.0,
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection_color(&self) -> Color32 {
        self.selection_color
    }

    pub fn locked_selection_color(&self) -> Color32 {
        self.locked_selection_color
    }

    pub fn render(&self, surface: &mut dyn Surface, scene: &Scene) {
        surface.clear(Color32::WHITE);

        let selected = scene.selected_layer_id();
        for layer in scene.layers_by_z() {
            if !layer.visible {
                continue;
            }
            let is_selected = selected == Some(layer.id);
            match layer.kind {
                LayerKind::Frame => self.draw_frame(surface, scene.frame(), layer, is_selected),
                LayerKind::Photo(photo_id) => {
                    if let Some(photo) = scene.photo(photo_id) {
                        self.draw_photo(surface, photo, layer, is_selected);
                    } else {
                        log::warn!("Layer {} references missing photo {}", layer.id, photo_id);
                    }
                }
            }
        }
    }

    fn draw_frame(&self, surface: &mut dyn Surface, frame: &Frame, layer: &Layer, selected: bool) {
        let rect = frame.rect();
        match &frame.image {
            Some(image) => surface.draw_image(image, rect),
            None => self.draw_frame_placeholder(surface, rect),
        }
        if selected {
            surface.stroke_rect(rect, self.selection_stroke(layer));
        }
    }

    fn draw_frame_placeholder(&self, surface: &mut dyn Surface, rect: Rect) {
        surface.fill_rect(rect, FRAME_FILL);

        let mut x = rect.min.x + FRAME_TICK_SPACING;
        while x < rect.max.x {
            let tick = Rect::from_min_max(Pos2::new(x - 0.5, rect.min.y), Pos2::new(x + 0.5, rect.max.y));
            surface.fill_rect(tick, FRAME_TICK);
            x += FRAME_TICK_SPACING;
        }

        surface.stroke_rect(rect.shrink(2.0), Stroke::new(4.0, FRAME_BORDER));
        surface.draw_text(
            "FRAME",
            rect.center(),
            Align2::CENTER_CENTER,
            self.label_size,
            FRAME_BORDER,
        );
    }

    fn draw_photo(&self, surface: &mut dyn Surface, photo: &Photo, layer: &Layer, selected: bool) {
        let local = local_footprint(photo.size);

        surface.save();
        surface.transform(&photo.transform());

        match &photo.image {
            Some(image) => surface.draw_image(image, local),
            None => {
                surface.fill_rect(local, photo.color);
                surface.draw_text(
                    &photo.id.to_string(),
                    Pos2::ZERO,
                    Align2::CENTER_CENTER,
                    self.label_size,
                    Color32::WHITE,
                );
            }
        }

        if selected {
            surface.stroke_rect(local, self.selection_stroke(layer));
            if !layer.locked {
                self.draw_handles(surface, local, photo.scale);
            }
        }

        surface.restore();
    }

    /// Corner squares, kept at a constant on-canvas size regardless of photo scale
    fn draw_handles(&self, surface: &mut dyn Surface, rect: Rect, scale: f32) {
        let size = Vec2::splat(self.handle_size / scale.max(f32::EPSILON));
        for corner in [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ] {
            surface.fill_rect(Rect::from_center_size(corner, size), self.selection_color);
        }
    }

    fn selection_stroke(&self, layer: &Layer) -> Stroke {
        if layer.locked {
            Stroke::new(self.selection_width, self.locked_selection_color)
        } else {
            Stroke::new(self.selection_width, self.selection_color)
        }
    }
}
