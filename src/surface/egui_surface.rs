use egui::epaint::{Mesh, Vertex};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use super::Surface;
use crate::geometry::{Transform, TransformStack};
use crate::image_source::ImageRef;
use crate::texture_manager::TextureManager;

/// On-screen surface drawing through an egui [`Painter`].
///
/// Canvas coordinates are mapped into `display_rect` with a uniform scale, so
/// the caller is expected to fit the display rect to the canvas aspect ratio.
/// Text is always drawn upright.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    textures: &'a mut TextureManager,
    display_rect: Rect,
    base: Transform,
    transforms: TransformStack,
}

impl<'a> EguiSurface<'a> {
    pub fn new(
        painter: &'a Painter,
        textures: &'a mut TextureManager,
        display_rect: Rect,
        canvas_size: Vec2,
    ) -> Self {
        let scale = if canvas_size.x > 0.0 {
            display_rect.width() / canvas_size.x
        } else {
            1.0
        };
        Self {
            painter,
            textures,
            display_rect,
            base: Transform::IDENTITY
                .translate(display_rect.min.to_vec2())
                .scale(scale),
            transforms: TransformStack::default(),
        }
    }

    fn screen_transform(&self) -> Transform {
        self.base.then(self.transforms.current())
    }

    fn screen_quad(&self, rect: Rect) -> Vec<Pos2> {
        let transform = self.screen_transform();
        [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ]
        .iter()
        .map(|corner| transform.apply(*corner))
        .collect()
    }
}

impl Surface for EguiSurface<'_> {
    fn clear(&mut self, color: Color32) {
        self.painter.rect_filled(self.display_rect, 0.0, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let quad = self.screen_quad(rect);
        self.painter
            .add(Shape::convex_polygon(quad, color, Stroke::NONE));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        let width = stroke.width * self.screen_transform().approx_scale();
        let quad = self.screen_quad(rect);
        self.painter
            .add(Shape::closed_line(quad, Stroke::new(width, stroke.color)));
    }

    fn draw_image(&mut self, image: &ImageRef, rect: Rect) {
        let texture_id = self.textures.texture_id(self.painter.ctx(), image);
        let quad = self.screen_quad(rect);
        let uvs = [
            Pos2::new(0.0, 0.0),
            Pos2::new(1.0, 0.0),
            Pos2::new(1.0, 1.0),
            Pos2::new(0.0, 1.0),
        ];
        let mut mesh = Mesh::with_texture(texture_id);
        for (pos, uv) in quad.into_iter().zip(uvs) {
            mesh.vertices.push(Vertex {
                pos,
                uv,
                color: Color32::WHITE,
            });
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        self.painter.add(Shape::mesh(mesh));
    }

    fn draw_text(&mut self, text: &str, pos: Pos2, align: Align2, size: f32, color: Color32) {
        let transform = self.screen_transform();
        let font = FontId::proportional(size * transform.approx_scale());
        self.painter
            .text(transform.apply(pos), align, text, font, color);
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
