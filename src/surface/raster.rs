use egui::{Align2, Color32, Pos2, Rect, Stroke, Vec2};
use image::{Rgba, RgbaImage};

use super::Surface;
use super::glyphs::{MAX_PIXEL_SIZE, TextMask, label_font};
use crate::geometry::{Transform, TransformStack};
use crate::image_source::ImageRef;

/// Software rasterizer drawing into an RGBA pixel buffer, used for export.
///
/// Shapes are sampled at pixel centers through the inverse of the current
/// transform, so rotated rects and images come out exact without any
/// antialiasing. Text is rasterized with egui's bundled proportional font at
/// the current scale and sampled the same way.
pub struct RasterSurface {
    target: RgbaImage,
    transforms: TransformStack,
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            target: RgbaImage::new(width.max(1), height.max(1)),
            transforms: TransformStack::default(),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.target
    }

    pub fn into_image(self) -> RgbaImage {
        self.target
    }

    /// Run `shader` for every pixel whose center falls inside `rect` once
    /// mapped through the current transform
    fn paint<F>(&mut self, rect: Rect, mut shader: F)
    where
        F: FnMut(Pos2) -> Option<Rgba<u8>>,
    {
        if !rect.is_positive() {
            return;
        }
        let transform = *self.transforms.current();
        let Some(inverse) = transform.inverse() else {
            return;
        };

        let corners = [
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
        ]
        .map(|corner| transform.apply(corner));
        let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        let (width, height) = self.target.dimensions();
        let x0 = (min_x.floor().max(0.0) as u32).min(width);
        let x1 = (max_x.ceil().max(0.0) as u32).min(width);
        let y0 = (min_y.floor().max(0.0) as u32).min(height);
        let y1 = (max_y.ceil().max(0.0) as u32).min(height);

        for y in y0..y1 {
            for x in x0..x1 {
                let local = inverse.apply(Pos2::new(x as f32 + 0.5, y as f32 + 0.5));
                if !rect.contains(local) {
                    continue;
                }
                if let Some(color) = shader(local) {
                    blend(self.target.get_pixel_mut(x, y), color);
                }
            }
        }
    }
}

fn to_rgba(color: Color32) -> Rgba<u8> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Rgba([r, g, b, a])
}

/// Source-over blend of `src` onto `dst`
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let alpha = src[3] as f32 / 255.0;
    if alpha >= 1.0 {
        *dst = src;
        return;
    }
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for channel in 0..3 {
        let value = (src[channel] as f32 * alpha + dst[channel] as f32 * dst_alpha * (1.0 - alpha))
            / out_alpha;
        dst[channel] = value.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_alpha * 255.0).round() as u8;
}

impl Surface for RasterSurface {
    fn clear(&mut self, color: Color32) {
        let color = to_rgba(color);
        for pixel in self.target.pixels_mut() {
            *pixel = color;
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        let color = to_rgba(color);
        self.paint(rect, |_| Some(color));
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        let half = stroke.width * 0.5;
        if half <= 0.0 {
            return;
        }
        let outer = rect.expand(half);
        let edges = [
            Rect::from_min_max(outer.min, Pos2::new(outer.max.x, rect.min.y + half)),
            Rect::from_min_max(Pos2::new(outer.min.x, rect.max.y - half), outer.max),
            Rect::from_min_max(
                Pos2::new(outer.min.x, rect.min.y + half),
                Pos2::new(rect.min.x + half, rect.max.y - half),
            ),
            Rect::from_min_max(
                Pos2::new(rect.max.x - half, rect.min.y + half),
                Pos2::new(outer.max.x, rect.max.y - half),
            ),
        ];
        for edge in edges {
            self.fill_rect(edge, stroke.color);
        }
    }

    fn draw_image(&mut self, image: &ImageRef, rect: Rect) {
        let pixels = image.pixels();
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        self.paint(rect, |local| {
            let u = (local.x - rect.min.x) / rect.width();
            let v = (local.y - rect.min.y) / rect.height();
            let sx = ((u * width as f32) as u32).min(width - 1);
            let sy = ((v * height as f32) as u32).min(height - 1);
            Some(*pixels.get_pixel(sx, sy))
        });
    }

    fn draw_text(&mut self, text: &str, pos: Pos2, align: Align2, size: f32, color: Color32) {
        if text.is_empty() || size <= 0.0 {
            return;
        }
        let Some(font) = label_font() else {
            return;
        };
        let pixel_size = (size * self.transforms.current().approx_scale()).min(MAX_PIXEL_SIZE);
        if pixel_size <= 0.0 {
            return;
        }
        let pixels_per_unit = pixel_size / size;
        let Some(mask) = TextMask::rasterize(font, text, pixel_size) else {
            return;
        };

        let extent = mask.size() / pixels_per_unit;
        let origin = pos - Vec2::new(extent.x * align.x().to_factor(), extent.y * align.y().to_factor());
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        self.paint(Rect::from_min_size(origin, extent), |local| {
            let coverage = mask.coverage_at((local - origin) * pixels_per_unit);
            (coverage > 0.0).then(|| Rgba([r, g, b, (a as f32 * coverage).round() as u8]))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_covers_pixel_centers() {
        let mut surface = RasterSurface::new(10, 10);
        surface.clear(Color32::WHITE);
        surface.fill_rect(Rect::from_min_size(Pos2::new(2.0, 2.0), Vec2::splat(3.0)), Color32::RED);
        let image = surface.image();
        assert_eq!(*image.get_pixel(3, 3), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
        assert_eq!(*image.get_pixel(1, 3), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn rotated_rect_is_rotated() {
        let mut surface = RasterSurface::new(40, 40);
        surface.clear(Color32::WHITE);
        surface.translate(Vec2::new(20.0, 20.0));
        surface.rotate(std::f32::consts::FRAC_PI_2);
        // 30 wide, 4 tall before rotation: vertical bar afterwards
        surface.fill_rect(Rect::from_center_size(Pos2::ZERO, Vec2::new(30.0, 4.0)), Color32::BLUE);
        let image = surface.image();
        assert_eq!(*image.get_pixel(20, 8), Rgba([0, 0, 255, 255]));
        assert_eq!(*image.get_pixel(8, 20), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn draw_image_samples_source() {
        let mut source = RgbaImage::new(2, 1);
        source.put_pixel(0, 0, Rgba([0, 255, 0, 255]));
        source.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let image = ImageRef::from_rgba("two", source);

        let mut surface = RasterSurface::new(8, 4);
        surface.draw_image(&image, Rect::from_min_size(Pos2::ZERO, Vec2::new(8.0, 4.0)));
        assert_eq!(*surface.image().get_pixel(1, 1), Rgba([0, 255, 0, 255]));
        assert_eq!(*surface.image().get_pixel(6, 2), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn half_transparent_fill_blends() {
        let mut surface = RasterSurface::new(1, 1);
        surface.clear(Color32::WHITE);
        surface.fill_rect(
            Rect::from_min_size(Pos2::ZERO, Vec2::splat(1.0)),
            Color32::from_rgba_unmultiplied(0, 0, 0, 128),
        );
        let pixel = surface.image().get_pixel(0, 0);
        assert!(pixel[0] > 120 && pixel[0] < 135);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn text_marks_pixels_near_anchor() {
        let mut surface = RasterSurface::new(40, 40);
        surface.clear(Color32::WHITE);
        surface.draw_text("8", Pos2::new(20.0, 20.0), Align2::CENTER_CENTER, 12.0, Color32::BLACK);
        let dark: Vec<(u32, u32)> = surface
            .image()
            .enumerate_pixels()
            .filter(|(_, _, pixel)| pixel[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!dark.is_empty());
        // ink stays within a glyph's reach of the anchor
        assert!(dark.iter().all(|&(x, y)| x.abs_diff(20) <= 10 && y.abs_diff(20) <= 10));
        assert_eq!(*surface.image().get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn text_follows_scale() {
        let ink = |factor: f32| {
            let mut surface = RasterSurface::new(120, 60);
            surface.clear(Color32::WHITE);
            surface.scale(factor);
            surface.draw_text("FRAME", Pos2::new(4.0, 4.0), Align2::LEFT_TOP, 12.0, Color32::BLACK);
            surface.image().pixels().filter(|pixel| pixel[0] < 128).count()
        };
        assert!(ink(2.0) > ink(1.0) * 2);
    }
}
