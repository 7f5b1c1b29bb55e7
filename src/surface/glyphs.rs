use std::sync::OnceLock;

use ab_glyph::{Font, FontArc, GlyphId, ScaleFont, point};
use egui::{FontDefinitions, FontFamily, Vec2};
use log::warn;

/// Largest pixel size a label is rasterized at
pub(crate) const MAX_PIXEL_SIZE: f32 = 512.0;

/// The proportional font egui draws labels with, so exports match the screen
pub(crate) fn label_font() -> Option<&'static FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(load_label_font).as_ref()
}

fn load_label_font() -> Option<FontArc> {
    let definitions = FontDefinitions::default();
    let name = definitions.families.get(&FontFamily::Proportional)?.first()?;
    let data = definitions.font_data.get(name)?;
    match FontArc::try_from_vec(data.font.to_vec()) {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("Cannot parse label font {name}: {err}");
            None
        }
    }
}

/// Antialiased coverage of a single line of text, one cell per pixel
pub(crate) struct TextMask {
    width: usize,
    height: usize,
    coverage: Vec<f32>,
}

impl TextMask {
    /// Lay out `text` at `pixel_size` with kerning, baseline at the font's ascent
    pub(crate) fn rasterize(font: &FontArc, text: &str, pixel_size: f32) -> Option<Self> {
        if !pixel_size.is_finite() || pixel_size <= 0.0 {
            return None;
        }
        let scaled = font.as_scaled(pixel_size);

        let mut glyphs = Vec::new();
        let mut caret = 0.0;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = font.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            glyphs.push(id.with_scale_and_position(pixel_size, point(caret, scaled.ascent())));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let width = caret.ceil() as usize;
        let height = scaled.height().ceil() as usize;
        if width == 0 || height == 0 {
            return None;
        }

        let mut coverage = vec![0.0; width * height];
        for glyph in glyphs {
            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, amount| {
                let px = bounds.min.x as i64 + x as i64;
                let py = bounds.min.y as i64 + y as i64;
                if px < 0 || py < 0 || px as usize >= width || py as usize >= height {
                    return;
                }
                let cell = &mut coverage[py as usize * width + px as usize];
                *cell = (*cell + amount).min(1.0);
            });
        }

        Some(Self {
            width,
            height,
            coverage,
        })
    }

    pub(crate) fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Coverage at a point in mask pixels, zero outside
    pub(crate) fn coverage_at(&self, at: Vec2) -> f32 {
        if at.x < 0.0 || at.y < 0.0 {
            return 0.0;
        }
        let (x, y) = (at.x as usize, at.y as usize);
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.coverage[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inked(mask: &TextMask) -> usize {
        mask.coverage.iter().filter(|amount| **amount > 0.0).count()
    }

    #[test]
    fn bundled_font_loads() {
        assert!(label_font().is_some());
    }

    #[test]
    fn longer_text_is_wider() {
        let font = label_font().unwrap();
        let one = TextMask::rasterize(font, "1", 16.0).unwrap();
        let frame = TextMask::rasterize(font, "FRAME", 16.0).unwrap();
        assert!(frame.size().x > one.size().x);
        assert_eq!(frame.size().y, one.size().y);
        assert!(inked(&frame) > inked(&one));
    }

    #[test]
    fn whitespace_has_no_ink() {
        let font = label_font().unwrap();
        let mask = TextMask::rasterize(font, "   ", 16.0).unwrap();
        assert_eq!(inked(&mask), 0);
        assert_eq!(mask.coverage_at(Vec2::new(-1.0, 2.0)), 0.0);
    }

    #[test]
    fn empty_text_has_no_mask() {
        let font = label_font().unwrap();
        assert!(TextMask::rasterize(font, "", 16.0).is_none());
        assert!(TextMask::rasterize(font, "A", 0.0).is_none());
    }
}
