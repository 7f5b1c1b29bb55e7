use std::sync::Arc;

use image::RgbaImage;
use log::info;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};

/// A decoded, immutable pixel source placed on a photo or the frame.
///
/// Cloning is cheap: the pixels are shared. Two handles are equal when they
/// refer to the same decoded upload.
#[derive(Clone)]
pub struct ImageRef {
    id: Uuid,
    name: String,
    pixels: Arc<RgbaImage>,
}

impl std::fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageRef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl PartialEq for ImageRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Serialize for ImageRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ImageRef", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

impl ImageRef {
    pub fn from_rgba(name: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            pixels: Arc::new(pixels),
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory
    pub fn decode(name: impl Into<String>, bytes: &[u8]) -> EditorResult<Self> {
        let name = name.into();
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| EditorError::ImageLoad(format!("{name}: {err}")))?;
        let pixels = decoded.to_rgba8();
        info!(
            "Decoded image {:?}: {}x{}",
            name,
            pixels.width(),
            pixels.height()
        );
        Ok(Self::from_rgba(name, pixels))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name, usually the uploaded file name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Natural pixel width
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural pixel height
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encoded_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();
        bytes.into_inner()
    }

    #[test]
    fn decode_reports_natural_size() {
        let image = ImageRef::decode("tiny.png", &encoded_png(4, 3)).unwrap();
        assert_eq!(image.width(), 4);
        assert_eq!(image.height(), 3);
        assert_eq!(image.name(), "tiny.png");
    }

    #[test]
    fn decode_garbage_is_load_error() {
        let result = ImageRef::decode("junk.png", b"definitely not an image");
        assert!(matches!(result, Err(EditorError::ImageLoad(_))));
    }

    #[test]
    fn clones_compare_equal_distinct_uploads_do_not() {
        let a = ImageRef::from_rgba("a", RgbaImage::new(1, 1));
        let b = ImageRef::from_rgba("a", RgbaImage::new(1, 1));
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
