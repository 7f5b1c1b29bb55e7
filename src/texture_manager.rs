use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureId, TextureOptions};
use log::debug;
use uuid::Uuid;

use crate::image_source::ImageRef;

/// Uploads decoded images to the GPU once and caches the handles.
///
/// Entries are keyed by image identity. When the cache grows past its limit
/// the least recently used textures are dropped, which frees them in egui.
pub struct TextureManager {
    texture_cache: HashMap<Uuid, TextureHandle>,
    /// Frame counter value when each texture was last drawn
    last_used: HashMap<Uuid, u64>,
    current_frame: u64,
    max_cache_size: usize,
}

impl Default for TextureManager {
    fn default() -> Self {
        // frame image plus every photo slot, with headroom for replaced uploads
        Self::new(32)
    }
}

impl TextureManager {
    pub fn new(max_cache_size: usize) -> Self {
        Self {
            texture_cache: HashMap::new(),
            last_used: HashMap::new(),
            current_frame: 0,
            max_cache_size: max_cache_size.max(1),
        }
    }

    /// Increments the frame counter, should be called at the start of each frame
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
    }

    /// Texture for `image`, uploading it on first use
    pub fn texture_id(&mut self, ctx: &Context, image: &ImageRef) -> TextureId {
        let key = image.id();
        self.last_used.insert(key, self.current_frame);
        if let Some(handle) = self.texture_cache.get(&key) {
            return handle.id();
        }

        let pixels = image.pixels();
        let color_image = ColorImage::from_rgba_unmultiplied(
            [pixels.width() as usize, pixels.height() as usize],
            pixels.as_raw(),
        );
        let handle = ctx.load_texture(format!("image_{key}"), color_image, TextureOptions::LINEAR);
        let id = handle.id();
        self.texture_cache.insert(key, handle);
        debug!("Uploaded texture for {:?}", image.name());

        self.prune_cache_if_needed();
        id
    }

    /// Drops the least recently used textures beyond the cache limit
    fn prune_cache_if_needed(&mut self) {
        if self.texture_cache.len() <= self.max_cache_size {
            return;
        }
        let mut entries: Vec<(Uuid, u64)> = self
            .last_used
            .iter()
            .map(|(key, frame)| (*key, *frame))
            .collect();
        entries.sort_by_key(|(_, frame)| *frame);

        let to_remove = entries.len() - self.max_cache_size;
        for (key, _) in entries.into_iter().take(to_remove) {
            self.texture_cache.remove(&key);
            self.last_used.remove(&key);
        }
    }

    pub fn cache_size(&self) -> usize {
        self.texture_cache.len()
    }

    pub fn contains(&self, image: &ImageRef) -> bool {
        self.texture_cache.contains_key(&image.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn image(name: &str) -> ImageRef {
        ImageRef::from_rgba(name, RgbaImage::new(4, 4))
    }

    #[test]
    fn cache_hit_reuses_texture() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(10);
        let photo = image("a");
        let first = manager.texture_id(&ctx, &photo);
        let second = manager.texture_id(&ctx, &photo.clone());
        assert_eq!(first, second);
        assert_eq!(manager.cache_size(), 1);
    }

    #[test]
    fn lru_eviction() {
        let ctx = Context::default();
        let mut manager = TextureManager::new(2);
        let (a, b, c) = (image("a"), image("b"), image("c"));
        manager.texture_id(&ctx, &a);
        manager.begin_frame();
        manager.texture_id(&ctx, &b);
        manager.begin_frame();
        manager.texture_id(&ctx, &c);

        assert_eq!(manager.cache_size(), 2);
        assert!(!manager.contains(&a));
        assert!(manager.contains(&b));
        assert!(manager.contains(&c));
    }
}
