//! The scene model: canvas, frame, photos and the layer list that orders them.
//!
//! Every mutation is atomic. Validation happens before anything is written, so
//! an `Err` always leaves the scene exactly as it was.

mod frame;
mod layer;
mod photo;

pub use frame::Frame;
pub use layer::{Layer, LayerId, LayerKind};
pub use photo::{Photo, PhotoId, normalize_degrees};

use egui::{Pos2, Vec2};
use log::{debug, info};
use serde::Serialize;

use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::id_generator::IdGenerator;
use crate::image_source::ImageRef;

/// Deep copy of the undoable scene content: everything except the selection
/// and the id counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub canvas_size: Vec2,
    pub frame: Frame,
    pub photos: Vec<Photo>,
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone)]
pub struct Scene {
    canvas_size: Vec2,
    frame: Frame,
    photos: Vec<Photo>,
    layers: Vec<Layer>,
    selected: Option<LayerId>,
    ids: IdGenerator,
    config: EditorConfig,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Scene {
    /// A fresh scene: frame covering the whole canvas, one frame layer, no photos
    pub fn new(config: EditorConfig) -> Self {
        let canvas_size = config.canvas_size();
        let mut scene = Self {
            canvas_size,
            frame: Frame::new(canvas_size),
            photos: Vec::new(),
            layers: Vec::new(),
            selected: None,
            ids: IdGenerator::default(),
            config,
        };
        let id = LayerId(scene.ids.next_layer_id());
        scene.layers.push(Layer::new(id, LayerKind::Frame, "Frame", 1));
        scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_size
    }

    pub fn canvas_center(&self) -> Pos2 {
        (self.canvas_size * 0.5).to_pos2()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn selected_layer_id(&self) -> Option<LayerId> {
        self.selected
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.selected.and_then(|id| self.layer(id))
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn photo(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.iter().find(|photo| photo.id == id)
    }

    /// The photo owned by a photo layer
    pub fn photo_for_layer(&self, id: LayerId) -> Option<&Photo> {
        self.layer(id)
            .and_then(|layer| layer.photo_id())
            .and_then(|photo_id| self.photo(photo_id))
    }

    /// Layers bottom to top. Equal z-indices keep list order.
    pub fn layers_by_z(&self) -> Vec<&Layer> {
        let mut ordered: Vec<&Layer> = self.layers.iter().collect();
        ordered.sort_by_key(|layer| layer.z_index);
        ordered
    }

    /// Topmost visible layer whose geometry contains `point`.
    ///
    /// Photos are tested with their upright scaled box, frames with a plain
    /// rect. Frame layers share geometry, so the topmost visible one wins.
    pub fn hit_test_topmost(&self, point: Pos2) -> Option<LayerId> {
        self.layers_by_z()
            .into_iter()
            .rev()
            .filter(|layer| layer.visible)
            .find(|layer| self.layer_contains(layer, point))
            .map(|layer| layer.id)
    }

    /// Whether a single layer's geometry contains `point`, ignoring visibility
    pub fn hit_test_layer(&self, id: LayerId, point: Pos2) -> bool {
        self.layer(id)
            .is_some_and(|layer| self.layer_contains(layer, point))
    }

    fn layer_contains(&self, layer: &Layer, point: Pos2) -> bool {
        match layer.kind {
            LayerKind::Frame => self.frame.hit_test(point),
            LayerKind::Photo(photo_id) => self
                .photo(photo_id)
                .is_some_and(|photo| photo.hit_test(point)),
        }
    }

    fn layer_index(&self, id: LayerId) -> EditorResult<usize> {
        self.layers
            .iter()
            .position(|layer| layer.id == id)
            .ok_or(EditorError::LayerNotFound(id))
    }

    /// Index of an existing, unlocked layer
    fn unlocked_layer_index(&self, id: LayerId) -> EditorResult<usize> {
        let index = self.layer_index(id)?;
        if self.layers[index].locked {
            return Err(EditorError::LayerLocked(id));
        }
        Ok(index)
    }

    /// Mutable photo behind an unlocked photo layer
    fn unlocked_photo_mut(&mut self, id: LayerId) -> EditorResult<&mut Photo> {
        let index = self.unlocked_layer_index(id)?;
        let photo_id = self.layers[index]
            .photo_id()
            .ok_or(EditorError::NotAPhotoLayer(id))?;
        self.photos
            .iter_mut()
            .find(|photo| photo.id == photo_id)
            .ok_or(EditorError::LayerNotFound(id))
    }

    fn next_z_index(&self) -> i64 {
        self.layers.len() as i64 + 1
    }

    /// Add a photo at the canvas center on top of the stack and select it
    pub fn add_photo(&mut self) -> EditorResult<LayerId> {
        let max = self.config.max_photos;
        if self.photos.len() >= max {
            return Err(EditorError::CapacityReached { max });
        }

        let photo_id = PhotoId(self.ids.next_photo_id());
        let layer_id = LayerId(self.ids.next_layer_id());
        let photo = Photo::new(
            photo_id,
            self.canvas_center(),
            self.config.photo_size(),
            self.config.placeholder_color(photo_id.0),
        );
        let layer = Layer::new(
            layer_id,
            LayerKind::Photo(photo_id),
            format!("Photo {photo_id}"),
            self.next_z_index(),
        );

        self.photos.push(photo);
        self.layers.push(layer);
        self.selected = Some(layer_id);
        info!("Added photo {photo_id} on layer {layer_id}");
        Ok(layer_id)
    }

    /// Add another layer presenting the shared frame, on top, and select it
    pub fn add_frame_layer(&mut self) -> LayerId {
        let frame_count = self.layers.iter().filter(|layer| layer.is_frame()).count();
        let layer_id = LayerId(self.ids.next_layer_id());
        let name = if frame_count == 0 {
            "Frame".to_owned()
        } else {
            format!("Frame {}", frame_count + 1)
        };
        let z_index = self.next_z_index();
        self.layers
            .push(Layer::new(layer_id, LayerKind::Frame, name, z_index));
        self.selected = Some(layer_id);
        info!("Added frame layer {layer_id}");
        layer_id
    }

    /// Remove a layer and, for photo layers, its photo. Selection moves to the
    /// last remaining layer in list order.
    pub fn delete_layer(&mut self, id: LayerId) -> EditorResult<()> {
        let index = self.unlocked_layer_index(id)?;
        let removed = self.layers.remove(index);
        if let Some(photo_id) = removed.photo_id() {
            self.photos.retain(|photo| photo.id != photo_id);
        }
        self.selected = self.layers.last().map(|layer| layer.id);
        info!("Deleted layer {id} ({})", removed.name);
        Ok(())
    }

    pub fn toggle_visibility(&mut self, id: LayerId) -> EditorResult<()> {
        let index = self.layer_index(id)?;
        let layer = &mut self.layers[index];
        layer.visible = !layer.visible;
        debug!("Layer {id} visible={}", layer.visible);
        Ok(())
    }

    pub fn toggle_locked(&mut self, id: LayerId) -> EditorResult<()> {
        let index = self.layer_index(id)?;
        let layer = &mut self.layers[index];
        layer.locked = !layer.locked;
        debug!("Layer {id} locked={}", layer.locked);
        Ok(())
    }

    /// Raise above every other layer. A layer already strictly on top is left alone.
    pub fn move_to_top(&mut self, id: LayerId) -> EditorResult<()> {
        let index = self.layer_index(id)?;
        let others_max = self
            .layers
            .iter()
            .filter(|layer| layer.id != id)
            .map(|layer| layer.z_index)
            .max()
            .ok_or(EditorError::Unchanged)?;
        if self.layers[index].z_index > others_max {
            return Err(EditorError::Unchanged);
        }
        self.layers[index].z_index = others_max + 1;
        Ok(())
    }

    /// Lower beneath every other layer. A layer already strictly at the bottom is left alone.
    pub fn move_to_bottom(&mut self, id: LayerId) -> EditorResult<()> {
        let index = self.layer_index(id)?;
        let others_min = self
            .layers
            .iter()
            .filter(|layer| layer.id != id)
            .map(|layer| layer.z_index)
            .min()
            .ok_or(EditorError::Unchanged)?;
        if self.layers[index].z_index < others_min {
            return Err(EditorError::Unchanged);
        }
        self.layers[index].z_index = others_min - 1;
        Ok(())
    }

    /// Move a layer to position `to` in bottom-to-top order, the way a list
    /// reorder drops an item between two others.
    ///
    /// Only the moved layer's z-index changes. It takes a value strictly
    /// between its new neighbours when there is room; otherwise it shares the
    /// lower neighbour's z-index and is placed right after it in list order,
    /// which is how equal z-indices are ordered.
    pub fn move_layer(&mut self, id: LayerId, to: usize) -> EditorResult<()> {
        let index = self.layer_index(id)?;
        let order: Vec<(LayerId, i64)> = self
            .layers_by_z()
            .into_iter()
            .map(|layer| (layer.id, layer.z_index))
            .collect();
        let from = order
            .iter()
            .position(|(layer_id, _)| *layer_id == id)
            .ok_or(EditorError::LayerNotFound(id))?;
        let to = to.min(order.len() - 1);
        if from == to {
            return Err(EditorError::Unchanged);
        }

        let others: Vec<(LayerId, i64)> = order.into_iter().filter(|(layer_id, _)| *layer_id != id).collect();
        let below = to.checked_sub(1).map(|i| others[i]);
        let above = others.get(to).copied();
        match (below, above) {
            (None, None) => return Err(EditorError::Unchanged),
            (None, Some((_, above_z))) => self.layers[index].z_index = above_z - 1,
            (Some((_, below_z)), None) => self.layers[index].z_index = below_z + 1,
            (Some((_, below_z)), Some((_, above_z))) if above_z - below_z >= 2 => {
                self.layers[index].z_index = below_z + 1;
            }
            (Some((below_id, below_z)), Some(_)) => {
                let mut layer = self.layers.remove(index);
                layer.z_index = below_z;
                let below_index = self.layer_index(below_id)?;
                self.layers.insert(below_index + 1, layer);
            }
        }
        debug!("Moved layer {id} from position {from} to {to}");
        Ok(())
    }

    pub fn rotate(&mut self, id: LayerId, delta_degrees: f32) -> EditorResult<()> {
        self.unlocked_photo_mut(id)?.rotate_by(delta_degrees);
        Ok(())
    }

    /// Multiply the scale, clamped to the configured bounds. An inverted
    /// range from a hand-built config resolves to `max_scale`.
    pub fn rescale(&mut self, id: LayerId, factor: f32) -> EditorResult<()> {
        let (min, max) = (self.config.min_scale, self.config.max_scale);
        let photo = self.unlocked_photo_mut(id)?;
        photo.scale = (photo.scale * factor).max(min).min(max);
        Ok(())
    }

    /// Move a photo, or the shared frame for frame layers
    pub fn move_by(&mut self, id: LayerId, delta: Vec2) -> EditorResult<()> {
        let index = self.unlocked_layer_index(id)?;
        let kind = self.layers[index].kind;
        match kind {
            LayerKind::Frame => self.frame.position += delta,
            LayerKind::Photo(_) => self.unlocked_photo_mut(id)?.position += delta,
        }
        Ok(())
    }

    /// Photos snap to the canvas center; the frame is centered by its top-left
    pub fn center_layer(&mut self, id: LayerId) -> EditorResult<()> {
        let index = self.unlocked_layer_index(id)?;
        let kind = self.layers[index].kind;
        match kind {
            LayerKind::Frame => {
                self.frame.position = ((self.canvas_size - self.frame.size) * 0.5).to_pos2();
            }
            LayerKind::Photo(_) => {
                let center = self.canvas_center();
                self.unlocked_photo_mut(id)?.position = center;
            }
        }
        Ok(())
    }

    /// Set the canvas size. The frame is resized to match.
    pub fn resize_canvas(&mut self, width: f32, height: f32) -> EditorResult<()> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(EditorError::InvalidCanvasSize { width, height });
        }
        self.canvas_size = Vec2::new(width, height);
        self.frame.size = self.canvas_size;
        info!("Canvas resized to {width}x{height}");
        Ok(())
    }

    /// Drop every photo and all but the first frame layer
    pub fn clear_all(&mut self) {
        let kept = self.layers.iter().find(|layer| layer.is_frame()).cloned();
        self.photos.clear();
        self.selected = kept.as_ref().map(|layer| layer.id);
        self.layers = kept.into_iter().collect();
        info!("Cleared scene");
    }

    pub fn select_layer(&mut self, id: Option<LayerId>) -> EditorResult<()> {
        if let Some(id) = id {
            self.layer_index(id)?;
        }
        self.selected = id;
        Ok(())
    }

    /// Replace the image on a photo, or on the shared frame for frame layers
    pub fn set_image(&mut self, id: LayerId, image: Option<ImageRef>) -> EditorResult<()> {
        let index = self.unlocked_layer_index(id)?;
        let kind = self.layers[index].kind;
        match kind {
            LayerKind::Frame => self.frame.image = image,
            LayerKind::Photo(_) => self.unlocked_photo_mut(id)?.image = image,
        }
        Ok(())
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            canvas_size: self.canvas_size,
            frame: self.frame.clone(),
            photos: self.photos.clone(),
            layers: self.layers.clone(),
        }
    }

    /// Replace content from a snapshot. Id counters keep moving forward and the
    /// selection survives only if its layer still exists.
    pub fn restore(&mut self, snapshot: &SceneSnapshot) {
        self.canvas_size = snapshot.canvas_size;
        self.frame = snapshot.frame.clone();
        self.photos = snapshot.photos.clone();
        self.layers = snapshot.layers.clone();
        if let Some(id) = self.selected {
            if self.layer(id).is_none() {
                self.selected = None;
            }
        }
    }

    /// Pretty JSON dump of the scene content and selection, for debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        #[derive(Serialize)]
        struct Dump<'a> {
            #[serde(flatten)]
            content: SceneSnapshot,
            selected_layer_id: Option<&'a LayerId>,
        }
        serde_json::to_string_pretty(&Dump {
            content: self.snapshot(),
            selected_layer_id: self.selected.as_ref(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_scene_has_single_frame_layer() {
        let scene = Scene::default();
        assert_eq!(scene.layers().len(), 1);
        assert!(scene.layers()[0].is_frame());
        assert_eq!(scene.layers()[0].id, LayerId(1));
        assert_eq!(scene.frame().size, Vec2::new(276.0, 828.0));
        assert!(scene.photos().is_empty());
        assert_eq!(scene.selected_layer_id(), None);
    }

    #[test]
    fn move_by_frame_layer_moves_shared_frame() {
        let mut scene = Scene::default();
        let second = scene.add_frame_layer();
        scene.move_by(second, Vec2::new(5.0, -3.0)).unwrap();
        assert_eq!(scene.frame().position, Pos2::new(5.0, -3.0));
        // the first frame layer sees the same geometry
        assert!(scene.hit_test_layer(LayerId(1), Pos2::new(5.0, -3.0)));
    }

    #[test]
    fn center_frame_uses_top_left() {
        let mut scene = Scene::default();
        scene.resize_canvas(300.0, 900.0).unwrap();
        scene.resize_canvas(400.0, 1000.0).unwrap();
        // frame tracks the resize, so centering puts it back at the origin
        scene.center_layer(LayerId(1)).unwrap();
        assert_eq!(scene.frame().position, Pos2::ZERO);

        scene.move_by(LayerId(1), Vec2::new(40.0, 40.0)).unwrap();
        scene.center_layer(LayerId(1)).unwrap();
        assert_eq!(scene.frame().position, Pos2::ZERO);
    }

    #[test]
    fn rotate_rejects_frame_layer() {
        let mut scene = Scene::default();
        assert!(matches!(
            scene.rotate(LayerId(1), 15.0),
            Err(EditorError::NotAPhotoLayer(_))
        ));
    }

    #[test]
    fn restore_clears_dangling_selection() {
        let mut scene = Scene::default();
        let before = scene.snapshot();
        let photo_layer = scene.add_photo().unwrap();
        assert_eq!(scene.selected_layer_id(), Some(photo_layer));
        scene.restore(&before);
        assert_eq!(scene.selected_layer_id(), None);
        assert!(scene.photos().is_empty());
    }

    #[test]
    fn restore_does_not_rewind_ids() {
        let mut scene = Scene::default();
        let before = scene.snapshot();
        let first = scene.add_photo().unwrap();
        scene.restore(&before);
        let second = scene.add_photo().unwrap();
        assert_ne!(first, second);
        assert_eq!(scene.photos()[0].id, PhotoId(2));
    }

    #[test]
    fn inverted_scale_bounds_do_not_panic() {
        let config = EditorConfig {
            min_scale: 5.0,
            max_scale: 0.1,
            ..Default::default()
        };
        let mut scene = Scene::new(config);
        let layer = scene.add_photo().unwrap();
        scene.rescale(layer, 1.1).unwrap();
        assert_eq!(scene.photos()[0].scale, 0.1);
    }

    #[test]
    fn move_layer_into_tight_gap_shares_lower_z() {
        let mut scene = Scene::default();
        let a = scene.add_photo().unwrap();
        let b = scene.add_photo().unwrap();
        // order: frame(1), a(2), b(3); drop b between frame and a
        scene.move_layer(b, 1).unwrap();

        let order: Vec<LayerId> = scene.layers_by_z().iter().map(|layer| layer.id).collect();
        assert_eq!(order, vec![LayerId(1), b, a]);
        assert_eq!(scene.layer(LayerId(1)).unwrap().z_index, 1);
        assert_eq!(scene.layer(a).unwrap().z_index, 2);
        assert_eq!(scene.layer(b).unwrap().z_index, 1);
        assert_eq!(scene.hit_test_topmost(scene.canvas_center()), Some(a));
    }

    #[test]
    fn json_dump_names_selection() {
        let mut scene = Scene::default();
        scene.add_photo().unwrap();
        let json = scene.to_json().unwrap();
        assert!(json.contains("\"selected_layer_id\": 2"));
        assert!(json.contains("\"photos\""));
    }
}
