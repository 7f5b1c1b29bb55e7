use serde::{Deserialize, Serialize};

/// Monotonic id counters for a scene.
///
/// Layers and photos draw from independent sequences, both starting at 1.
/// Counters only move forward, so an id is never handed out twice even if
/// the entity it named was deleted or undone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdGenerator {
    next_layer: usize,
    next_photo: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self {
            next_layer: 1,
            next_photo: 1,
        }
    }
}

impl IdGenerator {
    pub fn next_layer_id(&mut self) -> usize {
        let id = self.next_layer;
        self.next_layer += 1;
        id
    }

    pub fn next_photo_id(&mut self) -> usize {
        let id = self.next_photo;
        self.next_photo += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_independent() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next_layer_id(), 1);
        assert_eq!(ids.next_layer_id(), 2);
        assert_eq!(ids.next_photo_id(), 1);
        assert_eq!(ids.next_photo_id(), 2);
        assert_eq!(ids.next_layer_id(), 3);
    }
}
