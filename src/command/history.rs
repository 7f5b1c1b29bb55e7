use log::debug;

use crate::scene::{Scene, SceneSnapshot};

/// One undo/redo unit: a full scene snapshot plus the label of the change
/// that produced it.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub label: String,
    pub snapshot: SceneSnapshot,
}

/// Linear snapshot history with a cursor.
///
/// `cursor` points at the entry matching the current scene. Committing while
/// the cursor is behind the end discards the redo branch first. When the
/// configured limit is exceeded the oldest entry is dropped.
#[derive(Debug, Clone)]
pub struct SnapshotHistory {
    entries: Vec<HistoryEntry>,
    cursor: Option<usize>,
    limit: usize,
}

impl SnapshotHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: None,
            limit: limit.max(1),
        }
    }

    /// Record the current scene as the newest entry
    pub fn commit(&mut self, scene: &Scene, label: impl Into<String>) {
        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        } else {
            self.entries.clear();
        }
        self.entries.push(HistoryEntry {
            label: label.into(),
            snapshot: scene.snapshot(),
        });
        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(..overflow);
        }
        self.cursor = Some(self.entries.len() - 1);
        debug!("History commit, {} entries", self.entries.len());
    }

    /// Step back one entry and return the snapshot to restore
    pub fn undo(&mut self) -> Option<&SceneSnapshot> {
        let cursor = self.cursor.filter(|&cursor| cursor > 0)?;
        self.cursor = Some(cursor - 1);
        debug!("Undo to entry {}", cursor - 1);
        Some(&self.entries[cursor - 1].snapshot)
    }

    /// Step forward one entry and return the snapshot to restore
    pub fn redo(&mut self) -> Option<&SceneSnapshot> {
        let next = self.cursor.map_or(0, |cursor| cursor + 1);
        if self.cursor.is_none() || next >= self.entries.len() {
            return None;
        }
        self.cursor = Some(next);
        debug!("Redo to entry {next}");
        Some(&self.entries[next].snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::LayerId;

    #[test]
    fn empty_history_cannot_move() {
        let mut history = SnapshotHistory::new(10);
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), None);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn single_entry_is_not_undoable() {
        let mut history = SnapshotHistory::new(10);
        history.commit(&Scene::default(), "Initial");
        assert_eq!(history.cursor(), Some(0));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut history = SnapshotHistory::new(3);
        let mut scene = Scene::default();
        history.commit(&scene, "Initial");
        for _ in 0..4 {
            scene.add_photo().unwrap();
            history.commit(&scene, "Add photo");
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), Some(2));
        assert_eq!(history.entries()[0].snapshot.photos.len(), 2);

        // only two steps back remain
        assert!(history.undo().is_some());
        assert!(history.undo().is_some());
        assert!(history.undo().is_none());
    }

    #[test]
    fn commit_after_undo_prunes_redo_branch() {
        let mut history = SnapshotHistory::new(10);
        let mut scene = Scene::default();
        history.commit(&scene, "Initial");
        scene.add_photo().unwrap();
        history.commit(&scene, "Add photo");
        scene.add_photo().unwrap();
        history.commit(&scene, "Add photo");

        history.undo();
        history.undo();
        scene.toggle_locked(LayerId(1)).unwrap();
        history.commit(&scene, "Toggle lock");

        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.entries()[1].label, "Toggle lock");
    }
}
