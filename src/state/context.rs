//! The editor context owns the scene and its history and is the single entry
//! point for mutations.
//!
//! Hosts never touch the [`Scene`] directly. They call [`EditorContext::execute`]
//! (or one of the confirmation-gated helpers) and re-render afterwards. Each
//! successful command commits exactly one history entry; a rejected command
//! changes nothing and may leave a notice for the user.
//!
//! Drag gestures are the exception: intermediate moves go through
//! [`EditorContext::drag_by`], which skips history, and the gesture ends with
//! a single [`EditorContext::commit`].
//!
//! # Example
//!
//! ```rust
//! use photobooth_frame::command::Command;
//! use photobooth_frame::state::EditorContext;
//!
//! let mut editor = EditorContext::default();
//! editor.execute(Command::AddPhoto).unwrap();
//! assert_eq!(editor.scene().photos().len(), 1);
//! editor.undo();
//! assert!(editor.scene().photos().is_empty());
//! ```

use std::sync::Arc;

use egui::Vec2;
use log::{info, warn};
use parking_lot::Mutex;

use super::Confirm;
use crate::command::{Command, CommandResult, SnapshotHistory};
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};
use crate::scene::{LayerId, Scene};

/// Editor shared between the UI thread and image-loading workers
pub type SharedEditor = Arc<Mutex<EditorContext>>;

#[derive(Debug)]
pub struct EditorContext {
    scene: Scene,
    history: SnapshotHistory,
    notice: Option<String>,
    /// Bumped on every change that needs a re-render
    version: u64,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorContext {
    /// Creates a context with a fresh scene committed as the first history entry
    pub fn new(config: EditorConfig) -> Self {
        let mut history = SnapshotHistory::new(config.history_limit);
        let scene = Scene::new(config);
        history.commit(&scene, "New scene");
        Self {
            scene,
            history,
            notice: None,
            version: 0,
        }
    }

    pub fn into_shared(self) -> SharedEditor {
        Arc::new(Mutex::new(self))
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The pending user-facing message, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Run a command and commit it to history on success
    pub fn execute(&mut self, command: Command) -> CommandResult {
        match command.execute(&mut self.scene) {
            Ok(()) => {
                info!("Executed {}", command.label());
                self.history.commit(&self.scene, command.label());
                self.version += 1;
                Ok(())
            }
            Err(err) => {
                self.report(&command.label(), &err);
                Err(err)
            }
        }
    }

    /// Log a failed or declined action and raise a notice when the user should see it
    pub fn report(&mut self, action: &str, err: &EditorError) {
        match err {
            EditorError::Unchanged | EditorError::Cancelled => {
                log::debug!("{action}: {err}");
            }
            _ => warn!("{action} rejected: {err}"),
        }
        if err.is_user_facing() {
            self.notice = Some(err.to_string());
        }
    }

    /// Change the selection. Selection is not part of history.
    pub fn select(&mut self, id: Option<LayerId>) -> CommandResult {
        self.scene.select_layer(id)?;
        self.version += 1;
        Ok(())
    }

    /// Delete a layer; locked layers are refused with a notice
    pub fn delete_layer(&mut self, id: LayerId) -> CommandResult {
        if self.scene.layer(id).is_some_and(|layer| layer.locked) {
            self.notice = Some("Unlock the layer before deleting it".to_owned());
            warn!("Refused to delete locked layer {id}");
            return Err(EditorError::LayerLocked(id));
        }
        self.execute(Command::DeleteLayer(id))
    }

    /// Clear the scene after the user confirms
    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> CommandResult {
        if !confirm.confirm("Remove all photos and extra frame layers?") {
            let err = EditorError::Cancelled;
            self.report("Clear all", &err);
            return Err(err);
        }
        self.execute(Command::ClearAll)
    }

    /// Ask for a new canvas size as text and apply it
    pub fn resize_canvas_prompt(&mut self, confirm: &mut dyn Confirm) -> CommandResult {
        let current = self.scene.canvas_size();
        let Some(width) = confirm.prompt("Canvas width", &current.x.to_string()) else {
            return self.cancelled("Resize canvas");
        };
        let Some(height) = confirm.prompt("Canvas height", &current.y.to_string()) else {
            return self.cancelled("Resize canvas");
        };
        let parsed = parse_dimension(&width).and_then(|w| Ok((w, parse_dimension(&height)?)));
        match parsed {
            Ok((width, height)) => self.execute(Command::ResizeCanvas { width, height }),
            Err(err) => {
                self.report("Resize canvas", &err);
                Err(err)
            }
        }
    }

    fn cancelled(&mut self, action: &str) -> CommandResult {
        let err = EditorError::Cancelled;
        self.report(action, &err);
        Err(err)
    }

    /// Move without recording history, for intermediate drag frames
    pub fn drag_by(&mut self, id: LayerId, delta: Vec2) -> CommandResult {
        self.scene.move_by(id, delta)?;
        self.version += 1;
        Ok(())
    }

    /// Record the current scene, used to close a drag gesture
    pub fn commit(&mut self, label: &str) {
        self.history.commit(&self.scene, label);
        self.version += 1;
        info!("Committed {label}");
    }

    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.scene.restore(snapshot);
        self.version += 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.scene.restore(snapshot);
        self.version += 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

fn parse_dimension(text: &str) -> EditorResult<f32> {
    text.trim()
        .parse::<f32>()
        .map_err(|_| EditorError::InvalidNumber(text.to_owned()))
}
