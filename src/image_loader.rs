use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::FutureExt;
use futures::channel::oneshot;
use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::command::Command;
use crate::error::EditorError;
use crate::image_source::ImageRef;
use crate::scene::LayerId;
use crate::state::SharedEditor;

/// Outcome of one image load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The image was placed on the layer and committed to history
    Applied,
    /// A newer request for the same layer was made before this one finished
    Superseded,
    /// The bytes could not be decoded; the layer keeps what it had
    Failed(String),
    /// The layer was missing or locked
    Rejected(String),
}

/// Resolves once the load has been applied, discarded or refused
pub struct LoadHandle {
    receiver: oneshot::Receiver<LoadStatus>,
}

impl LoadHandle {
    fn ready(status: LoadStatus) -> Self {
        let (sender, receiver) = oneshot::channel();
        let _ = sender.send(status);
        Self { receiver }
    }

    /// Non-blocking check, `None` while the worker is still running
    pub fn try_status(&mut self) -> Option<LoadStatus> {
        self.receiver.try_recv().ok().flatten()
    }
}

impl Future for LoadHandle {
    type Output = LoadStatus;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.receiver
            .poll_unpin(cx)
            .map(|result| result.unwrap_or_else(|_| LoadStatus::Failed("loader stopped".to_owned())))
    }
}

type RepaintFn = Arc<dyn Fn() + Send + Sync>;

/// Decodes uploaded images off the UI thread and places them on layers.
///
/// Every request bumps a per-layer generation. When a decode finishes, the
/// result is only applied if no newer request for that layer was made in the
/// meantime, so the latest upload always wins.
#[derive(Clone)]
pub struct ImageLoader {
    editor: SharedEditor,
    generations: Arc<Mutex<HashMap<LayerId, u64>>>,
    repaint: Option<RepaintFn>,
}

impl ImageLoader {
    pub fn new(editor: SharedEditor) -> Self {
        Self {
            editor,
            generations: Arc::new(Mutex::new(HashMap::new())),
            repaint: None,
        }
    }

    /// Called once after each applied load, typically `egui::Context::request_repaint`
    pub fn with_repaint(mut self, repaint: impl Fn() + Send + Sync + 'static) -> Self {
        self.repaint = Some(Arc::new(repaint));
        self
    }

    /// Start decoding `bytes` for `layer_id`
    pub fn load(&self, layer_id: LayerId, name: impl Into<String>, bytes: Vec<u8>) -> LoadHandle {
        let name = name.into();

        if let Err(err) = self.check_target(layer_id) {
            self.editor.lock().report("Load image", &err);
            return LoadHandle::ready(LoadStatus::Rejected(err.to_string()));
        }

        let generation = {
            let mut generations = self.generations.lock();
            let entry = generations.entry(layer_id).or_insert(0);
            *entry += 1;
            *entry
        };
        debug!("Loading {name:?} into layer {layer_id} (generation {generation})");

        let (sender, receiver) = oneshot::channel();
        let loader = self.clone();
        let spawned = std::thread::Builder::new()
            .name("image-loader".to_owned())
            .spawn(move || {
                let decoded = ImageRef::decode(name, &bytes);
                let status = loader.complete(layer_id, generation, decoded);
                let _ = sender.send(status);
            });

        match spawned {
            Ok(_) => LoadHandle { receiver },
            Err(err) => {
                warn!("Failed to start image loader: {err}");
                LoadHandle::ready(LoadStatus::Failed(err.to_string()))
            }
        }
    }

    fn check_target(&self, layer_id: LayerId) -> Result<(), EditorError> {
        let editor = self.editor.lock();
        match editor.scene().layer(layer_id) {
            None => Err(EditorError::LayerNotFound(layer_id)),
            Some(layer) if layer.locked => Err(EditorError::LayerLocked(layer_id)),
            Some(_) => Ok(()),
        }
    }

    fn complete(
        &self,
        layer_id: LayerId,
        generation: u64,
        decoded: Result<ImageRef, EditorError>,
    ) -> LoadStatus {
        // held until the result is applied so a newer request cannot slip in between
        let generations = self.generations.lock();
        if generations.get(&layer_id) != Some(&generation) {
            debug!("Discarding stale load for layer {layer_id} (generation {generation})");
            return LoadStatus::Superseded;
        }

        let mut editor = self.editor.lock();
        let image = match decoded {
            Ok(image) => image,
            Err(err) => {
                editor.report("Load image", &err);
                return LoadStatus::Failed(err.to_string());
            }
        };

        let name = image.name().to_owned();
        let status = match editor.execute(Command::SetImage {
            layer_id,
            image: Some(image),
        }) {
            Ok(()) => {
                info!("Placed {name:?} on layer {layer_id}");
                LoadStatus::Applied
            }
            Err(err) => LoadStatus::Rejected(err.to_string()),
        };
        drop(editor);
        drop(generations);

        if status == LoadStatus::Applied {
            if let Some(repaint) = &self.repaint {
                repaint();
            }
        }
        status
    }
}
