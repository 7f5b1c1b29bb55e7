use egui::{Key, Modifiers};
use log::info;

use crate::command::Command;
use crate::config::EditorConfig;
use crate::export;
use crate::file_handler::FileHandler;
use crate::image_loader::{ImageLoader, LoadHandle, LoadStatus};
use crate::input::{InputHandler, InteractionController};
use crate::panels::{
    DialogAnswers, DialogOutcome, PendingDialog, SceneJsonView, central_panel, layers_panel,
    notice_banner, show_dialog, tools_panel,
};
use crate::renderer::Renderer;
use crate::scene::LayerId;
use crate::state::{EditorContext, SharedEditor};
use crate::texture_manager::TextureManager;

/// Rotation step for the arrow keys and rotate buttons, in degrees
pub const ROTATE_STEP: f32 = 15.0;
/// Scale factor for the scale buttons
pub const SCALE_STEP: f32 = 1.1;

pub struct PhotoboothApp {
    pub(crate) editor: SharedEditor,
    pub(crate) renderer: Renderer,
    pub(crate) textures: TextureManager,
    pub(crate) input: InputHandler,
    pub(crate) controller: InteractionController,
    pub(crate) scene_json: SceneJsonView,
    loader: ImageLoader,
    file_handler: FileHandler,
    pending_loads: Vec<LoadHandle>,
    dialog: Option<PendingDialog>,
}

impl PhotoboothApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: EditorConfig) -> Self {
        let editor = EditorContext::new(config).into_shared();
        let repaint_ctx = cc.egui_ctx.clone();
        let loader = ImageLoader::new(editor.clone()).with_repaint(move || repaint_ctx.request_repaint());

        Self {
            editor,
            renderer: Renderer::new(),
            textures: TextureManager::default(),
            input: InputHandler::new(),
            controller: InteractionController::new(),
            scene_json: SceneJsonView::default(),
            loader,
            file_handler: FileHandler::new(),
            pending_loads: Vec::new(),
            dialog: None,
        }
    }

    /// Run a command against the shared editor; failures become notices
    pub fn execute(&mut self, command: Command) {
        let _ = self.editor.lock().execute(command);
    }

    /// Run a command against the selected layer, if any
    pub fn execute_on_selection(&mut self, make: impl FnOnce(LayerId) -> Command) {
        let selected = self.editor.lock().scene().selected_layer_id();
        if let Some(layer_id) = selected {
            self.execute(make(layer_id));
        }
    }

    pub fn delete_selected(&mut self) {
        let mut editor = self.editor.lock();
        if let Some(layer_id) = editor.scene().selected_layer_id() {
            let _ = editor.delete_layer(layer_id);
        }
    }

    pub fn undo(&mut self) {
        self.editor.lock().undo();
    }

    pub fn redo(&mut self) {
        self.editor.lock().redo();
    }

    pub fn open_dialog(&mut self, dialog: PendingDialog) {
        self.dialog = Some(dialog);
    }

    /// Open the resize dialog pre-filled with the current canvas size
    pub fn open_resize_dialog(&mut self) {
        let size = self.editor.lock().scene().canvas_size();
        self.open_dialog(PendingDialog::ResizeCanvas {
            width: size.x.to_string(),
            height: size.y.to_string(),
        });
    }

    /// Render at full resolution and write the PNG to the working directory
    pub fn export(&mut self) {
        let mut editor = self.editor.lock();
        let result = export::export_png(editor.scene()).and_then(|artifact| {
            let dir = std::env::current_dir()?;
            artifact.save_to(dir)
        });
        match result {
            Ok(path) => editor.notify(format!("Exported to {}", path.display())),
            Err(err) => editor.report("Export", &err),
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.dialog.is_some() {
            return;
        }
        let (redo, undo, delete, rotate_left, rotate_right) = ctx.input_mut(|i| {
            // redo first: a plain Cmd+Z check would also match Cmd+Shift+Z
            let redo = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y);
            let undo = i.consume_key(Modifiers::COMMAND, Key::Z);
            let delete = i.consume_key(Modifiers::NONE, Key::Delete)
                || i.consume_key(Modifiers::NONE, Key::Backspace);
            let left = i.consume_key(Modifiers::NONE, Key::ArrowLeft);
            let right = i.consume_key(Modifiers::NONE, Key::ArrowRight);
            (redo, undo, delete, left, right)
        });

        if redo {
            self.redo();
        } else if undo {
            self.undo();
        }
        if delete {
            self.delete_selected();
        }
        if rotate_left {
            self.rotate_selected_photo(-ROTATE_STEP);
        }
        if rotate_right {
            self.rotate_selected_photo(ROTATE_STEP);
        }
    }

    fn rotate_selected_photo(&mut self, degrees: f32) {
        let target = {
            let editor = self.editor.lock();
            editor
                .scene()
                .selected_layer()
                .filter(|layer| !layer.is_frame())
                .map(|layer| layer.id)
        };
        if let Some(layer_id) = target {
            self.execute(Command::Rotate { layer_id, degrees });
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        self.file_handler.preview_files_being_dropped(ctx);
        let images = self.file_handler.take_dropped_images(ctx);
        if images.is_empty() {
            return;
        }

        let selected = self.editor.lock().scene().selected_layer_id();
        let Some(layer_id) = selected else {
            self.editor.lock().notify("Select a layer before dropping an image");
            return;
        };
        // only one target at a time, so the last dropped file wins
        if let Some(image) = images.into_iter().last() {
            self.pending_loads
                .push(self.loader.load(layer_id, image.name, image.bytes));
        }
    }

    fn poll_loads(&mut self) {
        self.pending_loads.retain_mut(|handle| match handle.try_status() {
            None => true,
            Some(LoadStatus::Applied) => false,
            Some(status) => {
                info!("Image load finished: {status:?}");
                false
            }
        });
    }

    fn handle_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.dialog.as_mut() else {
            return;
        };
        let outcome = show_dialog(ctx, dialog);
        if outcome == DialogOutcome::Open {
            return;
        }
        let Some(dialog) = self.dialog.take() else {
            return;
        };

        let mut answers = DialogAnswers::from_dialog(&dialog, outcome);
        let mut editor = self.editor.lock();
        let _ = match dialog {
            PendingDialog::ClearAll => editor.clear_all(&mut answers),
            PendingDialog::ResizeCanvas { .. } => editor.resize_canvas_prompt(&mut answers),
        };
    }
}

impl eframe::App for PhotoboothApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.textures.begin_frame();

        self.handle_shortcuts(ctx);
        self.handle_dropped_files(ctx);
        self.poll_loads();

        notice_banner(self, ctx);
        tools_panel(self, ctx);
        layers_panel(self, ctx);
        central_panel(self, ctx);
        self.handle_dialog(ctx);

        if !self.pending_loads.is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
