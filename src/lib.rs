#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod export;
pub mod file_handler;
pub mod geometry;
pub mod id_generator;
pub mod image_loader;
pub mod image_source;
pub mod input;
pub mod panels;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod surface;
pub mod texture_manager;

pub use app::PhotoboothApp;
pub use command::{Command, SnapshotHistory};
pub use config::EditorConfig;
pub use error::{EditorError, EditorResult};
pub use image_loader::{ImageLoader, LoadHandle, LoadStatus};
pub use image_source::ImageRef;
pub use input::{InputEvent, InteractionController};
pub use renderer::Renderer;
pub use scene::{Layer, LayerId, LayerKind, Photo, PhotoId, Scene};
pub use state::{Confirm, EditorContext, SharedEditor};
pub use surface::Surface;
