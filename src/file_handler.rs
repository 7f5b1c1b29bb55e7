use std::collections::HashSet;

use egui::{Align2, Color32, DroppedFile, FontId, Id, LayerId, Order};
use log::{info, warn};

/// An image file dropped onto the window, read into memory
#[derive(Debug, Clone)]
pub struct DroppedImage {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Collects image files dropped onto the window
#[derive(Debug, Default)]
pub struct FileHandler {
    /// Files already handed out during the current drop
    processed_files: HashSet<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Images dropped since the last frame. Non-image and unreadable files are
    /// logged and skipped.
    pub fn take_dropped_images(&mut self, ctx: &egui::Context) -> Vec<DroppedImage> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            self.processed_files.clear();
            return Vec::new();
        }

        let mut images = Vec::new();
        for file in &dropped {
            let name = display_name(file);
            if !self.processed_files.insert(name.clone()) {
                continue;
            }
            if !is_image_file(file) {
                warn!("Dropped file is not a supported image: {name}");
                continue;
            }
            if let Some(bytes) = read_bytes(file, &name) {
                info!("Received image {name} ({} bytes)", bytes.len());
                images.push(DroppedImage { name, bytes });
            }
        }
        images
    }

    /// Dim the window and list the files while they hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        let hovered = ctx.input(|i| {
            i.raw
                .hovered_files
                .iter()
                .map(|file| match &file.path {
                    Some(path) => path.display().to_string(),
                    None => "(path not available)".to_owned(),
                })
                .collect::<Vec<_>>()
        });
        if hovered.is_empty() {
            return;
        }

        let text = format!("Drop to place on the selected layer:\n\n{}", hovered.join("\n"));
        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            FontId::proportional(20.0),
            Color32::WHITE,
        );
    }
}

fn display_name(file: &DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
pub fn is_image_file(file: &DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = match &file.path {
        Some(path) => path.to_string_lossy().into_owned(),
        None => file.name.clone(),
    };
    std::path::Path::new(&name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

fn read_bytes(file: &DroppedFile, name: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        return Some(bytes.to_vec());
    }
    let Some(path) = &file.path else {
        warn!("Dropped file has no accessible data: {name}");
        return None;
    };
    match std::fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            warn!("Failed to read {}: {err}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn mime_type_wins_over_extension() {
        let file = DroppedFile {
            name: "notes.png".to_owned(),
            mime: "text/plain".to_owned(),
            ..Default::default()
        };
        assert!(!is_image_file(&file));
    }

    #[test]
    fn extension_checked_without_mime() {
        let photo = DroppedFile {
            path: Some(PathBuf::from("/tmp/Booth.JPG")),
            ..Default::default()
        };
        let doc = DroppedFile {
            path: Some(PathBuf::from("/tmp/readme.txt")),
            ..Default::default()
        };
        assert!(is_image_file(&photo));
        assert!(!is_image_file(&doc));
    }

    #[test]
    fn in_memory_bytes_are_used() {
        let file = DroppedFile {
            name: "a.png".to_owned(),
            bytes: Some(vec![1u8, 2, 3].into()),
            ..Default::default()
        };
        assert_eq!(read_bytes(&file, "a.png"), Some(vec![1, 2, 3]));
        assert_eq!(display_name(&file), "a.png");
    }
}
