use std::io::Cursor;
use std::path::{Path, PathBuf};

use egui::Vec2;
use image::{ImageFormat, RgbaImage};
use log::info;

use crate::error::{EditorError, EditorResult};
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::surface::RasterSurface;

/// An encoded export ready to be written or handed to the host
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl ExportArtifact {
    /// Write the artifact into `dir` under its file name and return the full path
    pub fn save_to(&self, dir: impl AsRef<Path>) -> EditorResult<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!("Saved export to {}", path.display());
        Ok(path)
    }
}

/// Largest pixel count an export may allocate (256 MiB of RGBA)
pub const MAX_EXPORT_PIXELS: u64 = 1 << 26;

/// Pixel dimensions for a canvas size, rejecting anything that will not fit in memory
pub fn raster_size(size: Vec2) -> EditorResult<(u32, u32)> {
    let too_large = || EditorError::ExportTooLarge {
        width: size.x,
        height: size.y,
    };
    let dimension = |value: f32| {
        let rounded = value.round().max(1.0);
        if !rounded.is_finite() {
            return Err(too_large());
        }
        u32::try_from(rounded as u64).map_err(|_| too_large())
    };

    let (width, height) = (dimension(size.x)?, dimension(size.y)?);
    match u64::from(width).checked_mul(u64::from(height)) {
        Some(pixels) if pixels <= MAX_EXPORT_PIXELS => Ok((width, height)),
        _ => Err(too_large()),
    }
}

/// Composite the scene at full canvas resolution
pub fn render_raster(scene: &Scene) -> EditorResult<RgbaImage> {
    let (width, height) = raster_size(scene.canvas_size())?;
    let mut surface = RasterSurface::new(width, height);
    Renderer::new().render(&mut surface, scene);
    Ok(surface.into_image())
}

/// Composite the scene and encode it as PNG
pub fn export_png(scene: &Scene) -> EditorResult<ExportArtifact> {
    let image = render_raster(scene)?;
    let (width, height) = image.dimensions();

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;

    info!("Exported {width}x{height} PNG ({} bytes)", bytes.len());
    Ok(ExportArtifact {
        file_name: scene.config().export_file_name.clone(),
        bytes,
        width,
        height,
    })
}
