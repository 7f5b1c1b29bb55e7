use image::Rgba;
use photobooth_frame::error::EditorError;
use photobooth_frame::export::{export_png, render_raster};
use photobooth_frame::scene::{LayerId, Scene};

#[test]
fn export_uses_canvas_resolution_and_fixed_name() {
    let scene = Scene::default();
    let artifact = export_png(&scene).unwrap();

    assert_eq!(artifact.file_name, "photobooth-frame.png");
    assert_eq!((artifact.width, artifact.height), (276, 828));
    assert_eq!(&artifact.bytes[..8], b"\x89PNG\r\n\x1a\n");

    let decoded = image::load_from_memory(&artifact.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (276, 828));
}

#[test]
fn photo_placeholder_color_lands_at_its_center() {
    let mut scene = Scene::default();
    scene.add_photo().unwrap();
    // keep the selection outline and the id label away from the sampled pixel
    scene.select_layer(None).unwrap();

    let image = render_raster(&scene).unwrap();
    let color = scene.photos()[0].color;
    let expected = Rgba([color.r(), color.g(), color.b(), 255]);
    assert_eq!(*image.get_pixel(138 - 40, 414), expected);
}

#[test]
fn hidden_layers_leave_white_background() {
    let mut scene = Scene::default();
    scene.toggle_visibility(LayerId(1)).unwrap();
    let image = render_raster(&scene).unwrap();
    assert!(image.pixels().all(|pixel| *pixel == Rgba([255, 255, 255, 255])));
}

#[test]
fn export_follows_canvas_resize() {
    let mut scene = Scene::default();
    scene.resize_canvas(120.0, 80.0).unwrap();
    let artifact = export_png(&scene).unwrap();
    assert_eq!((artifact.width, artifact.height), (120, 80));
}

#[test]
fn oversized_canvas_is_refused_without_allocating() {
    let mut scene = Scene::default();
    scene.resize_canvas(1e10, 1e10).unwrap();

    let err = export_png(&scene).unwrap_err();
    assert!(matches!(err, EditorError::ExportTooLarge { .. }));
    assert!(err.is_user_facing());

    // a sane size exports again
    scene.resize_canvas(276.0, 828.0).unwrap();
    assert!(export_png(&scene).is_ok());
}

#[test]
fn save_writes_file() {
    let dir = std::env::temp_dir().join(format!("photobooth-export-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let artifact = export_png(&Scene::default()).unwrap();
    let path = artifact.save_to(&dir).unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    std::fs::remove_dir_all(&dir).unwrap();
}
