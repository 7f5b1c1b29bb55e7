use std::io::Cursor;

use futures::executor::block_on;
use image::{ImageFormat, Rgba, RgbaImage};
use photobooth_frame::command::Command;
use photobooth_frame::image_loader::{ImageLoader, LoadStatus};
use photobooth_frame::scene::LayerId;
use photobooth_frame::state::EditorContext;

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(width, height, Rgba([200, 10, 10, 255]))
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn frame_upload_is_one_undoable_step() {
    let editor = EditorContext::default().into_shared();
    let loader = ImageLoader::new(editor.clone());

    let status = block_on(loader.load(LayerId(1), "border.png", png(6, 18)));
    assert_eq!(status, LoadStatus::Applied);

    let mut editor = editor.lock();
    let frame_image = editor.scene().frame().image.clone().unwrap();
    assert_eq!((frame_image.width(), frame_image.height()), (6, 18));
    assert_eq!(frame_image.name(), "border.png");

    assert!(editor.undo());
    assert!(editor.scene().frame().image.is_none());
}

#[test]
fn missing_layer_is_rejected() {
    let editor = EditorContext::default().into_shared();
    let loader = ImageLoader::new(editor.clone());
    let status = block_on(loader.load(LayerId(9), "a.png", png(1, 1)));
    assert!(matches!(status, LoadStatus::Rejected(_)));
}

#[test]
fn failed_decode_keeps_previous_image() {
    let editor = EditorContext::default().into_shared();
    let layer = {
        let mut editor = editor.lock();
        editor.execute(Command::AddPhoto).unwrap();
        editor.scene().selected_layer_id().unwrap()
    };
    let loader = ImageLoader::new(editor.clone());

    assert_eq!(block_on(loader.load(layer, "good.png", png(2, 2))), LoadStatus::Applied);
    let entries = editor.lock().history().len();
    let status = block_on(loader.load(layer, "bad.png", b"not an image".to_vec()));

    assert!(matches!(status, LoadStatus::Failed(_)));
    let editor = editor.lock();
    assert_eq!(editor.history().len(), entries);
    let photo = editor.scene().photo_for_layer(layer).unwrap();
    assert_eq!(photo.image.as_ref().map(|image| image.name()), Some("good.png"));
}
