#![warn(clippy::all, rust_2018_idioms)]

use photobooth_frame::PhotoboothApp;
use photobooth_frame::config::EditorConfig;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EditorConfig::from_env();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true)
            .with_title("Photobooth Frame"),
        ..Default::default()
    };

    eframe::run_native(
        "Photobooth Frame",
        native_options,
        Box::new(|cc| Ok(Box::new(PhotoboothApp::new(cc, config)))),
    )
}
