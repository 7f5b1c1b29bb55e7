use egui::{Rect, Sense, Vec2};

use crate::PhotoboothApp;
use crate::surface::EguiSurface;

/// Largest rect with the canvas aspect ratio that fits in `available`, centered
pub fn fit_canvas(available: Rect, canvas_size: Vec2) -> Rect {
    if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 {
        return Rect::from_center_size(available.center(), Vec2::ZERO);
    }
    let scale = (available.width() / canvas_size.x).min(available.height() / canvas_size.y);
    Rect::from_center_size(available.center(), canvas_size * scale.max(0.0))
}

pub fn central_panel(app: &mut PhotoboothApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::from_gray(64)))
        .show(ctx, |ui| {
            let available = ui.available_rect_before_wrap().shrink(8.0);
            let canvas_size = app.editor.lock().scene().canvas_size();
            let display_rect = fit_canvas(available, canvas_size);

            let response = ui.allocate_rect(display_rect, Sense::click_and_drag());
            let painter = ui.painter_at(display_rect);

            let mut editor = app.editor.lock();
            for event in app.input.process(&response) {
                if app.controller.handle_event(event, display_rect, &mut editor) {
                    ctx.request_repaint();
                }
            }

            if app.controller.gesture().is_dragging() {
                ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
            }

            let mut surface = EguiSurface::new(&painter, &mut app.textures, display_rect, canvas_size);
            app.renderer.render(&mut surface, editor.scene());
        });
}
