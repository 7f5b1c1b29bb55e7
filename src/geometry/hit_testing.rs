use egui::{Pos2, Rect, Vec2};

use super::Transform;

/// Composed transform for a photo: translate to its center, rotate, then scale.
///
/// The photo's footprint is drawn in local space as a `width x height` rect
/// centered on the origin, see [`local_footprint`].
pub fn photo_transform(center: Pos2, rotation_degrees: f32, scale: f32) -> Transform {
    Transform::IDENTITY
        .translate(center.to_vec2())
        .rotate(rotation_degrees.to_radians())
        .scale(scale)
}

/// Local-space rect spanning `[-w/2, w/2] x [-h/2, h/2]`
pub fn local_footprint(size: Vec2) -> Rect {
    Rect::from_center_size(Pos2::ZERO, size)
}

/// Axis-aligned test against the scaled footprint around `center`.
///
/// Rotation is deliberately ignored: a rotated photo is hit-tested as if it
/// were upright. Clicking behavior depends on this approximation.
pub fn hit_test_photo(center: Pos2, size: Vec2, scale: f32, point: Pos2) -> bool {
    Rect::from_center_size(center, size * scale).contains(point)
}

/// Point-in-rect test for the frame, which never rotates
pub fn hit_test_frame(position: Pos2, size: Vec2, point: Pos2) -> bool {
    Rect::from_min_size(position, size).contains(point)
}

/// Map a client-space point into canvas pixels.
///
/// Each axis is scaled independently so a fixed-resolution canvas can be
/// stretched non-uniformly on screen. Returns `None` for an empty display rect.
pub fn screen_to_canvas(client: Pos2, display_rect: Rect, canvas_size: Vec2) -> Option<Pos2> {
    if display_rect.width() <= 0.0 || display_rect.height() <= 0.0 {
        return None;
    }
    let sx = canvas_size.x / display_rect.width();
    let sy = canvas_size.y / display_rect.height();
    Some(Pos2::new(
        (client.x - display_rect.min.x) * sx,
        (client.y - display_rect.min.y) * sy,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_hit_uses_scaled_box() {
        let center = Pos2::new(100.0, 100.0);
        let size = Vec2::new(100.0, 75.0);
        assert!(hit_test_photo(center, size, 1.0, Pos2::new(149.0, 100.0)));
        assert!(!hit_test_photo(center, size, 1.0, Pos2::new(151.0, 100.0)));
        assert!(hit_test_photo(center, size, 2.0, Pos2::new(199.0, 100.0)));
    }

    #[test]
    fn photo_hit_ignores_rotation() {
        // A 90 degree rotation would put this corner outside the rotated shape,
        // but the upright box still contains it.
        let t = photo_transform(Pos2::new(0.0, 0.0), 90.0, 1.0);
        let corner = Pos2::new(49.0, 36.0);
        let local = t.inverse().unwrap().apply(corner);
        assert!(!local_footprint(Vec2::new(100.0, 75.0)).contains(local));
        assert!(hit_test_photo(Pos2::ZERO, Vec2::new(100.0, 75.0), 1.0, corner));
    }

    #[test]
    fn transform_maps_footprint_corner() {
        let t = photo_transform(Pos2::new(138.0, 414.0), 0.0, 2.0);
        let corner = local_footprint(Vec2::new(100.0, 75.0)).max;
        let mapped = t.apply(corner);
        assert!((mapped.x - 238.0).abs() < 1e-3);
        assert!((mapped.y - 489.0).abs() < 1e-3);
    }

    #[test]
    fn frame_hit_is_plain_rect() {
        let pos = Pos2::new(10.0, 10.0);
        let size = Vec2::new(50.0, 50.0);
        assert!(hit_test_frame(pos, size, Pos2::new(10.0, 10.0)));
        assert!(hit_test_frame(pos, size, Pos2::new(60.0, 60.0)));
        assert!(!hit_test_frame(pos, size, Pos2::new(61.0, 30.0)));
    }

    #[test]
    fn screen_to_canvas_scales_axes_independently() {
        let display = Rect::from_min_size(Pos2::new(20.0, 10.0), Vec2::new(138.0, 207.0));
        let canvas = Vec2::new(276.0, 828.0);
        let p = screen_to_canvas(Pos2::new(89.0, 113.5), display, canvas).unwrap();
        assert!((p.x - 138.0).abs() < 1e-3);
        assert!((p.y - 414.0).abs() < 1e-3);
    }

    #[test]
    fn screen_to_canvas_rejects_empty_display() {
        let display = Rect::from_min_size(Pos2::ZERO, Vec2::new(0.0, 100.0));
        assert!(screen_to_canvas(Pos2::ZERO, display, Vec2::splat(10.0)).is_none());
    }
}
