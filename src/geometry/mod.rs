mod hit_testing;
mod transform;

pub use hit_testing::{
    hit_test_frame, hit_test_photo, local_footprint, photo_transform, screen_to_canvas,
};
pub use transform::{Transform, TransformStack};
