//! Camera module - lens, camera state, frustum and the group 0 camera block.
//!
//! The engine does not store cameras. They are owned and driven by the
//! caller; the frame renderer only reads them.

mod camera;
mod frustum;
mod lens;
mod render_view;
mod uniform;

pub use camera::Camera;
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
    DEGENERATE_DETERMINANT_EPSILON, DEGENERATE_NORMAL_EPSILON,
};
pub use lens::Lens;
pub use render_view::RenderView;
pub use uniform::{CameraUniform, CameraUniformBuilder, build_frame_camera};
