/// RenderView - result of frustum culling.
///
/// Holds a snapshot of the camera at culling time and the keys of the
/// drawables that survived, in the scene's draw order.
///
/// Ephemeral: lives for one frame.

use crate::scene::DrawableKey;
use super::camera::Camera;

/// Result of frustum culling. Ephemeral - lives for one frame.
#[derive(Debug, Clone)]
pub struct RenderView {
    camera: Camera,
    visible: Vec<DrawableKey>,
}

impl RenderView {
    /// Crate-internal: only cullers create these.
    pub(crate) fn new(camera: Camera, visible: Vec<DrawableKey>) -> Self {
        Self { camera, visible }
    }

    /// Camera snapshot at the time of culling.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Keys of visible drawables, in draw order.
    pub fn visible_drawables(&self) -> &[DrawableKey] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }
}

#[cfg(test)]
#[path = "render_view_tests.rs"]
mod tests;
