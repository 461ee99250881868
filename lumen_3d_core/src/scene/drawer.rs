/// Drawing strategies.
///
/// A Drawer walks the visible drawables of a RenderView, resolves their
/// materials and hands uniforms, bind groups and draws to the backend.

use crate::binding::schema::{BINDING_OBJECT_TRANSFORM, GROUP_OBJECT};
use crate::camera::RenderView;
use crate::error::Result;
use crate::renderer::RenderBackend;
use crate::resource::{MaterialHandle, MaterialRegistry};
use super::scene::Scene;

/// Counters for one draw pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Draw calls issued
    pub drawn: usize,
    /// Visible drawables skipped (removed drawable or removed material)
    pub skipped: usize,
    pub shader_binds: usize,
    pub material_binds: usize,
}

/// Strategy for drawing visible drawables.
///
/// `&self` because drawing is stateless: the same Drawer can be
/// reused across multiple scenes and frames.
pub trait Drawer: Send + Sync {
    /// Draw the visible drawables of `view`, in view order.
    fn draw(
        &self,
        scene: &Scene,
        view: &RenderView,
        materials: &MaterialRegistry,
        backend: &mut dyn RenderBackend,
    ) -> Result<DrawStats>;
}

/// Forward drawer - draws each visible drawable in order (no sorting,
/// no instancing).
///
/// Rebinds shaders and material groups only when they change between
/// consecutive draws.
#[derive(Debug, Default)]
pub struct ForwardDrawer;

impl ForwardDrawer {
    pub fn new() -> Self {
        Self
    }
}

impl Drawer for ForwardDrawer {
    fn draw(
        &self,
        scene: &Scene,
        view: &RenderView,
        materials: &MaterialRegistry,
        backend: &mut dyn RenderBackend,
    ) -> Result<DrawStats> {
        let mut stats = DrawStats::default();
        let mut bound_material: Option<MaterialHandle> = None;
        let mut bound_shaders = None;

        for &key in view.visible_drawables() {
            let drawable = match scene.drawable(key) {
                Some(drawable) => drawable,
                None => {
                    stats.skipped += 1; // removed between cull and draw
                    continue;
                }
            };

            let handle = drawable.material();
            if !materials.contains(handle) {
                stats.skipped += 1; // material removed while still referenced
                continue;
            }
            let resolved = materials.resolve(handle)?;
            let material = resolved.material;

            let shader_state = (material.shaders(), material.blend());
            if bound_shaders != Some(shader_state) {
                backend.bind_shaders(material.shaders(), material.blend())?;
                bound_shaders = Some(shader_state);
                stats.shader_binds += 1;
            }

            if bound_material != Some(handle) {
                backend.bind_material(resolved.layout, material.bindings())?;
                bound_material = Some(handle);
                stats.material_binds += 1;
            }

            backend.update_uniform(
                GROUP_OBJECT,
                BINDING_OBJECT_TRANSFORM,
                drawable.object_uniform().as_bytes(),
            )?;
            backend.draw(key)?;
            stats.drawn += 1;
        }

        if stats.skipped > 0 {
            crate::engine_warn!("lumen3d::ForwardDrawer",
                "Skipped {} of {} visible drawables", stats.skipped, view.visible_count());
        }
        Ok(stats)
    }
}

#[cfg(test)]
#[path = "drawer_tests.rs"]
mod tests;
