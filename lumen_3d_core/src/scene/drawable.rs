/// Drawable - transform, material reference and bounds of one draw.
///
/// A drawable does not own its material: it refers to it by
/// [`MaterialHandle`] and the material registry resolves it at draw time.
/// World-space bounds are cached and refreshed when the transform changes.

use glam::Mat4;
use crate::binding::ObjectUniform;
use crate::resource::MaterialHandle;
use super::bounds::{BoundingVolume, AABB};

#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    transform: Mat4,
    material: MaterialHandle,
    local_bounds: BoundingVolume,
    world_bounds: BoundingVolume,
}

impl Drawable {
    pub fn new(transform: Mat4, material: MaterialHandle, bounds: impl Into<BoundingVolume>) -> Self {
        let local_bounds = bounds.into();
        Self {
            transform,
            material,
            local_bounds,
            world_bounds: local_bounds.transformed(&transform),
        }
    }

    // ===== GETTERS =====

    /// Model matrix
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    pub fn material(&self) -> MaterialHandle {
        self.material
    }

    pub fn local_bounds(&self) -> &BoundingVolume {
        &self.local_bounds
    }

    /// Bounds in world space, as tested by the cullers
    pub fn world_bounds(&self) -> &BoundingVolume {
        &self.world_bounds
    }

    /// World bounds as a box, as stored in a scene index
    pub fn world_aabb(&self) -> AABB {
        self.world_bounds.aabb()
    }

    /// Group 1 block for this drawable
    pub fn object_uniform(&self) -> ObjectUniform {
        ObjectUniform::new(self.transform)
    }

    // ===== SETTERS (through Scene) =====

    pub(crate) fn set_transform(&mut self, transform: Mat4) {
        self.transform = transform;
        self.world_bounds = self.local_bounds.transformed(&transform);
    }

    pub(crate) fn set_material(&mut self, material: MaterialHandle) {
        self.material = material;
    }
}
