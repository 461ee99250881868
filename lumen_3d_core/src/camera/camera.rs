/// Camera - world transform, lens and the state derived from them.
///
/// View matrix, projection matrix and frustum are recomputed whenever the
/// world transform, the lens or the projection override changes, so the
/// frustum always matches the current `projection * view` product.
///
/// Setters validate first and commit only on success: a rejected update
/// leaves the camera exactly as it was.

use glam::{Mat4, Vec3};
use crate::error::Result;
use super::frustum::Frustum;
use super::lens::Lens;
use super::uniform::CameraUniform;

/// World transforms with a smaller |determinant| are treated as singular
const WORLD_DETERMINANT_EPSILON: f32 = 1e-12;

/// Camera state, always internally consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    world_matrix: Mat4,
    view_matrix: Mat4,
    lens: Lens,
    projection_override: Option<Mat4>,
    projection_matrix: Mat4,
    frustum: Frustum,
}

/// State derived from (world, projection)
struct Derived {
    view: Mat4,
    frustum: Frustum,
}

impl Camera {
    /// Create a camera from its world transform and lens.
    ///
    /// # Errors
    ///
    /// `DegenerateCamera` for a non-invertible world transform or an invalid lens.
    pub fn new(world: Mat4, lens: Lens) -> Result<Self> {
        let projection = lens.projection_matrix()?;
        let derived = Self::derive(&world, &projection)?;
        Ok(Self {
            world_matrix: world,
            view_matrix: derived.view,
            lens,
            projection_override: None,
            projection_matrix: projection,
            frustum: derived.frustum,
        })
    }

    /// Create a camera with an explicit projection matrix.
    ///
    /// The default lens is kept as a fallback for
    /// [`clear_projection_override`](Self::clear_projection_override).
    pub fn with_projection(world: Mat4, projection: Mat4) -> Result<Self> {
        let derived = Self::derive(&world, &projection)?;
        Ok(Self {
            world_matrix: world,
            view_matrix: derived.view,
            lens: Lens::default(),
            projection_override: Some(projection),
            projection_matrix: projection,
            frustum: derived.frustum,
        })
    }

    /// Camera at `eye` looking at `target`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, lens: Lens) -> Result<Self> {
        let view = Mat4::look_at_rh(eye, target, up);
        if !view.is_finite() {
            crate::engine_bail!("lumen3d::Camera", DegenerateCamera,
                "cannot look from {} at {} with up {}", eye, target, up);
        }
        Self::new(view.inverse(), lens)
    }

    fn derive(world: &Mat4, projection: &Mat4) -> Result<Derived> {
        if !world.is_finite() {
            crate::engine_bail!("lumen3d::Camera", DegenerateCamera,
                "world transform has non-finite elements");
        }
        let det = world.determinant();
        if !(det.abs() > WORLD_DETERMINANT_EPSILON) {
            crate::engine_bail!("lumen3d::Camera", DegenerateCamera,
                "world transform is not invertible (det = {:e})", det);
        }
        let view = world.inverse();
        let frustum = Frustum::from_view_projection(&(*projection * view))?;
        Ok(Derived { view, frustum })
    }

    // ===== GETTERS =====

    /// Camera-to-world transform.
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// View matrix (inverse of the world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Effective projection: the override if set, otherwise the lens projection.
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn lens(&self) -> &Lens {
        &self.lens
    }

    pub fn projection_override(&self) -> Option<&Mat4> {
        self.projection_override.as_ref()
    }

    /// World-space eye position
    pub fn position(&self) -> Vec3 {
        self.world_matrix.w_axis.truncate()
    }

    /// Group 0 camera block for the current state.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(self)
    }

    // ===== SETTERS - recompute derived state =====

    /// Move the camera.
    pub fn set_world(&mut self, world: Mat4) -> Result<()> {
        let derived = Self::derive(&world, &self.projection_matrix)?;
        self.world_matrix = world;
        self.apply(derived);
        Ok(())
    }

    /// Change the lens. Ignored for projection while an override is set,
    /// but still validated and stored.
    pub fn set_lens(&mut self, lens: Lens) -> Result<()> {
        let lens_projection = lens.projection_matrix()?;
        let projection = self.projection_override.unwrap_or(lens_projection);
        let derived = Self::derive(&self.world_matrix, &projection)?;
        self.lens = lens;
        self.projection_matrix = projection;
        self.apply(derived);
        Ok(())
    }

    /// Use an explicit projection matrix instead of the lens.
    pub fn set_projection_override(&mut self, projection: Mat4) -> Result<()> {
        let derived = Self::derive(&self.world_matrix, &projection)?;
        self.projection_override = Some(projection);
        self.projection_matrix = projection;
        self.apply(derived);
        Ok(())
    }

    /// Go back to the lens projection.
    pub fn clear_projection_override(&mut self) -> Result<()> {
        let projection = self.lens.projection_matrix()?;
        let derived = Self::derive(&self.world_matrix, &projection)?;
        self.projection_override = None;
        self.projection_matrix = projection;
        self.apply(derived);
        Ok(())
    }

    fn apply(&mut self, derived: Derived) {
        self.view_matrix = derived.view;
        self.frustum = derived.frustum;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
