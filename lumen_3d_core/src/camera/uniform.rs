//! Camera uniform block (group 0, binding 0).
//!
//! The struct mirrors the shader-side declaration field for field:
//!
//! ```wgsl
//! struct Camera {
//!     position: vec4<f32>,
//!     world: mat4x4<f32>,
//!     view: mat4x4<f32>,
//!     projection: mat4x4<f32>,
//!     frustum: array<vec4<f32>, 6>,
//! };
//! ```

use std::mem::{offset_of, size_of};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use crate::binding::BindGroupLayoutRegistry;
use crate::binding::schema::{
    self, BINDING_CAMERA, CAMERA_FRUSTUM_OFFSET, CAMERA_POSITION_OFFSET,
    CAMERA_PROJECTION_OFFSET, CAMERA_UNIFORM_SIZE, CAMERA_VIEW_OFFSET,
    CAMERA_WORLD_OFFSET, FRUSTUM_PLANE_COUNT,
};
use crate::error::Result;
use super::camera::Camera;
use super::lens::Lens;

/// Per-frame camera block, byte-compatible with the shader declaration.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    /// World-space eye position, w = 1
    pub position: Vec4,
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// Left, right, bottom, top, near, far
    pub frustum: [Vec4; FRUSTUM_PLANE_COUNT],
}

const _: () = {
    assert!(offset_of!(CameraUniform, position) == CAMERA_POSITION_OFFSET);
    assert!(offset_of!(CameraUniform, world) == CAMERA_WORLD_OFFSET);
    assert!(offset_of!(CameraUniform, view) == CAMERA_VIEW_OFFSET);
    assert!(offset_of!(CameraUniform, projection) == CAMERA_PROJECTION_OFFSET);
    assert!(offset_of!(CameraUniform, frustum) == CAMERA_FRUSTUM_OFFSET);
    assert!(size_of::<CameraUniform>() == CAMERA_UNIFORM_SIZE);
};

impl CameraUniform {
    /// Snapshot of a camera's current state
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            position: camera.position().extend(1.0),
            world: *camera.world_matrix(),
            view: *camera.view_matrix(),
            projection: *camera.projection_matrix(),
            frustum: *camera.frustum().planes(),
        }
    }

    /// Upload bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Runtime check of the block layout against the shared schema.
    ///
    /// Mirrors the compile-time assertions so a backend can verify the
    /// layout it was linked against.
    pub fn assert_layout() -> Result<()> {
        let fields = [
            ("position", offset_of!(CameraUniform, position), CAMERA_POSITION_OFFSET),
            ("world", offset_of!(CameraUniform, world), CAMERA_WORLD_OFFSET),
            ("view", offset_of!(CameraUniform, view), CAMERA_VIEW_OFFSET),
            ("projection", offset_of!(CameraUniform, projection), CAMERA_PROJECTION_OFFSET),
            ("frustum", offset_of!(CameraUniform, frustum), CAMERA_FRUSTUM_OFFSET),
        ];
        for (name, actual, expected) in fields {
            if actual != expected {
                crate::engine_bail!("lumen3d::CameraUniform", ResourceMismatch,
                    "field '{}' at offset {}, shader expects {}", name, actual, expected);
            }
        }
        if size_of::<Self>() != CAMERA_UNIFORM_SIZE {
            crate::engine_bail!("lumen3d::CameraUniform", ResourceMismatch,
                "block is {} bytes, shader expects {}", size_of::<Self>(), CAMERA_UNIFORM_SIZE);
        }
        Ok(())
    }
}

/// Produces camera blocks checked against the registry's group 0 layout.
#[derive(Debug, Clone, Copy)]
pub struct CameraUniformBuilder {
    group: u32,
    binding: u32,
}

impl CameraUniformBuilder {
    /// Verify the camera slot of `layouts` can hold a [`CameraUniform`].
    pub fn new(layouts: &BindGroupLayoutRegistry) -> Result<Self> {
        CameraUniform::assert_layout()?;

        let layout = layouts.camera_layout();
        let Some(slot) = layout.entry(BINDING_CAMERA) else {
            crate::engine_bail!("lumen3d::CameraUniformBuilder", ResourceMismatch,
                "group {} has no camera binding {}", layout.group(), BINDING_CAMERA);
        };
        if slot.min_size != Some(schema::CAMERA_UNIFORM_SIZE as u64) {
            crate::engine_bail!("lumen3d::CameraUniformBuilder", ResourceMismatch,
                "camera binding declares {:?} bytes, block is {}",
                slot.min_size, CAMERA_UNIFORM_SIZE);
        }
        Ok(Self { group: layout.group(), binding: slot.binding })
    }

    /// Bind group the block is uploaded to
    pub fn group(&self) -> u32 {
        self.group
    }

    pub fn binding(&self) -> u32 {
        self.binding
    }

    /// Block for a camera whose state is already validated
    pub fn build(&self, camera: &Camera) -> CameraUniform {
        CameraUniform::from_camera(camera)
    }

    /// Block for a world transform and lens, without keeping a camera around
    pub fn build_from(&self, world: Mat4, lens: &Lens) -> Result<CameraUniform> {
        let camera = Camera::new(world, *lens)?;
        Ok(self.build(&camera))
    }
}

/// Camera block for one frame from a world transform and lens.
///
/// # Errors
///
/// `DegenerateCamera` if the transform is not invertible or the lens is
/// invalid.
pub fn build_frame_camera(world: Mat4, lens: &Lens) -> Result<CameraUniform> {
    Ok(CameraUniform::from_camera(&Camera::new(world, *lens)?))
}

#[cfg(test)]
#[path = "uniform_tests.rs"]
mod tests;
