//! Shared binding schema.
//!
//! Group/binding numbers and uniform block sizes declared by the unlit
//! shader modules. The uniform builders, the layout registry and the tests
//! all read these constants; the struct layouts below are checked against
//! them at compile time.
//!
//! | group | binding | resource                         | size  |
//! |-------|---------|----------------------------------|-------|
//! | 0     | 0       | camera block                     | 304 B |
//! | 1     | 0       | object model matrix              | 64 B  |
//! | 2     | 0       | color `vec4<f32>` (color)        | 16 B  |
//! | 2     | 0, 1    | texture_2d + sampler (textured)  |       |

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use std::mem::{offset_of, size_of};

// ===== GROUPS =====

/// Per-frame camera block
pub const GROUP_CAMERA: u32 = 0;
/// Per-draw object transform
pub const GROUP_OBJECT: u32 = 1;
/// Material resources
pub const GROUP_MATERIAL: u32 = 2;

// ===== BINDINGS =====

pub const BINDING_CAMERA: u32 = 0;
pub const BINDING_OBJECT_TRANSFORM: u32 = 0;
pub const BINDING_MATERIAL_COLOR: u32 = 0;
pub const BINDING_MATERIAL_TEXTURE: u32 = 0;
pub const BINDING_MATERIAL_SAMPLER: u32 = 1;

/// Globals block binding in the alternate convention (shares group 0 with
/// shader variants that do not declare the camera block).
pub const BINDING_FRAME_GLOBALS: u32 = 0;

// ===== CAMERA BLOCK =====

pub const FRUSTUM_PLANE_COUNT: usize = 6;

pub const CAMERA_POSITION_OFFSET: usize = 0;
pub const CAMERA_WORLD_OFFSET: usize = 16;
pub const CAMERA_VIEW_OFFSET: usize = 80;
pub const CAMERA_PROJECTION_OFFSET: usize = 144;
pub const CAMERA_FRUSTUM_OFFSET: usize = 208;
pub const CAMERA_UNIFORM_SIZE: usize = 304;

// ===== OTHER BLOCKS =====

pub const OBJECT_UNIFORM_SIZE: usize = 64;
pub const COLOR_UNIFORM_SIZE: usize = 16;
pub const FRAME_GLOBALS_SIZE: usize = 16;

/// WGSL uniform buffers require 16-byte aligned struct sizes
pub const UNIFORM_ALIGNMENT: usize = 16;

// ===== PER-OBJECT / MATERIAL BLOCKS =====

/// Group 1 block: the drawable's model matrix
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: Mat4,
}

impl ObjectUniform {
    pub fn new(model: Mat4) -> Self {
        Self { model }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

/// Group 2 block of the `color` variant
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ColorUniform {
    pub color: Vec4,
}

impl ColorUniform {
    pub fn new(color: Vec4) -> Self {
        Self { color }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

const _: () = {
    assert!(size_of::<ObjectUniform>() == OBJECT_UNIFORM_SIZE);
    assert!(offset_of!(ObjectUniform, model) == 0);
    assert!(size_of::<ColorUniform>() == COLOR_UNIFORM_SIZE);
    assert!(offset_of!(ColorUniform, color) == 0);
    assert!(CAMERA_UNIFORM_SIZE % UNIFORM_ALIGNMENT == 0);
    assert!(CAMERA_FRUSTUM_OFFSET + FRUSTUM_PLANE_COUNT * 16 == CAMERA_UNIFORM_SIZE);
};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
