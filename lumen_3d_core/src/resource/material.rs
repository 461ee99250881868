//! Unlit materials.
//!
//! A Material is immutable once created. It names its variant's shader
//! pair and carries the group 2 resources, already resolved against the
//! variant's binding layout, so drawing never re-resolves them.
//!
//! Materials are created through [`MaterialRegistry`](super::MaterialRegistry)
//! and shared by handle between any number of drawables.

use std::fmt;
use glam::Vec4;
use crate::binding::{MaterialBinding, BindingResource, ColorUniform};
use crate::error::Result;
use super::shader::ShaderPair;

// ===== VARIANTS =====

/// Material variant tag. Each variant has its own shader module pair and
/// group 2 layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialVariant {
    /// Flat color: group 2 binding 0 = `vec4<f32>` uniform
    Color,
    /// Texture lookup: group 2 binding 0 = texture_2d, binding 1 = sampler
    Textured,
}

impl MaterialVariant {
    pub const ALL: [MaterialVariant; 2] = [MaterialVariant::Color, MaterialVariant::Textured];

    /// Shader-facing name
    pub fn name(&self) -> &'static str {
        match self {
            MaterialVariant::Color => "color",
            MaterialVariant::Textured => "textured",
        }
    }

    /// Parse a shader-facing name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "color" => Ok(MaterialVariant::Color),
            "textured" => Ok(MaterialVariant::Textured),
            other => Err(crate::engine_err!("lumen3d::MaterialVariant", UnsupportedVariant,
                "unknown material variant '{}'", other)),
        }
    }
}

impl fmt::Display for MaterialVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ===== GPU HANDLES =====

/// Opaque texture handle issued by the GPU backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Opaque sampler handle issued by the GPU backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerHandle(pub u64);

// ===== MATERIAL DATA =====

/// Variant payload
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialKind {
    SolidColor { color: Vec4 },
    Textured { texture: TextureHandle, sampler: SamplerHandle },
}

impl MaterialKind {
    pub fn variant(&self) -> MaterialVariant {
        match self {
            MaterialKind::SolidColor { .. } => MaterialVariant::Color,
            MaterialKind::Textured { .. } => MaterialVariant::Textured,
        }
    }
}

/// How a material composites with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendMode {
    #[default]
    Opaque,
    /// Alpha blended; draw order matters, so culling keeps input order
    Transparent,
}

/// Resources offered for a new material.
///
/// Exactly the resources the variant's layout declares must be present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialResources {
    pub color: Option<Vec4>,
    pub texture: Option<TextureHandle>,
    pub sampler: Option<SamplerHandle>,
    pub blend: BlendMode,
}

impl MaterialResources {
    pub fn color(color: Vec4) -> Self {
        Self { color: Some(color), ..Self::default() }
    }

    pub fn textured(texture: TextureHandle, sampler: SamplerHandle) -> Self {
        Self { texture: Some(texture), sampler: Some(sampler), ..Self::default() }
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }
}

/// An immutable unlit material
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    kind: MaterialKind,
    shaders: ShaderPair,
    blend: BlendMode,
    bindings: Vec<MaterialBinding>,
}

impl Material {
    /// Assemble a validated material (internal: only MaterialRegistry creates these)
    pub(crate) fn new(
        kind: MaterialKind,
        shaders: ShaderPair,
        blend: BlendMode,
        bindings: Vec<MaterialBinding>,
    ) -> Self {
        Self { kind, shaders, blend, bindings }
    }

    pub fn kind(&self) -> &MaterialKind {
        &self.kind
    }

    pub fn variant(&self) -> MaterialVariant {
        self.kind.variant()
    }

    /// Vertex/fragment stages to draw with
    pub fn shaders(&self) -> &ShaderPair {
        &self.shaders
    }

    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    /// Group 2 resources in binding order
    pub fn bindings(&self) -> &[MaterialBinding] {
        &self.bindings
    }

    /// Color uniform of a `color` material
    pub fn color_uniform(&self) -> Option<ColorUniform> {
        self.bindings.iter().find_map(|b| match b.resource {
            BindingResource::Color(uniform) => Some(uniform),
            _ => None,
        })
    }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
