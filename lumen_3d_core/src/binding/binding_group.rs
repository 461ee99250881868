//! Binding group layout descriptions and bound resources.
//!
//! A [`BindingLayout`] describes one numbered bind group: which binding
//! slots it has, what kind of resource each slot takes and which shader
//! stages read it. The GPU backend turns these descriptions into real
//! layout objects; this crate only uses them to validate and resolve.

use std::collections::HashSet;
use bitflags::bitflags;
use crate::error::Result;
use crate::resource::{SamplerHandle, ShaderStage, TextureHandle};
use super::schema::ColorUniform;

// ============================================================================
// Binding types and stage visibility
// ============================================================================

/// Type of resource bound at a given slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingType {
    /// Uniform buffer (read-only structured data)
    UniformBuffer,
    /// 2D texture sampled in the shader
    SampledTexture,
    /// Filtering sampler
    Sampler,
}

bitflags! {
    /// Shader stages that read a binding
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShaderStageFlags: u32 {
        const VERTEX = 0x01;
        const FRAGMENT = 0x02;
        const VERTEX_FRAGMENT = Self::VERTEX.bits() | Self::FRAGMENT.bits();
    }
}

impl ShaderStageFlags {
    /// Create from a slice of ShaderStage
    pub fn from_stages(stages: &[ShaderStage]) -> Self {
        stages.iter().fold(Self::empty(), |flags, stage| {
            flags | match stage {
                ShaderStage::Vertex => Self::VERTEX,
                ShaderStage::Fragment => Self::FRAGMENT,
            }
        })
    }
}

// ============================================================================
// Layout description
// ============================================================================

/// Description of a single binding slot within a bind group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSlotDesc {
    /// Binding number (`@binding(N)` in WGSL)
    pub binding: u32,
    pub binding_type: BindingType,
    pub stage_flags: ShaderStageFlags,
    /// Minimum buffer size in bytes (uniform buffers only)
    pub min_size: Option<u64>,
}

impl BindingSlotDesc {
    pub fn uniform(binding: u32, stage_flags: ShaderStageFlags, size: usize) -> Self {
        Self {
            binding,
            binding_type: BindingType::UniformBuffer,
            stage_flags,
            min_size: Some(size as u64),
        }
    }

    pub fn texture(binding: u32, stage_flags: ShaderStageFlags) -> Self {
        Self { binding, binding_type: BindingType::SampledTexture, stage_flags, min_size: None }
    }

    pub fn sampler(binding: u32, stage_flags: ShaderStageFlags) -> Self {
        Self { binding, binding_type: BindingType::Sampler, stage_flags, min_size: None }
    }
}

/// Layout of one bind group: the group index and its slots, ordered by binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingLayout {
    pub(crate) group: u32,
    pub(crate) entries: Vec<BindingSlotDesc>,
}

impl BindingLayout {
    /// Build a layout, rejecting duplicate binding numbers and empty stage
    /// visibility. Entries are sorted by binding number.
    pub fn new(group: u32, mut entries: Vec<BindingSlotDesc>) -> Result<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.binding) {
                crate::engine_bail!("lumen3d::BindingLayout", InvalidResource,
                    "group {}: duplicate binding {}", group, entry.binding);
            }
            if entry.stage_flags.is_empty() {
                crate::engine_bail!("lumen3d::BindingLayout", InvalidResource,
                    "group {}: binding {} is not visible to any shader stage",
                    group, entry.binding);
            }
            if entry.binding_type == BindingType::UniformBuffer && entry.min_size.unwrap_or(0) == 0 {
                crate::engine_bail!("lumen3d::BindingLayout", InvalidResource,
                    "group {}: uniform binding {} has no size", group, entry.binding);
            }
        }
        entries.sort_by_key(|entry| entry.binding);
        Ok(Self { group, entries })
    }

    /// Bind group index (`@group(N)` in WGSL)
    pub fn group(&self) -> u32 {
        self.group
    }

    pub fn entries(&self) -> &[BindingSlotDesc] {
        &self.entries
    }

    /// Get the slot at a binding number
    pub fn entry(&self, binding: u32) -> Option<&BindingSlotDesc> {
        self.entries.iter().find(|entry| entry.binding == binding)
    }

    /// Binding numbers in ascending order
    pub fn bindings(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|entry| entry.binding)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Bound resources
// ============================================================================

/// A concrete resource attached to a material binding slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BindingResource {
    /// Contents of the `color` variant's uniform block
    Color(ColorUniform),
    Texture(TextureHandle),
    Sampler(SamplerHandle),
}

impl BindingResource {
    /// Binding type this resource satisfies
    pub fn binding_type(&self) -> BindingType {
        match self {
            BindingResource::Color(_) => BindingType::UniformBuffer,
            BindingResource::Texture(_) => BindingType::SampledTexture,
            BindingResource::Sampler(_) => BindingType::Sampler,
        }
    }
}

/// A resource resolved against its binding number
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialBinding {
    pub binding: u32,
    pub resource: BindingResource,
}
