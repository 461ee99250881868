//! Materials and shader pairings

mod shader;
mod material;
mod material_registry;

pub use shader::{ShaderStage, ShaderEntry, ShaderPair, ShaderLibrary};
pub use material::{
    MaterialVariant, MaterialKind, Material, MaterialResources, BlendMode,
    TextureHandle, SamplerHandle,
};
pub use material_registry::{MaterialRegistry, MaterialHandle, ResolvedMaterial};
