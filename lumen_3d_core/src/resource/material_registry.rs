//! Material registry.
//!
//! Maps each material variant to its shader pair and validates new
//! materials against the variant's group 2 layout. Materials are stored
//! once in a SlotMap and addressed by [`MaterialHandle`] afterwards; no
//! per-frame allocation happens here.

use std::sync::Arc;
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::binding::{
    BindGroupLayoutRegistry, BindingLayout, BindingResource, BindingType,
    ColorUniform, MaterialBinding,
};
use crate::error::Result;
use crate::{engine_bail, engine_err};
use super::material::{Material, MaterialKind, MaterialResources, MaterialVariant};
use super::shader::{ShaderEntry, ShaderLibrary, ShaderPair, ShaderStage};

new_key_type! {
    /// Stable handle to a registered material.
    ///
    /// Stays valid until the material itself is removed.
    pub struct MaterialHandle;
}

/// A material together with the group 2 layout it binds against
#[derive(Debug, Clone, Copy)]
pub struct ResolvedMaterial<'a> {
    pub material: &'a Arc<Material>,
    pub layout: &'a BindingLayout,
}

/// Registry of immutable materials and variant shader pairings
pub struct MaterialRegistry {
    layouts: BindGroupLayoutRegistry,
    shader_pairs: FxHashMap<MaterialVariant, ShaderPair>,
    materials: SlotMap<MaterialHandle, Arc<Material>>,
}

impl MaterialRegistry {
    /// Create an empty registry over the given layouts, with the default
    /// `unlit-color` / `unlit-texture` shader pairs.
    pub fn new(layouts: BindGroupLayoutRegistry) -> Self {
        let mut shader_pairs = FxHashMap::default();
        shader_pairs.insert(MaterialVariant::Color, ShaderPair::unlit_color());
        shader_pairs.insert(MaterialVariant::Textured, ShaderPair::unlit_texture());

        Self {
            layouts,
            shader_pairs,
            materials: SlotMap::with_key(),
        }
    }

    /// Layout registry this material registry validates against
    pub fn layouts(&self) -> &BindGroupLayoutRegistry {
        &self.layouts
    }

    // ===== SHADER PAIRS =====

    /// Override the shader pair a variant is drawn with.
    ///
    /// Only affects materials created afterwards.
    pub fn set_shader_pair(&mut self, variant: MaterialVariant, pair: ShaderPair) {
        self.shader_pairs.insert(variant, pair);
    }

    pub fn shader_pair(&self, variant: MaterialVariant) -> Result<&ShaderPair> {
        self.shader_pairs.get(&variant).ok_or_else(|| {
            engine_err!("lumen3d::MaterialRegistry", UnsupportedVariant,
                "no shader pair registered for variant '{}'", variant)
        })
    }

    /// Check every supported variant's shader pair against the loader.
    pub fn validate_shaders(&self, library: &dyn ShaderLibrary) -> Result<()> {
        let mut variants: Vec<_> = self.shader_pairs.keys().copied().collect();
        variants.sort();

        for variant in variants {
            if !self.layouts.supports(variant) {
                continue;
            }
            let pair = &self.shader_pairs[&variant];
            for stage in ShaderStage::DRAW {
                Self::check_entry(library, variant, pair.stage(stage), stage)?;
            }
        }
        Ok(())
    }

    fn check_entry(
        library: &dyn ShaderLibrary,
        variant: MaterialVariant,
        entry: &ShaderEntry,
        stage: ShaderStage,
    ) -> Result<()> {
        if !library.has_module(&entry.module) {
            engine_bail!("lumen3d::MaterialRegistry", InvalidResource,
                "variant '{}': shader module '{}' is not loaded", variant, entry.module);
        }
        if !library.has_entry_point(&entry.module, &entry.entry_point, stage) {
            engine_bail!("lumen3d::MaterialRegistry", InvalidResource,
                "variant '{}': {:?} entry point '{}' not found", variant, stage, entry);
        }
        Ok(())
    }

    // ===== MATERIALS =====

    /// Create and register a material.
    ///
    /// `resources` must provide exactly the bindings the variant's layout
    /// declares: a color for `color`, a texture and a sampler for `textured`.
    ///
    /// # Errors
    ///
    /// - `UnsupportedVariant` if the variant has no layout or shader pair
    /// - `ResourceMismatch` if a required resource is missing or an unused one is supplied
    pub fn create(
        &mut self,
        variant: MaterialVariant,
        resources: MaterialResources,
    ) -> Result<MaterialHandle> {
        let layout = self.layouts.resolve(variant)?;
        let shaders = self.shader_pair(variant)?.clone();

        // Consume offered resources slot by slot; anything left over is surplus
        let mut color = resources.color;
        let mut texture = resources.texture;
        let mut sampler = resources.sampler;
        let mut bindings = Vec::with_capacity(layout.len());

        for slot in layout.entries() {
            let resource = match slot.binding_type {
                BindingType::UniformBuffer => color
                    .take()
                    .map(|c| BindingResource::Color(ColorUniform::new(c))),
                BindingType::SampledTexture => texture.take().map(BindingResource::Texture),
                BindingType::Sampler => sampler.take().map(BindingResource::Sampler),
            };
            let Some(resource) = resource else {
                engine_bail!("lumen3d::MaterialRegistry", ResourceMismatch,
                    "variant '{}' requires a {} at binding {}",
                    variant, describe(slot.binding_type), slot.binding);
            };
            bindings.push(MaterialBinding { binding: slot.binding, resource });
        }

        let surplus = [
            (color.is_some(), BindingType::UniformBuffer),
            (texture.is_some(), BindingType::SampledTexture),
            (sampler.is_some(), BindingType::Sampler),
        ];
        if let Some((_, kind)) = surplus.iter().find(|(left, _)| *left) {
            engine_bail!("lumen3d::MaterialRegistry", ResourceMismatch,
                "variant '{}' does not bind a {}", variant, describe(*kind));
        }

        let kind = match (variant, resources.color, resources.texture, resources.sampler) {
            (MaterialVariant::Color, Some(color), _, _) => MaterialKind::SolidColor { color },
            (MaterialVariant::Textured, _, Some(texture), Some(sampler)) => {
                MaterialKind::Textured { texture, sampler }
            }
            _ => engine_bail!("lumen3d::MaterialRegistry", ResourceMismatch,
                "layout for '{}' does not describe a '{}' material", variant, variant),
        };

        let material = Material::new(kind, shaders, resources.blend, bindings);
        let handle = self.materials.insert(Arc::new(material));
        crate::engine_debug!("lumen3d::MaterialRegistry",
            "Registered '{}' material ({} total)", variant, self.materials.len());
        Ok(handle)
    }

    /// Look up a material by handle
    pub fn get(&self, handle: MaterialHandle) -> Option<&Arc<Material>> {
        self.materials.get(handle)
    }

    /// Remove a material. Drawables still holding clones of the Arc keep it alive.
    pub fn remove(&mut self, handle: MaterialHandle) -> Option<Arc<Material>> {
        self.materials.remove(handle)
    }

    pub fn contains(&self, handle: MaterialHandle) -> bool {
        self.materials.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Material plus its group 2 layout, ready to bind.
    pub fn resolve(&self, handle: MaterialHandle) -> Result<ResolvedMaterial<'_>> {
        let material = self.materials.get(handle).ok_or_else(|| {
            engine_err!("lumen3d::MaterialRegistry", InvalidResource,
                "material handle {:?} is not registered", handle)
        })?;
        let layout = self.layouts.resolve(material.variant())?;
        Ok(ResolvedMaterial { material, layout })
    }

    /// Group 2 resources of a registered material, in binding order.
    pub fn resolve_bindings(&self, handle: MaterialHandle) -> Result<&[MaterialBinding]> {
        Ok(self.resolve(handle)?.material.bindings())
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new(BindGroupLayoutRegistry::standard())
    }
}

fn describe(binding_type: BindingType) -> &'static str {
    match binding_type {
        BindingType::UniformBuffer => "color uniform",
        BindingType::SampledTexture => "texture",
        BindingType::Sampler => "sampler",
    }
}

#[cfg(test)]
#[path = "material_registry_tests.rs"]
mod tests;
