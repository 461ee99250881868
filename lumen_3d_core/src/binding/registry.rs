//! Bind group layout registry.
//!
//! Holds the three-group convention every unlit shader module follows:
//! group 0 = camera, group 1 = object transform, group 2 = material. Group 2
//! differs per material variant and is looked up with
//! [`BindGroupLayoutRegistry::resolve`].

use rustc_hash::FxHashMap;
use crate::error::Result;
use crate::resource::MaterialVariant;
use super::binding_group::{BindingLayout, BindingSlotDesc, ShaderStageFlags};
use super::schema::{
    self, GROUP_CAMERA, GROUP_MATERIAL, GROUP_OBJECT,
};

/// Registry of bind group layouts shared by the uniform builders, the
/// material registry and the drawer.
#[derive(Debug, Clone)]
pub struct BindGroupLayoutRegistry {
    camera: BindingLayout,
    object: BindingLayout,
    materials: FxHashMap<MaterialVariant, BindingLayout>,
}

impl BindGroupLayoutRegistry {
    /// Registry with the camera/object groups and no material layouts.
    pub fn empty() -> Self {
        Self {
            camera: Self::camera_group(),
            object: Self::object_group(),
            materials: FxHashMap::default(),
        }
    }

    /// Registry with the built-in `color` and `textured` material layouts.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        for variant in MaterialVariant::ALL {
            registry.materials.insert(variant, Self::builtin_material_group(variant));
        }
        registry
    }

    fn camera_group() -> BindingLayout {
        BindingLayout {
            group: GROUP_CAMERA,
            entries: vec![BindingSlotDesc::uniform(
                schema::BINDING_CAMERA,
                ShaderStageFlags::VERTEX_FRAGMENT,
                schema::CAMERA_UNIFORM_SIZE,
            )],
        }
    }

    fn object_group() -> BindingLayout {
        BindingLayout {
            group: GROUP_OBJECT,
            entries: vec![BindingSlotDesc::uniform(
                schema::BINDING_OBJECT_TRANSFORM,
                ShaderStageFlags::VERTEX,
                schema::OBJECT_UNIFORM_SIZE,
            )],
        }
    }

    fn builtin_material_group(variant: MaterialVariant) -> BindingLayout {
        let entries = match variant {
            MaterialVariant::Color => vec![BindingSlotDesc::uniform(
                schema::BINDING_MATERIAL_COLOR,
                ShaderStageFlags::FRAGMENT,
                schema::COLOR_UNIFORM_SIZE,
            )],
            MaterialVariant::Textured => vec![
                BindingSlotDesc::texture(schema::BINDING_MATERIAL_TEXTURE, ShaderStageFlags::FRAGMENT),
                BindingSlotDesc::sampler(schema::BINDING_MATERIAL_SAMPLER, ShaderStageFlags::FRAGMENT),
            ],
        };
        BindingLayout { group: GROUP_MATERIAL, entries }
    }

    // ===== FIXED GROUPS =====

    /// Group 0: camera block
    pub fn camera_layout(&self) -> &BindingLayout {
        &self.camera
    }

    /// Group 1: object transform
    pub fn object_layout(&self) -> &BindingLayout {
        &self.object
    }

    // ===== MATERIAL GROUPS =====

    /// Register (or replace) the group 2 layout for a variant.
    ///
    /// Returns the previously registered layout, if any.
    pub fn register(
        &mut self,
        variant: MaterialVariant,
        layout: BindingLayout,
    ) -> Result<Option<BindingLayout>> {
        if layout.group() != GROUP_MATERIAL {
            crate::engine_bail!("lumen3d::BindGroupLayoutRegistry", InvalidResource,
                "material layout for '{}' targets group {}, expected {}",
                variant, layout.group(), GROUP_MATERIAL);
        }
        if layout.is_empty() {
            crate::engine_bail!("lumen3d::BindGroupLayoutRegistry", InvalidResource,
                "material layout for '{}' has no bindings", variant);
        }
        Ok(self.materials.insert(variant, layout))
    }

    /// Remove a variant's layout. Materials of that variant can no longer be created.
    pub fn unregister(&mut self, variant: MaterialVariant) -> Option<BindingLayout> {
        self.materials.remove(&variant)
    }

    /// Binding slots a material variant needs at group 2.
    pub fn resolve(&self, variant: MaterialVariant) -> Result<&BindingLayout> {
        self.materials.get(&variant).ok_or_else(|| {
            crate::engine_err!("lumen3d::BindGroupLayoutRegistry", UnsupportedVariant,
                "no binding layout registered for variant '{}'", variant)
        })
    }

    /// Resolve by shader-facing variant name ("color", "textured").
    pub fn resolve_by_name(&self, name: &str) -> Result<&BindingLayout> {
        self.resolve(MaterialVariant::from_name(name)?)
    }

    /// Whether a variant has a registered layout
    pub fn supports(&self, variant: MaterialVariant) -> bool {
        self.materials.contains_key(&variant)
    }

    /// Layout for an arbitrary group index (material groups need a variant).
    pub fn layout_for_group(
        &self,
        group: u32,
        variant: Option<MaterialVariant>,
    ) -> Result<&BindingLayout> {
        match (group, variant) {
            (GROUP_CAMERA, _) => Ok(&self.camera),
            (GROUP_OBJECT, _) => Ok(&self.object),
            (GROUP_MATERIAL, Some(variant)) => self.resolve(variant),
            (GROUP_MATERIAL, None) => Err(crate::engine_err!(
                "lumen3d::BindGroupLayoutRegistry", InvalidResource,
                "group {} requires a material variant", GROUP_MATERIAL)),
            _ => Err(crate::engine_err!(
                "lumen3d::BindGroupLayoutRegistry", InvalidResource,
                "group {} is not part of the binding convention", group)),
        }
    }
}

impl Default for BindGroupLayoutRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Group 2 layout of a built-in variant, by name.
///
/// Stateless entry point for backends that build pipeline layouts up front.
pub fn resolve_material_bindings(name: &str) -> Result<BindingLayout> {
    BindGroupLayoutRegistry::standard().resolve_by_name(name).cloned()
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
