use super::*;
use glam::Vec4;
use std::collections::HashSet;
use crate::binding::{BindingSlotDesc, ShaderStageFlags};
use crate::binding::schema::GROUP_MATERIAL;
use crate::error::Error;
use crate::resource::{BlendMode, SamplerHandle, TextureHandle};

fn red() -> Vec4 {
    Vec4::new(1.0, 0.0, 0.0, 1.0)
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_color_material() {
    let mut registry = MaterialRegistry::default();
    let handle = registry
        .create(MaterialVariant::Color, MaterialResources::color(red()))
        .unwrap();

    let material = registry.get(handle).unwrap();
    assert_eq!(material.variant(), MaterialVariant::Color);
    assert_eq!(material.shaders(), &ShaderPair::unlit_color());
    assert_eq!(material.blend(), BlendMode::Opaque);

    let bindings = registry.resolve_bindings(handle).unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].binding, 0);
    assert_eq!(bindings[0].resource, BindingResource::Color(ColorUniform::new(red())));
}

#[test]
fn test_create_textured_material() {
    let mut registry = MaterialRegistry::default();
    let handle = registry
        .create(
            MaterialVariant::Textured,
            MaterialResources::textured(TextureHandle(7), SamplerHandle(9)),
        )
        .unwrap();

    let resolved = registry.resolve(handle).unwrap();
    assert_eq!(resolved.layout.group(), GROUP_MATERIAL);
    assert_eq!(resolved.material.shaders().fragment.module, "unlit-texture");

    let bindings = resolved.material.bindings();
    assert_eq!(bindings[0], MaterialBinding {
        binding: 0,
        resource: BindingResource::Texture(TextureHandle(7)),
    });
    assert_eq!(bindings[1], MaterialBinding {
        binding: 1,
        resource: BindingResource::Sampler(SamplerHandle(9)),
    });
}

#[test]
fn test_textured_without_sampler_is_mismatch() {
    let mut registry = MaterialRegistry::default();
    let resources = MaterialResources {
        texture: Some(TextureHandle(1)),
        ..MaterialResources::default()
    };

    let err = registry.create(MaterialVariant::Textured, resources).unwrap_err();
    assert!(matches!(err, Error::ResourceMismatch(ref msg) if msg.contains("sampler")));
    assert!(registry.is_empty());
}

#[test]
fn test_color_without_color_is_mismatch() {
    let mut registry = MaterialRegistry::default();
    let err = registry
        .create(MaterialVariant::Color, MaterialResources::default())
        .unwrap_err();
    assert!(matches!(err, Error::ResourceMismatch(_)));
}

#[test]
fn test_surplus_resource_is_mismatch() {
    let mut registry = MaterialRegistry::default();
    let resources = MaterialResources {
        texture: Some(TextureHandle(1)),
        ..MaterialResources::color(red())
    };

    let err = registry.create(MaterialVariant::Color, resources).unwrap_err();
    assert!(matches!(err, Error::ResourceMismatch(ref msg) if msg.contains("texture")));
}

#[test]
fn test_unregistered_variant_is_unsupported() {
    let mut layouts = BindGroupLayoutRegistry::standard();
    layouts.unregister(MaterialVariant::Textured);
    let mut registry = MaterialRegistry::new(layouts);

    let err = registry
        .create(
            MaterialVariant::Textured,
            MaterialResources::textured(TextureHandle(1), SamplerHandle(1)),
        )
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedVariant(_)));
}

#[test]
fn test_custom_layout_drives_validation() {
    // A color layout that also wants a texture can never be satisfied by a color payload
    let mut layouts = BindGroupLayoutRegistry::standard();
    let layout = BindingLayout::new(GROUP_MATERIAL, vec![
        BindingSlotDesc::uniform(0, ShaderStageFlags::FRAGMENT, 16),
        BindingSlotDesc::texture(1, ShaderStageFlags::FRAGMENT),
    ]).unwrap();
    layouts.register(MaterialVariant::Color, layout).unwrap();
    let mut registry = MaterialRegistry::new(layouts);

    let err = registry
        .create(MaterialVariant::Color, MaterialResources::color(red()))
        .unwrap_err();
    assert!(matches!(err, Error::ResourceMismatch(_)));
}

// ============================================================================
// Handles
// ============================================================================

#[test]
fn test_handles_are_distinct_and_removable() {
    let mut registry = MaterialRegistry::default();
    let a = registry.create(MaterialVariant::Color, MaterialResources::color(red())).unwrap();
    let b = registry.create(MaterialVariant::Color, MaterialResources::color(Vec4::ONE)).unwrap();
    assert_ne!(a, b);
    assert_eq!(registry.len(), 2);

    let removed = registry.remove(a).unwrap();
    assert_eq!(removed.color_uniform().unwrap().color, red());
    assert!(!registry.contains(a));
    assert!(registry.get(a).is_none());
    assert!(matches!(registry.resolve_bindings(a), Err(Error::InvalidResource(_))));
    assert!(registry.contains(b));
}

#[test]
fn test_shared_material_outlives_removal() {
    let mut registry = MaterialRegistry::default();
    let handle = registry.create(MaterialVariant::Color, MaterialResources::color(red())).unwrap();
    let shared = Arc::clone(registry.get(handle).unwrap());

    registry.remove(handle);
    assert_eq!(shared.variant(), MaterialVariant::Color);
}

// ============================================================================
// Shader pairs
// ============================================================================

struct FakeLibrary {
    modules: HashSet<&'static str>,
}

impl ShaderLibrary for FakeLibrary {
    fn has_module(&self, name: &str) -> bool {
        self.modules.contains(name)
    }
}

#[test]
fn test_validate_shaders_with_all_modules_loaded() {
    let registry = MaterialRegistry::default();
    let library = FakeLibrary { modules: ["unlit-color", "unlit-texture"].into_iter().collect() };
    assert!(registry.validate_shaders(&library).is_ok());
}

#[test]
fn test_validate_shaders_missing_module() {
    let registry = MaterialRegistry::default();
    let library = FakeLibrary { modules: ["unlit-color"].into_iter().collect() };

    let err = registry.validate_shaders(&library).unwrap_err();
    assert!(matches!(err, Error::InvalidResource(ref msg) if msg.contains("unlit-texture")));
}

#[test]
fn test_validate_skips_unsupported_variants() {
    let mut layouts = BindGroupLayoutRegistry::standard();
    layouts.unregister(MaterialVariant::Textured);
    let registry = MaterialRegistry::new(layouts);
    let library = FakeLibrary { modules: ["unlit-color"].into_iter().collect() };

    assert!(registry.validate_shaders(&library).is_ok());
}

#[test]
fn test_set_shader_pair_applies_to_new_materials() {
    let mut registry = MaterialRegistry::default();
    let before = registry.create(MaterialVariant::Color, MaterialResources::color(red())).unwrap();

    registry.set_shader_pair(MaterialVariant::Color, ShaderPair::from_module("unlit-color-debug"));
    let after = registry.create(MaterialVariant::Color, MaterialResources::color(red())).unwrap();

    assert_eq!(registry.get(before).unwrap().shaders().vertex.module, "unlit-color");
    assert_eq!(registry.get(after).unwrap().shaders().vertex.module, "unlit-color-debug");
    assert_eq!(registry.shader_pair(MaterialVariant::Color).unwrap().fragment.entry_point, "fs_main");
}
