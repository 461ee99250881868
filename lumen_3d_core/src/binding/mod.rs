//! Resource binding convention
//!
//! The schema constants, layout descriptions and the layout registry that
//! keep host-side bindings in lockstep with the unlit shader modules.

pub mod schema;
mod binding_group;
mod registry;

pub use binding_group::{
    BindingLayout, BindingSlotDesc, BindingType, ShaderStageFlags,
    BindingResource, MaterialBinding,
};
pub use registry::{BindGroupLayoutRegistry, resolve_material_bindings};
pub use schema::{ColorUniform, ObjectUniform};
