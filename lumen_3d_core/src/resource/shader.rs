//! Shader module pairing.
//!
//! Shader sources are compiled and loaded by an external asset loader. This
//! crate only records which named module and entry points a material
//! variant is drawn with, and can ask the loader whether they exist.

use std::fmt;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Stages of a draw pair, in pipeline order
    pub const DRAW: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];
}

/// One entry point in a named shader module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderEntry {
    /// Module name as known to the asset loader, e.g. "unlit-color"
    pub module: String,
    /// Entry point function, e.g. "vs_main"
    pub entry_point: String,
}

impl ShaderEntry {
    pub fn new(module: impl Into<String>, entry_point: impl Into<String>) -> Self {
        Self { module: module.into(), entry_point: entry_point.into() }
    }
}

impl fmt::Display for ShaderEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.entry_point)
    }
}

/// Vertex + fragment stages a material is drawn with
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShaderPair {
    pub vertex: ShaderEntry,
    pub fragment: ShaderEntry,
}

impl ShaderPair {
    pub const VERTEX_ENTRY: &'static str = "vs_main";
    pub const FRAGMENT_ENTRY: &'static str = "fs_main";

    /// Both stages from a single module using the default entry points.
    pub fn from_module(module: &str) -> Self {
        Self {
            vertex: ShaderEntry::new(module, Self::VERTEX_ENTRY),
            fragment: ShaderEntry::new(module, Self::FRAGMENT_ENTRY),
        }
    }

    pub fn unlit_color() -> Self {
        Self::from_module("unlit-color")
    }

    pub fn unlit_texture() -> Self {
        Self::from_module("unlit-texture")
    }

    /// Entry point used for `stage`
    pub fn stage(&self, stage: ShaderStage) -> &ShaderEntry {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

/// Asset loader view used to check shader pairings.
///
/// Implemented by the host's shader cache; compiled modules are looked up
/// by name.
pub trait ShaderLibrary: Send + Sync {
    /// Whether a compiled module with this name is available
    fn has_module(&self, name: &str) -> bool;

    /// Whether the module exports `entry_point` for `stage`.
    ///
    /// Loaders without reflection data can keep the default.
    fn has_entry_point(&self, module: &str, entry_point: &str, stage: ShaderStage) -> bool {
        let _ = (entry_point, stage);
        self.has_module(module)
    }
}
