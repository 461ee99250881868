/// RenderBackend trait - the GPU side of the binding pipeline
///
/// Implemented by the host's graphics layer (wgpu or similar). This crate
/// resolves what to bind and in which order; the backend owns buffers,
/// bind group objects and pipelines and turns each call into GPU work.

use crate::binding::{BindingLayout, MaterialBinding};
use crate::error::Result;
use crate::frame::FrameGlobals;
use crate::resource::{BlendMode, ShaderPair};
use crate::scene::DrawableKey;

/// Receives resolved uniform data, bind groups and draws.
pub trait RenderBackend {
    /// Write uniform block contents for `@group(group) @binding(binding)`
    ///
    /// # Arguments
    ///
    /// * `group` - Bind group index (0 = camera, 1 = object)
    /// * `binding` - Binding number within the group
    /// * `data` - Block bytes, laid out exactly as the shader declares them
    fn update_uniform(&mut self, group: u32, binding: u32, data: &[u8]) -> Result<()>;

    /// Publish the per-frame globals block.
    ///
    /// Backends whose shaders do not declare the globals block can keep
    /// the default.
    fn update_frame_globals(&mut self, globals: &FrameGlobals) -> Result<()> {
        let _ = globals;
        Ok(())
    }

    /// Select the vertex/fragment pair (and blend state) for subsequent draws
    fn bind_shaders(&mut self, shaders: &ShaderPair, blend: BlendMode) -> Result<()>;

    /// Bind a material's group 2 resources
    ///
    /// `bindings` are ordered by binding number and match `layout` one to one.
    fn bind_material(&mut self, layout: &BindingLayout, bindings: &[MaterialBinding]) -> Result<()>;

    /// Issue the draw call for one drawable
    fn draw(&mut self, drawable: DrawableKey) -> Result<()>;
}
