/// Recording backend for unit tests (no GPU required)

#[cfg(test)]
use crate::binding::{BindingLayout, MaterialBinding};
#[cfg(test)]
use crate::error::Result;
#[cfg(test)]
use crate::frame::FrameGlobals;
#[cfg(test)]
use crate::resource::{BlendMode, ShaderPair};
#[cfg(test)]
use crate::scene::DrawableKey;
#[cfg(test)]
use super::backend::RenderBackend;

/// One backend call, as recorded
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Uniform { group: u32, binding: u32, data: Vec<u8> },
    Globals(FrameGlobals),
    Shaders { module: String, blend: BlendMode },
    Material { group: u32, bindings: Vec<MaterialBinding> },
    Draw(DrawableKey),
}

#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    /// Fail the next draw call with a BackendError
    pub fail_draws: bool,
}

#[cfg(test)]
impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> Vec<DrawableKey> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::Draw(key) => Some(*key),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

#[cfg(test)]
impl RenderBackend for RecordingBackend {
    fn update_uniform(&mut self, group: u32, binding: u32, data: &[u8]) -> Result<()> {
        self.calls.push(BackendCall::Uniform { group, binding, data: data.to_vec() });
        Ok(())
    }

    fn update_frame_globals(&mut self, globals: &FrameGlobals) -> Result<()> {
        self.calls.push(BackendCall::Globals(*globals));
        Ok(())
    }

    fn bind_shaders(&mut self, shaders: &ShaderPair, blend: BlendMode) -> Result<()> {
        self.calls.push(BackendCall::Shaders { module: shaders.vertex.module.clone(), blend });
        Ok(())
    }

    fn bind_material(&mut self, layout: &BindingLayout, bindings: &[MaterialBinding]) -> Result<()> {
        self.calls.push(BackendCall::Material { group: layout.group(), bindings: bindings.to_vec() });
        Ok(())
    }

    fn draw(&mut self, drawable: DrawableKey) -> Result<()> {
        if self.fail_draws {
            crate::engine_bail!("lumen3d::RecordingBackend", BackendError,
                "draw of {:?} rejected", drawable);
        }
        self.calls.push(BackendCall::Draw(drawable));
        Ok(())
    }
}
