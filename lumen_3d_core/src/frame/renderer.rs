//! Per-frame pipeline.
//!
//! Runs the fixed frame order: camera block, globals, culling, drawing.
//! The camera and frustum are already consistent inside [`Camera`]; the
//! renderer publishes them, culls against that frustum and hands the
//! survivors to the drawer.

use crate::binding::BindGroupLayoutRegistry;
use crate::camera::{Camera, CameraUniform, CameraUniformBuilder, RenderView};
use crate::config::Config;
use crate::error::Result;
use crate::renderer::RenderBackend;
use crate::resource::MaterialRegistry;
use crate::scene::{CameraCuller, DrawStats, Drawer, ForwardDrawer, ParallelFrustumCuller, Scene};
use super::globals::FrameGlobals;

/// What one frame published, kept for inspection after the backend calls.
#[derive(Debug, Clone)]
pub struct FramePacket {
    pub camera: CameraUniform,
    pub globals: FrameGlobals,
    pub view: RenderView,
    pub stats: DrawStats,
}

pub struct FrameRenderer {
    camera_builder: CameraUniformBuilder,
    culler: Box<dyn CameraCuller>,
    drawer: Box<dyn Drawer>,
}

impl FrameRenderer {
    /// Build a renderer; fails if the camera block does not fit `layouts`.
    pub fn new(
        layouts: &BindGroupLayoutRegistry,
        culler: Box<dyn CameraCuller>,
        drawer: Box<dyn Drawer>,
    ) -> Result<Self> {
        Ok(Self {
            camera_builder: CameraUniformBuilder::new(layouts)?,
            culler,
            drawer,
        })
    }

    /// Parallel frustum culling tuned by `config`, forward drawing.
    pub fn with_defaults(layouts: &BindGroupLayoutRegistry, config: &Config) -> Result<Self> {
        Self::new(
            layouts,
            Box::new(ParallelFrustumCuller::from_config(config)),
            Box::new(ForwardDrawer::new()),
        )
    }

    pub fn set_culler(&mut self, culler: Box<dyn CameraCuller>) {
        self.culler = culler;
    }

    pub fn set_drawer(&mut self, drawer: Box<dyn Drawer>) {
        self.drawer = drawer;
    }

    /// Render one frame of `scene` as seen by `camera`.
    pub fn render(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        globals: FrameGlobals,
        materials: &MaterialRegistry,
        backend: &mut dyn RenderBackend,
    ) -> Result<FramePacket> {
        let camera_block = self.camera_builder.build(camera);
        backend.update_uniform(
            self.camera_builder.group(),
            self.camera_builder.binding(),
            camera_block.as_bytes(),
        )?;
        backend.update_frame_globals(&globals)?;

        let view = self.culler.cull(scene, camera);
        let stats = self.drawer.draw(scene, &view, materials, backend)?;

        crate::engine_trace!("lumen3d::FrameRenderer",
            "Frame {}: {} of {} drawables visible, {} drawn",
            globals.frame, view.visible_count(), scene.len(), stats.drawn);

        Ok(FramePacket { camera: camera_block, globals, view, stats })
    }
}

#[cfg(test)]
#[path = "renderer_tests.rs"]
mod tests;
