/*!
# Lumen 3D Core

CPU-side resource binding and visibility for an unlit 3D renderer.

The crate owns everything a frame needs before the GPU sees it: the bind
group convention shared with the shader modules, the camera block and its
frustum, material validation, frustum culling and the per-frame globals.
GPU submission is delegated to a [`RenderBackend`](renderer::RenderBackend)
implementation supplied by the caller.

## Architecture

- **BindGroupLayoutRegistry**: Layout of every bind group, keyed by group index
- **MaterialRegistry**: Materials validated against their variant's layout
- **Camera / CameraUniformBuilder**: Camera state and the group 0 camera block
- **Frustum**: Six normalized planes extracted from a view-projection matrix
- **CameraCuller / Drawer**: Per-frame visibility and draw strategies
- **FrameGlobalsUpdater**: Frame counter, elapsed time and delta time
- **Engine**: Process-wide configuration, singletons and logging
*/

// Internal modules
mod error;
mod engine;
pub mod config;
pub mod log;
pub mod binding;
pub mod resource;
pub mod camera;
pub mod scene;
pub mod renderer;
pub mod frame;

// Main lumen3d namespace module
pub mod lumen3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton and its configuration
    pub use crate::engine::Engine;
    pub use crate::config::Config;

    // Backend seam
    pub use crate::renderer::RenderBackend;

    // Most used types, flattened
    pub use crate::binding::{BindGroupLayoutRegistry, BindingLayout, MaterialBinding};
    pub use crate::camera::{Camera, CameraUniform, CameraUniformBuilder, Frustum, Lens};
    pub use crate::frame::{FrameGlobals, FrameGlobalsUpdater, FrameRenderer};
    pub use crate::resource::{
        MaterialHandle, MaterialRegistry, MaterialResources, MaterialVariant,
    };
    pub use crate::scene::{Drawable, DrawableKey, FrustumCuller, OctreeSceneIndex, Scene, SceneIndex};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: engine_* macros are NOT re-exported here - they are internal only
    }

    // Binding sub-module (schema constants and layout types)
    pub mod binding {
        pub use crate::binding::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Frame sub-module
    pub mod frame {
        pub use crate::frame::*;
    }
}

// Re-export math library at crate root
pub use glam;
