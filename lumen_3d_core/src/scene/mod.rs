//! Scene module
//!
//! Drawables with their bounds, spatial indexing, and the per-frame
//! culling and drawing strategies.

mod bounds;
mod drawable;
mod scene;
mod scene_index;
mod octree_scene_index;
mod culler;
mod drawer;

pub use bounds::{AABB, Sphere, BoundingVolume};
pub use drawable::Drawable;
pub use scene::{Scene, DrawableKey};
pub use scene_index::SceneIndex;
pub use octree_scene_index::{OctreeSceneIndex, MAX_OCTREE_DEPTH};
pub use culler::{
    CameraCuller, BruteForceCuller, FrustumCuller, ParallelFrustumCuller,
    VisibleSet, cull_visible,
};
pub use drawer::{Drawer, ForwardDrawer, DrawStats};
