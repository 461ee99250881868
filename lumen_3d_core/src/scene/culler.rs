/// Camera culling strategies.
///
/// A CameraCuller determines which drawables are visible from a given
/// camera. Every culler keeps the scene's draw order: the visible set is a
/// stable filter of the input, never a reordering.

use rayon::prelude::*;
use crate::camera::{Camera, Frustum, RenderView};
use crate::config::Config;
use super::drawable::Drawable;
use super::scene::{DrawableKey, Scene};

/// Strategy for determining visible drawables from a camera.
///
/// Called once per frame before drawing. The returned RenderView
/// is ephemeral and consumed by a Drawer.
///
/// `&mut self` allows stateful implementations (e.g. caching)
/// to maintain state across frames.
pub trait CameraCuller: Send + Sync {
    /// Cull the scene against the camera and return visible drawables.
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> RenderView;
}

// ============================================================================
// Visible set
// ============================================================================

/// Keys of the drawables that passed culling, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSet {
    keys: Vec<DrawableKey>,
}

impl VisibleSet {
    pub fn keys(&self) -> &[DrawableKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, key: DrawableKey) -> bool {
        self.keys.contains(&key)
    }

    pub fn into_keys(self) -> Vec<DrawableKey> {
        self.keys
    }
}

fn is_visible(frustum: &Frustum, drawable: &Drawable) -> bool {
    let bounds = drawable.world_bounds();
    debug_assert!(bounds.is_valid(), "culling a drawable with invalid bounds: {:?}", bounds);
    frustum.intersects_volume(bounds)
}

/// Filter drawables against a frustum, preserving their order.
///
/// Spheres are kept when their signed distance to every plane is at least
/// `-radius`; boxes use the conservative p-vertex test.
pub fn cull_visible<'a, I>(frustum: &Frustum, drawables: I) -> VisibleSet
where
    I: IntoIterator<Item = (DrawableKey, &'a Drawable)>,
{
    let keys = drawables
        .into_iter()
        .filter(|(_, drawable)| is_visible(frustum, drawable))
        .map(|(key, _)| key)
        .collect();
    VisibleSet { keys }
}

// ============================================================================
// Cullers
// ============================================================================

/// Brute-force culler - returns ALL drawables (no actual culling).
///
/// Suitable for small scenes or as a baseline for comparison.
#[derive(Debug, Default)]
pub struct BruteForceCuller;

impl BruteForceCuller {
    pub fn new() -> Self {
        Self
    }
}

impl CameraCuller for BruteForceCuller {
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> RenderView {
        RenderView::new(camera.clone(), scene.draw_order().to_vec())
    }
}

/// Frustum culler - tests world bounds against the camera frustum on the
/// calling thread.
///
/// When the scene carries a [`SceneIndex`](super::SceneIndex), whole
/// regions are rejected through the index first and only its candidates get
/// the exact test. Candidates are sorted back into draw order, so the result
/// is the same as the linear walk.
#[derive(Debug, Default)]
pub struct FrustumCuller {
    /// Reused between frames
    candidates: Vec<DrawableKey>,
}

impl FrustumCuller {
    pub fn new() -> Self {
        Self::default()
    }

    fn cull_indexed(&mut self, scene: &Scene, frustum: &Frustum) -> Option<Vec<DrawableKey>> {
        let index = scene.index()?;
        self.candidates.clear();
        index.query_frustum(frustum, &mut self.candidates);

        let mut visible: Vec<(u64, DrawableKey)> = self
            .candidates
            .iter()
            .filter_map(|&key| {
                let drawable = scene.drawable(key)?;
                let sequence = scene.sequence(key)?;
                is_visible(frustum, drawable).then_some((sequence, key))
            })
            .collect();
        visible.sort_unstable_by_key(|&(sequence, _)| sequence);
        Some(visible.into_iter().map(|(_, key)| key).collect())
    }
}

impl CameraCuller for FrustumCuller {
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> RenderView {
        let visible = match self.cull_indexed(scene, camera.frustum()) {
            Some(keys) => keys,
            None => cull_visible(camera.frustum(), scene.iter()).into_keys(),
        };
        RenderView::new(camera.clone(), visible)
    }
}

/// Frustum culler that splits large scenes into chunks tested on the rayon
/// pool.
///
/// Chunk results are concatenated in chunk order, so the output order is
/// identical to [`FrustumCuller`]. Scenes smaller than the threshold are
/// culled on the calling thread.
#[derive(Debug, Clone)]
pub struct ParallelFrustumCuller {
    threshold: usize,
    chunk_size: usize,
}

impl ParallelFrustumCuller {
    pub fn new(threshold: usize, chunk_size: usize) -> Self {
        Self { threshold, chunk_size: chunk_size.max(1) }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.parallel_cull_threshold, config.cull_chunk_size)
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    fn cull_parallel(&self, scene: &Scene, frustum: &Frustum) -> Vec<DrawableKey> {
        scene
            .draw_order()
            .par_chunks(self.chunk_size)
            .map(|chunk| {
                chunk
                    .iter()
                    .copied()
                    .filter(|&key| {
                        scene.drawable(key).is_some_and(|drawable| is_visible(frustum, drawable))
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<Vec<_>>>()
            .concat()
    }
}

impl Default for ParallelFrustumCuller {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CameraCuller for ParallelFrustumCuller {
    fn cull(&mut self, scene: &Scene, camera: &Camera) -> RenderView {
        let visible = if scene.len() < self.threshold {
            cull_visible(camera.frustum(), scene.iter()).into_keys()
        } else {
            self.cull_parallel(scene, camera.frustum())
        };
        RenderView::new(camera.clone(), visible)
    }
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
