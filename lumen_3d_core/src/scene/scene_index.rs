/// Spatial acceleration structures for scene queries.
///
/// A SceneIndex places drawables by their world-space box so cullers can
/// reject whole regions at once. A scene that owns an index keeps it in
/// sync on add, remove and move.

use std::fmt;
use crate::camera::Frustum;
use super::bounds::AABB;
use super::scene::DrawableKey;

/// Spatial index over drawable world boxes.
///
/// Queries are conservative: they may return drawables whose exact volume
/// is outside, never miss one whose box overlaps. Result order is
/// unspecified.
pub trait SceneIndex: Send + Sync + fmt::Debug {
    /// Insert a drawable with its world-space box.
    fn insert(&mut self, key: DrawableKey, world_aabb: &AABB);

    /// Remove a drawable. Unknown keys are ignored.
    fn remove(&mut self, key: DrawableKey);

    /// Move a drawable to a new world-space box.
    fn update(&mut self, key: DrawableKey, world_aabb: &AABB);

    /// Append every drawable whose box intersects the frustum.
    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<DrawableKey>);

    /// Append every drawable whose box overlaps `region`.
    fn query_aabb(&self, region: &AABB, results: &mut Vec<DrawableKey>);

    /// Number of indexed drawables
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all drawables.
    fn clear(&mut self);
}
