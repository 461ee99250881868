/// Scene - the ordered set of drawables submitted each frame.
///
/// Uses a SlotMap for O(1) lookup with stable keys, plus an explicit draw
/// order. Cullers walk the draw order, so visible sets come out in the
/// order drawables were added.
///
/// An optional [`SceneIndex`] is kept in sync with every placement change.
/// Each drawable also carries a sequence number that grows with draw order,
/// so index query results can be put back in draw order by sorting.

use glam::Mat4;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use crate::error::Result;
use crate::resource::MaterialHandle;
use super::bounds::BoundingVolume;
use super::drawable::Drawable;
use super::scene_index::SceneIndex;

new_key_type! {
    /// Stable key for a drawable in a [`Scene`]
    pub struct DrawableKey;
}

#[derive(Debug, Default)]
pub struct Scene {
    drawables: SlotMap<DrawableKey, Drawable>,
    draw_order: Vec<DrawableKey>,
    sequence: SecondaryMap<DrawableKey, u64>,
    next_sequence: u64,
    index: Option<Box<dyn SceneIndex>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a drawable at the end of the draw order.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if the transform or the bounds are not finite, a
    /// sphere has a negative radius, or the world-space bounds overflow.
    pub fn add(&mut self, drawable: Drawable) -> Result<DrawableKey> {
        Self::check_placement(drawable.transform(), drawable.local_bounds())?;
        let world_aabb = drawable.world_aabb();
        let key = self.drawables.insert(drawable);
        self.draw_order.push(key);
        self.sequence.insert(key, self.next_sequence);
        self.next_sequence += 1;
        if let Some(index) = self.index.as_mut() {
            index.insert(key, &world_aabb);
        }
        Ok(key)
    }

    /// Build and add a drawable.
    pub fn create_drawable(
        &mut self,
        transform: Mat4,
        material: MaterialHandle,
        bounds: impl Into<BoundingVolume>,
    ) -> Result<DrawableKey> {
        self.add(Drawable::new(transform, material, bounds))
    }

    /// Remove a drawable. The rest of the draw order is unchanged.
    pub fn remove(&mut self, key: DrawableKey) -> Option<Drawable> {
        let drawable = self.drawables.remove(key)?;
        self.draw_order.retain(|&k| k != key);
        self.sequence.remove(key);
        if let Some(index) = self.index.as_mut() {
            index.remove(key);
        }
        Some(drawable)
    }

    pub fn drawable(&self, key: DrawableKey) -> Option<&Drawable> {
        self.drawables.get(key)
    }

    pub fn contains(&self, key: DrawableKey) -> bool {
        self.drawables.contains_key(key)
    }

    /// Move a drawable. World bounds are refreshed immediately.
    pub fn set_transform(&mut self, key: DrawableKey, transform: Mat4) -> Result<()> {
        let Some(drawable) = self.drawables.get_mut(key) else {
            crate::engine_bail!("lumen3d::Scene", InvalidResource,
                "drawable {:?} is not in the scene", key);
        };
        Self::check_placement(&transform, drawable.local_bounds())?;
        drawable.set_transform(transform);
        if let Some(index) = self.index.as_mut() {
            index.update(key, &drawable.world_aabb());
        }
        Ok(())
    }

    /// Point a drawable at another material. Returns false if the key is invalid.
    pub fn set_material(&mut self, key: DrawableKey, material: MaterialHandle) -> bool {
        match self.drawables.get_mut(key) {
            Some(drawable) => {
                drawable.set_material(material);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    /// Keys in draw order
    pub fn draw_order(&self) -> &[DrawableKey] {
        &self.draw_order
    }

    /// Drawables in draw order
    pub fn iter(&self) -> impl Iterator<Item = (DrawableKey, &Drawable)> + '_ {
        self.draw_order
            .iter()
            .filter_map(move |&key| self.drawables.get(key).map(|d| (key, d)))
    }

    /// Remove all drawables. The index, if any, is kept and emptied.
    pub fn clear(&mut self) {
        self.drawables.clear();
        self.draw_order.clear();
        self.sequence.clear();
        if let Some(index) = self.index.as_mut() {
            index.clear();
        }
    }

    // ===== SPATIAL INDEX =====

    /// Attach a spatial index, replacing any previous one.
    ///
    /// The index is cleared and filled with every drawable in the scene.
    pub fn set_index(&mut self, mut index: Box<dyn SceneIndex>) {
        index.clear();
        for &key in &self.draw_order {
            if let Some(drawable) = self.drawables.get(key) {
                index.insert(key, &drawable.world_aabb());
            }
        }
        crate::engine_debug!("lumen3d::Scene",
            "Attached scene index with {} drawables", index.len());
        self.index = Some(index);
    }

    /// Detach and return the spatial index.
    pub fn take_index(&mut self) -> Option<Box<dyn SceneIndex>> {
        self.index.take()
    }

    pub fn index(&self) -> Option<&dyn SceneIndex> {
        self.index.as_deref()
    }

    /// Position of a drawable in the draw order, as a sortable number.
    ///
    /// Numbers are not dense: removing a drawable leaves a gap.
    pub fn sequence(&self, key: DrawableKey) -> Option<u64> {
        self.sequence.get(key).copied()
    }

    fn check_placement(transform: &Mat4, bounds: &BoundingVolume) -> Result<()> {
        if !transform.is_finite() {
            crate::engine_bail!("lumen3d::Scene", InvalidResource,
                "drawable transform has non-finite elements");
        }
        if !bounds.is_valid() {
            crate::engine_bail!("lumen3d::Scene", InvalidResource,
                "drawable bounds are invalid: {:?}", bounds);
        }
        // Finite inputs can still overflow once scaled
        let world = bounds.transformed(transform);
        if !world.is_valid() || !world.aabb().is_valid() {
            crate::engine_bail!("lumen3d::Scene", InvalidResource,
                "drawable world bounds are not finite: {:?}", world);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
