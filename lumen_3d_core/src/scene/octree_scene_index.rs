/// OctreeSceneIndex - static octree over drawable world boxes.
///
/// All nodes of a fixed-depth tree are allocated at construction, in
/// depth-first order, so a child is found by arithmetic instead of pointers.
///
/// Each drawable lives in exactly one place: the deepest node whose box
/// fully contains its world box, or the overflow list if it leaves the
/// indexed region. Overflow entries are tested on every query, so nothing
/// outside the root box is ever missed.

use glam::{BVec3, Vec3};
use rustc_hash::FxHashMap;
use crate::camera::{Frustum, FrustumTest};
use crate::error::Result;
use super::bounds::AABB;
use super::scene::DrawableKey;
use super::scene_index::SceneIndex;

/// Deepest tree accepted by [`OctreeSceneIndex::new`] (299 593 nodes).
pub const MAX_OCTREE_DEPTH: u32 = 6;

const ROOT: usize = 0;

/// Where a drawable is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Node(usize),
    Overflow,
}

#[derive(Debug)]
struct OctreeNode {
    bounds: AABB,
    /// Index of the first child in the node array; 0 for leaves
    first_child: usize,
    entries: Vec<(DrawableKey, AABB)>,
}

/// Static octree spatial index.
#[derive(Debug)]
pub struct OctreeSceneIndex {
    nodes: Vec<OctreeNode>,
    max_depth: u32,
    /// `subtree_sizes[d]` = node count of a subtree with `d` levels below its root
    subtree_sizes: Vec<usize>,
    overflow: Vec<(DrawableKey, AABB)>,
    slots: FxHashMap<DrawableKey, Slot>,
}

impl OctreeSceneIndex {
    /// Build an empty octree covering `bounds`, `max_depth` levels below the root.
    ///
    /// # Errors
    ///
    /// `InvalidResource` if `bounds` is not finite, has zero extent on an
    /// axis, or `max_depth` exceeds [`MAX_OCTREE_DEPTH`].
    pub fn new(bounds: AABB, max_depth: u32) -> Result<Self> {
        if !bounds.is_valid() || bounds.min.cmpeq(bounds.max).any() {
            crate::engine_bail!("lumen3d::OctreeSceneIndex", InvalidResource,
                "octree bounds must be finite with a positive extent, got {:?}", bounds);
        }
        if max_depth > MAX_OCTREE_DEPTH {
            crate::engine_bail!("lumen3d::OctreeSceneIndex", InvalidResource,
                "octree depth {} exceeds the maximum of {}", max_depth, MAX_OCTREE_DEPTH);
        }

        let subtree_sizes: Vec<usize> = (0..=max_depth).map(Self::subtree_size).collect();
        let mut nodes = Vec::with_capacity(subtree_sizes[max_depth as usize]);
        Self::build(&mut nodes, bounds, max_depth);

        crate::engine_debug!("lumen3d::OctreeSceneIndex",
            "Built octree: depth {}, {} nodes", max_depth, nodes.len());

        Ok(Self {
            nodes,
            max_depth,
            subtree_sizes,
            overflow: Vec::new(),
            slots: FxHashMap::default(),
        })
    }

    /// Region covered by the root node
    pub fn bounds(&self) -> &AABB {
        &self.nodes[ROOT].bounds
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_key(&self, key: DrawableKey) -> bool {
        self.slots.contains_key(&key)
    }

    /// Drawables stored outside the root box
    pub fn overflow_len(&self) -> usize {
        self.overflow.len()
    }

    /// Depth of the node holding `key` (root = 0); `None` for unknown or
    /// overflow entries.
    pub fn depth_of(&self, key: DrawableKey) -> Option<u32> {
        let Slot::Node(target) = *self.slots.get(&key)? else {
            return None;
        };
        let mut node = ROOT;
        let mut levels = self.max_depth;
        let mut depth = 0;
        while node != target && levels > 0 {
            let octant = (0..8u8)
                .map(|octant| self.child(node, octant, levels))
                .take_while(|&child| child <= target)
                .last()?;
            node = octant;
            levels -= 1;
            depth += 1;
        }
        (node == target).then_some(depth)
    }

    // ===== CONSTRUCTION =====

    /// Node count of a subtree with `levels` levels below its root
    fn subtree_size(levels: u32) -> usize {
        (0..=levels).map(|level| 8usize.pow(level)).sum()
    }

    fn build(nodes: &mut Vec<OctreeNode>, bounds: AABB, levels_below: u32) {
        let index = nodes.len();
        nodes.push(OctreeNode { bounds, first_child: 0, entries: Vec::new() });
        if levels_below == 0 {
            return;
        }

        nodes[index].first_child = nodes.len();
        let center = bounds.center();
        for octant in 0..8u8 {
            Self::build(nodes, Self::octant_bounds(&bounds, center, octant), levels_below - 1);
        }
    }

    /// Octant bit layout: bit0 = X, bit1 = Y, bit2 = Z (set = high half).
    fn octant_bounds(parent: &AABB, center: Vec3, octant: u8) -> AABB {
        let high = BVec3::new(octant & 1 != 0, octant & 2 != 0, octant & 4 != 0);
        AABB::new(
            Vec3::select(high, center, parent.min),
            Vec3::select(high, parent.max, center),
        )
    }

    fn octant_of(center: Vec3, point: Vec3) -> u8 {
        (point.x >= center.x) as u8
            | ((point.y >= center.y) as u8) << 1
            | ((point.z >= center.z) as u8) << 2
    }

    fn child(&self, node: usize, octant: u8, levels_below: u32) -> usize {
        self.nodes[node].first_child
            + octant as usize * self.subtree_sizes[(levels_below - 1) as usize]
    }

    // ===== PLACEMENT =====

    /// Deepest node fully containing `aabb`, or the overflow list.
    ///
    /// Descends while both corners fall in the same octant.
    fn target_slot(&self, aabb: &AABB) -> Slot {
        if !self.nodes[ROOT].bounds.contains(aabb) {
            return Slot::Overflow;
        }

        let mut node = ROOT;
        let mut levels = self.max_depth;
        while levels > 0 {
            let center = self.nodes[node].bounds.center();
            let octant = Self::octant_of(center, aabb.min);
            if octant != Self::octant_of(center, aabb.max) {
                break;
            }
            node = self.child(node, octant, levels);
            levels -= 1;
        }
        Slot::Node(node)
    }

    fn entries_mut(&mut self, slot: Slot) -> &mut Vec<(DrawableKey, AABB)> {
        match slot {
            Slot::Node(index) => &mut self.nodes[index].entries,
            Slot::Overflow => &mut self.overflow,
        }
    }

    // ===== QUERIES =====

    /// 3-way walk: skip `Outside` subtrees, take `Inside` subtrees whole,
    /// test entries one by one and descend for `Partial` nodes.
    fn query_node(
        &self,
        node: usize,
        levels_below: u32,
        frustum: &Frustum,
        classification: FrustumTest,
        results: &mut Vec<DrawableKey>,
    ) {
        match classification {
            FrustumTest::Outside => {}
            FrustumTest::Inside => self.collect_subtree(node, levels_below, results),
            FrustumTest::Partial => {
                results.extend(
                    self.nodes[node]
                        .entries
                        .iter()
                        .filter(|(_, aabb)| frustum.intersects_aabb(aabb))
                        .map(|&(key, _)| key),
                );
                if levels_below > 0 {
                    for octant in 0..8u8 {
                        let child = self.child(node, octant, levels_below);
                        let class = frustum.classify_aabb(&self.nodes[child].bounds);
                        self.query_node(child, levels_below - 1, frustum, class, results);
                    }
                }
            }
        }
    }

    fn collect_subtree(&self, node: usize, levels_below: u32, results: &mut Vec<DrawableKey>) {
        results.extend(self.nodes[node].entries.iter().map(|&(key, _)| key));
        if levels_below > 0 {
            for octant in 0..8u8 {
                self.collect_subtree(self.child(node, octant, levels_below), levels_below - 1, results);
            }
        }
    }

    fn query_region(
        &self,
        node: usize,
        levels_below: u32,
        region: &AABB,
        results: &mut Vec<DrawableKey>,
    ) {
        if !self.nodes[node].bounds.intersects(region) {
            return;
        }
        results.extend(
            self.nodes[node]
                .entries
                .iter()
                .filter(|(_, aabb)| aabb.intersects(region))
                .map(|&(key, _)| key),
        );
        if levels_below > 0 {
            for octant in 0..8u8 {
                self.query_region(self.child(node, octant, levels_below), levels_below - 1, region, results);
            }
        }
    }
}

impl SceneIndex for OctreeSceneIndex {
    fn insert(&mut self, key: DrawableKey, world_aabb: &AABB) {
        if self.slots.contains_key(&key) {
            self.update(key, world_aabb);
            return;
        }
        let slot = self.target_slot(world_aabb);
        self.entries_mut(slot).push((key, *world_aabb));
        self.slots.insert(key, slot);
    }

    fn remove(&mut self, key: DrawableKey) {
        let Some(slot) = self.slots.remove(&key) else {
            return;
        };
        let entries = self.entries_mut(slot);
        if let Some(position) = entries.iter().position(|&(k, _)| k == key) {
            entries.swap_remove(position);
        }
    }

    fn update(&mut self, key: DrawableKey, world_aabb: &AABB) {
        let target = self.target_slot(world_aabb);

        if self.slots.get(&key) == Some(&target) {
            if let Some(entry) = self.entries_mut(target).iter_mut().find(|(k, _)| *k == key) {
                entry.1 = *world_aabb;
                return;
            }
        }

        self.remove(key);
        self.entries_mut(target).push((key, *world_aabb));
        self.slots.insert(key, target);
    }

    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<DrawableKey>) {
        results.extend(
            self.overflow
                .iter()
                .filter(|(_, aabb)| frustum.intersects_aabb(aabb))
                .map(|&(key, _)| key),
        );
        let root_class = frustum.classify_aabb(&self.nodes[ROOT].bounds);
        self.query_node(ROOT, self.max_depth, frustum, root_class, results);
    }

    fn query_aabb(&self, region: &AABB, results: &mut Vec<DrawableKey>) {
        results.extend(
            self.overflow
                .iter()
                .filter(|(_, aabb)| aabb.intersects(region))
                .map(|&(key, _)| key),
        );
        self.query_region(ROOT, self.max_depth, region, results);
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn clear(&mut self) {
        for node in &mut self.nodes {
            node.entries.clear();
        }
        self.overflow.clear();
        self.slots.clear();
    }
}

#[cfg(test)]
#[path = "octree_scene_index_tests.rs"]
mod tests;
