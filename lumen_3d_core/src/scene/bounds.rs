//! Bounding volumes used for frustum culling.
//!
//! Volumes are declared in a drawable's local space and transformed to
//! world space whenever the drawable's transform changes.

use glam::{Mat4, Vec3};

// ===== AABB =====

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self { min: center - half_extents, max: center + half_extents }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Finite corners with min <= max on every axis
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Transform this AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Returns `true` if `other` is entirely within `self`.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.cmple(other.min).all() && self.max.cmpge(other.max).all()
    }

    /// Returns `true` if the two AABBs overlap or touch.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Smallest sphere enclosing the box
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere::new(self.center(), self.half_extents().length())
    }
}

// ===== SPHERE =====

/// Bounding sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Finite center and a finite, non-negative radius
    pub fn is_valid(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite() && self.radius >= 0.0
    }

    /// Transform the sphere by a matrix.
    ///
    /// The radius is scaled by the largest axis scale, so the result stays
    /// conservative under non-uniform scale.
    pub fn transformed(&self, matrix: &Mat4) -> Sphere {
        let max_scale = (0..3)
            .map(|i| matrix.col(i).truncate().length())
            .fold(0.0_f32, f32::max);
        Sphere {
            center: matrix.transform_point3(self.center),
            radius: self.radius * max_scale,
        }
    }

    /// Smallest box enclosing the sphere
    pub fn aabb(&self) -> AABB {
        AABB::from_center_half_extents(self.center, Vec3::splat(self.radius))
    }
}

// ===== BOUNDING VOLUME =====

/// Local-space bounds of a drawable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Sphere(Sphere),
    Aabb(AABB),
}

impl BoundingVolume {
    pub fn is_valid(&self) -> bool {
        match self {
            BoundingVolume::Sphere(sphere) => sphere.is_valid(),
            BoundingVolume::Aabb(aabb) => aabb.is_valid(),
        }
    }

    pub fn transformed(&self, matrix: &Mat4) -> BoundingVolume {
        match self {
            BoundingVolume::Sphere(sphere) => BoundingVolume::Sphere(sphere.transformed(matrix)),
            BoundingVolume::Aabb(aabb) => BoundingVolume::Aabb(aabb.transformed(matrix)),
        }
    }

    /// Box used to place the volume in a spatial index
    pub fn aabb(&self) -> AABB {
        match self {
            BoundingVolume::Sphere(sphere) => sphere.aabb(),
            BoundingVolume::Aabb(aabb) => *aabb,
        }
    }
}

impl From<Sphere> for BoundingVolume {
    fn from(sphere: Sphere) -> Self {
        BoundingVolume::Sphere(sphere)
    }
}

impl From<AABB> for BoundingVolume {
    fn from(aabb: AABB) -> Self {
        BoundingVolume::Aabb(aabb)
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
