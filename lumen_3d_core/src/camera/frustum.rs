/// Frustum - six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Planes are extracted from a view-projection matrix built with glam's
/// `*_rh` projections, which map depth to [0, 1].

use glam::{Mat4, Vec3, Vec4};
use crate::error::Result;
use crate::scene::{BoundingVolume, Sphere, AABB};

/// Result of a 3-way frustum/AABB classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Matrices with a smaller |determinant| cannot produce a usable frustum
pub const DEGENERATE_DETERMINANT_EPSILON: f32 = 1e-20;
/// Unnormalized plane normals shorter than this are rejected
pub const DEGENERATE_NORMAL_EPSILON: f32 = 1e-6;

/// Six frustum planes for culling.
///
/// Order: left, right, bottom, top, near, far. Works with both
/// perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method on the matrix rows. The result is a
    /// pure function of `vp`: the same matrix always yields bit-identical
    /// planes.
    ///
    /// # Errors
    ///
    /// `DegenerateCamera` if `vp` has non-finite elements, is (near) singular,
    /// or yields a plane without a usable normal.
    pub fn from_view_projection(vp: &Mat4) -> Result<Self> {
        if !vp.is_finite() {
            crate::engine_bail!("lumen3d::Frustum", DegenerateCamera,
                "view-projection matrix has non-finite elements");
        }
        let det = vp.determinant();
        if !(det.abs() > DEGENERATE_DETERMINANT_EPSILON) {
            crate::engine_bail!("lumen3d::Frustum", DegenerateCamera,
                "view-projection matrix is singular (det = {:e})", det);
        }

        let (r0, r1, r2, r3) = (vp.row(0), vp.row(1), vp.row(2), vp.row(3));
        let mut planes = [
            r3 + r0, // left
            r3 - r0, // right
            r3 + r1, // bottom
            r3 - r1, // top
            r2,      // near (depth 0)
            r3 - r2, // far
        ];

        for (index, plane) in planes.iter_mut().enumerate() {
            let normal_len = plane.truncate().length();
            if !(normal_len >= DEGENERATE_NORMAL_EPSILON) {
                crate::engine_bail!("lumen3d::Frustum", DegenerateCamera,
                    "frustum plane {} has a degenerate normal (length {})", index, normal_len);
            }
            *plane /= normal_len;
        }

        Ok(Self { planes })
    }

    /// Build a frustum from planes computed elsewhere.
    ///
    /// Planes must already be normalized and follow the left..far order.
    pub fn from_planes(planes: [Vec4; 6]) -> Self {
        Self { planes }
    }

    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    /// Plane by index (`PLANE_LEFT`..`PLANE_FAR`), `None` past the far plane
    pub fn plane(&self, index: usize) -> Option<Vec4> {
        self.planes.get(index).copied()
    }

    /// Signed distance from a point to one plane (positive = inside)
    pub fn signed_distance(&self, index: usize, point: Vec3) -> Option<f32> {
        self.plane(index).map(|plane| plane.truncate().dot(point) + plane.w)
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Test if a sphere touches the frustum.
    ///
    /// Inclusive: a sphere whose surface exactly touches a plane is kept.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(sphere.center) + plane.w >= -sphere.radius)
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Uses the "positive vertex" test: for each plane, find the AABB corner
    /// most in the direction of the plane normal. If that corner is outside,
    /// the AABB is fully outside.
    ///
    /// May return false positives (conservative), never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();
            let p_vertex = Self::positive_vertex(normal, aabb);

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return false;
            }
        }

        true
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// - p-vertex outside any plane → `Outside` (early out)
    /// - n-vertex outside any plane → at least `Partial`
    /// - otherwise → `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();

            if normal.dot(Self::positive_vertex(normal, aabb)) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }

            // Negative vertex: corner least in the direction of the normal
            let n_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
                if normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
                if normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
            );
            if normal.dot(n_vertex) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// Dispatch on the bounding volume kind
    pub fn intersects_volume(&self, volume: &BoundingVolume) -> bool {
        match volume {
            BoundingVolume::Sphere(sphere) => self.intersects_sphere(sphere),
            BoundingVolume::Aabb(aabb) => self.intersects_aabb(aabb),
        }
    }

    fn positive_vertex(normal: Vec3, aabb: &AABB) -> Vec3 {
        Vec3::new(
            if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
            if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
            if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
        )
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
