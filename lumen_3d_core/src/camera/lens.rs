//! Camera lens: the parameters a projection matrix is built from.

use glam::Mat4;
use crate::error::Result;

/// Projection parameters.
///
/// Both variants produce right-handed, zero-to-one depth projections
/// (glam `*_rh`), looking down -Z in view space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lens {
    Perspective {
        /// Vertical field of view, in degrees
        fov_y_degrees: f32,
        /// Width / height
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Lens {
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Lens::Perspective { fov_y_degrees, aspect, near, far }
    }

    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Lens::Orthographic { left, right, bottom, top, near, far }
    }

    /// Centered orthographic volume `height` units tall
    pub fn orthographic_symmetric(height: f32, aspect: f32, near: f32, far: f32) -> Self {
        let half_h = height * 0.5;
        let half_w = half_h * aspect;
        Self::orthographic(-half_w, half_w, -half_h, half_h, near, far)
    }

    pub fn near(&self) -> f32 {
        match *self {
            Lens::Perspective { near, .. } | Lens::Orthographic { near, .. } => near,
        }
    }

    pub fn far(&self) -> f32 {
        match *self {
            Lens::Perspective { far, .. } | Lens::Orthographic { far, .. } => far,
        }
    }

    /// Same lens with a new aspect ratio (orthographic lenses keep their height).
    pub fn with_aspect(self, aspect: f32) -> Self {
        match self {
            Lens::Perspective { fov_y_degrees, near, far, .. } => {
                Lens::Perspective { fov_y_degrees, aspect, near, far }
            }
            Lens::Orthographic { bottom, top, near, far, .. } => {
                let half_w = (top - bottom) * 0.5 * aspect;
                Lens::Orthographic { left: -half_w, right: half_w, bottom, top, near, far }
            }
        }
    }

    /// Reject parameters that cannot produce an invertible projection.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Lens::Perspective { fov_y_degrees, aspect, near, far } => {
                if !(fov_y_degrees > 0.0 && fov_y_degrees < 180.0) {
                    crate::engine_bail!("lumen3d::Lens", DegenerateCamera,
                        "field of view must be in (0, 180) degrees, got {}", fov_y_degrees);
                }
                if !(aspect > 0.0 && aspect.is_finite()) {
                    crate::engine_bail!("lumen3d::Lens", DegenerateCamera,
                        "aspect ratio must be positive, got {}", aspect);
                }
                if !(near > 0.0 && far > near && far.is_finite()) {
                    crate::engine_bail!("lumen3d::Lens", DegenerateCamera,
                        "clip range must satisfy 0 < near < far, got near={} far={}", near, far);
                }
            }
            Lens::Orthographic { left, right, bottom, top, near, far } => {
                let finite = [left, right, bottom, top, near, far].iter().all(|v| v.is_finite());
                if !finite {
                    crate::engine_bail!("lumen3d::Lens", DegenerateCamera,
                        "orthographic extents must be finite");
                }
                if left == right || bottom == top {
                    crate::engine_bail!("lumen3d::Lens", DegenerateCamera,
                        "orthographic volume has zero width or height");
                }
                if !(far > near) {
                    crate::engine_bail!("lumen3d::Lens", DegenerateCamera,
                        "clip range must satisfy near < far, got near={} far={}", near, far);
                }
            }
        }
        Ok(())
    }

    /// Projection matrix for this lens.
    pub fn projection_matrix(&self) -> Result<Mat4> {
        self.validate()?;
        Ok(match *self {
            Lens::Perspective { fov_y_degrees, aspect, near, far } => {
                Mat4::perspective_rh(fov_y_degrees.to_radians(), aspect, near, far)
            }
            Lens::Orthographic { left, right, bottom, top, near, far } => {
                Mat4::orthographic_rh(left, right, bottom, top, near, far)
            }
        })
    }
}

impl Default for Lens {
    /// 27° vertical field of view, square aspect, 0.3 to 1000 clip range
    fn default() -> Self {
        Lens::perspective(27.0, 1.0, 0.3, 1000.0)
    }
}
