//! Perspective frustum derivation for UI cameras
//!
//! The frustum is stored as the window on the unit-distance view plane
//! (`left`/`right`/`bottom`/`top`) plus the near and far distances. A
//! symmetric frustum satisfies `left == -right` and `bottom == -top`.

use crate::foundation::math::utils;

/// Scale applied to the configured field of view before taking its tangent
///
/// Configured FOV values are full angles; the frustum window is built from
/// the half angle.
pub const FOV_SCALE: f32 = 0.5;

/// Six-plane view volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Left edge of the view window
    pub left: f32,
    /// Right edge of the view window
    pub right: f32,
    /// Top edge of the view window
    pub top: f32,
    /// Bottom edge of the view window
    pub bottom: f32,
    /// Near plane distance
    pub near: f32,
    /// Far plane distance
    pub far: f32,
    /// `far / near`, consumed by the renderer for depth precision tuning
    pub far_near_ratio: f32,
    /// Orthographic rather than perspective projection
    pub ortho: bool,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            left: -0.5,
            right: 0.5,
            top: 0.5,
            bottom: -0.5,
            near: 1.0,
            far: 2.0,
            far_near_ratio: 2.0,
            ortho: false,
        }
    }
}

impl Frustum {
    /// Horizontal extent of the view window
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Vertical extent of the view window
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Compute a symmetric perspective frustum
///
/// `fov` is in degrees; values `<= 0` are replaced by `default_fov`.
/// Degenerate input (zero aspect, `near >= far`, zero near) yields a
/// degenerate frustum rather than an error.
pub fn compute_frustum(fov: f32, default_fov: f32, near: f32, far: f32, screen_aspect: f32) -> Frustum {
    let fov = if fov > 0.0 { fov } else { default_fov };
    let theta = utils::deg_to_rad(fov) * FOV_SCALE;
    let half_height = theta.tan();
    let half_width = half_height * screen_aspect;

    log::trace!(
        "Frustum for fov {:.2} (aspect {:.3}): half extents {:.4} x {:.4}",
        fov,
        screen_aspect,
        half_width,
        half_height
    );

    Frustum {
        left: -half_width,
        right: half_width,
        top: half_height,
        bottom: -half_height,
        near,
        far,
        far_near_ratio: far / near,
        ortho: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_frustum_is_symmetric() {
        let cases = [
            (30.0, 0.1, 10.0, 1.0),
            (75.0, 0.214, 214.3125, 16.0 / 9.0),
            (90.0, 1.0, 1000.0, 4.0 / 3.0),
            (120.0, 0.5, 2.0, 0.5),
        ];

        for (fov, near, far, aspect) in cases {
            let frustum = compute_frustum(fov, 75.0, near, far, aspect);

            assert_eq!(frustum.left, -frustum.right);
            assert_eq!(frustum.bottom, -frustum.top);
            assert_eq!(frustum.far_near_ratio, far / near);
            assert_relative_eq!(frustum.right, frustum.top * aspect, epsilon = EPSILON);
            assert!(!frustum.ortho);
        }
    }

    #[test]
    fn test_non_positive_fov_uses_default() {
        let default_fov = 65.0;
        let expected = compute_frustum(default_fov, default_fov, 0.2, 200.0, 1.5);

        assert_eq!(compute_frustum(0.0, default_fov, 0.2, 200.0, 1.5), expected);
        assert_eq!(compute_frustum(-10.0, default_fov, 0.2, 200.0, 1.5), expected);
    }

    #[test]
    fn test_top_matches_scaled_half_angle() {
        let frustum = compute_frustum(90.0, 75.0, 0.1, 100.0, 1.0);

        // 90 degrees full angle gives a unit half extent
        assert_relative_eq!(frustum.top, 1.0, epsilon = EPSILON);
        assert_relative_eq!(frustum.width(), 2.0, epsilon = EPSILON);
        assert_relative_eq!(frustum.height(), 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let zero_aspect = compute_frustum(75.0, 75.0, 0.2, 100.0, 0.0);
        assert_eq!(zero_aspect.right, 0.0);

        let inverted = compute_frustum(75.0, 75.0, 10.0, 1.0, 1.0);
        assert!(inverted.far_near_ratio < 1.0);

        let zero_near = compute_frustum(75.0, 75.0, 0.0, 1.0, 1.0);
        assert!(zero_near.far_near_ratio.is_infinite());
    }
}
