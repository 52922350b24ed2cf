//! Camera model and screen-space projection.
//!
//! The render backend owns the live camera; this module provides the
//! parameters the engine hands it on a view reset, and the
//! [`CameraTransform`] snapshot the picker projects points through.

use glam::{Mat4, Vec2, Vec3};

/// Orbit distance of the reset view.
pub const RESET_DISTANCE: f32 = 35.0;
/// Elevation of the reset view, degrees above the xy plane.
pub const RESET_ELEVATION: f32 = 30.0;
/// Azimuth of the reset view, degrees around the z axis.
pub const RESET_AZIMUTH: f32 = 45.0;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Camera {
    /// The reset view: distance 35, elevation 30°, azimuth 45°, centered
    /// on the origin.
    fn default() -> Self {
        Self::orbit(
            Vec3::ZERO,
            RESET_DISTANCE,
            RESET_ELEVATION,
            RESET_AZIMUTH,
        )
    }
}

impl Camera {
    /// Camera orbiting `center` at `distance`, with `elevation` degrees
    /// above the xy plane and `azimuth` degrees around the z axis.
    /// The scene's up direction is +z.
    #[must_use]
    pub fn orbit(
        center: Vec3,
        distance: f32,
        elevation: f32,
        azimuth: f32,
    ) -> Self {
        let elev = elevation.to_radians();
        let azim = azimuth.to_radians();
        let offset = Vec3::new(
            distance * elev.cos() * azim.cos(),
            distance * elev.cos() * azim.sin(),
            distance * elev.sin(),
        );
        Self {
            eye: center + offset,
            target: center,
            up: Vec3::Z,
            aspect: 1.0,
            fovy: 60.0,
            znear: 0.1,
            zfar: 1000.0,
        }
    }

    /// Camera recentered on a new target, keeping the current offset.
    #[must_use]
    pub fn centered_on(&self, center: Vec3) -> Self {
        let offset = self.eye - self.target;
        Self {
            eye: center + offset,
            target: center,
            ..self.clone()
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Snapshot this camera into a pickable transform for the given
    /// viewport size in pixels.
    #[must_use]
    pub fn transform(&self, width: f32, height: f32) -> CameraTransform {
        let mut camera = self.clone();
        if height > 0.0 {
            camera.aspect = width / height;
        }
        CameraTransform {
            view_proj: camera.build_matrix(),
            viewport: Vec2::new(width, height),
        }
    }
}

/// Combined view-projection transform plus viewport pixel dimensions.
///
/// Owned and supplied by the render backend; the picker consumes one
/// snapshot per pick operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    /// Combined view-projection matrix.
    pub view_proj: Mat4,
    /// Viewport size in pixels (width, height).
    pub viewport: Vec2,
}

impl CameraTransform {
    /// Project a world-space point to screen pixels.
    ///
    /// Device y grows downward while NDC y grows upward, so the y axis
    /// is flipped. A homogeneous `w` of exactly zero is substituted with
    /// 1 instead of dividing by it.
    #[must_use]
    pub fn project(&self, point: Vec3) -> Vec2 {
        let clip = self.view_proj * point.extend(1.0);
        let w = if clip.w == 0.0 { 1.0 } else { clip.w };
        let ndc_x = clip.x / w;
        let ndc_y = clip.y / w;
        Vec2::new(
            (ndc_x + 1.0) * self.viewport.x / 2.0,
            (1.0 - ndc_y) * self.viewport.y / 2.0,
        )
    }
}
