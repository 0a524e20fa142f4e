//! # 3D Camera
//!
//! Look-at perspective camera. View space is right-handed and Y-up with the
//! camera looking down -Z; the projection maps view depth to NDC `[-1, 1]`.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Perspective camera
///
/// Matrices are computed on demand rather than cached; the scene only has a
/// handful of draws per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a new perspective camera with standard Y-up orientation
    ///
    /// # Example
    /// ```rust
    /// use road_engine::foundation::math::Vec3;
    /// use road_engine::render::Camera;
    ///
    /// let camera = Camera::perspective(Vec3::new(0.0, 20.0, 50.0), 45.0, 4.0 / 3.0, 0.1, 1000.0);
    /// assert_eq!(camera.target, Vec3::zeros());
    /// ```
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Point the camera at `target` using `up` as the reference up direction
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        // Only log significant changes; terminals resize one cell at a time
        if (self.aspect - aspect).abs() > 0.01 {
            log::debug!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// World-to-view transformation
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// View-to-clip perspective projection
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined world-to-clip transformation (`P × V`)
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    /// 45° camera above and behind the origin, looking at it
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.0, 3.0),
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: std::f32::consts::FRAC_PI_4,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_projects_to_screen_center() {
        let mut camera = Camera::perspective(Vec3::new(0.0, 20.0, 50.0), 45.0, 1.5, 0.1, 1000.0);
        camera.set_target(Vec3::new(0.0, 10.0, 0.0));

        let clip = camera.view_projection_matrix() * Vec4::new(0.0, 10.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_point_behind_camera_has_negative_w() {
        let camera = Camera::default();
        let behind = camera.position + (camera.position - camera.target);
        let clip = camera.view_projection_matrix() * behind.push(1.0);
        assert!(clip.w < 0.0);
    }
}
