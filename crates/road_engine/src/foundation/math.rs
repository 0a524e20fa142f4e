//! Math utilities and types
//!
//! Provides the vector/matrix aliases used by the engine, the
//! scale → rotate → translate [`Transform`] applied to mesh vertices, and the
//! projection helpers consumed by the rasterizer.

pub use nalgebra::{Matrix3, Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (homogeneous clip-space coordinates)
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Coordinate axis used to describe rotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// X axis (right)
    X,
    /// Y axis (up)
    Y,
    /// Z axis (towards the viewer)
    Z,
}

/// Rotation expressed as an angle in degrees about a coordinate axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Rotation angle in degrees (counter-clockwise, right-handed)
    pub angle_degrees: f32,
    /// Axis to rotate about
    pub axis: Axis,
}

impl Rotation {
    /// No rotation
    pub const NONE: Self = Self { angle_degrees: 0.0, axis: Axis::Y };

    /// Rotation about the Y axis
    pub const fn about_y(angle_degrees: f32) -> Self {
        Self { angle_degrees, axis: Axis::Y }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::NONE
    }
}

/// Transform applied to mesh vertices: scale, then rotate about Y, then translate
///
/// Only rotations about the Y axis take effect. A rotation about X or Z is
/// accepted and ignored, matching how obstacle and car placements are
/// authored (everything turns on the road plane).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation applied last
    pub translation: Vec3,

    /// Rotation applied after scaling
    pub rotation: Rotation,

    /// Component-wise scale factors applied first
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            rotation: Rotation::NONE,
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Replace the rotation
    #[must_use]
    pub const fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replace the scale
    #[must_use]
    pub const fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Apply this transform to a point: `R_y(θ) · (p ⊙ scale) + translation`
    pub fn apply_to_point(&self, point: Vec3) -> Vec3 {
        let scaled = point.component_mul(&self.scale);
        let rotated = match self.rotation.axis {
            Axis::Y => rotation_matrix(Axis::Y, self.rotation.angle_degrees) * scaled,
            Axis::X | Axis::Z => scaled,
        };
        rotated + self.translation
    }

    /// Convert to the equivalent model matrix (T · R · S)
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = match self.rotation.axis {
            Axis::Y => Mat4::rotation_y(utils::deg_to_rad(self.rotation.angle_degrees)),
            Axis::X | Axis::Z => Mat4::identity(),
        };
        Mat4::new_translation(&self.translation)
            * rotation
            * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// Right-handed 3x3 rotation matrix about a coordinate axis
#[rustfmt::skip]
pub fn rotation_matrix(axis: Axis, angle_degrees: f32) -> Mat3 {
    let (sin, cos) = utils::deg_to_rad(angle_degrees).sin_cos();
    match axis {
        Axis::X => Mat3::new(
            1.0, 0.0, 0.0,
            0.0, cos, -sin,
            0.0, sin, cos,
        ),
        Axis::Y => Mat3::new(
            cos, 0.0, sin,
            0.0, 1.0, 0.0,
            -sin, 0.0, cos,
        ),
        Axis::Z => Mat3::new(
            cos, -sin, 0.0,
            sin, cos, 0.0,
            0.0, 0.0, 1.0,
        ),
    }
}

/// Rotate a vector about a coordinate axis by an angle in degrees
pub fn rotate_vector(vector: Vec3, angle_degrees: f32, axis: Axis) -> Vec3 {
    rotation_matrix(axis, angle_degrees) * vector
}

/// Math utility functions
pub mod utils {
    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees.to_radians()
    }

    /// Wrap an angle in degrees into `[0, 360)`
    pub fn wrap_degrees(degrees: f32) -> f32 {
        degrees.rem_euclid(360.0)
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis (radians)
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis (radians)
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis (radians)
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a perspective projection matrix mapping view depth to NDC `[-1, 1]`
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [f/a  0    0            0          ]
        //     [0    f    0            0          ]
        //     [0    0    (f+n)/(n-f)  2fn/(n-f)  ]
        //     [0    0   -1            0          ]
        let focal = 1.0 / (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = focal / aspect;
        result[(1, 1)] = focal;
        result[(2, 2)] = (far + near) / (near - far);
        result[(2, 3)] = (2.0 * far * near) / (near - far);
        result[(3, 2)] = -1.0;
        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let right = forward.cross(&up).normalize();
        let camera_up = right.cross(&forward);

        #[rustfmt::skip]
        let translation = Mat4::new(
            1.0, 0.0, 0.0, -eye.x,
            0.0, 1.0, 0.0, -eye.y,
            0.0, 0.0, 1.0, -eye.z,
            0.0, 0.0, 0.0, 1.0,
        );

        #[rustfmt::skip]
        let rotation = Mat4::new(
            right.x, right.y, right.z, 0.0,
            camera_up.x, camera_up.y, camera_up.z, 0.0,
            -forward.x, -forward.y, -forward.z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );

        rotation * translation
    }
}
