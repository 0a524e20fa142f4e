//! Lighting system
//!
//! Fixed-function style diffuse lighting: an ambient term plus a Lambert
//! term per light, evaluated once per triangle.

use crate::foundation::math::Vec3;

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Directional light (like sunlight)
    Directional,
    /// Point light (like a lightbulb)
    Point,
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position (point lights)
    pub position: Vec3,
    /// Direction the light travels in (directional lights)
    pub direction: Vec3,
    /// Diffuse intensity
    pub intensity: f32,
}

impl Light {
    /// Create a directional light travelling along `direction`
    pub fn directional(direction: Vec3, intensity: f32) -> Self {
        Self {
            light_type: LightType::Directional,
            position: Vec3::zeros(),
            direction: direction.try_normalize(f32::EPSILON).unwrap_or_else(|| -Vec3::y()),
            intensity,
        }
    }

    /// Create a point light
    pub fn point(position: Vec3, intensity: f32) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            direction: Vec3::zeros(),
            intensity,
        }
    }

    /// Unit vector from `surface` towards the light, if defined
    fn direction_to_light(&self, surface: Vec3) -> Option<Vec3> {
        match self.light_type {
            LightType::Directional => Some(-self.direction),
            LightType::Point => (self.position - surface).try_normalize(f32::EPSILON),
        }
    }
}

/// Lighting environment containing multiple lights
#[derive(Debug, Clone, PartialEq)]
pub struct LightingEnvironment {
    /// List of lights in the scene
    pub lights: Vec<Light>,
    /// Ambient intensity
    pub ambient: f32,
}

impl Default for LightingEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl LightingEnvironment {
    /// Create an environment with no lights and a dim ambient term
    pub fn new() -> Self {
        Self {
            lights: Vec::new(),
            ambient: 0.1,
        }
    }

    /// Fully lit, used when nothing has been configured
    pub fn unlit() -> Self {
        Self {
            lights: Vec::new(),
            ambient: 1.0,
        }
    }

    /// Add a light to the environment
    #[must_use]
    pub fn add_light(mut self, light: Light) -> Self {
        self.lights.push(light);
        self
    }

    /// Set ambient lighting
    #[must_use]
    pub const fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    /// Brightness factor for a surface point with unit `normal`, in `[0, 1]`
    pub fn intensity(&self, position: Vec3, normal: Vec3) -> f32 {
        let diffuse: f32 = self
            .lights
            .iter()
            .filter_map(|light| {
                let to_light = light.direction_to_light(position)?;
                Some(light.intensity * normal.dot(&to_light).max(0.0))
            })
            .sum();
        (self.ambient + diffuse).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ambient_only() {
        let lighting = LightingEnvironment::new().with_ambient(0.2);
        assert_relative_eq!(lighting.intensity(Vec3::zeros(), Vec3::y()), 0.2);
    }

    #[test]
    fn test_point_light_facing_and_facing_away() {
        let lighting = LightingEnvironment::new()
            .with_ambient(0.2)
            .add_light(Light::point(Vec3::new(0.0, 0.0, 100.0), 0.5));

        assert_relative_eq!(lighting.intensity(Vec3::zeros(), Vec3::z()), 0.7);
        assert_relative_eq!(lighting.intensity(Vec3::zeros(), -Vec3::z()), 0.2);
    }

    #[test]
    fn test_directional_light_and_clamp() {
        let lighting = LightingEnvironment::new()
            .with_ambient(0.9)
            .add_light(Light::directional(Vec3::new(0.0, -2.0, 0.0), 0.5));

        assert_relative_eq!(lighting.intensity(Vec3::zeros(), Vec3::y()), 1.0);
        assert_relative_eq!(lighting.intensity(Vec3::zeros(), Vec3::x()), 0.9);
    }
}
