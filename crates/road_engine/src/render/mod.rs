//! Rendering system
//!
//! Immediate-mode drawing into a software [`Framebuffer`]. Each frame the
//! application calls [`Renderer::begin_frame`] with a camera, issues mesh and
//! line draws, and the engine hands the finished framebuffer to a
//! [`window::Surface`] for presentation.

pub mod mesh;
pub mod camera;
pub mod lighting;
pub mod raster;
pub mod renderer;
pub mod window;

pub use camera::Camera;
pub use lighting::{Light, LightType, LightingEnvironment};
pub use mesh::Mesh;
pub use raster::Framebuffer;
pub use renderer::{FrameStats, Renderer};

/// 24-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a colour from 8-bit channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a colour from float channels in `[0, 1]` (clamped)
    pub fn from_rgb_f32(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: channel_from_f32(r),
            g: channel_from_f32(g),
            b: channel_from_f32(b),
        }
    }

    /// Multiply every channel by `factor` (clamped to the valid range)
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self::from_rgb_f32(
            f32::from(self.r) / 255.0 * factor,
            f32::from(self.g) / 255.0 * factor,
            f32::from(self.b) / 255.0 * factor,
        )
    }
}

fn channel_from_f32(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_f32_clamps() {
        assert_eq!(Color::from_rgb_f32(0.0, 0.5, 1.0), Color::new(0, 128, 255));
        assert_eq!(Color::from_rgb_f32(-1.0, 2.0, 1.0), Color::new(0, 255, 255));
    }

    #[test]
    fn test_scaled() {
        assert_eq!(Color::WHITE.scaled(0.5), Color::new(128, 128, 128));
        assert_eq!(Color::new(100, 0, 0).scaled(10.0), Color::new(255, 0, 0));
        assert_eq!(Color::WHITE.scaled(0.0), Color::BLACK);
    }
}
