//! Static scenery and light rigs

use road_engine::foundation::math::{Mat4, Vec3};
use road_engine::physics::collision::Aabb;
use road_engine::render::{Color, Light, LightingEnvironment, Mesh, Renderer};

use crate::session::Outcome;

/// Sky colour behind everything
pub const CLEAR_COLOR: Color = Color::new(0, 0, 77);

const ROAD_LINE_COLOR: Color = Color::new(179, 179, 179);
const ROAD_NEAR_Z: f32 = 50.0;
const GROUND_HEIGHT: f32 = -12.6;
const GROUND_HALF_EXTENT: f32 = 500.0;

/// Lane divider lines from just behind the start to the finish
///
/// Dividers sit half a lane either side of every lane centre.
pub fn draw_road(renderer: &mut Renderer, lane_width: f32, lane_limit: i32, finish_distance: f32) {
    let half = lane_width * 0.5;
    for lane in -lane_limit..=lane_limit + 1 {
        let x = lane as f32 * lane_width - half;
        renderer.draw_line(
            Vec3::new(x, 0.0, ROAD_NEAR_Z),
            Vec3::new(x, 0.0, -finish_distance),
            ROAD_LINE_COLOR,
        );
    }
}

/// Ground plane under the end screen, green for a win and red for a loss
pub fn draw_ground(renderer: &mut Renderer, outcome: Outcome) {
    let color = match outcome {
        Outcome::Win => Color::new(0, 255, 0),
        Outcome::Lose => Color::new(255, 0, 0),
    };
    let model = Mat4::new_translation(&Vec3::new(0.0, GROUND_HEIGHT, 0.0));
    renderer.draw_mesh(&Mesh::quad(GROUND_HALF_EXTENT), &model, color);
}

/// Ambient plus a point light ahead of the start line
pub fn race_lighting() -> LightingEnvironment {
    LightingEnvironment::new()
        .with_ambient(0.2)
        .add_light(Light::point(Vec3::new(0.0, 0.0, 100.0), 0.5))
}

/// Sun from above and behind plus two side lamps
pub fn end_lighting() -> LightingEnvironment {
    LightingEnvironment::new()
        .with_ambient(0.3)
        .add_light(Light::directional(-Vec3::new(0.0, 200.0, 100.0), 0.5))
        .add_light(Light::point(Vec3::new(-100.0, 100.0, 100.0), 0.5))
        .add_light(Light::point(Vec3::new(100.0, 100.0, 100.0), 0.5))
}

/// Twelve-edge wireframe of a bounding box
pub fn draw_box_outline(renderer: &mut Renderer, bounds: &Aabb, color: Color) {
    let corner = |i: usize| {
        Vec3::new(
            if i & 1 == 0 { bounds.min.x } else { bounds.max.x },
            if i & 2 == 0 { bounds.min.y } else { bounds.max.y },
            if i & 4 == 0 { bounds.min.z } else { bounds.max.z },
        )
    };
    for i in 0..8 {
        for bit in [1, 2, 4] {
            if i & bit == 0 {
                renderer.draw_line(corner(i), corner(i | bit), color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use road_engine::render::Camera;

    fn road_camera() -> Camera {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 20.0, 50.0));
        camera.set_target(Vec3::new(0.0, 10.0, 0.0));
        camera
    }

    #[test]
    fn test_road_has_a_divider_either_side_of_each_lane() {
        let mut renderer = Renderer::new(64, 48);
        renderer.begin_frame(&road_camera(), CLEAR_COLOR);
        draw_road(&mut renderer, 10.0, 2, 600.0);
        assert_eq!(renderer.stats().lines_drawn, 6);
    }

    #[test]
    fn test_box_outline_has_twelve_edges() {
        let mut renderer = Renderer::new(64, 48);
        renderer.begin_frame(&road_camera(), CLEAR_COLOR);
        let bounds = Aabb::from_uniform_extent(Vec3::new(0.0, 5.0, -20.0), 5.0);
        draw_box_outline(&mut renderer, &bounds, Color::WHITE);
        assert_eq!(renderer.stats().lines_drawn, 12);
    }

    #[test]
    fn test_ground_colour_follows_outcome() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 40.0, -50.0));
        camera.set_target(Vec3::new(0.0, 15.0, 0.0));

        let mut renderer = Renderer::new(16, 16);
        renderer.begin_frame(&camera, CLEAR_COLOR);
        draw_ground(&mut renderer, Outcome::Lose);
        let bottom = renderer.framebuffer().pixel(8, 15).unwrap();
        assert!(bottom.r > 0 && bottom.g == 0);

        renderer.begin_frame(&camera, CLEAR_COLOR);
        draw_ground(&mut renderer, Outcome::Win);
        let bottom = renderer.framebuffer().pixel(8, 15).unwrap();
        assert!(bottom.g > 0 && bottom.r == 0);
    }

    #[test]
    fn test_race_light_brightens_faces_towards_it() {
        let lighting = race_lighting();
        let facing = lighting.intensity(Vec3::zeros(), Vec3::z());
        let away = lighting.intensity(Vec3::zeros(), -Vec3::z());
        assert_relative_eq!(facing, 0.7, epsilon = 1e-6);
        assert_relative_eq!(away, 0.2, epsilon = 1e-6);
    }
}
