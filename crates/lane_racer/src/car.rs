//! The player's car
//!
//! Built from primitives each frame: a box body, a sphere on top and four
//! torus wheels with disk hub caps. The rear wheels turn with the steering
//! angle and every wheel rolls with the distance travelled.

use std::time::Duration;

use road_engine::foundation::math::{utils, Mat4, Mat4Ext, Vec3};
use road_engine::render::{Color, Mesh, Renderer};

use crate::session::Outcome;

const BODY_SIZE: [f32; 3] = [7.0, 5.0, 10.0];
const STEER_STEP: f32 = 30.0;
const WHEEL_OFFSET: [f32; 3] = [4.0, -3.5, 5.0];
const WHEEL_RADIUS: f32 = 2.0;

const BODY_COLOR: Color = Color::new(0, 0, 255);
const DOME_COLOR: Color = Color::new(0, 255, 0);
const TIRE_COLOR: Color = Color::new(255, 255, 0);
const CAP_COLOR: Color = Color::new(255, 128, 0);

/// Steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards negative X
    Left,
    /// Towards positive X
    Right,
}

/// Meshes the car is assembled from
#[derive(Debug, Clone)]
struct CarModel {
    body: Mesh,
    dome: Mesh,
    tire: Mesh,
    cap: Mesh,
}

impl CarModel {
    fn new() -> Self {
        Self {
            body: Mesh::cube(),
            dome: Mesh::uv_sphere(3.0, 16, 10),
            tire: Mesh::torus(WHEEL_RADIUS - 1.0, WHEEL_RADIUS, 10, 16),
            cap: Mesh::disk(WHEEL_RADIUS, 12),
        }
    }
}

/// Player car
#[derive(Debug, Clone)]
pub struct Car {
    lane: f32,
    steer: f32,
    lane_width: f32,
    model: CarModel,
}

impl Car {
    /// Car in the centre lane, wheels straight
    pub fn new(lane_width: f32) -> Self {
        Self {
            lane: 0.0,
            steer: 0.0,
            lane_width,
            model: CarModel::new(),
        }
    }

    /// Lateral offset of the car
    pub const fn lane(&self) -> f32 {
        self.lane
    }

    /// Accumulated steering angle in degrees
    pub const fn steer(&self) -> f32 {
        self.steer
    }

    /// Change lane by one lane width; no bounds are enforced here
    pub fn turn(&mut self, direction: Direction) {
        match direction {
            Direction::Left => {
                self.steer += STEER_STEP;
                self.lane -= self.lane_width;
            }
            Direction::Right => {
                self.steer -= STEER_STEP;
                self.lane += self.lane_width;
            }
        }
    }

    /// Draw the car on the road after travelling `movement`
    ///
    /// `crash_spin` turns the whole car about Y by that many degrees.
    pub fn render(&self, renderer: &mut Renderer, movement: f32, crash_spin: Option<f32>) {
        let mut base = Mat4::new_translation(&Vec3::new(self.lane, 0.0, -movement));
        if let Some(degrees) = crash_spin {
            base *= Mat4::rotation_y(utils::deg_to_rad(degrees));
        }

        renderer.draw_mesh(&self.model.dome, &(base * Mat4::new_translation(&Vec3::new(0.0, 2.0, 0.0))), DOME_COLOR);
        renderer.draw_mesh(&self.model.body, &(base * body_scale()), BODY_COLOR);
        self.render_wheels(renderer, &base, movement);
    }

    /// End-screen animation: the body bounces and squashes, the dome hops
    ///
    /// Bounces twice as high after a win.
    pub fn render_bouncing(&self, renderer: &mut Renderer, elapsed: Duration, outcome: Outcome) {
        let mut bounce = elapsed.as_secs_f32().sin() * 2.0;
        if outcome == Outcome::Win {
            bounce *= 2.0;
        }
        let height = bounce.abs() * 4.0;
        let squash = bounce.abs() * 0.1;

        let dome = Mat4::new_translation(&Vec3::new(0.0, height + 2.0, 0.0));
        renderer.draw_mesh(&self.model.dome, &dome, DOME_COLOR);

        let body = Mat4::new_nonuniform_scaling(&Vec3::new(1.0, squash + 1.0, 1.0))
            * Mat4::new_translation(&Vec3::new(0.0, bounce.abs(), 0.0))
            * Mat4::rotation_z(utils::deg_to_rad(bounce))
            * body_scale();
        renderer.draw_mesh(&self.model.body, &body, BODY_COLOR);

        self.render_wheels(renderer, &Mat4::identity(), 0.0);
    }

    fn render_wheels(&self, renderer: &mut Renderer, base: &Mat4, roll: f32) {
        let [x, y, z] = WHEEL_OFFSET;
        let wheels = [(x, z, 0.0), (-x, z, 0.0), (x, -z, self.steer), (-x, -z, self.steer)];

        for (wx, wz, steer) in wheels {
            // Torus axis (Z) turned onto the axle (X), then rolled about it
            let wheel = base
                * Mat4::new_translation(&Vec3::new(wx, y, wz))
                * Mat4::rotation_y(utils::deg_to_rad(steer + 90.0))
                * Mat4::rotation_z(utils::deg_to_rad(roll))
                * Mat4::new_nonuniform_scaling(&Vec3::new(1.0, 0.8, 1.2));
            renderer.draw_mesh(&self.model.tire, &wheel, TIRE_COLOR);

            let cap_side = if wx < 0.0 { -1.0 } else { 1.0 };
            let cap = wheel * Mat4::new_translation(&Vec3::new(0.0, 0.0, cap_side));
            renderer.draw_mesh(&self.model.cap, &cap, CAP_COLOR);
        }
    }
}

fn body_scale() -> Mat4 {
    Mat4::new_nonuniform_scaling(&Vec3::from(BODY_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use road_engine::render::Camera;

    #[test]
    fn test_turn_moves_one_lane_and_steers() {
        let mut car = Car::new(10.0);
        car.turn(Direction::Left);
        assert_eq!(car.lane(), -10.0);
        assert_eq!(car.steer(), 30.0);

        car.turn(Direction::Right);
        car.turn(Direction::Right);
        assert_eq!(car.lane(), 10.0);
        assert_eq!(car.steer(), -30.0);
    }

    #[test]
    fn test_turn_is_unbounded() {
        let mut car = Car::new(10.0);
        for _ in 0..5 {
            car.turn(Direction::Right);
        }
        assert_eq!(car.lane(), 50.0);
    }

    #[test]
    fn test_render_draws_body_and_wheels() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 20.0, 50.0));
        camera.set_target(Vec3::new(0.0, 10.0, 0.0));

        let mut renderer = Renderer::new(48, 32);
        renderer.begin_frame(&camera, Color::BLACK);
        Car::new(10.0).render(&mut renderer, 0.0, None);

        let stats = renderer.stats();
        assert!(stats.triangles_drawn > 0);
        let blue = renderer.framebuffer().pixels().iter().filter(|c| c.b > 0 && c.r == 0 && c.g == 0).count();
        assert!(blue > 0, "body not visible");
    }

    #[test]
    fn test_bouncing_at_rest_matches_win_and_loss() {
        let mut camera = Camera::default();
        camera.set_position(Vec3::new(0.0, 40.0, -50.0));
        camera.set_target(Vec3::new(0.0, 15.0, 0.0));
        let car = Car::new(10.0);

        let mut frames = Vec::new();
        for outcome in [Outcome::Win, Outcome::Lose] {
            let mut renderer = Renderer::new(32, 32);
            renderer.begin_frame(&camera, Color::BLACK);
            car.render_bouncing(&mut renderer, Duration::ZERO, outcome);
            frames.push(renderer.framebuffer().pixels().to_vec());
        }
        assert_eq!(frames[0], frames[1]);
    }
}
