//! End screen
//!
//! Shows the outcome over a coloured ground plane with the car bouncing in
//! the middle. The arrow keys orbit and zoom the camera.

use std::time::Duration;

use road_engine::foundation::math::Vec3;
use road_engine::input::KeyCode;
use road_engine::render::Renderer;

use crate::camera::{lens_camera, ChaseCamera, Lens};
use crate::car::Car;
use crate::scene;
use crate::session::Outcome;

/// Orbit change per key press in degrees
const ORBIT_STEP: f32 = 1.0;
/// Zoom change per key press
const ZOOM_STEP: f32 = 1.0;

/// State of the end screen
#[derive(Debug, Clone)]
pub struct FinishScreen {
    outcome: Outcome,
    camera: ChaseCamera,
    horizontal: f32,
    zoom: f32,
    car: Car,
    started_at: Duration,
}

impl FinishScreen {
    /// End screen shown from engine time `started_at`
    pub fn new(outcome: Outcome, lane_width: f32, started_at: Duration) -> Self {
        Self {
            outcome,
            camera: ChaseCamera::end_screen(),
            horizontal: 0.0,
            zoom: 0.0,
            car: Car::new(lane_width),
            started_at,
        }
    }

    /// Apply an orbit or zoom key; returns whether the key was used
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Left => self.horizontal -= ORBIT_STEP,
            KeyCode::Right => self.horizontal += ORBIT_STEP,
            KeyCode::Up => self.zoom += ZOOM_STEP,
            KeyCode::Down => self.zoom -= ZOOM_STEP,
            _ => return false,
        }
        true
    }

    /// Current orbiting eye position
    pub fn eye(&self) -> Vec3 {
        self.camera.rotate(self.horizontal, self.zoom)
    }

    /// Orbit angle in degrees
    pub const fn horizontal(&self) -> f32 {
        self.horizontal
    }

    /// Distance moved towards the car
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// How the round ended
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Draw the ground and the bouncing car
    pub fn render(&self, renderer: &mut Renderer, lens: &Lens, now: Duration) {
        let camera = lens_camera(self.eye(), self.camera.look_at(), lens);
        renderer.begin_frame(&camera, scene::CLEAR_COLOR);
        renderer.set_lighting(scene::end_lighting());

        scene::draw_ground(renderer, self.outcome);
        self.car
            .render_bouncing(renderer, now.saturating_sub(self.started_at), self.outcome);
    }

    /// Window title
    pub fn title(&self) -> String {
        self.outcome.message().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arrow_keys_orbit_and_zoom() {
        let mut screen = FinishScreen::new(Outcome::Win, 10.0, Duration::ZERO);
        assert!(screen.handle_key(KeyCode::Right));
        assert!(screen.handle_key(KeyCode::Right));
        assert!(screen.handle_key(KeyCode::Left));
        assert!(screen.handle_key(KeyCode::Up));
        assert!(!screen.handle_key(KeyCode::Space));

        assert_relative_eq!(screen.horizontal(), 1.0);
        assert_relative_eq!(screen.zoom(), 1.0);
    }

    #[test]
    fn test_eye_starts_at_end_screen_preset() {
        let screen = FinishScreen::new(Outcome::Lose, 10.0, Duration::ZERO);
        assert_relative_eq!(screen.eye(), Vec3::new(0.0, 40.0, -50.0), epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_moves_eye_closer() {
        let mut screen = FinishScreen::new(Outcome::Lose, 10.0, Duration::ZERO);
        let target = Vec3::new(0.0, 15.0, 0.0);
        let before = (screen.eye() - target).norm();
        screen.handle_key(KeyCode::Up);
        let after = (screen.eye() - target).norm();
        assert_relative_eq!(before - after, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_title_is_outcome_message() {
        let screen = FinishScreen::new(Outcome::Win, 10.0, Duration::ZERO);
        assert_eq!(screen.title(), "You Won!");
    }

    #[test]
    fn test_render_draws_ground_and_car() {
        let screen = FinishScreen::new(Outcome::Win, 10.0, Duration::ZERO);
        let mut renderer = Renderer::new(32, 24);
        screen.render(&mut renderer, &Lens::default(), Duration::from_millis(500));
        assert!(renderer.stats().triangles_drawn > 2);
    }
}
