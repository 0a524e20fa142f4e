//! Chase camera
//!
//! Keeps a base eye/look-at pair for the current view mode and derives the
//! per-frame view from the car's lane and distance travelled. The engine
//! [`Camera`] used for projection is built from that view with
//! [`lens_camera`].

use std::time::Duration;

use road_engine::foundation::math::{rotate_vector, utils, Axis, Vec3};
use road_engine::render::Camera;

/// Camera placement mode during the race
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Behind and above the car
    Front,
    /// From the driver's seat
    FirstPerson,
}

impl ViewMode {
    /// The other mode
    pub const fn next(self) -> Self {
        match self {
            Self::Front => Self::FirstPerson,
            Self::FirstPerson => Self::Front,
        }
    }

    /// Base eye position and look-at point for this mode
    pub fn preset(self) -> (Vec3, Vec3) {
        match self {
            Self::Front => (Vec3::new(0.0, 20.0, 50.0), Vec3::new(0.0, 10.0, 0.0)),
            Self::FirstPerson => (Vec3::new(0.0, 10.0, 0.0), Vec3::new(0.0, 10.0, -45.0)),
        }
    }
}

/// Projection parameters shared by every scene camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lens {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
}

impl Default for Lens {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Race and end-screen camera
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseCamera {
    mode: ViewMode,
    eye: Vec3,
    look_at: Vec3,
    up: Vec3,
}

impl ChaseCamera {
    /// Camera for the start of a race
    pub fn race(lane: f32, movement: f32) -> Self {
        Self {
            mode: ViewMode::Front,
            eye: Vec3::new(lane, 20.0, 50.0),
            look_at: Vec3::new(lane, 10.0, movement),
            up: Vec3::y(),
        }
    }

    /// Orbit camera for the end screen
    pub fn end_screen() -> Self {
        Self {
            mode: ViewMode::Front,
            eye: Vec3::new(0.0, 40.0, -50.0),
            look_at: Vec3::new(0.0, 15.0, 0.0),
            up: Vec3::y(),
        }
    }

    /// Current view mode
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Base eye position
    pub const fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Base look-at point
    pub const fn look_at(&self) -> Vec3 {
        self.look_at
    }

    /// Up vector
    pub const fn up(&self) -> Vec3 {
        self.up
    }

    /// View for the car at `lane` after travelling `movement`
    ///
    /// While crashed in first person the gaze spins about Y by one degree
    /// per three milliseconds of `elapsed`. Returns `(eye, look_at)`.
    pub fn update_view(&self, lane: f32, movement: f32, crashed: bool, elapsed: Duration) -> (Vec3, Vec3) {
        let mut look_at = self.look_at;
        if crashed && self.mode == ViewMode::FirstPerson {
            let gaze = rotate_vector(self.look_at - self.eye, spin_degrees(elapsed), Axis::Y);
            look_at = self.eye + gaze;
        }

        let offset = Vec3::new(lane, 0.0, -movement);
        (self.eye + offset, look_at + offset)
    }

    /// Orbit around the look-at point and dolly along the gaze
    ///
    /// The gaze is rotated about Y by `horizontal_degrees`, the eye placed at
    /// `look_at - gaze`, then moved `zoom` units towards the look-at point.
    /// A camera whose eye sits on its look-at point returns the eye unchanged.
    pub fn rotate(&self, horizontal_degrees: f32, zoom: f32) -> Vec3 {
        let gaze = rotate_vector(self.look_at - self.eye, horizontal_degrees, Axis::Y);
        let Some(direction) = gaze.try_normalize(f32::EPSILON) else {
            return self.eye;
        };
        self.look_at - gaze + direction * zoom
    }

    /// Cycle to the next view mode and cut to its preset
    pub fn switch_view(&mut self) {
        self.mode = self.mode.next();
        let (eye, look_at) = self.mode.preset();
        self.eye = eye;
        self.look_at = look_at;
        self.up = Vec3::y();
        log::debug!("Switched to {:?} view", self.mode);
    }
}

/// Crash spin angle for an engine time
pub fn spin_degrees(elapsed: Duration) -> f32 {
    utils::wrap_degrees((elapsed.as_millis() / 3 % 360) as f32)
}

/// Engine camera looking from `eye` at `look_at` through `lens`
pub fn lens_camera(eye: Vec3, look_at: Vec3, lens: &Lens) -> Camera {
    let mut camera = Camera::perspective(eye, lens.fov_degrees, 1.0, lens.near, lens.far);
    camera.look_at(look_at, Vec3::y());
    camera
}
