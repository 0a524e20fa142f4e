//! Race state machine
//!
//! A [`RaceSession`] owns everything that changes during a round: the
//! course, the car, the camera and the counters. It is advanced with the
//! engine clock, so the same inputs always produce the same round.

use std::path::Path;
use std::time::Duration;

use rand::Rng;
use road_engine::assets::AssetError;
use road_engine::foundation::math::Vec3;
use road_engine::foundation::time::Countdown;
use road_engine::render::{Color, Renderer};

use crate::assets::ModelKind;
use crate::camera::{lens_camera, spin_degrees, ChaseCamera, Lens};
use crate::car::{Car, Direction};
use crate::config::GameplayConfig;
use crate::obstacles::{scatter, ObstacleSet};
use crate::scene;

/// Height of the coin row
const COIN_HEIGHT: f32 = 5.0;
/// Probe offsets ahead of the car for cones and coins
const CONE_PROBE_AHEAD: f32 = 4.0;
const COIN_PROBE_AHEAD: f32 = 2.0;

const CONE_COLOR: Color = Color::new(255, 96, 0);
const COIN_COLOR: Color = Color::new(255, 215, 0);
const BOUNDS_COLOR: Color = Color::new(255, 0, 255);

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Enough coins collected
    Win,
    /// Reached the finish short of coins
    Lose,
}

impl Outcome {
    /// End-screen title
    pub const fn message(self) -> &'static str {
        match self {
            Self::Win => "You Won!",
            Self::Lose => "You Lose! Try to collect more coins next time.",
        }
    }
}

/// Phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the start; nothing moves
    Countdown,
    /// Driving, possibly crashed
    Running,
    /// Over
    Finished(Outcome),
}

/// One round on the course
#[derive(Debug, Clone)]
pub struct RaceSession {
    rules: GameplayConfig,
    phase: Phase,
    countdown: Option<Countdown>,
    announced: Option<u64>,
    round: Option<Countdown>,
    crash: Option<Countdown>,
    lane_index: i32,
    movement: f32,
    speed: f32,
    score: u32,
    cones: ObstacleSet,
    coins: ObstacleSet,
    car: Car,
    camera: ChaseCamera,
}

impl RaceSession {
    /// Round on a prepared course
    pub fn new(rules: &GameplayConfig, cones: ObstacleSet, coins: ObstacleSet) -> Self {
        Self {
            rules: rules.clone(),
            phase: Phase::Countdown,
            countdown: None,
            announced: None,
            round: None,
            crash: None,
            lane_index: 0,
            movement: 0.0,
            speed: 0.0,
            score: 0,
            cones,
            coins,
            car: Car::new(rules.lane_width),
            camera: ChaseCamera::race(0.0, 0.0),
        }
    }

    /// Round on a randomly laid out course using the shipped models
    pub fn generate<R: Rng + ?Sized>(
        rules: &GameplayConfig,
        model_dir: &Path,
        rng: &mut R,
    ) -> Result<Self, AssetError> {
        let cone_places = scatter(
            rng,
            rules.cone_count,
            rules.lane_limit,
            rules.lane_width,
            0.0,
            rules.finish_distance,
        );
        let coin_places = scatter(
            rng,
            rules.coin_count,
            rules.lane_limit,
            rules.lane_width,
            COIN_HEIGHT,
            rules.finish_distance,
        );

        let cones = ObstacleSet::load(ModelKind::TrafficCone, model_dir, &cone_places, false, 0.0)?
            .with_color(CONE_COLOR);
        let coins = ObstacleSet::load(ModelKind::GoldCoin, model_dir, &coin_places, true, rules.coin_spin_degrees)?
            .with_color(COIN_COLOR);
        log::info!("Course laid out with {} cones and {} coins", cones.len(), coins.len());

        Ok(Self::new(rules, cones, coins))
    }

    /// Advance the round to engine time `now`
    ///
    /// Returns the outcome once the round is over, on this and every later
    /// call.
    pub fn tick(&mut self, now: Duration) -> Option<Outcome> {
        match self.phase {
            Phase::Countdown => {
                self.tick_countdown(now);
                None
            }
            Phase::Running => self.step(now),
            Phase::Finished(outcome) => Some(outcome),
        }
    }

    fn tick_countdown(&mut self, now: Duration) {
        let duration = self.rules.countdown_duration();
        let countdown = *self.countdown.get_or_insert_with(|| Countdown::new(duration, now));

        if countdown.is_finished(now) {
            log::info!("Go!");
            self.phase = Phase::Running;
            self.round = Some(Countdown::new(self.rules.round_duration(), now));
            return;
        }

        let secs = countdown.remaining_secs(now);
        if self.announced != Some(secs) {
            log::info!("{secs}...");
            self.announced = Some(secs);
        }
    }

    fn step(&mut self, now: Duration) -> Option<Outcome> {
        if self.crash.is_some_and(|crash| crash.is_finished(now)) {
            log::info!("Back on the road");
            self.crash = None;
        }

        let lateral = self.lateral();
        let probe = self.rules.car_probe_size;

        // A cone hit while crashed is still consumed
        if self.cones.collision(Vec3::new(lateral, 0.0, -self.movement + CONE_PROBE_AHEAD), probe)
            && self.crash.is_none()
        {
            log::info!("Crashed at {:.1}!", self.movement);
            self.crash = Some(Countdown::new(self.rules.crash_duration(), now));
        }

        if self.coins.collision(Vec3::new(lateral, COIN_HEIGHT, -self.movement + COIN_PROBE_AHEAD), probe) {
            self.score += 1;
            log::info!("Coin collected! ({} total)", self.score);
        }

        if self.is_crashed() {
            self.speed = 0.0;
            return None;
        }

        if self.movement < self.rules.finish_distance {
            self.movement += self.speed;
        } else {
            let outcome = if self.score >= self.rules.coins_to_win {
                Outcome::Win
            } else {
                Outcome::Lose
            };
            log::info!("Finished with {} coins: {:?}", self.score, outcome);
            self.phase = Phase::Finished(outcome);
            return Some(outcome);
        }

        self.speed = (self.speed + self.rules.acceleration).min(self.rules.max_speed);
        None
    }

    /// Change lane if driving, not crashed and not at the edge of the road
    ///
    /// Returns whether the car moved.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Running || self.is_crashed() {
            return false;
        }

        let target = match direction {
            Direction::Left => self.lane_index - 1,
            Direction::Right => self.lane_index + 1,
        };
        if target.abs() > self.rules.lane_limit {
            return false;
        }

        self.lane_index = target;
        self.car.turn(direction);
        true
    }

    /// Toggle between the chase and first-person views
    ///
    /// Returns whether the view changed; it is fixed once the round is over.
    pub fn switch_view(&mut self) -> bool {
        if matches!(self.phase, Phase::Finished(_)) {
            return false;
        }
        self.camera.switch_view();
        true
    }

    /// Window title for the current phase
    pub fn title(&self, now: Duration) -> String {
        match self.phase {
            Phase::Countdown => {
                let secs = self
                    .countdown
                    .map_or(self.rules.countdown_seconds, |countdown| countdown.remaining_secs(now));
                format!("Driving Game - Get ready: {secs}")
            }
            Phase::Running | Phase::Finished(_) => {
                let secs = self.round.map_or_else(
                    || self.rules.round_duration().as_secs(),
                    |round| round.remaining_secs(now),
                );
                format!("Driving Game - Coins: {} - Time: {}", self.score, secs)
            }
        }
    }

    /// Eye and look-at point for this frame
    pub fn view(&self, now: Duration) -> (Vec3, Vec3) {
        self.camera.update_view(self.lateral(), self.movement, self.is_crashed(), now)
    }

    /// Spin applied to the car while crashed
    pub fn crash_spin(&self, now: Duration) -> Option<f32> {
        self.is_crashed().then(|| spin_degrees(now))
    }

    /// Draw the road, the course and the car
    pub fn render(&mut self, renderer: &mut Renderer, lens: &Lens, now: Duration, show_bounds: bool) {
        let (eye, look_at) = self.view(now);
        renderer.begin_frame(&lens_camera(eye, look_at, lens), scene::CLEAR_COLOR);
        renderer.set_lighting(scene::race_lighting());

        scene::draw_road(
            renderer,
            self.rules.lane_width,
            self.rules.lane_limit,
            self.rules.finish_distance,
        );
        self.cones.render_all(renderer);
        self.coins.render_all(renderer);
        self.car.render(renderer, self.movement, self.crash_spin(now));

        if show_bounds {
            self.cones.render_bounds(renderer, BOUNDS_COLOR);
            self.coins.render_bounds(renderer, BOUNDS_COLOR);
        }
    }

    /// Current phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Lane index in `-lane_limit..=lane_limit`
    pub const fn lane_index(&self) -> i32 {
        self.lane_index
    }

    /// Sideways position of the car
    pub fn lateral(&self) -> f32 {
        self.lane_index as f32 * self.rules.lane_width
    }

    /// Distance travelled
    pub const fn movement(&self) -> f32 {
        self.movement
    }

    /// Current speed per tick
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Coins collected
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Whether a crash is in progress
    pub const fn is_crashed(&self) -> bool {
        self.crash.is_some()
    }

    /// Remaining cones
    pub const fn cones(&self) -> &ObstacleSet {
        &self.cones
    }

    /// Remaining coins
    pub const fn coins(&self) -> &ObstacleSet {
        &self.coins
    }

    /// The player's car
    pub const fn car(&self) -> &Car {
        &self.car
    }

    /// The race camera
    pub const fn camera(&self) -> &ChaseCamera {
        &self.camera
    }
}
