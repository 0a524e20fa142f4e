//! Game configuration
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Load with [`Config::load_from_file`](road_engine::config::Config)
//! from a `.toml` or `.ron` file.

use std::path::PathBuf;
use std::time::Duration;

use road_engine::config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

use crate::camera::Lens;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    /// Gameplay settings
    pub gameplay: GameplayConfig,

    /// Rendering settings
    pub render: RenderConfig,

    /// Asset locations
    pub assets: AssetConfig,
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.gameplay.validate()
    }
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Distance between neighbouring lanes
    pub lane_width: f32,

    /// Lanes on each side of the centre lane
    pub lane_limit: i32,

    /// Coins needed to win
    pub coins_to_win: u32,

    /// Top speed in distance per frame
    pub max_speed: f32,

    /// Speed gained per frame
    pub acceleration: f32,

    /// Distance to the finish line
    pub finish_distance: f32,

    /// Round clock shown in the title (seconds)
    pub round_seconds: f32,

    /// How long a crash freezes the car (seconds)
    pub crash_seconds: f32,

    /// Pre-race countdown (whole seconds)
    pub countdown_seconds: u64,

    /// Traffic cones on the course
    pub cone_count: usize,

    /// Coins on the course
    pub coin_count: usize,

    /// Coin rotation per frame in degrees
    pub coin_spin_degrees: f32,

    /// Edge length of the cubic probe used for car collisions
    pub car_probe_size: f32,

    /// Seed for obstacle placement; random when unset
    pub seed: Option<u64>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            lane_width: 10.0,
            lane_limit: 2,
            coins_to_win: 5,
            max_speed: 2.0,
            acceleration: 0.03,
            finish_distance: 600.0,
            round_seconds: 30.0,
            crash_seconds: 1.0,
            countdown_seconds: 3,
            cone_count: 10,
            coin_count: 10,
            coin_spin_degrees: 2.0,
            car_probe_size: 5.0,
            seed: None,
        }
    }
}

impl GameplayConfig {
    /// Check that every timer fits in a [`Duration`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, seconds) in [("crash_seconds", self.crash_seconds), ("round_seconds", self.round_seconds)] {
            if !seconds.is_finite() || seconds < 0.0 || Duration::try_from_secs_f32(seconds).is_err() {
                return Err(ConfigError::Invalid(format!("{name} = {seconds}")));
            }
        }
        Ok(())
    }

    /// Crash window as a duration
    ///
    /// Negative values give zero, values too large for a `Duration` give
    /// [`Duration::MAX`].
    pub fn crash_duration(&self) -> Duration {
        seconds_to_duration(self.crash_seconds)
    }

    /// Round clock as a duration, saturating like [`Self::crash_duration`]
    pub fn round_duration(&self) -> Duration {
        seconds_to_duration(self.round_seconds)
    }

    /// Countdown as a duration
    pub const fn countdown_duration(&self) -> Duration {
        Duration::from_secs(self.countdown_seconds)
    }
}

fn seconds_to_duration(seconds: f32) -> Duration {
    Duration::try_from_secs_f32(seconds.max(0.0)).unwrap_or(Duration::MAX)
}

/// Rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Near clipping distance
    pub near: f32,

    /// Far clipping distance
    pub far: f32,

    /// Pause between frames in milliseconds
    pub frame_interval_ms: u64,

    /// Draw obstacle bounding boxes as wireframes
    pub show_bounds: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            frame_interval_ms: 10,
            show_bounds: false,
        }
    }
}

impl RenderConfig {
    /// Projection parameters for scene cameras
    pub const fn lens(&self) -> Lens {
        Lens {
            fov_degrees: self.fov_degrees,
            near: self.near,
            far: self.far,
        }
    }
}

/// Asset configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the OBJ models
    pub model_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model_dir: crate::assets::default_model_dir(),
        }
    }
}
