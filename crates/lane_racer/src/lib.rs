//! # Lane Racer
//!
//! A five-lane arcade driving game on top of `road_engine`: dodge the
//! traffic cones, collect the spinning coins and reach the finish line with
//! enough of them to win.

pub mod assets;
pub mod camera;
pub mod car;
pub mod config;
pub mod finish;
pub mod game;
pub mod obstacles;
pub mod scene;
pub mod session;

pub use config::GameConfig;
pub use game::LaneRacer;
pub use session::{Outcome, Phase, RaceSession};

use std::io;

use road_engine::assets::AssetError;
use road_engine::config::ConfigError;
use road_engine::render::window::SurfaceError;
use road_engine::EngineError;
use thiserror::Error;

/// Errors raised while setting up or running the game
#[derive(Error, Debug)]
pub enum GameError {
    /// A model could not be loaded
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The configuration file could not be read
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The engine failed to start or stopped with an error
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// The terminal could not be prepared
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// The log file could not be created
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
