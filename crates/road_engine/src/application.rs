//! Application trait and lifecycle management

use std::time::Duration;

use crate::engine::Engine;
use crate::input::KeyCode;
use crate::render::Renderer;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to create your game or application using the engine.
/// Every hook receives `now`, the time since the engine started.
pub trait Application {
    /// Initialize the application
    ///
    /// Called once before the first frame.
    fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        Ok(())
    }

    /// Handle application events
    ///
    /// Called for every event polled from the surface, before `update`.
    fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError>;

    /// Update the application
    ///
    /// Called every frame. Implement your game logic here.
    fn update(&mut self, engine: &mut Engine, now: Duration) -> Result<(), AppError>;

    /// Draw the frame
    fn render(&mut self, renderer: &mut Renderer, now: Duration) -> Result<(), AppError>;

    /// Window title for the current frame
    fn title(&self, now: Duration) -> String;

    /// Cleanup the application
    ///
    /// Called once when the loop exits, including after an error.
    fn cleanup(&mut self, _engine: &mut Engine) {}
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// The application's configuration cannot be used
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Application events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Surface was resized
    WindowResized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },

    /// Close requested (Ctrl-C in a terminal)
    WindowCloseRequested,

    /// Key was pressed
    KeyPressed(KeyCode),
}
