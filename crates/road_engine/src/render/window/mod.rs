//! Presentation surfaces
//!
//! A [`Surface`] is where finished frames go and where input comes from.
//! [`TerminalSurface`] draws to the terminal; [`HeadlessSurface`] keeps
//! everything in memory and replays scripted input for tests and smoke runs.

mod headless;
mod terminal;

pub use headless::{HeadlessRecord, HeadlessSurface};
pub use terminal::TerminalSurface;

use crate::application::AppEvent;
use crate::render::Framebuffer;
use thiserror::Error;

/// Presentation target and event source
pub trait Surface {
    /// Drawable size in pixels
    fn size(&self) -> (u32, u32);

    /// Update the title shown for this surface
    fn set_title(&mut self, title: &str) -> Result<(), SurfaceError>;

    /// Collect pending events without blocking
    fn poll_events(&mut self) -> Result<Vec<AppEvent>, SurfaceError>;

    /// Show a finished frame
    fn present(&mut self, framebuffer: &Framebuffer) -> Result<(), SurfaceError>;
}

/// Surface errors
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// IO error talking to the terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal cannot be used for drawing
    #[error("Terminal unavailable: {0}")]
    Unavailable(String),
}
