//! Core engine implementation

use std::time::Duration;

use crate::{
    application::{AppEvent, Application},
    foundation::time::Timer,
    input::KeyCode,
    render::{
        window::{Surface, SurfaceError},
        Renderer,
    },
};
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the presentation surface and the renderer, and drives
/// the frame loop.
pub struct Engine {
    surface: Box<dyn Surface>,
    renderer: Renderer,

    /// Frame timing
    timer: Timer,

    /// Engine configuration
    config: EngineConfig,

    /// Frames completed by `run`
    frames: u64,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine presenting to `surface`
    pub fn new(config: EngineConfig, surface: Box<dyn Surface>) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return Err(EngineError::InitializationFailed(format!(
                "surface has no drawable area ({width}x{height})"
            )));
        }
        log::info!("Surface size {}x{} pixels", width, height);

        Ok(Self {
            surface,
            renderer: Renderer::new(width as usize, height as usize),
            timer: Timer::new(),
            config,
            frames: 0,
            running: false,
        })
    }

    /// Run the main loop until the application or the user quits
    ///
    /// `cleanup` is called on the application even when a hook fails.
    pub fn run<A: Application + ?Sized>(&mut self, app: &mut A) -> Result<(), EngineError> {
        app.initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {e}")))?;

        log::info!("Starting main loop...");
        self.running = true;
        let result = self.run_frames(app);
        self.running = false;

        app.cleanup(self);
        log::info!(
            "Engine shutdown complete after {} frames ({:.1} fps)",
            self.frames,
            self.timer.average_fps()
        );
        result
    }

    fn run_frames<A: Application + ?Sized>(&mut self, app: &mut A) -> Result<(), EngineError> {
        self.surface.set_title(&self.config.title)?;

        while self.running {
            self.timer.update();

            for event in self.surface.poll_events()? {
                self.handle_event(&event);
                app.handle_event(self, event)
                    .map_err(|e| EngineError::ApplicationError(format!("App event: {e}")))?;
            }
            if !self.running {
                break;
            }

            let now = self.now();
            app.update(self, now)
                .map_err(|e| EngineError::ApplicationError(format!("App update: {e}")))?;
            app.render(&mut self.renderer, now)
                .map_err(|e| EngineError::ApplicationError(format!("App render: {e}")))?;

            self.surface.set_title(&app.title(now))?;
            self.surface.present(self.renderer.framebuffer())?;
            self.frames += 1;

            if self.config.max_frames.is_some_and(|max| self.frames >= max) {
                log::info!("Frame limit of {} reached", self.frames);
                self.running = false;
            }

            if !self.config.simulated_clock && self.config.frame_interval_ms > 0 {
                std::thread::sleep(self.frame_interval());
            }
        }
        Ok(())
    }

    /// Engine-level handling run before the application sees an event
    fn handle_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::WindowCloseRequested | AppEvent::KeyPressed(KeyCode::Escape | KeyCode::Q) => {
                self.quit();
            }
            AppEvent::WindowResized { width, height } => {
                log::debug!("Surface resized to {}x{}", width, height);
                self.renderer.resize(*width as usize, *height as usize);
            }
            AppEvent::KeyPressed(_) => {}
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        if self.running {
            log::info!("Engine shutdown requested");
        }
        self.running = false;
    }

    /// Whether the main loop is running
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Time since the engine started
    ///
    /// With a simulated clock this is `frames × frame_interval`, independent
    /// of wall-clock time.
    pub fn now(&self) -> Duration {
        if self.config.simulated_clock {
            self.frame_interval() * u32::try_from(self.frames).unwrap_or(u32::MAX)
        } else {
            self.timer.elapsed()
        }
    }

    /// Number of frames presented so far
    pub const fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Get the renderer
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Get the engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.config.frame_interval_ms)
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Title shown before the first frame
    pub title: String,

    /// Pause between frames in milliseconds
    pub frame_interval_ms: u64,

    /// Stop after this many frames
    pub max_frames: Option<u64>,

    /// Advance time by exactly one frame interval per frame and never sleep
    pub simulated_clock: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Road Engine Application".to_string(),
            frame_interval_ms: 10,
            max_frames: None,
            simulated_clock: false,
        }
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Presentation surface error
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// Application error
    #[error("Application error: {0}")]
    ApplicationError(String),
}
