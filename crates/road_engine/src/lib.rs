//! # Road Engine
//!
//! A small immediate-mode 3D engine: nalgebra math, axis-aligned collision
//! volumes, OBJ mesh loading, a depth-buffered software rasterizer and a
//! terminal surface to present frames on.
//!
//! ## Features
//!
//! - **Software Rendering**: Flat-shaded triangles and lines with a z-buffer
//! - **Terminal Presentation**: 24-bit colour half-block output via crossterm
//! - **Collision Volumes**: Axis-aligned bounding boxes with overlap tests
//! - **Asset Loading**: Wavefront OBJ meshes
//! - **Configuration**: TOML and RON config files
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use road_engine::prelude::*;
//! use std::time::Duration;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn handle_event(&mut self, engine: &mut Engine, event: AppEvent) -> Result<(), AppError> {
//!         if matches!(event, AppEvent::KeyPressed(KeyCode::Escape)) {
//!             engine.quit();
//!         }
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, _engine: &mut Engine, _now: Duration) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, renderer: &mut Renderer, _now: Duration) -> Result<(), AppError> {
//!         renderer.begin_frame(&Camera::default(), Color::BLACK);
//!         Ok(())
//!     }
//!
//!     fn title(&self, _now: Duration) -> String {
//!         "My App".to_string()
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let surface = TerminalSurface::new()?;
//!     let mut engine = Engine::new(EngineConfig::default(), Box::new(surface))?;
//!     engine.run(&mut MyApp)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod assets;
pub mod render;
pub mod input;
pub mod physics;
pub mod config;

mod application;
mod engine;

pub use application::{Application, AppError, AppEvent};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError, AppEvent,
        Engine, EngineConfig, EngineError,
        foundation::{
            math::{Vec3, Mat4, Mat4Ext, Transform, Rotation, Axis},
            time::{Timer, Countdown},
        },
        physics::collision::Aabb,
        assets::{AssetError, ObjLoader},
        render::{
            Renderer, Camera, Mesh, Color, Framebuffer,
            lighting::{Light, LightingEnvironment},
            window::{Surface, SurfaceError, TerminalSurface, HeadlessSurface},
        },
        input::KeyCode,
        config::{Config, ConfigError},
    };
}
