//! Logging initialisation
//!
//! The terminal surface owns the screen, so log output goes to a file.

use std::fs::File;
use std::io;
use std::path::Path;

pub use log::{debug, error, info, trace, warn};

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info";

/// Initialize logging into a file, truncating it
pub fn init_to_file(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_FILTER))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
