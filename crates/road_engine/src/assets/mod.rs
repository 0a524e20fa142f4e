//! Asset loading
//!
//! Meshes are loaded straight from disk; callers own the returned data.

pub mod obj_loader;

pub use obj_loader::{ObjError, ObjLoader};

use std::path::PathBuf;
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {}", .0.display())]
    NotFound(PathBuf),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed asset contents
    #[error("Parse error: {0}")]
    Parse(String),

    /// Well-formed file that does not describe a usable asset
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl From<ObjError> for AssetError {
    fn from(error: ObjError) -> Self {
        match error {
            ObjError::Io(e) => Self::Io(e),
            ObjError::ParseError(message) => Self::Parse(message),
            ObjError::InvalidFormat(message) => Self::InvalidFormat(message),
        }
    }
}
