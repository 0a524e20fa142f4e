//! Configuration system
//!
//! Config types implement [`Config`] to get file loading and saving for free.
//! The format is picked from the file extension: `.toml` or `.ron`.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    ///
    /// The parsed value is checked with [`Config::validate`] before it is
    /// returned.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file, or the defaults when no path is given
    fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Supported file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value parsed but is out of range
    #[error("Invalid value: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct WindowSettings {
        title: String,
        frame_interval_ms: u64,
        vsync: bool,
    }

    impl Default for WindowSettings {
        fn default() -> Self {
            Self {
                title: "Test".to_string(),
                frame_interval_ms: 10,
                vsync: true,
            }
        }
    }

    impl Config for WindowSettings {}

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window.toml");
        let settings = WindowSettings {
            title: "Roads".to_string(),
            frame_interval_ms: 16,
            vsync: false,
        };

        settings.save_to_file(&path).unwrap();
        assert_eq!(WindowSettings::load_from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("window.ron");
        let settings = WindowSettings::default();

        settings.save_to_file(&path).unwrap();
        assert_eq!(WindowSettings::load_from_file(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "frame_interval_ms = 33\n").unwrap();

        let settings = WindowSettings::load_from_file(&path).unwrap();
        assert_eq!(settings.frame_interval_ms, 33);
        assert_eq!(settings.title, "Test");
        assert!(settings.vsync);
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let result = WindowSettings::load_from_file(Path::new("settings.yaml"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = WindowSettings::load_from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    struct FrameRate {
        fps: u32,
    }

    impl Config for FrameRate {
        fn validate(&self) -> Result<(), ConfigError> {
            if self.fps == 0 {
                return Err(ConfigError::Invalid("fps must be positive".to_string()));
            }
            Ok(())
        }
    }

    #[test]
    fn test_validation_runs_after_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rate.toml");

        std::fs::write(&path, "fps = 0\n").unwrap();
        assert!(matches!(FrameRate::load_from_file(&path), Err(ConfigError::Invalid(_))));

        std::fs::write(&path, "fps = 30\n").unwrap();
        assert_eq!(FrameRate::load_from_file(&path).unwrap().fps, 30);
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(WindowSettings::load_or_default(None).unwrap(), WindowSettings::default());
    }
}
