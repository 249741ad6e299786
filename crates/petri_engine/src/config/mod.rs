//! Configuration system
//!
//! Two layers live here:
//! - [`Config`]: serde-backed settings structs loaded from TOML or RON files
//! - [`ConfigTable`]: the read-only key/value table of gameplay tunables

mod table;

pub use serde::{Serialize, Deserialize};
pub use table::{ConfigTable, DEFAULT_CONFIG};

use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

pub(crate) fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a key/value file
    #[error("Syntax error on line {line}: {message}")]
    Syntax {
        /// 1-based line number
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// Parse error from a structured format
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Requested key is absent
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    /// Value could not be converted to the requested type
    #[error("Invalid value {value:?} for key {key}: expected {expected}")]
    InvalidValue {
        /// Key that was looked up
        key: String,
        /// Raw value found
        value: String,
        /// Expected type description
        expected: &'static str,
    },
}
