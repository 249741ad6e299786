//! Key/value tuning table
//!
//! The file format is one `KEY = VALUE` pair per line. Lines starting with `#`
//! are comments. Keys starting with `$` are special:
//!
//! - `$PATH` is prepended to values read with [`ConfigTable::get_path`]
//! - `$LOG_LEVEL` sets the fallback log filter
//!
//! ```text
//! # Directory containing all game resources
//! $PATH = /opt/petri/
//! FOOD_IMAGE = img/food.png
//! ```

use super::{extension, ConfigError};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

/// Built-in defaults covering every key the prefabs and systems read
pub const DEFAULT_CONFIG: &str = include_str!("defaults.cfg");

const DELIMITER: char = '=';
const PATH_KEY: &str = "$PATH";
const LOG_LEVEL_KEY: &str = "$LOG_LEVEL";

/// Read-only table of tunable constants, loaded once before systems start
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTable {
    values: HashMap<String, String>,
    path_prefix: String,
    log_level: Option<String>,
}

impl ConfigTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Table parsed from the embedded `defaults.cfg`
    ///
    /// # Panics
    /// Never in practice: the embedded file is covered by tests.
    pub fn defaults() -> Self {
        Self::parse(DEFAULT_CONFIG).expect("embedded defaults.cfg is well formed")
    }

    /// Parse the `KEY = VALUE` line format
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut table = Self::new();

        for (index, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(DELIMITER) else {
                return Err(ConfigError::Syntax {
                    line: index + 1,
                    message: format!("expected `KEY {DELIMITER} VALUE`, found {line:?}"),
                });
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(ConfigError::Syntax {
                    line: index + 1,
                    message: "empty key".to_string(),
                });
            }
            table.set(key, value.trim());
        }

        Ok(table)
    }

    /// Parse a TOML document, stringifying every scalar.
    ///
    /// Nested tables are flattened with `.` between the key segments.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let document: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| ConfigError::Parse(e.to_string()))?;

        let mut table = Self::new();
        table.insert_toml(None, document)?;
        Ok(table)
    }

    fn insert_toml(
        &mut self,
        prefix: Option<&str>,
        document: toml::Table,
    ) -> Result<(), ConfigError> {
        for (key, value) in document {
            let full_key = match prefix {
                Some(prefix) => format!("{prefix}.{key}"),
                None => key,
            };

            let text = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(d) => d.to_string(),
                toml::Value::Table(nested) => {
                    self.insert_toml(Some(&full_key), nested)?;
                    continue;
                }
                toml::Value::Array(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: full_key,
                        value: "[...]".to_string(),
                        expected: "a scalar",
                    });
                }
            };
            self.set(&full_key, &text);
        }
        Ok(())
    }

    /// Load a `.cfg` or `.toml` file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match extension(path) {
            Some("cfg") => Self::parse(&contents),
            Some("toml") => Self::from_toml_str(&contents),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Overlay every entry of `other` on top of this table
    pub fn merge(&mut self, other: Self) {
        if !other.path_prefix.is_empty() {
            self.path_prefix = other.path_prefix;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        self.values.extend(other.values);
    }

    /// Insert or replace a value
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            PATH_KEY => self.path_prefix = value.to_string(),
            LOG_LEVEL_KEY => self.log_level = Some(value.to_string()),
            _ => {
                self.values.insert(key.to_string(), value.to_string());
            }
        }
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of ordinary (non-special) entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table has no ordinary entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of `$LOG_LEVEL`, if set
    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }

    /// Value of `$PATH` (empty when unset)
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    /// Raw string value
    pub fn get_str(&self, key: &str) -> Result<&str, ConfigError> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// String value with the `$PATH` prefix prepended
    pub fn get_path(&self, key: &str) -> Result<String, ConfigError> {
        Ok(format!("{}{}", self.path_prefix, self.get_str(key)?))
    }

    /// Signed integer value
    pub fn get_i64(&self, key: &str) -> Result<i64, ConfigError> {
        self.get_parsed(key, "an integer")
    }

    /// Non-negative integer value
    pub fn get_u32(&self, key: &str) -> Result<u32, ConfigError> {
        self.get_parsed(key, "a non-negative integer")
    }

    /// Float value
    pub fn get_f32(&self, key: &str) -> Result<f32, ConfigError> {
        self.get_parsed(key, "a number")
    }

    /// Boolean value: `true/false`, `1/0` or `yes/no`, any case
    pub fn get_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let raw = self.get_str(key)?;
        match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(invalid(key, raw, "a boolean")),
        }
    }

    /// Float value, or `default` when the key is absent
    pub fn get_f32_or(&self, key: &str, default: f32) -> Result<f32, ConfigError> {
        if self.contains(key) {
            self.get_f32(key)
        } else {
            Ok(default)
        }
    }

    /// Unsigned value, or `default` when the key is absent
    pub fn get_u32_or(&self, key: &str, default: u32) -> Result<u32, ConfigError> {
        if self.contains(key) {
            self.get_u32(key)
        } else {
            Ok(default)
        }
    }

    /// Boolean value, or `default` when the key is absent
    pub fn get_bool_or(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        if self.contains(key) {
            self.get_bool(key)
        } else {
            Ok(default)
        }
    }

    /// Value parsed with [`FromStr`]
    pub fn get_parsed<T: FromStr>(
        &self,
        key: &str,
        expected: &'static str,
    ) -> Result<T, ConfigError> {
        let raw = self.get_str(key)?;
        raw.parse().map_err(|_| invalid(key, raw, expected))
    }
}

fn invalid(key: &str, value: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected,
    }
}
