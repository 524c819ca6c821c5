//! Store configuration via `widgetdb.toml`
//!
//! A small TOML file selects the id strategy and pre-sizes the store. A
//! missing file can be materialized with the commented defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;
use widgetdb_core::{Error, KeyGenerator, Result, SequentialIds, UuidIds};

/// Config file name looked up next to the application's data.
pub const CONFIG_FILE_NAME: &str = "widgetdb.toml";

/// Store configuration loaded from `widgetdb.toml`.
///
/// # Example
///
/// ```toml
/// # Id strategy: "sequential" (default) or "uuid"
/// id_kind = "sequential"
/// sequential_start = 0
/// initial_capacity = 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDbConfig {
    /// Id strategy: `"sequential"` or `"uuid"`.
    #[serde(default = "default_id_kind")]
    pub id_kind: String,
    /// First id handed out by the sequential strategy.
    #[serde(default)]
    pub sequential_start: i64,
    /// Number of widgets to reserve room for up front.
    #[serde(default)]
    pub initial_capacity: usize,
}

fn default_id_kind() -> String {
    "sequential".to_string()
}

impl Default for WidgetDbConfig {
    fn default() -> Self {
        Self {
            id_kind: default_id_kind(),
            sequential_start: 0,
            initial_capacity: 0,
        }
    }
}

impl WidgetDbConfig {
    /// Build the id generator selected by `id_kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the string is not `"sequential"` or `"uuid"`.
    pub fn id_generator(&self) -> Result<KeyGenerator> {
        match self.id_kind.as_str() {
            "sequential" => Ok(KeyGenerator::Sequential(SequentialIds::starting_at(
                self.sequential_start,
            ))),
            "uuid" => Ok(KeyGenerator::Uuid(UuidIds)),
            other => Err(Error::Config(format!(
                "Invalid id kind '{}' in {}. Expected \"sequential\" or \"uuid\".",
                other, CONFIG_FILE_NAME
            ))),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# widgetdb configuration
#
# Id strategy: "sequential" (default) or "uuid"
#   "sequential" = 64-bit integers counting up from sequential_start
#   "uuid"       = random v4 UUIDs
id_kind = "sequential"

# First id issued by the sequential strategy (default: 0)
sequential_start = 0

# Widgets to reserve room for when the store is created (default: 0)
initial_capacity = 0
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed, or names
    /// an unknown id kind.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| file_error("read", path, e))?;
        let config: WidgetDbConfig =
            toml::from_str(&content).map_err(|e| file_error("parse", path, e))?;
        config.id_generator()?;
        Ok(config)
    }

    /// Create `path` with [`default_toml`](Self::default_toml) unless a file
    /// is already there. An existing file is never touched.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if path.exists() {
            return Ok(());
        }
        std::fs::write(path, Self::default_toml()).map_err(|e| file_error("create", path, e))?;
        debug!(path = %path.display(), "Wrote default widget store config");
        Ok(())
    }

    /// Overwrite `path` with this config.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| file_error("encode", path, e))?;
        std::fs::write(path, content).map_err(|e| file_error("write", path, e))
    }
}

/// Config error naming the failed step and file
fn file_error(action: &str, path: &Path, cause: impl fmt::Display) -> Error {
    Error::Config(format!(
        "cannot {} widget store config {} at '{}': {}",
        action,
        CONFIG_FILE_NAME,
        path.display(),
        cause
    ))
}
