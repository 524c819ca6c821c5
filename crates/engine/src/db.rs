//! WidgetDb: a configured in-memory widget store
//!
//! Wires [`WidgetDbConfig`] to an [`InMemoryWidgetStore`] keyed by
//! [`WidgetKey`], so the id kind is picked at runtime.

use std::path::Path;

use tracing::info;

use widgetdb_concurrency::InMemoryWidgetStore;
use widgetdb_core::{Result, WidgetKey};

use crate::config::{WidgetDbConfig, CONFIG_FILE_NAME};
use crate::service::WidgetService;

/// Widget service over the in-memory store with config-selected ids
pub type WidgetDb = WidgetService<WidgetKey, InMemoryWidgetStore<WidgetKey>>;

impl WidgetService<WidgetKey, InMemoryWidgetStore<WidgetKey>> {
    /// Open an empty store as described by `config`
    ///
    /// # Errors
    ///
    /// [`Error::Config`](widgetdb_core::Error::Config) for an unknown id kind.
    pub fn open(config: &WidgetDbConfig) -> Result<Self> {
        let ids = config.id_generator()?;
        let store = InMemoryWidgetStore::with_capacity(ids, config.initial_capacity);
        info!(
            target: "widgetdb::db",
            id_kind = %config.id_kind,
            initial_capacity = config.initial_capacity,
            "Opened widget store"
        );
        Ok(WidgetService::new(store))
    }

    /// Open using the config file at `path`
    pub fn open_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = WidgetDbConfig::from_file(path.as_ref())?;
        Self::open(&config)
    }

    /// Open using `widgetdb.toml` inside `dir`, writing the default file first
    /// if none exists
    pub fn open_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let path = dir.as_ref().join(CONFIG_FILE_NAME);
        WidgetDbConfig::write_default_if_missing(&path)?;
        Self::open_file(path)
    }
}
