//! Year-configuration provider and label catalog for the tax engine.
//!
//! [`ConfigStore`] holds one immutable [`YearConfiguration`] per supported
//! tax year. The store is built once (typically at process start via
//! [`ConfigStore::builtin`]) and shared read-only afterwards; there is no
//! process-wide cache, so tests can build stores with fabricated
//! configurations instead of fighting global state.

use std::collections::HashMap;
use std::sync::Arc;

use foros_core::models::YearConfiguration;
use thiserror::Error;
use tracing::debug;

pub mod catalog;
pub mod years;

pub use catalog::Catalog;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no configuration for tax year {0}")]
    YearNotFound(i32),
}

/// Immutable store of year configurations.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    configurations: HashMap<i32, Arc<YearConfiguration>>,
}

impl ConfigStore {
    /// An empty store; add years with [`ConfigStore::with_year`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with the built-in statutory tables.
    pub fn builtin() -> Self {
        let store = Self::new()
            .with_year(years::year_2024::configuration())
            .with_year(years::year_2025::configuration())
            .with_year(years::year_2026::configuration());
        debug!(years = store.configurations.len(), "built-in configurations loaded");
        store
    }

    /// Adds or replaces the configuration for its own year.
    pub fn with_year(
        mut self,
        configuration: YearConfiguration,
    ) -> Self {
        self.configurations
            .insert(configuration.year, Arc::new(configuration));
        self
    }

    /// Looks up the configuration for a tax year.
    pub fn get(
        &self,
        year: i32,
    ) -> Result<Arc<YearConfiguration>, ConfigError> {
        self.configurations
            .get(&year)
            .cloned()
            .ok_or(ConfigError::YearNotFound(year))
    }

    /// Years the store can serve, in ascending order.
    pub fn supported_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.configurations.keys().copied().collect();
        years.sort_unstable();
        years
    }
}
