//! Layered settings loader
//!
//! Defaults, then an optional TOML file, then `DEPOT_*` environment
//! overrides (`DEPOT_LISTEN`, `DEPOT_REMOTE__TIMEOUT_SECS`, ...).

use crate::settings::Settings;
use depot_core::{Error, Result};
use std::path::PathBuf;

/// Settings loader handling all startup configuration
#[derive(Debug, Default)]
pub struct SettingsLoader {
    path: Option<PathBuf>,
    required: bool,
}

impl SettingsLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the settings file to load
    #[must_use]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Fail when the settings file is missing instead of falling back to
    /// defaults
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Load the settings
    pub fn load(self) -> Result<Settings> {
        let mut builder = config::Config::builder();

        if let Some(path) = &self.path {
            builder = builder
                .add_source(config::File::from(path.as_path()).required(self.required));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("DEPOT").separator("__"),
        );

        let loaded = builder
            .build()
            .map_err(|e| Error::config(e.to_string()))?;
        loaded
            .try_deserialize::<Settings>()
            .map_err(|e| Error::config(e.to_string()))
    }
}
