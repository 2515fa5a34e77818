//! Settings model and loader for depot
//!
//! Settings are loaded once at startup and are immutable for the process
//! lifetime; reconfiguration requires a restart.

pub mod loader;
pub mod settings;

pub use loader::SettingsLoader;
pub use settings::{MirrorSettings, RemoteSettings, RepositorySettings, Settings};
