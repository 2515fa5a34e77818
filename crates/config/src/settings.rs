//! Serde settings model

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base directory for repository storage roots
    pub working_directory: PathBuf,
    /// Listen address for the serving adapter
    pub listen: String,
    pub remote: RemoteSettings,
    /// Repositories in declaration order; order is significant for
    /// listings but each repository's mirrors are ordered independently
    pub repositories: IndexMap<String, RepositorySettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            working_directory: PathBuf::from("."),
            listen: "0.0.0.0:8080".to_string(),
            remote: RemoteSettings::default(),
            repositories: IndexMap::new(),
        }
    }
}

/// Remote fetch client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// End-to-end timeout per mirror fetch, in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        RemoteSettings { timeout_secs: 30 }
    }
}

/// One named repository
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositorySettings {
    /// Explicit storage root; defaults to
    /// `<working_directory>/repositories/<name>`
    pub storage_root: Option<PathBuf>,
    /// Upstream mirrors, consulted in this order on local miss
    pub mirrors: Vec<MirrorSettings>,
}

/// One upstream mirror
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorSettings {
    pub uri: String,
    /// Opaque credential string handed to the remote client
    pub credentials: Option<String>,
}
