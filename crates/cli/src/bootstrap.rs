//! Facade wiring at process startup

use depot_config::Settings;
use depot_core::Result;
use depot_remote::HttpRemoteClient;
use depot_repository::{RepositoryRegistry, Resolver};
use depot_token::TokenStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// The wired facades the adapters run against
pub struct Depot {
    pub tokens: Arc<TokenStore>,
    pub resolver: Arc<Resolver>,
}

/// Build every facade from immutable settings
pub fn bootstrap(settings: &Settings) -> Result<Depot> {
    let registry =
        RepositoryRegistry::from_settings(&settings.working_directory, &settings.repositories);
    info!(
        repositories = settings.repositories.len(),
        "repository registry loaded"
    );

    let remote = HttpRemoteClient::new(Duration::from_secs(settings.remote.timeout_secs))?;

    Ok(Depot {
        tokens: Arc::new(TokenStore::new()),
        resolver: Arc::new(Resolver::new(registry, Arc::new(remote))),
    })
}
