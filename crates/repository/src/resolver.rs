//! The resolution engine
//!
//! Per-request state machine: locate repository, authorize, local
//! lookup, then the mirror chain. Per-mirror failures are absorbed here;
//! only success or the aggregate NotFound crosses the facade.

use crate::registry::{Repository, RepositoryRegistry};
use depot_core::{media_type_for, simple_name, DocumentContent, DocumentInfo, Error, Result};
use depot_remote::{FetchError, RemoteClient};
use depot_token::{AccessToken, Permission};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// One inbound lookup
#[derive(Debug, Clone)]
pub struct LookupRequest {
    /// Authenticated credential, if the caller presented one
    pub token: Option<AccessToken>,
    pub repository: String,
    pub gav: String,
}

impl LookupRequest {
    #[must_use]
    pub fn new(
        token: Option<AccessToken>,
        repository: impl Into<String>,
        gav: impl Into<String>,
    ) -> Self {
        LookupRequest {
            token,
            repository: repository.into(),
            gav: gav.into(),
        }
    }
}

/// Token-gated multi-repository artifact resolution facade
pub struct Resolver {
    registry: RepositoryRegistry,
    remote: Arc<dyn RemoteClient>,
}

impl Resolver {
    #[must_use]
    pub fn new(registry: RepositoryRegistry, remote: Arc<dyn RemoteClient>) -> Self {
        Resolver { registry, remote }
    }

    #[must_use]
    pub fn registry(&self) -> &RepositoryRegistry {
        &self.registry
    }

    /// Resolve one lookup request
    pub async fn lookup(&self, request: &LookupRequest) -> Result<DocumentInfo> {
        let repository = self
            .registry
            .find(&request.repository)
            .ok_or_else(|| Error::repository_not_found(&request.repository))?;

        let gav = request.gav.trim_start_matches('/');
        let route_path = format!("/{}/{}", request.repository, gav);
        let authorized = request
            .token
            .as_ref()
            .is_some_and(|token| token.is_authorized(&route_path, Permission::Read));
        if !authorized {
            debug!(path = %route_path, "lookup rejected");
            return Err(Error::unauthorized(route_path));
        }

        if let Some(bytes) = repository.store().read(gav).await? {
            debug!(repository = %request.repository, gav, "served from local storage");
            let name = simple_name(gav).to_string();
            let content_type = media_type_for(&name);
            return Ok(DocumentInfo::buffered(name, content_type, bytes));
        }

        self.resolve_from_mirrors(repository, gav).await
    }

    /// Walk the mirror chain in configured order; first success wins
    async fn resolve_from_mirrors(
        &self,
        repository: &Repository,
        gav: &str,
    ) -> Result<DocumentInfo> {
        for mirror in repository.mirrors() {
            let fetched = self
                .remote
                .fetch(&mirror.base_uri, gav, mirror.credentials.as_deref())
                .await;

            let DocumentInfo {
                name,
                content_type,
                length,
                content,
            } = match fetched {
                Ok(document) => document,
                Err(FetchError::NotFound) => {
                    debug!(mirror = %mirror.base_uri, gav, "mirror does not have the artifact");
                    continue;
                }
                Err(error @ (FetchError::Unauthorized | FetchError::Network { .. })) => {
                    warn!(mirror = %mirror.base_uri, gav, %error, "mirror failed, trying next");
                    continue;
                }
            };

            let bytes = match content.into_bytes().await {
                Ok(bytes) => bytes,
                Err(error) => {
                    warn!(mirror = %mirror.base_uri, gav, %error, "mirror transfer aborted, trying next");
                    continue;
                }
            };

            info!(
                repository = repository.name(),
                mirror = %mirror.base_uri,
                gav,
                length = bytes.len(),
                "fetched artifact from mirror"
            );

            // best-effort cache write; failure never invalidates the fetch
            if let Err(storage_error) = repository.store().write(gav, &bytes).await {
                error!(
                    repository = repository.name(),
                    gav,
                    %storage_error,
                    "failed to cache fetched artifact"
                );
            }

            return Ok(DocumentInfo {
                name,
                content_type,
                // length stays as the mirror reported it, UNKNOWN included
                length,
                content: DocumentContent::from_bytes(bytes),
            });
        }

        // mirrors are fungible: individual failure detail stops here
        Err(Error::not_found(gav))
    }

    /// Repository names visible to a token, in configured order
    #[must_use]
    pub fn find_repositories(&self, token: Option<&AccessToken>) -> Vec<String> {
        let Some(token) = token else {
            return Vec::new();
        };
        self.registry
            .names()
            .filter(|name| token.can_see_repository(name))
            .map(String::from)
            .collect()
    }
}
