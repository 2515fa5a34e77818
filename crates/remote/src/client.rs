//! The remote fetch capability boundary

use async_trait::async_trait;
use depot_core::DocumentInfo;

/// Outcome of a failed mirror fetch
///
/// All three kinds are represented distinctly: the engine treats
/// `NotFound` as "ask the next mirror" and the other two as transient
/// per-mirror failures, but callers may distinguish them.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The mirror does not have the artifact
    #[error("not found")]
    NotFound,
    /// The mirror rejected the configured credentials
    #[error("unauthorized")]
    Unauthorized,
    /// Transport failure, including timeouts and cancelled transfers
    #[error("network error: {message}")]
    Network { message: String },
}

impl FetchError {
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        FetchError::Network {
            message: message.into(),
        }
    }
}

/// Capability to retrieve bytes from one mirror
///
/// Injected into the resolution engine; implemented by the production
/// HTTP client and by deterministic test doubles.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Fetch `gav` below `base_uri`, authenticating with `credentials`
    async fn fetch(
        &self,
        base_uri: &str,
        gav: &str,
        credentials: Option<&str>,
    ) -> Result<DocumentInfo, FetchError>;
}

/// Join a mirror base URI and a GAV path
pub(crate) fn join_uri(base_uri: &str, gav: &str) -> String {
    format!(
        "{}/{}",
        base_uri.trim_end_matches('/'),
        gav.trim_start_matches('/')
    )
}
