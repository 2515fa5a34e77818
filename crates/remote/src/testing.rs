//! Deterministic remote client double
//!
//! Serves canned content for any path below a fixed URI prefix when the
//! supplied credential string matches verbatim, and `NotFound` otherwise.
//! The double can be made unreachable to simulate a mirror outage.

use crate::client::{join_uri, FetchError, RemoteClient};
use async_trait::async_trait;
use bytes::Bytes;
use depot_core::{media_type_for, simple_name, DocumentContent, DocumentInfo};
use std::sync::atomic::{AtomicBool, Ordering};

/// Test double for [`RemoteClient`]
pub struct FakeRemoteClient {
    prefix: String,
    credentials: String,
    content: Bytes,
    reachable: AtomicBool,
}

impl FakeRemoteClient {
    #[must_use]
    pub fn new(
        prefix: impl Into<String>,
        credentials: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        FakeRemoteClient {
            prefix: prefix.into(),
            credentials: credentials.into(),
            content: content.into(),
            reachable: AtomicBool::new(true),
        }
    }

    /// Simulate the mirror going down (or coming back)
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteClient for FakeRemoteClient {
    async fn fetch(
        &self,
        base_uri: &str,
        gav: &str,
        credentials: Option<&str>,
    ) -> Result<DocumentInfo, FetchError> {
        if !self.reachable.load(Ordering::SeqCst) {
            return Err(FetchError::network("mirror unreachable"));
        }

        let uri = join_uri(base_uri, gav);
        if uri.starts_with(&self.prefix) && credentials == Some(self.credentials.as_str()) {
            let name = simple_name(gav).to_string();
            let content_type = media_type_for(&name);
            Ok(DocumentInfo {
                name,
                content_type,
                // the double does not report a size, like a source
                // answering with chunked transfer encoding
                length: None,
                content: DocumentContent::from_bytes(self.content.clone()),
            })
        } else {
            Err(FetchError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REMOTE_REPOSITORY: &str = "https://domain.com/releases";
    const REMOTE_AUTH: &str = "panda@secret";

    fn client() -> FakeRemoteClient {
        FakeRemoteClient::new(REMOTE_REPOSITORY, REMOTE_AUTH, &b"content"[..])
    }

    #[tokio::test]
    async fn serves_canned_content_below_the_prefix() {
        let document = client()
            .fetch(REMOTE_REPOSITORY, "a/b", Some(REMOTE_AUTH))
            .await
            .unwrap();
        assert_eq!(document.name, "b");
        assert_eq!(document.length, None);
        let bytes = document.content.into_bytes().await.unwrap();
        assert_eq!(&bytes[..], b"content");
    }

    #[tokio::test]
    async fn rejects_wrong_credentials_and_foreign_hosts() {
        let client = client();
        assert!(matches!(
            client.fetch(REMOTE_REPOSITORY, "a/b", Some("other")).await,
            Err(FetchError::NotFound)
        ));
        assert!(matches!(
            client.fetch(REMOTE_REPOSITORY, "a/b", None).await,
            Err(FetchError::NotFound)
        ));
        assert!(matches!(
            client
                .fetch("https://elsewhere.com/releases", "a/b", Some(REMOTE_AUTH))
                .await,
            Err(FetchError::NotFound)
        ));
    }

    #[tokio::test]
    async fn unreachable_mirror_reports_a_network_failure() {
        let client = client();
        client.set_reachable(false);
        assert!(matches!(
            client.fetch(REMOTE_REPOSITORY, "a/b", Some(REMOTE_AUTH)).await,
            Err(FetchError::Network { .. })
        ));
        client.set_reachable(true);
        assert!(client
            .fetch(REMOTE_REPOSITORY, "a/b", Some(REMOTE_AUTH))
            .await
            .is_ok());
    }
}
