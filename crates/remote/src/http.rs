//! Production HTTP implementation of the remote fetch capability

use crate::client::{join_uri, FetchError, RemoteClient};
use async_trait::async_trait;
use depot_core::{media_type_for, simple_name, DocumentContent, DocumentInfo, Error, Result};
use futures::StreamExt;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP remote client backed by a pooled reqwest client
///
/// The configured timeout bounds each fetch end to end; a mirror that
/// hangs is abandoned and reported as a network failure, so the engine
/// can proceed to the next mirror.
pub struct HttpRemoteClient {
    client: reqwest::Client,
}

impl HttpRemoteClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build remote client: {e}")))?;
        Ok(HttpRemoteClient { client })
    }
}

#[async_trait]
impl RemoteClient for HttpRemoteClient {
    async fn fetch(
        &self,
        base_uri: &str,
        gav: &str,
        credentials: Option<&str>,
    ) -> std::result::Result<DocumentInfo, FetchError> {
        let uri = Url::parse(&join_uri(base_uri, gav))
            .map_err(|e| FetchError::network(format!("invalid mirror uri: {e}")))?;

        let mut request = self.client.get(uri.clone());
        if let Some(credentials) = credentials {
            request = match credentials.split_once(':') {
                Some((login, password)) => request.basic_auth(login, Some(password)),
                None => request.bearer_auth(credentials),
            };
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::network(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::NotFound),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(FetchError::Unauthorized),
            status if !status.is_success() => {
                Err(FetchError::network(format!("mirror answered {status}")))
            }
            _ => {
                let length = response.content_length();
                debug!(%uri, ?length, "remote fetch succeeded");
                let name = simple_name(gav).to_string();
                let content_type = media_type_for(&name);
                let stream = response
                    .bytes_stream()
                    .map(|chunk| chunk.map_err(std::io::Error::other))
                    .boxed();
                Ok(DocumentInfo {
                    name,
                    content_type,
                    length,
                    content: DocumentContent::Stream(stream),
                })
            }
        }
    }
}
