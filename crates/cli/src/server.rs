//! Minimal HTTP serving adapter
//!
//! One route: `GET /<repository>/<gav>`. Credentials arrive as HTTP
//! Basic `name:secret` pairs and are resolved against the token store
//! before the lookup; facade errors map onto status codes. The wire
//! surface is deliberately this small.

use crate::bootstrap::Depot;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use depot_core::Error;
use depot_repository::LookupRequest;
use depot_token::{AccessToken, TokenStore};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn serve(depot: Depot, listen: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!(listen, "depot listening");
    axum::serve(listener, router(depot)).await?;
    Ok(())
}

fn router(depot: Depot) -> Router {
    Router::new()
        .route("/:repository/*gav", get(lookup))
        .with_state(Arc::new(depot))
}

async fn lookup(
    State(depot): State<Arc<Depot>>,
    Path((repository, gav)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let token = authenticate(&depot.tokens, &headers);
    let request = LookupRequest::new(token, repository, gav);

    match depot.resolver.lookup(&request).await {
        Ok(document) => {
            let content_type = document.content_type;
            match document.content.into_bytes().await {
                Ok(bytes) => {
                    ([(header::CONTENT_TYPE, content_type)], bytes).into_response()
                }
                Err(error) => {
                    warn!(%error, "artifact transfer aborted mid-stream");
                    StatusCode::BAD_GATEWAY.into_response()
                }
            }
        }
        Err(error) => status_for(&error).into_response(),
    }
}

/// Resolve HTTP Basic credentials against the token store
fn authenticate(tokens: &TokenStore, headers: &HeaderMap) -> Option<AccessToken> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(BASE64.decode(encoded).ok()?).ok()?;
    let (name, secret) = decoded.split_once(':')?;
    tokens.verify(name, secret)
}

fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::RepositoryNotFound { .. } | Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
