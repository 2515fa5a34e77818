//! Resolved artifact documents
//!
//! A successful lookup produces a [`DocumentInfo`]: the artifact name,
//! media type, length when the source reports one, and a single-use byte
//! source. Documents are never persisted as model objects; only their
//! bytes reach the local store.

use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::StreamExt;
use std::fmt;

/// Last segment of a slash-delimited GAV path
#[must_use]
pub fn simple_name(gav: &str) -> &str {
    gav.trim_end_matches('/').rsplit('/').next().unwrap_or(gav)
}

/// Single-use byte source backing a resolved document
pub enum DocumentContent {
    /// Fully buffered content
    Bytes(Bytes),
    /// Lazily produced content, consumed chunk by chunk
    Stream(BoxStream<'static, std::io::Result<Bytes>>),
}

impl DocumentContent {
    /// Wrap already buffered bytes
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        DocumentContent::Bytes(bytes.into())
    }

    /// Consume the source, buffering everything it produces
    pub async fn into_bytes(self) -> std::io::Result<Bytes> {
        match self {
            DocumentContent::Bytes(bytes) => Ok(bytes),
            DocumentContent::Stream(mut stream) => {
                let mut buffer = BytesMut::new();
                while let Some(chunk) = stream.next().await {
                    buffer.extend_from_slice(&chunk?);
                }
                Ok(buffer.freeze())
            }
        }
    }
}

impl fmt::Debug for DocumentContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentContent::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            DocumentContent::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

/// Metadata and content of a resolved artifact
#[derive(Debug)]
pub struct DocumentInfo {
    /// Artifact file name (last GAV segment)
    pub name: String,
    /// Media type derived from the file name
    pub content_type: &'static str,
    /// Content length in bytes; `None` when the source cannot report it
    pub length: Option<u64>,
    /// Single-use byte source
    pub content: DocumentContent,
}

impl DocumentInfo {
    /// Document backed by fully buffered bytes with an exactly known length
    #[must_use]
    pub fn buffered(name: impl Into<String>, content_type: &'static str, bytes: Bytes) -> Self {
        DocumentInfo {
            name: name.into(),
            content_type,
            length: Some(bytes.len() as u64),
            content: DocumentContent::from_bytes(bytes),
        }
    }
}
