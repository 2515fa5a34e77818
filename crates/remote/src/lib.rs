//! Remote mirror fetch client for depot
//!
//! The resolution engine talks to mirrors through the [`RemoteClient`]
//! capability: an injected trait object, never a concrete type. The
//! production implementation issues HTTP requests; the deterministic
//! double in [`testing`] serves canned content.

pub mod client;
pub mod http;
pub mod testing;

pub use client::{FetchError, RemoteClient};
pub use http::HttpRemoteClient;
