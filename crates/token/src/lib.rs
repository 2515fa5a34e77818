//! Access tokens, routes and permissions for depot
//!
//! This crate implements the authorization half of the resolution engine:
//! - the permission vocabulary and its shortcut encoding
//! - route patterns and the path matching rule
//! - the access token store with its single-writer mutation discipline

pub mod access_token;
pub mod permission;
pub mod routes;
pub mod secrets;
pub mod store;

pub use access_token::AccessToken;
pub use permission::Permission;
pub use routes::{PathPattern, PatternSegment, Route};
pub use store::{CreatedToken, TokenStore};
