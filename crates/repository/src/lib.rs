//! Repository registry and artifact resolution engine for depot
//!
//! The [`Resolver`] is the facade consumed by the serving adapter: it
//! authorizes a lookup, reads local storage, and falls back across the
//! repository's mirrors in configured order, caching whatever a mirror
//! returns.

pub mod registry;
pub mod resolver;

pub use registry::{Mirror, Repository, RepositoryRegistry};
pub use resolver::{LookupRequest, Resolver};
