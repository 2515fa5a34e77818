//! Access token records and the authorization check

use crate::permission::Permission;
use crate::routes::Route;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named credential with its attached routes
///
/// The secret is retained only in its one-way-verifiable form; the
/// plaintext is returned exactly once, at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    /// Store-assigned identity, stable across renames
    pub id: u64,
    /// Unique human-readable identifier
    pub name: String,
    /// One-way digest of the secret
    pub secret_digest: String,
    /// Routes this token may use
    pub routes: BTreeSet<Route>,
}

impl AccessToken {
    /// Whether this token authorizes `required` on `path`
    ///
    /// True when any route holds Manager, or holds `required` with a
    /// pattern matching `path`.
    #[must_use]
    pub fn is_authorized(&self, path: &str, required: Permission) -> bool {
        self.routes.iter().any(|route| route.authorizes(path, required))
    }

    /// Whether any route holds the Manager permission
    #[must_use]
    pub fn is_manager(&self) -> bool {
        self.routes
            .iter()
            .any(|route| route.permissions.contains(&Permission::Manager))
    }

    /// Whether the token can read anything inside a repository
    ///
    /// Decides repository visibility for listings.
    #[must_use]
    pub fn can_see_repository(&self, repository: &str) -> bool {
        self.routes.iter().any(|route| {
            route.permissions.contains(&Permission::Manager)
                || (route.permissions.contains(&Permission::Read)
                    && route.path.within_repository(repository))
        })
    }
}
