//! Access token store
//!
//! CRUD over token records with a single-writer discipline: mutations are
//! mutually exclusive with each other, while read-path authorization
//! checks only contend for the brief critical section of a mutation.
//! Records are keyed by their store-assigned id, which keeps listing
//! order stable across renames.

use crate::access_token::AccessToken;
use crate::permission::Permission;
use crate::routes::{PathPattern, Route};
use crate::secrets::{digest_secret, generate_secret};
use depot_core::{Error, Result};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::collections::BTreeSet;

/// Result of a token creation: the record plus its one-time plaintext secret
#[derive(Debug, Clone)]
pub struct CreatedToken {
    pub token: AccessToken,
    /// Plaintext secret, returned exactly once
    pub secret: String,
}

#[derive(Default)]
struct TokenStoreInner {
    tokens: IndexMap<u64, AccessToken>,
    next_id: u64,
}

/// In-memory access token store
///
/// The persistence format behind this contract is a collaborator concern;
/// the store itself only guarantees the behavior documented per method.
#[derive(Default)]
pub struct TokenStore {
    inner: RwLock<TokenStoreInner>,
}

impl TokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token, generating a secret when none is supplied
    ///
    /// The permissions attach as a single root route, so `m` produces a
    /// management token covering every path. An existing token with the
    /// same name is replaced.
    pub fn create_token(
        &self,
        name: &str,
        secret: Option<String>,
        permissions: BTreeSet<Permission>,
    ) -> Result<CreatedToken> {
        let secret = secret.unwrap_or_else(generate_secret);
        let routes = if permissions.is_empty() {
            BTreeSet::new()
        } else {
            BTreeSet::from([Route::new(PathPattern::parse("/")?, permissions)])
        };

        let mut inner = self.inner.write();
        let replaced = inner
            .tokens
            .iter()
            .find(|(_, t)| t.name == name)
            .map(|(id, _)| *id);
        if let Some(id) = replaced {
            inner.tokens.shift_remove(&id);
        }
        let id = inner.next_id;
        inner.next_id += 1;

        let token = AccessToken {
            id,
            name: name.to_string(),
            secret_digest: digest_secret(&secret),
            routes,
        };
        inner.tokens.insert(id, token.clone());

        Ok(CreatedToken { token, secret })
    }

    /// Token by name
    #[must_use]
    pub fn get_token(&self, name: &str) -> Option<AccessToken> {
        self.inner
            .read()
            .tokens
            .values()
            .find(|t| t.name == name)
            .cloned()
    }

    /// Replace the stored record matching the token's identity
    ///
    /// A rename onto a name held by a different record fails with
    /// `Conflict` and leaves both records unchanged.
    pub fn update_token(&self, token: AccessToken) -> Result<()> {
        let mut inner = self.inner.write();
        if !inner.tokens.contains_key(&token.id) {
            return Err(Error::token_not_found(token.name));
        }
        let collision = inner
            .tokens
            .values()
            .any(|t| t.id != token.id && t.name == token.name);
        if collision {
            return Err(Error::conflict(token.name));
        }
        inner.tokens.insert(token.id, token);
        Ok(())
    }

    /// Remove a token; removing an absent name is a no-op
    pub fn delete_token(&self, name: &str) {
        let mut inner = self.inner.write();
        if let Some(id) = inner
            .tokens
            .iter()
            .find(|(_, t)| t.name == name)
            .map(|(id, _)| *id)
        {
            inner.tokens.shift_remove(&id);
        }
    }

    /// All tokens in creation order
    #[must_use]
    pub fn tokens(&self) -> Vec<AccessToken> {
        self.inner.read().tokens.values().cloned().collect()
    }

    /// Number of stored tokens
    #[must_use]
    pub fn count(&self) -> usize {
        self.inner.read().tokens.len()
    }

    /// Token by name when the supplied secret matches its retained digest
    #[must_use]
    pub fn verify(&self, name: &str, secret: &str) -> Option<AccessToken> {
        self.get_token(name)
            .filter(|token| token.secret_digest == digest_secret(secret))
    }
}
