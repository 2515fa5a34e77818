//! Boot-loaded repository registry
//!
//! Built once from settings and read-only afterwards; no locking is
//! needed. Repository order follows the settings file, mirror order is
//! significant and fixed per repository.

use depot_config::RepositorySettings;
use depot_storage::ContentStore;
use indexmap::IndexMap;
use std::path::Path;

/// One configured upstream mirror
#[derive(Debug, Clone)]
pub struct Mirror {
    pub base_uri: String,
    /// Opaque credential string handed to the remote client
    pub credentials: Option<String>,
}

/// A named repository: its local store plus its mirror chain
#[derive(Debug)]
pub struct Repository {
    name: String,
    store: ContentStore,
    mirrors: Vec<Mirror>,
}

impl Repository {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    #[must_use]
    pub fn mirrors(&self) -> &[Mirror] {
        &self.mirrors
    }
}

/// Static map of repository name to configuration
#[derive(Debug, Default)]
pub struct RepositoryRegistry {
    repositories: IndexMap<String, Repository>,
}

impl RepositoryRegistry {
    /// Build the registry from settings
    ///
    /// A repository without an explicit storage root lands under
    /// `<working_directory>/repositories/<name>`.
    #[must_use]
    pub fn from_settings(
        working_directory: &Path,
        repositories: &IndexMap<String, RepositorySettings>,
    ) -> Self {
        let repositories = repositories
            .iter()
            .map(|(name, settings)| {
                let storage_root = settings.storage_root.clone().unwrap_or_else(|| {
                    working_directory.join("repositories").join(name)
                });
                let mirrors = settings
                    .mirrors
                    .iter()
                    .map(|m| Mirror {
                        base_uri: m.uri.clone(),
                        credentials: m.credentials.clone(),
                    })
                    .collect();
                let repository = Repository {
                    name: name.clone(),
                    store: ContentStore::new(storage_root),
                    mirrors,
                };
                (name.clone(), repository)
            })
            .collect();
        RepositoryRegistry { repositories }
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Repository> {
        self.repositories.get(name)
    }

    /// Repository names in configured order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.repositories.keys().map(String::as_str)
    }
}
