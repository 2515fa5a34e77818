use std::path::PathBuf;

/// Result type alias for depot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for depot operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown repository name in a lookup request
    #[error("repository '{repository}' not found")]
    RepositoryNotFound { repository: String },

    /// Content absent locally and on every configured mirror
    #[error("'{path}' not found")]
    NotFound { path: String },

    /// Credential missing or lacking the required permission on the path
    #[error("access denied for '{path}'")]
    Unauthorized { path: String },

    /// Update of a token the store does not hold
    #[error("token '{name}' not found")]
    TokenNotFound { name: String },

    /// Rename collides with an existing token name
    #[error("token name '{name}' is already in use")]
    Conflict { name: String },

    /// Unrecognized permission shortcut character
    #[error("unknown permission shortcut '{shortcut}'")]
    InvalidPermission { shortcut: char },

    /// Malformed route pattern
    #[error("invalid route pattern '{pattern}': {message}")]
    InvalidRoute { pattern: String, message: String },

    /// Resolved storage path escapes the repository storage root
    #[error("path '{path}' escapes the repository storage root")]
    PathTraversal { path: String },

    /// Local storage operation failed
    #[error("storage {operation} operation failed for '{path}': {source}")]
    Storage {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },
}

// Helper methods for creating errors with context
impl Error {
    /// Create a repository-not-found error
    #[must_use]
    pub fn repository_not_found(repository: impl Into<String>) -> Self {
        Error::RepositoryNotFound {
            repository: repository.into(),
        }
    }

    /// Create a not-found error for an artifact path
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Error::NotFound { path: path.into() }
    }

    /// Create an unauthorized error for an artifact path
    #[must_use]
    pub fn unauthorized(path: impl Into<String>) -> Self {
        Error::Unauthorized { path: path.into() }
    }

    /// Create a token-not-found error
    #[must_use]
    pub fn token_not_found(name: impl Into<String>) -> Self {
        Error::TokenNotFound { name: name.into() }
    }

    /// Create a name-conflict error
    #[must_use]
    pub fn conflict(name: impl Into<String>) -> Self {
        Error::Conflict { name: name.into() }
    }

    /// Create an invalid-route error
    #[must_use]
    pub fn invalid_route(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidRoute {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a path-traversal error
    #[must_use]
    pub fn path_traversal(path: impl Into<String>) -> Self {
        Error::PathTraversal { path: path.into() }
    }

    /// Create a storage error with context
    #[must_use]
    pub fn storage(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::Storage {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}
