//! Containment-checked path resolution

use depot_core::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolve a GAV path under the storage root
///
/// Validated segment-wise before touching the filesystem: `.`/`..`,
/// empty segments and separator characters other than `/` are rejected,
/// so the resolved path cannot escape the root.
pub(crate) fn resolve(root: &Path, gav: &str) -> Result<PathBuf> {
    let relative = gav.trim_start_matches('/');
    if relative.is_empty() {
        return Err(Error::path_traversal(gav));
    }

    let mut resolved = root.to_path_buf();
    for segment in relative.split('/') {
        match segment {
            "" | "." | ".." => return Err(Error::path_traversal(gav)),
            s if s.contains('\\') || s.contains(':') => {
                return Err(Error::path_traversal(gav));
            }
            s => resolved.push(s),
        }
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_inside_the_root() {
        let resolved = resolve(Path::new("/srv/releases"), "com/x/y/1.0/y-1.0.xml").unwrap();
        assert_eq!(
            resolved,
            Path::new("/srv/releases/com/x/y/1.0/y-1.0.xml")
        );
    }

    #[test]
    fn leading_slash_is_tolerated() {
        let resolved = resolve(Path::new("/srv/releases"), "/a/b").unwrap();
        assert_eq!(resolved, Path::new("/srv/releases/a/b"));
    }

    #[test]
    fn parent_segments_are_rejected() {
        for gav in ["../escape", "a/../../b", "a/..", ".."] {
            assert!(matches!(
                resolve(Path::new("/srv/releases"), gav),
                Err(Error::PathTraversal { .. })
            ));
        }
    }

    #[test]
    fn empty_and_dot_segments_are_rejected() {
        for gav in ["", "/", "a//b", "./a", "a/./b"] {
            assert!(resolve(Path::new("/srv/releases"), gav).is_err());
        }
    }

    #[test]
    fn foreign_separators_are_rejected() {
        for gav in ["a\\..\\b", "c:/windows"] {
            assert!(resolve(Path::new("/srv/releases"), gav).is_err());
        }
    }
}
