//! Permission vocabulary and its textual shortcut encoding
//!
//! Each permission has a single-character shortcut used in textual
//! permission sets, e.g. `"rw"`. The shortcuts form a bijection with the
//! enumeration; an unrecognized character is a hard parse error.

use depot_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Access permission attached to a route
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Read artifacts under the route path
    Read,
    /// Deploy artifacts under the route path
    Write,
    /// Implies every other permission on every path
    Manager,
}

impl Permission {
    /// All permissions in enumeration order
    pub const ALL: [Permission; 3] = [Permission::Read, Permission::Write, Permission::Manager];

    /// Single-character shortcut used in textual encodings
    #[must_use]
    pub fn shortcut(self) -> char {
        match self {
            Permission::Read => 'r',
            Permission::Write => 'w',
            Permission::Manager => 'm',
        }
    }

    /// Permission for a shortcut character, if any
    #[must_use]
    pub fn from_shortcut(shortcut: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.shortcut() == shortcut)
    }

    /// Parse a textual permission set
    ///
    /// Duplicates and character order are irrelevant. Fails on the first
    /// unrecognized shortcut.
    pub fn parse_set(text: &str) -> Result<BTreeSet<Permission>> {
        let mut permissions = BTreeSet::new();
        for shortcut in text.chars() {
            let permission = Self::from_shortcut(shortcut)
                .ok_or(Error::InvalidPermission { shortcut })?;
            permissions.insert(permission);
        }
        Ok(permissions)
    }

    /// Render a permission set in enumeration order
    #[must_use]
    pub fn render_set(permissions: &BTreeSet<Permission>) -> String {
        permissions.iter().map(|p| p.shortcut()).collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shortcut())
    }
}
