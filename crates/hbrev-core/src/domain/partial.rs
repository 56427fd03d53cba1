//! Partials: named, reusable template fragments.
//!
//! A partial's name is derived from its file name: the last path segment up
//! to (not including) the first `.`. So `partials/nav/menu.en.hbs` registers
//! as `menu`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::DomainError;

// ── PartialName ──────────────────────────────────────────────────────────────

/// Registration name of a partial.
///
/// Invariant: non-empty and never contains a path separator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartialName(String);

impl PartialName {
    /// Derive the name from a fragment's path.
    pub fn from_path(path: &Path) -> Result<Self, DomainError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| DomainError::InvalidPartialName {
                path: path.display().to_string(),
                reason: "path has no file name".into(),
            })?
            .to_str()
            .ok_or_else(|| DomainError::InvalidPartialName {
                path: path.display().to_string(),
                reason: "file name is not valid UTF-8".into(),
            })?;

        Self::from_file_name(file_name).ok_or_else(|| DomainError::InvalidPartialName {
            path: path.display().to_string(),
            reason: "file name starts with '.'".into(),
        })
    }

    /// Everything before the first `.`; `None` when that is empty.
    fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name.split('.').next().unwrap_or_default();
        (!stem.is_empty()).then(|| Self(stem.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartialName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Partial ──────────────────────────────────────────────────────────────────

/// A fragment read from disk, ready to register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partial {
    name: PartialName,
    source: String,
    origin: PathBuf,
}

impl Partial {
    pub fn new(name: PartialName, source: impl Into<String>, origin: impl Into<PathBuf>) -> Self {
        Self {
            name,
            source: source.into(),
            origin: origin.into(),
        }
    }

    /// Read path → name, keeping the raw text as-is.
    pub fn from_file(path: impl Into<PathBuf>, source: impl Into<String>) -> Result<Self, DomainError> {
        let origin = path.into();
        let name = PartialName::from_path(&origin)?;
        Ok(Self::new(name, source, origin))
    }

    pub fn name(&self) -> &PartialName {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }
}

// ── PartialRegistry ──────────────────────────────────────────────────────────

/// Name → partial mapping for a single run.
///
/// Last insert wins on a name collision. Iteration is ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialRegistry {
    partials: BTreeMap<PartialName, Partial>,
}

impl PartialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a partial, returning the one it replaced.
    pub fn insert(&mut self, partial: Partial) -> Option<Partial> {
        self.partials.insert(partial.name.clone(), partial)
    }

    pub fn names(&self) -> Vec<String> {
        self.partials.keys().map(|n| n.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.partials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Partial> {
        self.partials.values()
    }
}

impl FromIterator<Partial> for PartialRegistry {
    fn from_iter<I: IntoIterator<Item = Partial>>(iter: I) -> Self {
        let mut registry = Self::new();
        for partial in iter {
            registry.insert(partial);
        }
        registry
    }
}
