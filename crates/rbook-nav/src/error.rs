//! Validation and lookup errors.

use std::fmt;

use crate::entry::EntryPosition;

/// Title and position of an entry, for error reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRef {
    /// Entry title as authored.
    pub title: String,
    /// Index chain from the top level.
    pub position: EntryPosition,
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" (entry {})", self.title, self.position)
    }
}

/// A single invariant violation found while loading a tree.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Two entries resolve to the same route.
    #[error("duplicate path {path}: {first} and {second}")]
    DuplicatePath {
        /// Shared route.
        path: String,
        /// Entry that claimed the route first, in traversal order.
        first: EntryRef,
        /// Entry that claimed it again.
        second: EntryRef,
    },
    /// Title is empty or whitespace-only.
    #[error("empty title at entry {position}{}", path_suffix(.path.as_deref()))]
    EmptyTitle {
        /// Index chain of the entry.
        position: EntryPosition,
        /// Route of the entry, if it has one.
        path: Option<String>,
    },
    /// Heading with neither a route nor children.
    #[error("{entry} has no path and no children")]
    OrphanGroup {
        /// Offending entry.
        entry: EntryRef,
    },
    /// Route is not a valid absolute route string.
    #[error("invalid path {path:?} for {entry}: {reason}")]
    InvalidPath {
        /// Offending entry.
        entry: EntryRef,
        /// Route as authored.
        path: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

fn path_suffix(path: Option<&str>) -> String {
    path.map(|p| format!(" (path {p})")).unwrap_or_default()
}

impl NavError {
    /// Position of the entry the error is reported against.
    ///
    /// For duplicates this is the second occurrence.
    #[must_use]
    pub fn position(&self) -> &EntryPosition {
        match self {
            Self::DuplicatePath { second, .. } => &second.position,
            Self::EmptyTitle { position, .. } => position,
            Self::OrphanGroup { entry } | Self::InvalidPath { entry, .. } => &entry.position,
        }
    }
}

/// Rejected tree. Holds every violation found, in traversal order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<NavError>,
}

impl ValidationError {
    /// Callers guarantee `errors` is non-empty.
    pub(crate) fn new(errors: Vec<NavError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    /// All violations, in traversal order.
    #[must_use]
    pub fn errors(&self) -> &[NavError] {
        &self.errors
    }

    /// First violation found.
    #[must_use]
    pub fn first(&self) -> &NavError {
        &self.errors[0]
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [single] => write!(f, "invalid navigation tree: {single}"),
            errors => {
                write!(f, "invalid navigation tree ({} errors):", errors.len())?;
                for error in errors {
                    write!(f, "\n  - {error}")?;
                }
                Ok(())
            }
        }
    }
}

// Display already lists every violation, so there is no separate source.
impl std::error::Error for ValidationError {}

/// No entry's route equals the queried path.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("route not found: {path}")]
pub struct RouteNotFound {
    /// Queried path, verbatim.
    pub path: String,
}

impl RouteNotFound {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            path: path.to_owned(),
        }
    }
}
