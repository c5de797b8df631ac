//! Where authored sidebar records come from.
//!
//! [`FsSidebarSource`] reads a JSON or YAML file on every call, so edits are
//! picked up by the next reload. [`StaticSidebarSource`] holds records in
//! memory and is used by tests and embedders.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use rbook_nav::RawEntry;

use crate::error::SourceError;

/// Supplier of authored sidebar records.
pub trait SidebarSource: Send + Sync {
    /// Read the current records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the records cannot be read or parsed.
    fn read(&self) -> Result<Vec<RawEntry>, SourceError>;
}

/// Serialization format of a sidebar file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SidebarFormat {
    Json,
    Yaml,
}

impl SidebarFormat {
    /// Detect the format from the file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Sidebar file on the local filesystem.
#[derive(Debug)]
pub struct FsSidebarSource {
    path: PathBuf,
    format: SidebarFormat,
}

impl FsSidebarSource {
    /// Create a source for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::UnsupportedFormat`] for unknown extensions.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        let format =
            SidebarFormat::from_path(&path).ok_or_else(|| SourceError::UnsupportedFormat(path.clone()))?;
        Ok(Self { path, format })
    }

    /// Path of the sidebar file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> SidebarFormat {
        self.format
    }
}

impl SidebarSource for FsSidebarSource {
    fn read(&self) -> Result<Vec<RawEntry>, SourceError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_sidebar(&content, self.format, &self.path)
    }
}

/// Parse sidebar records from `content`.
///
/// `path` is only used in error messages.
///
/// # Errors
///
/// Returns [`SourceError::Json`] or [`SourceError::Yaml`] on malformed input,
/// including unknown keys.
pub fn parse_sidebar(
    content: &str,
    format: SidebarFormat,
    path: &Path,
) -> Result<Vec<RawEntry>, SourceError> {
    match format {
        SidebarFormat::Json => serde_json::from_str(content).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        }),
        SidebarFormat::Yaml => serde_yaml::from_str(content).map_err(|source| SourceError::Yaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// In-memory sidebar records.
#[derive(Debug, Default)]
pub struct StaticSidebarSource {
    entries: RwLock<Vec<RawEntry>>,
}

impl StaticSidebarSource {
    #[must_use]
    pub fn new(entries: Vec<RawEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Replace the records returned by the next read.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn set(&self, entries: Vec<RawEntry>) {
        *self.entries.write().unwrap() = entries;
    }
}

impl SidebarSource for StaticSidebarSource {
    fn read(&self) -> Result<Vec<RawEntry>, SourceError> {
        Ok(self.entries.read().unwrap().clone())
    }
}
