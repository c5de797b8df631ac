use std::path::PathBuf;

use rbook_nav::ValidationError;

/// Error reading or parsing an authored sidebar.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Sidebar file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Sidebar file is not valid JSON for the entry schema.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Sidebar file is not valid YAML for the entry schema.
    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// Extension is neither `.json`, `.yaml` nor `.yml`.
    #[error("unsupported sidebar format: {} (expected .json, .yaml or .yml)", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// Error building a site snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
