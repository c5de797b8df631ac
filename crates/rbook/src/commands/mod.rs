//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod routes;
pub(crate) mod serve;

use std::path::PathBuf;

use clap::Args;
use rbook_config::{BuildMode, CliSettings, Config};

pub(crate) use check::CheckArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use serve::ServeArgs;

use crate::error::CliError;

/// Options shared by every command that reads the book.
#[derive(Args)]
pub(crate) struct BookArgs {
    /// Path to configuration file (default: auto-discover rbook.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sidebar file, JSON or YAML (overrides config).
    #[arg(long)]
    sidebar: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Build mode; selects the site base path (overrides RBOOK_MODE).
    #[arg(long)]
    mode: Option<BuildMode>,
}

impl BookArgs {
    /// Load config with these overrides plus any extra settings.
    pub(crate) fn load(self, extra: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            sidebar: self.sidebar,
            source_dir: self.source_dir,
            mode: self.mode,
            ..extra
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        tracing::debug!(
            config = ?config.config_path,
            sidebar = %config.docs_resolved.sidebar.display(),
            mode = %config.mode,
            "Loaded configuration"
        );
        Ok(config)
    }
}
