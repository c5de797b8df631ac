//! `rbook check` command implementation.

use std::path::Path;

use clap::Args;
use rbook_config::{CliSettings, Config};
use rbook_nav::{NavError, load_tree};
use rbook_site::{FsSidebarSource, MissingDocument, SidebarSource, SiteState};

use super::BookArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    book: BookArgs,

    /// Treat missing markdown documents as errors.
    #[arg(long)]
    strict: bool,
}

/// Outcome of checking a sidebar.
#[derive(Debug)]
enum CheckReport {
    /// Tree failed validation; every issue is listed.
    Invalid(Vec<NavError>),
    /// Tree is valid.
    Valid {
        routes: usize,
        missing: Vec<MissingDocument>,
    },
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidebar cannot be read, fails validation, or
    /// (with `--strict`) routes to missing documents.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.book.load(CliSettings::default())?;
        let sidebar = &config.docs_resolved.sidebar;

        output.info(&format!("Checking {}", sidebar.display()));

        match check(&config)? {
            CheckReport::Invalid(errors) => {
                for error in &errors {
                    output.error(&format!("  {error}"));
                }
                Err(CliError::Validation(format!(
                    "{} issue(s) in {}",
                    errors.len(),
                    sidebar.display()
                )))
            }
            CheckReport::Valid { routes, missing } => {
                for doc in &missing {
                    output.warning(&format!(
                        "  {} -> missing {}",
                        doc.route,
                        relative_to(&doc.source_file, &config.docs_resolved.source_dir)
                    ));
                }
                if self.strict && !missing.is_empty() {
                    return Err(CliError::Validation(format!(
                        "{} route(s) without a document",
                        missing.len()
                    )));
                }
                output.success(&format!(
                    "✓ {routes} routes, {} missing document(s)",
                    missing.len()
                ));
                Ok(())
            }
        }
    }
}

/// Validate the configured sidebar and look for missing documents.
fn check(config: &Config) -> Result<CheckReport, CliError> {
    let source = FsSidebarSource::new(&config.docs_resolved.sidebar)?;
    let raw = source.read()?;

    let tree = match load_tree(&raw) {
        Ok(tree) => tree,
        Err(e) => return Ok(CheckReport::Invalid(e.errors().to_vec())),
    };
    let routes = tree.route_count();
    let state = SiteState::new(tree, &config.docs_resolved.source_dir);

    Ok(CheckReport::Valid {
        routes,
        missing: state.missing_documents(),
    })
}

fn relative_to(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config_for(dir: &Path, sidebar: &str) -> Config {
        fs::write(dir.join("sidebar.yaml"), sidebar).unwrap();
        let mut config = Config::default();
        config.docs_resolved.sidebar = dir.join("sidebar.yaml");
        config.docs_resolved.source_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn test_check_reports_every_issue() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(
            dir.path(),
            "- title: A\n  path: /a\n- title: B\n  path: /a\n- title: ' '\n  path: /c\n- title: Orphan\n",
        );

        let CheckReport::Invalid(errors) = check(&config).unwrap() else {
            panic!("expected invalid report");
        };

        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], NavError::DuplicatePath { .. }));
        assert!(matches!(errors[1], NavError::EmptyTitle { .. }));
        assert!(matches!(errors[2], NavError::OrphanGroup { .. }));
    }

    #[test]
    fn test_check_lists_missing_documents() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(
            dir.path(),
            "- title: Intro\n  path: /docs/intro\n- title: Setup\n  path: /docs/setup\n",
        );
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/intro.md"), "# Intro").unwrap();

        let CheckReport::Valid { routes, missing } = check(&config).unwrap() else {
            panic!("expected valid report");
        };

        assert_eq!(routes, 2);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].route, "/docs/setup");
    }

    #[test]
    fn test_check_unreadable_sidebar_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.docs_resolved.sidebar = dir.path().join("missing.yaml");

        let err = check(&config).unwrap_err();

        assert!(matches!(err, CliError::Source(_)));
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(
            relative_to(Path::new("/book/docs/a.md"), Path::new("/book")),
            "docs/a.md"
        );
        assert_eq!(
            relative_to(Path::new("/elsewhere/a.md"), Path::new("/book")),
            "/elsewhere/a.md"
        );
    }
}
