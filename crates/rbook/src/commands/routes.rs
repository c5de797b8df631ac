//! `rbook routes` command implementation.

use clap::Args;
use rbook_config::{CliSettings, SiteConfig};
use rbook_nav::{NavTree, load_tree};
use rbook_site::{FsSidebarSource, SidebarSource};
use serde::Serialize;

use super::BookArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    book: BookArgs,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

/// One row of the route table.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct RouteRow {
    path: String,
    /// Public URL under the active base.
    url: String,
    titles: Vec<String>,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidebar cannot be read or fails validation.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.book.load(CliSettings::default())?;

        let raw = FsSidebarSource::new(&config.docs_resolved.sidebar)?.read()?;
        let tree = load_tree(&raw).map_err(rbook_site::SiteError::from)?;
        let rows = route_rows(&tree, &config.site());

        if self.json {
            output.data(&serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }

        let width = rows.iter().map(|r| r.path.len()).max().unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            output.data(&format!(
                "{:>4}  {:<width$}  {}",
                i + 1,
                row.path,
                output.dimmed(&row.titles.join(" › "))
            ));
        }
        Ok(())
    }
}

fn route_rows(tree: &NavTree, site: &SiteConfig) -> Vec<RouteRow> {
    tree.routes()
        .map(|record| RouteRow {
            path: record.path.to_owned(),
            url: site.url_for(record.path),
            titles: record.titles.iter().map(|t| (*t).to_owned()).collect(),
        })
        .collect()
}
