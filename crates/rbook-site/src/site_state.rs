//! Immutable site snapshot.
//!
//! A [`SiteState`] pairs a validated [`NavTree`] with the directory its
//! routes resolve against. Snapshots are never mutated; reloads build a new
//! one and swap it in.

use std::path::{Path, PathBuf};

use rbook_nav::{Breadcrumb, NavTree, Pager, RouteNotFound};

/// Resolved page: the entry, where it sits, and where its markdown lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageView {
    /// Entry title.
    pub title: String,
    /// Route of the page.
    pub path: String,
    /// Ancestors, outermost first.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Neighbouring pages in reading order.
    pub pager: Pager,
    /// Markdown document relative to the source directory (e.g. `docs/enums/match.md`).
    pub document: String,
    /// Markdown document on disk.
    pub source_file: PathBuf,
}

/// Route whose markdown document does not exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingDocument {
    pub route: String,
    pub source_file: PathBuf,
}

/// Validated navigation tree plus document root.
#[derive(Debug)]
pub struct SiteState {
    tree: NavTree,
    source_dir: PathBuf,
}

impl SiteState {
    #[must_use]
    pub fn new(tree: NavTree, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            tree,
            source_dir: source_dir.into(),
        }
    }

    #[must_use]
    pub fn tree(&self) -> &NavTree {
        &self.tree
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Resolve `path` into a page view.
    ///
    /// # Errors
    ///
    /// Returns [`RouteNotFound`] if no entry has this route.
    pub fn page(&self, path: &str) -> Result<PageView, RouteNotFound> {
        let entry = self.tree.resolve(path)?;
        let document = document_for_route(path);

        Ok(PageView {
            title: entry.title().to_owned(),
            path: path.to_owned(),
            breadcrumbs: self.tree.breadcrumbs(path)?,
            pager: self.tree.pager(path)?,
            source_file: self.source_dir.join(&document),
            document,
        })
    }

    /// Markdown file for `route` under the source directory.
    ///
    /// `/docs/a/b` maps to `<source_dir>/docs/a/b.md`; routes ending in `/`
    /// map to `index.md` in that directory.
    #[must_use]
    pub fn document_path(&self, route: &str) -> PathBuf {
        self.source_dir.join(document_for_route(route))
    }

    /// Routes whose markdown document is missing, in reading order.
    #[must_use]
    pub fn missing_documents(&self) -> Vec<MissingDocument> {
        self.tree
            .routes()
            .filter_map(|record| {
                let source_file = self.document_path(record.path);
                (!source_file.is_file()).then(|| MissingDocument {
                    route: record.path.to_owned(),
                    source_file,
                })
            })
            .collect()
    }
}

/// Document path relative to the source directory, with `/` separators.
fn document_for_route(route: &str) -> String {
    let relative = route.strip_prefix('/').unwrap_or(route);
    if relative.is_empty() || relative.ends_with('/') {
        format!("{relative}index.md")
    } else {
        format!("{relative}.md")
    }
}
