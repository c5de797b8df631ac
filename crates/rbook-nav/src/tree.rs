//! Validated navigation tree with route index.
//!
//! # Architecture
//!
//! [`load_tree`] converts authored [`RawEntry`] records into owned
//! [`NavEntry`] values, collecting every invariant violation before deciding.
//! A tree is published only when the whole input is valid.
//!
//! Derived data is computed once at load time:
//! - `routes`: position of every routable entry in reading order
//! - `index`: route -> ordinal in `routes`, for O(1) lookups
//!
//! Entry access by position walks at most `depth` levels.

use std::collections::HashMap;

use crate::entry::{EntryHints, EntryPosition, NavEntry};
use crate::error::{EntryRef, NavError, RouteNotFound, ValidationError};
use crate::raw::RawEntry;
use crate::routes::{Breadcrumb, Pager, RouteLink, Routes};
use crate::sidebar::SidebarItem;

/// Immutable, validated table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavTree {
    entries: Vec<NavEntry>,
    routes: Vec<EntryPosition>,
    index: HashMap<String, usize>,
}

/// Validate authored records and build a [`NavTree`].
///
/// Validation is all-or-nothing: every violation in the input is reported in
/// the returned [`ValidationError`], and no partial tree is produced.
///
/// # Errors
///
/// Returns [`ValidationError`] listing [`NavError::DuplicatePath`],
/// [`NavError::EmptyTitle`], [`NavError::OrphanGroup`] and
/// [`NavError::InvalidPath`] violations in traversal order.
pub fn load_tree(raw: &[RawEntry]) -> Result<NavTree, ValidationError> {
    let mut validator = Validator::default();
    let entries: Vec<Option<NavEntry>> = raw
        .iter()
        .enumerate()
        .map(|(i, entry)| validator.convert(entry, EntryPosition::top(i)))
        .collect();

    if !validator.errors.is_empty() {
        return Err(ValidationError::new(validator.errors));
    }

    // Without errors every record converted.
    let entries: Vec<NavEntry> = entries.into_iter().flatten().collect();
    let tree = NavTree::from_entries(entries);
    tracing::debug!(
        entries = tree.entries.len(),
        routes = tree.routes.len(),
        "Navigation tree loaded"
    );
    Ok(tree)
}

/// Linearize a tree into reading order. Same as [`NavTree::routes`].
#[must_use]
pub fn flatten_routes(tree: &NavTree) -> Routes<'_> {
    tree.routes()
}

#[derive(Default)]
struct Validator {
    errors: Vec<NavError>,
    seen: HashMap<String, EntryRef>,
}

impl Validator {
    /// Convert one record and its subtree, pre-order.
    ///
    /// Returns `None` when this record or any descendant is invalid; the
    /// subtree is still walked so every violation is reported.
    fn convert(&mut self, raw: &RawEntry, position: EntryPosition) -> Option<NavEntry> {
        let errors_before = self.errors.len();
        let entry_ref = || EntryRef {
            title: raw.title.clone(),
            position: position.clone(),
        };

        if raw.title.trim().is_empty() {
            self.errors.push(NavError::EmptyTitle {
                position: position.clone(),
                path: raw.path.clone(),
            });
        }

        if let Some(path) = &raw.path {
            if let Err(reason) = check_route(path) {
                self.errors.push(NavError::InvalidPath {
                    entry: entry_ref(),
                    path: path.clone(),
                    reason,
                });
            } else if let Some(first) = self.seen.get(path) {
                self.errors.push(NavError::DuplicatePath {
                    path: path.clone(),
                    first: first.clone(),
                    second: entry_ref(),
                });
            } else {
                self.seen.insert(path.clone(), entry_ref());
            }
        } else if raw.children.is_empty() {
            self.errors.push(NavError::OrphanGroup { entry: entry_ref() });
        }

        let mut sidebar_depth = raw.sidebar_depth;
        if sidebar_depth.is_some() && position.depth() > 1 {
            tracing::warn!(
                title = %raw.title,
                position = %position,
                "sidebarDepth is only honoured on top-level entries, ignoring"
            );
            sidebar_depth = None;
        }

        let children: Vec<Option<NavEntry>> = raw
            .children
            .iter()
            .enumerate()
            .map(|(i, child)| self.convert(child, position.child(i)))
            .collect();

        if self.errors.len() > errors_before {
            return None;
        }

        let hints = EntryHints {
            collapsible: raw.collapsible.unwrap_or(true),
            collapsed: raw.collapsed.unwrap_or(false),
            sidebar_depth,
        };
        let title = raw.title.clone();
        let children: Vec<NavEntry> = children.into_iter().flatten().collect();

        Some(match (&raw.path, children.is_empty()) {
            (Some(path), true) => NavEntry::leaf(title, path.clone(), hints),
            (path, false) => NavEntry::group(title, path.clone(), hints, children),
            // Rejected above as an orphan group.
            (None, true) => return None,
        })
    }
}

/// Check that a route is absolute and has no whitespace, query or fragment.
fn check_route(path: &str) -> Result<(), &'static str> {
    if path.is_empty() {
        return Err("route is empty");
    }
    if !path.starts_with('/') {
        return Err("route must start with '/'");
    }
    if path.chars().any(char::is_whitespace) {
        return Err("route must not contain whitespace");
    }
    if path.contains(['?', '#']) {
        return Err("route must not contain a query or fragment");
    }
    Ok(())
}

impl NavTree {
    fn from_entries(entries: Vec<NavEntry>) -> Self {
        let mut routes = Vec::new();
        let mut index = HashMap::new();
        for (ordinal, record) in Routes::new(&entries).enumerate() {
            index.insert(record.path.to_owned(), ordinal);
            routes.push(record.position);
        }

        Self {
            entries,
            routes,
            index,
        }
    }

    /// Top-level entries in authored order.
    #[must_use]
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// True when the tree has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of routable entries.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Routable entries in reading order, with breadcrumb title chains.
    #[must_use]
    pub fn routes(&self) -> Routes<'_> {
        Routes::new(&self.entries)
    }

    /// Find the entry whose route equals `path` exactly.
    ///
    /// No normalization is applied: `/guide` and `/guide/` are different
    /// routes.
    ///
    /// # Errors
    ///
    /// Returns [`RouteNotFound`] if no entry has this route.
    pub fn resolve(&self, path: &str) -> Result<&NavEntry, RouteNotFound> {
        self.position_of(path)
            .and_then(|position| self.entry_at(position))
            .ok_or_else(|| RouteNotFound::new(path))
    }

    /// Position of the entry with route `path`.
    #[must_use]
    pub fn position_of(&self, path: &str) -> Option<&EntryPosition> {
        self.index.get(path).map(|&ordinal| &self.routes[ordinal])
    }

    /// Entry at `position`, if the position exists.
    #[must_use]
    pub fn entry_at(&self, position: &EntryPosition) -> Option<&NavEntry> {
        let (first, rest) = position.indices().split_first()?;
        let mut entry = self.entries.get(*first)?;
        for &i in rest {
            entry = entry.children().get(i)?;
        }
        Some(entry)
    }

    /// Previous and next pages of `path` in reading order.
    ///
    /// # Errors
    ///
    /// Returns [`RouteNotFound`] if no entry has this route.
    pub fn pager(&self, path: &str) -> Result<Pager, RouteNotFound> {
        let ordinal = *self
            .index
            .get(path)
            .ok_or_else(|| RouteNotFound::new(path))?;

        let link = |ordinal: usize| {
            let entry = self.entry_at(self.routes.get(ordinal)?)?;
            Some(RouteLink {
                title: entry.title().to_owned(),
                path: entry.path()?.to_owned(),
            })
        };

        Ok(Pager {
            prev: ordinal.checked_sub(1).and_then(link),
            next: link(ordinal + 1),
        })
    }

    /// Ancestors of `path`, outermost first. The page itself is excluded.
    ///
    /// # Errors
    ///
    /// Returns [`RouteNotFound`] if no entry has this route.
    pub fn breadcrumbs(&self, path: &str) -> Result<Vec<Breadcrumb>, RouteNotFound> {
        let position = self
            .position_of(path)
            .ok_or_else(|| RouteNotFound::new(path))?;

        let mut crumbs = Vec::with_capacity(position.depth().saturating_sub(1));
        let mut level = self.entries.as_slice();
        for &i in position.indices().iter().take(position.depth() - 1) {
            let Some(entry) = level.get(i) else {
                break;
            };
            crumbs.push(Breadcrumb {
                title: entry.title().to_owned(),
                path: entry.path().map(str::to_owned),
            });
            level = entry.children();
        }
        Ok(crumbs)
    }

    /// Sidebar view for the rendering layer.
    #[must_use]
    pub fn sidebar(&self) -> Vec<SidebarItem> {
        self.entries.iter().map(SidebarItem::from_entry).collect()
    }

    /// Re-serialize to authored records with canonical keys.
    ///
    /// Loading the result yields a tree equal to `self`.
    #[must_use]
    pub fn to_raw(&self) -> Vec<RawEntry> {
        self.entries.iter().map(to_raw_entry).collect()
    }
}

fn to_raw_entry(entry: &NavEntry) -> RawEntry {
    let hints = entry.hints();
    RawEntry {
        title: entry.title().to_owned(),
        path: entry.path().map(str::to_owned),
        collapsible: (!hints.collapsible).then_some(false),
        collapsed: hints.collapsed.then_some(true),
        sidebar_depth: hints.sidebar_depth,
        children: entry.children().iter().map(to_raw_entry).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(NavTree: Send, Sync);

    fn example_raw() -> Vec<RawEntry> {
        vec![
            RawEntry::page("Intro", "/intro"),
            RawEntry::page("Setup", "/setup").with_child(RawEntry::page("Install", "/setup/install")),
        ]
    }

    fn errors_of(raw: &[RawEntry]) -> Vec<NavError> {
        load_tree(raw).unwrap_err().errors().to_vec()
    }

    #[test]
    fn test_example_flatten_routes() {
        let tree = load_tree(&example_raw()).unwrap();

        let routes: Vec<_> = flatten_routes(&tree).map(|r| (r.path, r.titles)).collect();

        assert_eq!(
            routes,
            vec![
                ("/intro", vec!["Intro"]),
                ("/setup", vec!["Setup"]),
                ("/setup/install", vec!["Setup", "Install"]),
            ]
        );
    }

    #[test]
    fn test_example_next_of_setup_is_install() {
        let tree = load_tree(&example_raw()).unwrap();

        let pager = tree.pager("/setup").unwrap();

        assert_eq!(
            pager.next,
            Some(RouteLink {
                title: "Install".to_owned(),
                path: "/setup/install".to_owned(),
            })
        );
        assert_eq!(pager.prev.unwrap().path, "/intro");
    }

    #[test]
    fn test_pager_has_no_links_past_the_ends() {
        let tree = load_tree(&example_raw()).unwrap();

        assert!(tree.pager("/intro").unwrap().prev.is_none());
        assert!(tree.pager("/setup/install").unwrap().next.is_none());
    }

    #[test]
    fn test_pager_unknown_route() {
        let tree = load_tree(&example_raw()).unwrap();

        assert_eq!(
            tree.pager("/nope").unwrap_err(),
            RouteNotFound::new("/nope")
        );
    }

    #[test]
    fn test_pager_skips_pathless_heading() {
        let raw = vec![
            RawEntry::page("Last chapter", "/last"),
            RawEntry::heading("附录").with_child(RawEntry::page("A", "/appendix/a")),
        ];
        let tree = load_tree(&raw).unwrap();

        let pager = tree.pager("/last").unwrap();

        assert_eq!(pager.next.unwrap().path, "/appendix/a");
    }

    #[test]
    fn test_duplicate_top_level_paths_rejected_with_both_titles() {
        let raw = vec![RawEntry::page("First", "/a"), RawEntry::page("Second", "/a")];

        let errors = errors_of(&raw);

        assert_eq!(
            errors,
            vec![NavError::DuplicatePath {
                path: "/a".to_owned(),
                first: EntryRef {
                    title: "First".to_owned(),
                    position: EntryPosition::top(0),
                },
                second: EntryRef {
                    title: "Second".to_owned(),
                    position: EntryPosition::top(1),
                },
            }]
        );
    }

    #[test]
    fn test_duplicate_nested_path_rejected() {
        // A heading that links to its own first child
        let raw = vec![
            RawEntry::page("附录", "/docs/appendix/appendix-a")
                .with_child(RawEntry::page("附录A: 关键字", "/docs/appendix/appendix-a")),
        ];

        let errors = errors_of(&raw);

        assert_eq!(errors.len(), 1);
        let NavError::DuplicatePath { first, second, .. } = &errors[0] else {
            panic!("expected DuplicatePath, got {:?}", errors[0]);
        };
        assert_eq!(first.title, "附录");
        assert_eq!(second.title, "附录A: 关键字");
        assert_eq!(second.position.to_string(), "1.1");
    }

    #[test]
    fn test_empty_title_rejected() {
        let errors = errors_of(&[RawEntry::page("", "/a")]);

        assert_eq!(
            errors,
            vec![NavError::EmptyTitle {
                position: EntryPosition::top(0),
                path: Some("/a".to_owned()),
            }]
        );
    }

    #[test]
    fn test_whitespace_title_rejected() {
        let raw = vec![RawEntry::page("Setup", "/setup").with_child(RawEntry::page(" \t\u{3000}", "/setup/x"))];

        let errors = errors_of(&raw);

        assert!(matches!(
            &errors[0],
            NavError::EmptyTitle { position, .. } if position.indices() == [0, 0]
        ));
    }

    #[test]
    fn test_orphan_group_rejected() {
        let errors = errors_of(&[RawEntry::page("Intro", "/intro"), RawEntry::heading("附录")]);

        assert_eq!(
            errors,
            vec![NavError::OrphanGroup {
                entry: EntryRef {
                    title: "附录".to_owned(),
                    position: EntryPosition::top(1),
                },
            }]
        );
    }

    #[test]
    fn test_invalid_path_rejected() {
        let raw = vec![
            RawEntry::page("Relative", "docs/intro"),
            RawEntry::page("Spaces", "/docs/hello world"),
            RawEntry::page("Fragment", "/docs/intro#install"),
            RawEntry::page("Empty", ""),
        ];

        let errors = errors_of(&raw);

        let reasons: Vec<_> = errors
            .iter()
            .map(|e| match e {
                NavError::InvalidPath { reason, .. } => *reason,
                other => panic!("expected InvalidPath, got {other:?}"),
            })
            .collect();
        assert_eq!(
            reasons,
            vec![
                "route must start with '/'",
                "route must not contain whitespace",
                "route must not contain a query or fragment",
                "route is empty",
            ]
        );
    }

    #[test]
    fn test_all_errors_collected() {
        let raw = vec![
            RawEntry::page("A", "/a"),
            RawEntry::heading("")
                .with_child(RawEntry::page("B", "/a"))
                .with_child(RawEntry::heading("Empty group")),
        ];

        let errors = errors_of(&raw);

        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], NavError::EmptyTitle { .. }));
        assert!(matches!(errors[1], NavError::DuplicatePath { .. }));
        assert!(matches!(errors[2], NavError::OrphanGroup { .. }));
    }

    #[test]
    fn test_group_with_path_and_empty_children_is_leaf() {
        let raw = vec![RawEntry {
            title: "Intro".to_owned(),
            path: Some("/intro".to_owned()),
            children: Vec::new(),
            ..RawEntry::default()
        }];

        let tree = load_tree(&raw).unwrap();

        assert!(!tree.entries()[0].is_group());
    }

    #[test]
    fn test_pathless_group_is_valid() {
        let raw = vec![RawEntry::heading("附录").with_child(RawEntry::page("A", "/a"))];

        let tree = load_tree(&raw).unwrap();

        assert_eq!(tree.route_count(), 1);
        assert!(tree.entries()[0].path().is_none());
    }

    #[test]
    fn test_empty_input_is_empty_tree() {
        let tree = load_tree(&[]).unwrap();

        assert!(tree.is_empty());
        assert_eq!(tree.routes().count(), 0);
    }

    #[test]
    fn test_hints_defaults_and_overrides() {
        let raw = vec![
            RawEntry::page("Intro", "/intro").with_sidebar_depth(1),
            RawEntry {
                title: "Setup".to_owned(),
                path: Some("/setup".to_owned()),
                collapsible: Some(false),
                collapsed: Some(true),
                ..RawEntry::default()
            },
        ];

        let tree = load_tree(&raw).unwrap();

        let intro = tree.entries()[0].hints();
        assert!(intro.collapsible);
        assert!(!intro.collapsed);
        assert_eq!(intro.sidebar_depth, Some(1));
        let setup = tree.entries()[1].hints();
        assert!(!setup.collapsible);
        assert!(setup.collapsed);
    }

    #[test]
    fn test_nested_sidebar_depth_dropped() {
        let raw = vec![
            RawEntry::page("Setup", "/setup")
                .with_child(RawEntry::page("Install", "/setup/install").with_sidebar_depth(2)),
        ];

        let tree = load_tree(&raw).unwrap();

        assert_eq!(tree.entries()[0].children()[0].hints().sidebar_depth, None);
    }

    #[test]
    fn test_resolve_known_path_returns_exact_entry() {
        let tree = load_tree(&example_raw()).unwrap();

        for record in tree.routes() {
            let entry = tree.resolve(record.path).unwrap();
            assert_eq!(entry.path(), Some(record.path));
            assert!(std::ptr::eq(entry, record.entry));
        }
    }

    #[test]
    fn test_resolve_unknown_path_not_found() {
        let tree = load_tree(&example_raw()).unwrap();

        for path in ["/missing", "/intro/", "intro", "", "/INTRO"] {
            assert_eq!(tree.resolve(path).unwrap_err(), RouteNotFound::new(path));
        }
    }

    #[test]
    fn test_breadcrumbs_include_pathless_ancestors() {
        let raw = vec![
            RawEntry::heading("附录").with_child(
                RawEntry::page("Tools", "/appendix/tools")
                    .with_child(RawEntry::page("Rustfmt", "/appendix/tools/rustfmt")),
            ),
        ];
        let tree = load_tree(&raw).unwrap();

        let crumbs = tree.breadcrumbs("/appendix/tools/rustfmt").unwrap();

        assert_eq!(
            crumbs,
            vec![
                Breadcrumb {
                    title: "附录".to_owned(),
                    path: None,
                },
                Breadcrumb {
                    title: "Tools".to_owned(),
                    path: Some("/appendix/tools".to_owned()),
                },
            ]
        );
    }

    #[test]
    fn test_breadcrumbs_top_level_is_empty() {
        let tree = load_tree(&example_raw()).unwrap();

        assert!(tree.breadcrumbs("/intro").unwrap().is_empty());
        assert!(tree.breadcrumbs("/nope").is_err());
    }

    #[test]
    fn test_load_tree_is_idempotent() {
        let raw = example_raw();

        assert_eq!(load_tree(&raw).unwrap(), load_tree(&raw).unwrap());
    }

    #[test]
    fn test_to_raw_round_trip_preserves_order() {
        let raw = vec![
            RawEntry::page("Zeta", "/z").with_sidebar_depth(1),
            RawEntry::heading("Alpha")
                .with_child(RawEntry::page("Beta", "/b"))
                .with_child(RawEntry::page("Aleph", "/a")),
        ];
        let tree = load_tree(&raw).unwrap();

        let reloaded = load_tree(&tree.to_raw()).unwrap();

        assert_eq!(reloaded, tree);
        assert_eq!(tree.to_raw(), raw);
    }

    /// Rebuild authored records from the route sequence alone, using the
    /// position chain as the parent link.
    fn renest(tree: &NavTree) -> Vec<RawEntry> {
        fn insert(level: &mut Vec<RawEntry>, indices: &[usize], record: RawEntry) {
            match indices {
                [index] => {
                    assert_eq!(*index, level.len(), "routes out of order");
                    level.push(record);
                }
                [index, rest @ ..] => insert(&mut level[*index].children, rest, record),
                [] => unreachable!(),
            }
        }

        let mut roots = Vec::new();
        for record in tree.routes() {
            let mut raw = RawEntry::page(*record.titles.last().unwrap(), record.path);
            raw.sidebar_depth = record.entry.hints().sidebar_depth;
            insert(&mut roots, record.position.indices(), raw);
        }
        roots
    }

    #[test]
    fn test_flatten_then_renest_reconstructs_tree() {
        let raw = vec![
            RawEntry::page("Intro", "/intro").with_sidebar_depth(1),
            RawEntry::page("Setup", "/setup")
                .with_child(RawEntry::page("Install", "/setup/install"))
                .with_child(
                    RawEntry::page("Hello", "/setup/hello")
                        .with_child(RawEntry::page("World", "/setup/hello/world")),
                ),
            RawEntry::page("Outro", "/outro"),
        ];
        let tree = load_tree(&raw).unwrap();

        let rebuilt = load_tree(&renest(&tree)).unwrap();

        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn test_entry_at_out_of_range() {
        let tree = load_tree(&example_raw()).unwrap();

        assert!(tree.entry_at(&EntryPosition::top(5)).is_none());
        assert!(tree.entry_at(&EntryPosition::top(0).child(0)).is_none());
        assert!(tree.entry_at(&EntryPosition::default()).is_none());
        assert_eq!(
            tree.entry_at(&EntryPosition::top(1).child(0)).unwrap().title(),
            "Install"
        );
    }
}
