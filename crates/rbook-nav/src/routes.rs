//! Depth-first route linearization.
//!
//! [`Routes`] walks a tree in authored order (pre-order) and yields one
//! [`RouteRecord`] per entry that carries a route. The resulting sequence is
//! the reading order: an entry's "next page" is the following record.

use std::iter::FusedIterator;

use serde::Serialize;

use crate::entry::{EntryPosition, NavEntry};

/// A routable entry together with its breadcrumb chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRecord<'a> {
    /// Route of the entry.
    pub path: &'a str,
    /// Titles from the top-level ancestor down to the entry itself.
    pub titles: Vec<&'a str>,
    /// Index chain of the entry.
    pub position: EntryPosition,
    /// The entry.
    pub entry: &'a NavEntry,
}

#[derive(Clone)]
struct Frame<'a> {
    entries: &'a [NavEntry],
    next: usize,
}

/// Lazy pre-order iterator over routable entries.
///
/// A clone continues from the same point. Call
/// [`NavTree::routes`](crate::NavTree::routes) again to start over.
#[derive(Clone)]
pub struct Routes<'a> {
    stack: Vec<Frame<'a>>,
    // Title and sibling index of every ancestor of the current frame.
    // Always one shorter than `stack`.
    trail: Vec<(&'a str, usize)>,
}

impl<'a> Routes<'a> {
    pub(crate) fn new(entries: &'a [NavEntry]) -> Self {
        Self {
            stack: vec![Frame { entries, next: 0 }],
            trail: Vec::new(),
        }
    }

    fn record(&self, entry: &'a NavEntry, path: &'a str, index: usize) -> RouteRecord<'a> {
        let mut titles: Vec<&'a str> = self.trail.iter().map(|&(title, _)| title).collect();
        titles.push(entry.title());

        let mut indices: Vec<usize> = self.trail.iter().map(|&(_, i)| i).collect();
        indices.push(index);

        RouteRecord {
            path,
            titles,
            position: EntryPosition::from(indices),
            entry,
        }
    }
}

impl<'a> Iterator for Routes<'a> {
    type Item = RouteRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let entries: &'a [NavEntry] = frame.entries;
            let Some(entry) = entries.get(frame.next) else {
                self.stack.pop();
                self.trail.pop();
                continue;
            };
            let index = frame.next;
            frame.next += 1;

            let record = entry.path().map(|path| self.record(entry, path, index));

            let children = entry.children();
            if !children.is_empty() {
                self.trail.push((entry.title(), index));
                self.stack.push(Frame {
                    entries: children,
                    next: 0,
                });
            }

            if record.is_some() {
                return record;
            }
        }
    }
}

impl FusedIterator for Routes<'_> {}

/// Title and route of a neighbouring page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteLink {
    /// Display title.
    pub title: String,
    /// Link target.
    pub path: String,
}

/// Previous and next pages in reading order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Pager {
    /// Page before this one, `None` for the first page.
    pub prev: Option<RouteLink>,
    /// Page after this one, `None` for the last page.
    pub next: Option<RouteLink>,
}

/// Breadcrumb item. Headings without a route have no link target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Display title.
    pub title: String,
    /// Link target, `None` for path-less headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}
