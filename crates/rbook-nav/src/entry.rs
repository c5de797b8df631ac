//! Validated navigation entries.
//!
//! [`NavEntry`] is a sum type: a [`Leaf`] always carries a route, a
//! [`Group`] always carries at least one child. A path-less group with no
//! children cannot be constructed outside the loader, which rejects it.

use std::fmt;

/// Rendering hints attached to an entry. They never affect routing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryHints {
    /// Reader can fold the entry in the sidebar.
    pub collapsible: bool,
    /// Entry starts folded.
    pub collapsed: bool,
    /// Heading levels exposed for this entry (top-level entries only).
    pub sidebar_depth: Option<u8>,
}

impl Default for EntryHints {
    fn default() -> Self {
        Self {
            collapsible: true,
            collapsed: false,
            sidebar_depth: None,
        }
    }
}

/// Entry without children. Always routable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    title: String,
    path: String,
    hints: EntryHints,
}

/// Entry with at least one child, optionally routable itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    title: String,
    path: Option<String>,
    hints: EntryHints,
    children: Vec<NavEntry>,
}

/// One node of the table of contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEntry {
    /// Page without children.
    Leaf(Leaf),
    /// Heading with nested entries.
    Group(Group),
}

impl NavEntry {
    pub(crate) fn leaf(title: String, path: String, hints: EntryHints) -> Self {
        Self::Leaf(Leaf { title, path, hints })
    }

    /// Callers guarantee `children` is non-empty.
    pub(crate) fn group(
        title: String,
        path: Option<String>,
        hints: EntryHints,
        children: Vec<NavEntry>,
    ) -> Self {
        debug_assert!(!children.is_empty());
        Self::Group(Group {
            title,
            path,
            hints,
            children,
        })
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Leaf(leaf) => &leaf.title,
            Self::Group(group) => &group.title,
        }
    }

    /// Route of the entry, `None` for path-less headings.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Leaf(leaf) => Some(&leaf.path),
            Self::Group(group) => group.path.as_deref(),
        }
    }

    /// Nested entries in display order. Empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[NavEntry] {
        match self {
            Self::Leaf(_) => &[],
            Self::Group(group) => &group.children,
        }
    }

    #[must_use]
    pub fn hints(&self) -> &EntryHints {
        match self {
            Self::Leaf(leaf) => &leaf.hints,
            Self::Group(group) => &group.hints,
        }
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

/// Location of an entry as a chain of sibling indices from the top level.
///
/// Displayed 1-based (`3.2` is the second child of the third top-level entry)
/// so it can be matched against the authored file by eye.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryPosition(Vec<usize>);

impl EntryPosition {
    /// Position of a top-level entry.
    #[must_use]
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    /// Position of the `index`-th child of this entry.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Zero-based indices, outermost first.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of ancestors plus one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Position of the parent entry, `None` at the top level.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            Some((_, rest)) if !rest.is_empty() => Some(Self(rest.to_vec())),
            _ => None,
        }
    }
}

impl From<Vec<usize>> for EntryPosition {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for EntryPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", index + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_accessors() {
        let entry = NavEntry::leaf(
            "Intro".to_owned(),
            "/intro".to_owned(),
            EntryHints::default(),
        );

        assert_eq!(entry.title(), "Intro");
        assert_eq!(entry.path(), Some("/intro"));
        assert!(entry.children().is_empty());
        assert!(!entry.is_group());
        assert!(entry.hints().collapsible);
    }

    #[test]
    fn test_group_without_path() {
        let child = NavEntry::leaf("A".to_owned(), "/a".to_owned(), EntryHints::default());
        let entry = NavEntry::group("附录".to_owned(), None, EntryHints::default(), vec![child]);

        assert!(entry.path().is_none());
        assert!(entry.is_group());
        assert_eq!(entry.children()[0].title(), "A");
    }

    #[test]
    fn test_position_display_is_one_based() {
        let position = EntryPosition::top(2).child(0).child(4);

        assert_eq!(position.to_string(), "3.1.5");
        assert_eq!(position.indices(), &[2, 0, 4]);
        assert_eq!(position.depth(), 3);
    }

    #[test]
    fn test_position_parent() {
        let position = EntryPosition::top(1).child(3);

        assert_eq!(position.parent(), Some(EntryPosition::top(1)));
        assert_eq!(EntryPosition::top(1).parent(), None);
    }
}
