//! Sidebar view handed to the rendering layer.

use serde::Serialize;

use crate::entry::NavEntry;

/// Sidebar node for UI presentation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarItem {
    /// Display title.
    pub title: String,
    /// Link target, absent for path-less headings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Reader can fold the item.
    pub collapsible: bool,
    /// Item starts folded.
    pub collapsed: bool,
    /// Heading levels to expose under this item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_depth: Option<u8>,
    /// Child items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarItem>,
}

impl SidebarItem {
    pub(crate) fn from_entry(entry: &NavEntry) -> Self {
        let hints = entry.hints();
        Self {
            title: entry.title().to_owned(),
            path: entry.path().map(str::to_owned),
            collapsible: hints.collapsible,
            collapsed: hints.collapsed,
            sidebar_depth: hints.sidebar_depth,
            children: entry.children().iter().map(Self::from_entry).collect(),
        }
    }
}
