//! Authored sidebar records.
//!
//! [`RawEntry`] is the unvalidated shape a maintainer writes by hand. It
//! accepts both sidebar dialects used by the book's site generators:
//!
//! ```yaml
//! # VuePress
//! - title: 入门
//!   path: /docs/getting-started/getting-started
//!   collapsable: true
//!   sidebarDepth: 1
//!   children:
//!     - title: 安装
//!       path: /docs/getting-started/install
//!
//! # VitePress
//! - text: 入门
//!   link: /docs/getting-started/getting-started
//!   items:
//!     - text: 安装
//!       link: /docs/getting-started/install
//! ```
//!
//! Serialization always uses the canonical keys (`title`, `path`,
//! `children`, `collapsible`, `collapsed`, `sidebarDepth`).

use serde::{Deserialize, Serialize};

/// One authored sidebar record, nested through `children`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawEntry {
    /// Display label.
    #[serde(alias = "text")]
    pub title: String,
    /// Route of the document, rooted at the site base.
    #[serde(default, alias = "link", skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Whether the rendering layer lets the reader fold this entry.
    #[serde(
        default,
        alias = "collapsable",
        skip_serializing_if = "Option::is_none"
    )]
    pub collapsible: Option<bool>,
    /// Whether the entry starts folded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Heading levels exposed by the rendering layer (top-level entries only).
    #[serde(
        default,
        rename = "sidebarDepth",
        alias = "sidebar_depth",
        skip_serializing_if = "Option::is_none"
    )]
    pub sidebar_depth: Option<u8>,
    /// Nested records, in display order.
    #[serde(default, alias = "items", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawEntry>,
}

impl RawEntry {
    /// Create a record with a title and a path.
    #[must_use]
    pub fn page(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Create a path-less heading record.
    #[must_use]
    pub fn heading(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Append a child record.
    #[must_use]
    pub fn with_child(mut self, child: RawEntry) -> Self {
        self.children.push(child);
        self
    }

    /// Set the `sidebarDepth` hint.
    #[must_use]
    pub fn with_sidebar_depth(mut self, depth: u8) -> Self {
        self.sidebar_depth = Some(depth);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_vuepress_dialect() {
        let json = r#"[
            {
                "title": "入门",
                "path": "/doc/getting-started",
                "collapsable": true,
                "sidebarDepth": 1,
                "children": [{"title": "安装", "path": "/doc/install", "collapsable": true}]
            }
        ]"#;

        let entries: Vec<RawEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "入门");
        assert_eq!(entries[0].path.as_deref(), Some("/doc/getting-started"));
        assert_eq!(entries[0].collapsible, Some(true));
        assert_eq!(entries[0].sidebar_depth, Some(1));
        assert_eq!(entries[0].children[0].path.as_deref(), Some("/doc/install"));
    }

    #[test]
    fn test_parse_vitepress_dialect() {
        let yaml = r"
- text: 猜一猜游戏
  link: /docs/guess-game/guess-game
- text: 附录
  collapsed: true
  items:
    - text: '附录A: 关键字'
      link: /docs/appendix/appendix-a
";

        let entries: Vec<RawEntry> = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(entries[0].title, "猜一猜游戏");
        assert_eq!(entries[0].path.as_deref(), Some("/docs/guess-game/guess-game"));
        assert!(entries[1].path.is_none());
        assert_eq!(entries[1].collapsed, Some(true));
        assert_eq!(entries[1].children[0].title, "附录A: 关键字");
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let json = r#"[{"title": "Intro", "path": "/intro", "icon": "book"}]"#;

        let result: Result<Vec<RawEntry>, _> = serde_json::from_str(json);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("icon"));
    }

    #[test]
    fn test_serialize_uses_canonical_keys() {
        let entry = RawEntry::page("Intro", "/intro").with_sidebar_depth(2);

        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["title"], "Intro");
        assert_eq!(json["path"], "/intro");
        assert_eq!(json["sidebarDepth"], 2);
        assert!(json.get("children").is_none());
        assert!(json.get("collapsible").is_none());
    }
}
