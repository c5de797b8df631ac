//! Site-level presentation settings.
//!
//! `[site]` in `rbook.toml` is parsed into [`SiteSection`]. At startup it is
//! resolved against the [`BuildMode`] into an immutable [`SiteConfig`],
//! which is shared by reference with the rendering layer.
//!
//! ```toml
//! [site]
//! title = "Rust 编程语言"
//! description = "Rust 编程语言中文文档"
//! base = "/"
//! production_base = "/rust-doc/"
//!
//! [[site.nav]]
//! text = "英文原版"
//! link = "https://doc.rust-lang.org/book/title-page.html"
//!
//! [site.edit_link]
//! pattern = "https://github.com/eveningwater/rust-doc/edit/main/docs/:path"
//! text = "在 GitHub 上编辑此页"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Environment variable selecting the build mode.
pub const MODE_ENV_VAR: &str = "RBOOK_MODE";

/// Placeholder replaced by the document path in edit-link patterns.
const EDIT_PATH_PLACEHOLDER: &str = ":path";

/// Whether the site is built for local preview or for publishing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Local preview, served from `site.base`.
    #[default]
    Development,
    /// Published build, served from `site.production_base`.
    Production,
}

impl BuildMode {
    /// Read the mode from `RBOOK_MODE`, defaulting to development.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the variable holds an unknown mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Result<Self, ConfigError> {
        match value {
            None | Some("") => Ok(Self::default()),
            Some(value) => value
                .parse()
                .map_err(|e: ConfigError| ConfigError::Validation(format!("{MODE_ENV_VAR}: {e}"))),
        }
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(ConfigError::Validation(format!(
                "unknown build mode '{other}' (expected development or production)"
            ))),
        }
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Development => "development",
            Self::Production => "production",
        })
    }
}

/// Top navigation bar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Link label.
    pub text: String,
    /// Route or external URL.
    pub link: String,
}

/// Social profile link shown in the header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Icon name understood by the theme (e.g. `github`).
    pub icon: String,
    /// Target URL.
    pub link: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterConfig {
    /// Footer text.
    pub message: String,
}

/// Labels of the previous/next page links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocFooterConfig {
    pub prev: String,
    pub next: String,
}

impl Default for DocFooterConfig {
    fn default() -> Self {
        Self {
            prev: "上一篇".to_owned(),
            next: "下一篇".to_owned(),
        }
    }
}

/// In-page outline settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    /// Heading levels listed in the outline, ascending.
    pub levels: Vec<u8>,
    /// Outline heading.
    pub label: String,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            levels: vec![2, 3],
            label: "目录".to_owned(),
        }
    }
}

/// "Edit this page" link settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditLinkConfig {
    /// URL pattern; `:path` is replaced by the document path.
    pub pattern: String,
    /// Link label.
    #[serde(default = "default_edit_link_text")]
    pub text: String,
}

fn default_edit_link_text() -> String {
    "在 GitHub 上编辑此页".to_owned()
}

/// "Last updated" stamp settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LastUpdatedConfig {
    pub enabled: bool,
    pub text: String,
}

impl Default for LastUpdatedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            text: "最后更新".to_owned(),
        }
    }
}

/// `[site]` section as parsed from TOML.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub title: String,
    pub description: String,
    pub lang: String,
    pub logo: Option<String>,
    /// Root path prefix in development mode.
    pub base: String,
    /// Root path prefix in production mode.
    pub production_base: String,
    pub nav: Vec<NavLink>,
    pub social_links: Vec<SocialLink>,
    pub footer: Option<FooterConfig>,
    pub doc_footer: DocFooterConfig,
    pub outline: OutlineConfig,
    pub edit_link: Option<EditLinkConfig>,
    pub last_updated: LastUpdatedConfig,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Rust 编程语言".to_owned(),
            description: "Rust 编程语言中文文档".to_owned(),
            lang: "zh-CN".to_owned(),
            logo: None,
            base: "/".to_owned(),
            production_base: "/rust-doc/".to_owned(),
            nav: Vec::new(),
            social_links: Vec::new(),
            footer: None,
            doc_footer: DocFooterConfig::default(),
            outline: OutlineConfig::default(),
            edit_link: None,
            last_updated: LastUpdatedConfig::default(),
        }
    }
}

impl SiteSection {
    /// Validate presentation settings.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title cannot be empty".to_owned()));
        }
        require_base(&self.base, "site.base")?;
        require_base(&self.production_base, "site.production_base")?;

        for (i, link) in self.nav.iter().enumerate() {
            if link.text.is_empty() || link.link.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "site.nav[{i}] needs both text and link"
                )));
            }
        }
        for (i, link) in self.social_links.iter().enumerate() {
            if link.icon.is_empty() || link.link.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "site.social_links[{i}] needs both icon and link"
                )));
            }
        }

        let levels = &self.outline.levels;
        if levels.is_empty() || levels.iter().any(|l| !(1..=6).contains(l)) {
            return Err(ConfigError::Validation(
                "site.outline.levels must list heading levels between 1 and 6".to_owned(),
            ));
        }
        if levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::Validation(
                "site.outline.levels must be strictly ascending".to_owned(),
            ));
        }

        if let Some(edit_link) = &self.edit_link
            && !edit_link.pattern.contains(EDIT_PATH_PLACEHOLDER)
        {
            return Err(ConfigError::Validation(format!(
                "site.edit_link.pattern must contain {EDIT_PATH_PLACEHOLDER}"
            )));
        }

        Ok(())
    }
}

/// Require a root path prefix to start and end with `/`.
fn require_base(base: &str, field: &str) -> Result<(), ConfigError> {
    if !base.starts_with('/') || !base.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start and end with '/', got '{base}'"
        )));
    }
    Ok(())
}

/// Immutable site configuration for the rendering layer.
///
/// Built once at startup by [`Config::site`](crate::Config::site).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
    pub lang: String,
    /// Root path prefix for the active mode.
    pub base: String,
    pub mode: BuildMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub nav: Vec<NavLink>,
    pub social_links: Vec<SocialLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FooterConfig>,
    pub doc_footer: DocFooterConfig,
    pub outline: OutlineConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_link: Option<EditLinkConfig>,
    pub last_updated: LastUpdatedConfig,
}

impl SiteConfig {
    pub(crate) fn resolve(section: &SiteSection, mode: BuildMode) -> Self {
        let base = match mode {
            BuildMode::Development => section.base.clone(),
            BuildMode::Production => section.production_base.clone(),
        };

        Self {
            title: section.title.clone(),
            description: section.description.clone(),
            lang: section.lang.clone(),
            base,
            mode,
            logo: section.logo.clone(),
            nav: section.nav.clone(),
            social_links: section.social_links.clone(),
            footer: section.footer.clone(),
            doc_footer: section.doc_footer.clone(),
            outline: section.outline.clone(),
            edit_link: section.edit_link.clone(),
            last_updated: section.last_updated.clone(),
        }
    }

    /// Public URL of a route under the active base.
    ///
    /// Routes are rooted at `/`; the base replaces that root.
    #[must_use]
    pub fn url_for(&self, route: &str) -> String {
        let route = route.strip_prefix('/').unwrap_or(route);
        format!("{}{route}", self.base)
    }

    /// "Edit this page" URL for a document path relative to the docs root.
    #[must_use]
    pub fn edit_url(&self, document: &str) -> Option<String> {
        self.edit_link
            .as_ref()
            .map(|link| link.pattern.replace(EDIT_PATH_PLACEHOLDER, document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn section() -> SiteSection {
        SiteSection::default()
    }

    #[test]
    fn test_mode_from_env_value() {
        assert_eq!(BuildMode::from_env_value(None).unwrap(), BuildMode::Development);
        assert_eq!(BuildMode::from_env_value(Some("")).unwrap(), BuildMode::Development);
        assert_eq!(
            BuildMode::from_env_value(Some("production")).unwrap(),
            BuildMode::Production
        );
        assert_eq!(BuildMode::from_env_value(Some("PROD")).unwrap(), BuildMode::Production);

        let err = BuildMode::from_env_value(Some("staging")).unwrap_err();
        assert!(err.to_string().contains("RBOOK_MODE"));
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn test_mode_display_round_trips() {
        for mode in [BuildMode::Development, BuildMode::Production] {
            assert_eq!(mode.to_string().parse::<BuildMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_resolve_picks_base_for_mode() {
        let dev = SiteConfig::resolve(&section(), BuildMode::Development);
        let prod = SiteConfig::resolve(&section(), BuildMode::Production);

        assert_eq!(dev.base, "/");
        assert_eq!(prod.base, "/rust-doc/");
    }

    #[test]
    fn test_url_for_joins_base() {
        let prod = SiteConfig::resolve(&section(), BuildMode::Production);
        let dev = SiteConfig::resolve(&section(), BuildMode::Development);

        assert_eq!(
            prod.url_for("/docs/introduce/introduce"),
            "/rust-doc/docs/introduce/introduce"
        );
        assert_eq!(dev.url_for("/docs/introduce/introduce"), "/docs/introduce/introduce");
        assert_eq!(prod.url_for("/"), "/rust-doc/");
    }

    #[test]
    fn test_edit_url_replaces_placeholder() {
        let mut section = section();
        section.edit_link = Some(EditLinkConfig {
            pattern: "https://github.com/eveningwater/rust-doc/edit/main/:path".to_owned(),
            text: default_edit_link_text(),
        });
        let site = SiteConfig::resolve(&section, BuildMode::Development);

        assert_eq!(
            site.edit_url("docs/structs/structs.md").as_deref(),
            Some("https://github.com/eveningwater/rust-doc/edit/main/docs/structs/structs.md")
        );
    }

    #[test]
    fn test_edit_url_absent_without_edit_link() {
        let site = SiteConfig::resolve(&section(), BuildMode::Development);

        assert!(site.edit_url("docs/a.md").is_none());
    }

    #[test]
    fn test_validate_default_passes() {
        assert!(section().validate().is_ok());
    }

    #[test]
    fn test_validate_base_needs_slashes() {
        let mut section = section();
        section.production_base = "/rust-doc".to_owned();

        let err = section.validate().unwrap_err();

        assert!(err.to_string().contains("site.production_base"));
    }

    #[test]
    fn test_validate_outline_levels() {
        let mut section = section();
        section.outline.levels = vec![3, 2];
        assert!(section.validate().unwrap_err().to_string().contains("ascending"));

        section.outline.levels = vec![2, 7];
        assert!(section.validate().unwrap_err().to_string().contains("between 1 and 6"));

        section.outline.levels = Vec::new();
        assert!(section.validate().is_err());
    }

    #[test]
    fn test_validate_edit_link_placeholder() {
        let mut section = section();
        section.edit_link = Some(EditLinkConfig {
            pattern: "https://github.com/eveningwater/rust-doc/edit/main/".to_owned(),
            text: default_edit_link_text(),
        });

        assert!(section.validate().unwrap_err().to_string().contains(":path"));
    }

    #[test]
    fn test_validate_empty_title() {
        let mut section = section();
        section.title = "  ".to_owned();

        assert!(section.validate().unwrap_err().to_string().contains("site.title"));
    }

    #[test]
    fn test_validate_nav_link_needs_text() {
        let mut section = section();
        section.nav.push(NavLink {
            text: String::new(),
            link: "/".to_owned(),
        });

        assert!(section.validate().unwrap_err().to_string().contains("site.nav[0]"));
    }

    #[test]
    fn test_site_config_serialization() {
        let mut section = section();
        section.social_links.push(SocialLink {
            icon: "github".to_owned(),
            link: "https://github.com/eveningwater/rust-doc".to_owned(),
        });
        let site = SiteConfig::resolve(&section, BuildMode::Production);

        let json = serde_json::to_value(&site).unwrap();

        assert_eq!(json["base"], "/rust-doc/");
        assert_eq!(json["mode"], "production");
        assert_eq!(json["socialLinks"][0]["icon"], "github");
        assert_eq!(json["docFooter"]["prev"], "上一篇");
        assert_eq!(json["outline"]["levels"], serde_json::json!([2, 3]));
        assert!(json.get("editLink").is_none());
        assert!(json.get("logo").is_none());
    }
}
