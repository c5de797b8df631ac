//! Sidebar loading and live site snapshots for rbook.
//!
//! This crate provides:
//! - [`SidebarSource`]: where authored sidebar records come from
//! - [`Site`]: validated navigation published as swappable snapshots
//! - [`SiteState`]: page resolution and route-to-document mapping
//!
//! # Quick Start
//!
//! ```
//! use rbook_nav::RawEntry;
//! use rbook_site::{Site, StaticSidebarSource};
//!
//! let source = StaticSidebarSource::new(vec![
//!     RawEntry::page("Intro", "/docs/intro"),
//!     RawEntry::page("Setup", "/docs/setup"),
//! ]);
//! let site = Site::load(Box::new(source), "book").unwrap();
//!
//! let page = site.snapshot().page("/docs/intro").unwrap();
//! assert_eq!(page.document, "docs/intro.md");
//! assert_eq!(page.pager.next.unwrap().path, "/docs/setup");
//! ```

mod error;
mod site;
mod site_state;
mod source;

pub use error::{SiteError, SourceError};
pub use site::Site;
pub use site_state::{MissingDocument, PageView, SiteState};
pub use source::{
    FsSidebarSource, SidebarFormat, SidebarSource, StaticSidebarSource, parse_sidebar,
};
