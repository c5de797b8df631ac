//! Navigation tree model for rbook.
//!
//! This crate provides:
//! - [`RawEntry`]: authored sidebar records (VuePress and VitePress dialects)
//! - [`load_tree`]: all-or-nothing validation into an immutable [`NavTree`]
//! - [`NavTree::routes`]: reading-order linearization with breadcrumb chains
//! - [`NavTree::resolve`]: exact route lookup
//!
//! The crate does no I/O. Loading sidebar files lives in `rbook-site`.
//!
//! # Quick Start
//!
//! ```
//! use rbook_nav::{RawEntry, load_tree};
//!
//! let raw = vec![
//!     RawEntry::page("Intro", "/intro"),
//!     RawEntry::page("Setup", "/setup").with_child(RawEntry::page("Install", "/setup/install")),
//! ];
//! let tree = load_tree(&raw).unwrap();
//!
//! let routes: Vec<_> = tree.routes().map(|r| r.path).collect();
//! assert_eq!(routes, ["/intro", "/setup", "/setup/install"]);
//!
//! assert_eq!(tree.resolve("/setup/install").unwrap().title(), "Install");
//! assert_eq!(tree.pager("/setup").unwrap().next.unwrap().path, "/setup/install");
//! ```

mod entry;
mod error;
mod raw;
mod routes;
mod sidebar;
mod tree;

pub use entry::{EntryHints, EntryPosition, Group, Leaf, NavEntry};
pub use error::{EntryRef, NavError, RouteNotFound, ValidationError};
pub use raw::RawEntry;
pub use routes::{Breadcrumb, Pager, RouteLink, RouteRecord, Routes};
pub use sidebar::SidebarItem;
pub use tree::{NavTree, flatten_routes, load_tree};
