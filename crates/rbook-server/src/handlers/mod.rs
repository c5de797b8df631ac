//! HTTP request handlers.

pub(crate) mod config;
pub(crate) mod pages;
pub(crate) mod routes;
pub(crate) mod sidebar;
