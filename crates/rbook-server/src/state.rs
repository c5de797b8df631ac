//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use rbook_config::SiteConfig;
use rbook_site::Site;

use crate::live_reload::LiveReloadManager;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Live navigation snapshots.
    pub(crate) site: Arc<Site>,
    /// Presentation settings for the active build mode.
    pub(crate) site_config: Arc<SiteConfig>,
    /// Live reload manager (if enabled).
    pub(crate) live_reload: Option<LiveReloadManager>,
}
