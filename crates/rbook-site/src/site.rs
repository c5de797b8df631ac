//! Live site with reloadable snapshots.
//!
//! [`Site`] reads authored sidebar records from a [`SidebarSource`],
//! validates them, and publishes the result as an immutable
//! [`SiteState`] snapshot.
//!
//! # Thread Safety
//!
//! `Site` is designed for concurrent access:
//! - `snapshot()` returns `Arc<SiteState>` with minimal locking (just Arc clone)
//! - `reload_if_needed()` uses double-checked locking for efficient cache validation
//! - `invalidate()` is lock-free (atomic flag)
//!
//! A reload that fails never publishes. Readers keep the previous snapshot
//! and the failure is available from [`Site::last_error`] until the next
//! successful reload.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use rbook_nav::load_tree;

use crate::error::SiteError;
use crate::site_state::SiteState;
use crate::source::SidebarSource;

/// Navigation tree published as swappable snapshots.
///
/// # Thread Safety
///
/// This struct is designed for concurrent access without external locking:
/// - Uses internal `RwLock<Arc<SiteState>>` for the current snapshot
/// - Uses `Mutex<()>` for serializing reload operations
/// - Uses `AtomicBool` for cache validity tracking
pub struct Site {
    source: Box<dyn SidebarSource>,
    source_dir: PathBuf,
    /// Mutex for serializing reload operations.
    reload_lock: Mutex<()>,
    /// Current snapshot (atomically swappable).
    current_state: RwLock<Arc<SiteState>>,
    /// Cache validity flag.
    cache_valid: AtomicBool,
    /// Failure of the most recent reload, cleared on success.
    last_error: RwLock<Option<Arc<SiteError>>>,
}

impl Site {
    /// Read, validate and publish the initial snapshot.
    ///
    /// # Arguments
    ///
    /// * `source` - Supplier of authored sidebar records
    /// * `source_dir` - Directory routes resolve against for markdown documents
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the sidebar cannot be read or fails validation.
    pub fn load(
        source: Box<dyn SidebarSource>,
        source_dir: impl Into<PathBuf>,
    ) -> Result<Self, SiteError> {
        let source_dir = source_dir.into();
        let state = build_state(source.as_ref(), &source_dir)?;

        tracing::info!(
            routes = state.tree().route_count(),
            entries = state.tree().entries().len(),
            "Loaded sidebar"
        );

        Ok(Self {
            source,
            source_dir,
            reload_lock: Mutex::new(()),
            current_state: RwLock::new(Arc::new(state)),
            cache_valid: AtomicBool::new(true),
            last_error: RwLock::new(None),
        })
    }

    /// Get current snapshot.
    ///
    /// Returns the published snapshot without checking cache validity.
    /// Prefer [`reload_if_needed`](Self::reload_if_needed) when the site may
    /// have been invalidated.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Arc<SiteState> {
        Arc::clone(&self.current_state.read().unwrap())
    }

    /// Reload the snapshot from the source if it was invalidated.
    ///
    /// Uses double-checked locking pattern:
    /// 1. Fast path: return current snapshot if cache valid
    /// 2. Slow path: acquire `reload_lock`, recheck, then reload
    ///
    /// A failed reload keeps the current snapshot, records the error for
    /// [`last_error`](Self::last_error), and is not retried until the next
    /// [`invalidate`](Self::invalidate). An invalidation that arrives while a
    /// reload is reading the source makes the following call reload again.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload_if_needed(&self) -> Arc<SiteState> {
        // Fast path: cache valid
        if self.cache_valid.load(Ordering::Acquire) {
            return self.snapshot();
        }

        let _guard = self.reload_lock.lock().unwrap();

        // Double-check after acquiring lock. Claiming the flag before reading
        // leaves any invalidate() that lands mid-reload pending.
        if self.cache_valid.swap(true, Ordering::AcqRel) {
            return self.snapshot();
        }

        match build_state(self.source.as_ref(), &self.source_dir) {
            Ok(state) => {
                tracing::info!(routes = state.tree().route_count(), "Reloaded sidebar");
                *self.last_error.write().unwrap() = None;
                let state = Arc::new(state);
                *self.current_state.write().unwrap() = Arc::clone(&state);
                state
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sidebar reload failed, keeping previous snapshot");
                *self.last_error.write().unwrap() = Some(Arc::new(e));
                self.snapshot()
            }
        }
    }

    /// Invalidate the current snapshot.
    ///
    /// Marks cache as invalid. Next `reload_if_needed()` will reload.
    /// Current readers continue using their existing `Arc<SiteState>`.
    pub fn invalidate(&self) {
        self.cache_valid.store(false, Ordering::Release);
    }

    /// Failure of the most recent reload, if it failed.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn last_error(&self) -> Option<Arc<SiteError>> {
        self.last_error.read().unwrap().clone()
    }
}

fn build_state(
    source: &dyn SidebarSource,
    source_dir: &std::path::Path,
) -> Result<SiteState, SiteError> {
    let raw = source.read()?;
    let tree = load_tree(&raw)?;
    Ok(SiteState::new(tree, source_dir))
}
