//! Live reload manager.
//!
//! Watches the sidebar file, reloads the site when it changes, and tells
//! connected clients whether the edit produced a valid tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rbook_site::Site;
use serde::Serialize;
use tokio::sync::{broadcast, mpsc};

use super::debouncer::{EventDebouncer, FsEventKind};

/// Message sent to connected WebSocket clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub(crate) enum ReloadEvent {
    /// A new navigation snapshot is live.
    Reload,
    /// The edited sidebar was rejected; the previous snapshot stays live.
    Error { message: String },
}

const DEBOUNCE: Duration = Duration::from_millis(100);

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Manages file watching and broadcasting reload events.
pub(crate) struct LiveReloadManager {
    sidebar: PathBuf,
    site: Arc<Site>,
    broadcaster: broadcast::Sender<ReloadEvent>,
    watcher: Option<RecommendedWatcher>,
}

impl LiveReloadManager {
    /// Create a new live reload manager.
    ///
    /// # Arguments
    ///
    /// * `sidebar` - Sidebar file to watch
    /// * `site` - Site to invalidate and reload on change
    /// * `broadcaster` - Broadcast channel sender for reload events
    #[must_use]
    pub(crate) fn new(
        sidebar: PathBuf,
        site: Arc<Site>,
        broadcaster: broadcast::Sender<ReloadEvent>,
    ) -> Self {
        Self {
            sidebar,
            site,
            broadcaster,
            watcher: None,
        }
    }

    /// Start the file watcher.
    ///
    /// Watches the directory containing the sidebar, since editors often
    /// replace the file instead of writing it in place. Spawns background
    /// tasks that debounce events and reload the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the file watcher cannot be created.
    pub(crate) fn start(&mut self) -> Result<(), notify::Error> {
        let (tx, mut rx) = mpsc::channel::<Event>(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                // Callback runs on the watcher thread
                let _ = tx.blocking_send(event);
            }
        })?;

        let watch_dir = self
            .sidebar
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
        self.watcher = Some(watcher);
        tracing::info!(path = %self.sidebar.display(), "Watching sidebar for changes");

        let debouncer = Arc::new(EventDebouncer::new(DEBOUNCE));

        let recorder = Arc::clone(&debouncer);
        let sidebar = self.sidebar.clone();
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                Self::record_event(&event, &sidebar, &recorder);
            }
        });

        let site = Arc::clone(&self.site);
        let broadcaster = self.broadcaster.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(POLL_INTERVAL);
            loop {
                interval.tick().await;

                // One reload covers any number of coalesced events
                if !debouncer.drain_ready().is_empty() {
                    Self::reload_blocking(Arc::clone(&site), broadcaster.clone()).await;
                }
            }
        });

        Ok(())
    }

    /// Record events that touch the sidebar file.
    fn record_event(event: &Event, sidebar: &Path, debouncer: &EventDebouncer) {
        let kind = match event.kind {
            EventKind::Create(_) => FsEventKind::Created,
            EventKind::Modify(_) => FsEventKind::Modified,
            EventKind::Remove(_) => FsEventKind::Removed,
            _ => return,
        };

        for path in &event.paths {
            if !Self::is_sidebar(path, sidebar) {
                continue;
            }
            debouncer.record(path.clone(), kind);
            tracing::debug!(path = %path.display(), ?kind, "Recorded sidebar event");
        }
    }

    /// Whether `path` names the sidebar file.
    ///
    /// Watcher paths are absolute while the configured path may not be, so
    /// compare file names once the directories agree.
    fn is_sidebar(path: &Path, sidebar: &Path) -> bool {
        if path == sidebar {
            return true;
        }
        path.file_name().is_some_and(|name| Some(name) == sidebar.file_name())
            && match (path.parent(), sidebar.parent()) {
                (Some(a), Some(b)) => a.ends_with(b),
                _ => false,
            }
    }

    /// Invalidate and reload the site, then notify clients.
    fn reload(site: &Site, broadcaster: &broadcast::Sender<ReloadEvent>) -> ReloadEvent {
        let start = Instant::now();

        site.invalidate();
        let snapshot = site.reload_if_needed();

        let event = match site.last_error() {
            Some(err) => ReloadEvent::Error {
                message: err.to_string(),
            },
            None => ReloadEvent::Reload,
        };
        // No subscribers is fine
        let _ = broadcaster.send(event.clone());

        tracing::info!(
            routes = snapshot.tree().route_count(),
            ok = matches!(event, ReloadEvent::Reload),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Live reload event processed"
        );
        event
    }

    /// Run [`reload`](Self::reload) on the blocking pool.
    ///
    /// Reading and validating the sidebar is synchronous file I/O.
    async fn reload_blocking(
        site: Arc<Site>,
        broadcaster: broadcast::Sender<ReloadEvent>,
    ) -> Option<ReloadEvent> {
        match tokio::task::spawn_blocking(move || Self::reload(&site, &broadcaster)).await {
            Ok(event) => Some(event),
            Err(e) => {
                tracing::error!(error = %e, "Live reload task failed");
                None
            }
        }
    }

    /// Get a receiver for reload events.
    #[must_use]
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<ReloadEvent> {
        self.broadcaster.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use rbook_site::FsSidebarSource;

    use super::*;

    fn site_with_sidebar(content: &str) -> (tempfile::TempDir, PathBuf, Arc<Site>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sidebar.yaml");
        fs::write(&path, content).unwrap();
        let source = FsSidebarSource::new(&path).unwrap();
        let site = Arc::new(Site::load(Box::new(source), dir.path()).unwrap());
        (dir, path, site)
    }

    #[test]
    fn test_reload_event_serialization() {
        let reload = serde_json::to_value(ReloadEvent::Reload).unwrap();
        let error = serde_json::to_value(ReloadEvent::Error {
            message: "duplicate path".to_owned(),
        })
        .unwrap();

        assert_eq!(reload, serde_json::json!({"type": "reload"}));
        assert_eq!(
            error,
            serde_json::json!({"type": "error", "message": "duplicate path"})
        );
    }

    #[test]
    fn test_is_sidebar() {
        let sidebar = Path::new("book/sidebar.yaml");

        assert!(LiveReloadManager::is_sidebar(
            Path::new("/home/me/book/sidebar.yaml"),
            sidebar
        ));
        assert!(LiveReloadManager::is_sidebar(sidebar, sidebar));
        assert!(!LiveReloadManager::is_sidebar(
            Path::new("/home/me/book/sidebar.yaml.swp"),
            sidebar
        ));
        assert!(!LiveReloadManager::is_sidebar(
            Path::new("/home/me/other/sidebar.yaml"),
            sidebar
        ));
    }

    #[test]
    fn test_record_event_ignores_other_files() {
        let debouncer = EventDebouncer::new(Duration::ZERO);
        let sidebar = Path::new("/book/sidebar.yaml");
        let event = Event::new(EventKind::Modify(notify::event::ModifyKind::Any))
            .add_path(PathBuf::from("/book/docs/intro.md"))
            .add_path(PathBuf::from("/book/sidebar.yaml"));

        LiveReloadManager::record_event(&event, sidebar, &debouncer);

        let events = debouncer.drain_ready();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].path, sidebar);
    }

    #[test]
    fn test_reload_broadcasts_reload() {
        let (_dir, path, site) = site_with_sidebar("- title: Intro\n  path: /intro\n");
        let (tx, mut rx) = broadcast::channel(4);
        fs::write(&path, "- title: Intro\n  path: /intro\n- title: Setup\n  path: /setup\n")
            .unwrap();

        let event = LiveReloadManager::reload(&site, &tx);

        assert_eq!(event, ReloadEvent::Reload);
        assert_eq!(rx.try_recv().unwrap(), ReloadEvent::Reload);
        assert_eq!(site.snapshot().tree().route_count(), 2);
    }

    #[tokio::test]
    async fn test_reload_blocking_publishes_edit() {
        let (_dir, path, site) = site_with_sidebar("- title: Intro\n  path: /intro\n");
        let (tx, mut rx) = broadcast::channel(4);
        fs::write(&path, "- title: Setup\n  path: /setup\n").unwrap();

        let event = LiveReloadManager::reload_blocking(Arc::clone(&site), tx).await;

        assert_eq!(event, Some(ReloadEvent::Reload));
        assert_eq!(rx.recv().await.unwrap(), ReloadEvent::Reload);
        assert!(site.snapshot().tree().resolve("/setup").is_ok());
    }

    #[test]
    fn test_reload_invalid_edit_broadcasts_error() {
        let (_dir, path, site) = site_with_sidebar("- title: Intro\n  path: /intro\n");
        let (tx, mut rx) = broadcast::channel(4);
        fs::write(&path, "- title: Intro\n  path: /intro\n- title: Again\n  path: /intro\n")
            .unwrap();

        let event = LiveReloadManager::reload(&site, &tx);

        let ReloadEvent::Error { message } = rx.try_recv().unwrap() else {
            panic!("expected error event, got {event:?}");
        };
        assert!(message.contains("/intro"));
        // Previous snapshot stays live
        assert_eq!(site.snapshot().tree().route_count(), 1);
    }
}
