//! Event debouncing for live reload.
//!
//! Editors emit several events per save (truncate, write, rename of a swap
//! file). The debouncer folds them into one event per path, emitted once the
//! path has been quiet for the debounce window.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FsEventKind {
    Created,
    Modified,
    Removed,
}

/// A debounced filesystem event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FsEvent {
    pub path: PathBuf,
    pub kind: FsEventKind,
}

struct Pending {
    kind: FsEventKind,
    deadline: Instant,
}

/// Thread-safe event debouncer.
pub(crate) struct EventDebouncer {
    pending: Mutex<HashMap<PathBuf, Pending>>,
    window: Duration,
}

impl EventDebouncer {
    pub(crate) fn new(window: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            window,
        }
    }

    /// Record an event, pushing back the path's deadline.
    ///
    /// # Panics
    ///
    /// Panics if the internal `Mutex` is poisoned.
    pub(crate) fn record(&self, path: PathBuf, kind: FsEventKind) {
        use std::collections::hash_map::Entry;

        let mut pending = self.pending.lock().unwrap();
        let deadline = Instant::now() + self.window;

        match pending.entry(path) {
            Entry::Vacant(entry) => {
                entry.insert(Pending { kind, deadline });
            }
            Entry::Occupied(mut entry) => match merge(entry.get().kind, kind) {
                Some(kind) => *entry.get_mut() = Pending { kind, deadline },
                None => {
                    entry.remove();
                }
            },
        }
    }

    /// Take every event whose deadline has passed.
    ///
    /// # Panics
    ///
    /// Panics if the internal `Mutex` is poisoned.
    pub(crate) fn drain_ready(&self) -> Vec<FsEvent> {
        let mut pending = self.pending.lock().unwrap();
        let now = Instant::now();

        let mut ready = Vec::new();
        pending.retain(|path, event| {
            if event.deadline <= now {
                ready.push(FsEvent {
                    path: path.clone(),
                    kind: event.kind,
                });
                false
            } else {
                true
            }
        });
        ready
    }
}

/// Fold a new event into a pending one. `None` drops both.
#[allow(clippy::match_same_arms)]
fn merge(pending: FsEventKind, new: FsEventKind) -> Option<FsEventKind> {
    use FsEventKind::{Created, Modified, Removed};

    match (pending, new) {
        // Swap file created and deleted within the window
        (Created, Removed) => None,
        (Created, _) => Some(Created),
        (Modified, Created) => Some(Created),
        (Modified, Modified) => Some(Modified),
        (Modified, Removed) => Some(Removed),
        // Atomic save: old file removed, new one renamed into place
        (Removed, Created) => Some(Modified),
        (Removed, _) => Some(Removed),
    }
}
