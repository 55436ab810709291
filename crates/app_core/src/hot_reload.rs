//! Development file watcher.
//!
//! A background thread polls the configured roots and reports modified and
//! removed files over a channel. The UI thread drains the channel and decides what to
//! reload; the watcher itself never touches application state.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
    time::{Duration, Instant, SystemTime},
};

use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Created or modified.
    Modified,
    Removed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReloadEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

#[derive(Debug, Clone)]
pub struct HotReloadOptions {
    pub roots: Vec<PathBuf>,
    /// Lowercase extensions without the dot. Empty watches every file.
    pub extensions: Vec<String>,
    pub poll_interval: Duration,
    pub debounce: Duration,
}

impl HotReloadOptions {
    pub fn new(roots: Vec<PathBuf>, extensions: &[&str]) -> Self {
        Self {
            roots,
            extensions: extensions.iter().map(|ext| ext.to_ascii_lowercase()).collect(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    fn watches(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// Whether the watcher should run for this environment.
pub fn enabled(env: Option<&str>, debug_mode: bool) -> bool {
    env == Some("development") || debug_mode
}

/// Last seen modification time per file.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    seen: HashMap<PathBuf, SystemTime>,
}

impl ChangeTracker {
    pub fn with_baseline(files: impl IntoIterator<Item = (PathBuf, SystemTime)>) -> Self {
        Self {
            seen: files.into_iter().collect(),
        }
    }

    /// Files that are new or whose modification time moved since recorded.
    pub fn changed(&self, files: &[(PathBuf, SystemTime)]) -> Vec<(PathBuf, SystemTime)> {
        files
            .iter()
            .filter(|(path, modified)| self.seen.get(path) != Some(modified))
            .cloned()
            .collect()
    }

    /// Recorded files missing from `files`.
    pub fn removed(&self, files: &[(PathBuf, SystemTime)]) -> Vec<PathBuf> {
        self.seen
            .keys()
            .filter(|seen| !files.iter().any(|(path, _)| path == *seen))
            .cloned()
            .collect()
    }

    pub fn record(&mut self, path: PathBuf, modified: SystemTime) {
        self.seen.insert(path, modified);
    }

    pub fn forget(&mut self, path: &Path) {
        self.seen.remove(path);
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Per-path rate limit.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    last: HashMap<PathBuf, Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last: HashMap::new(),
        }
    }

    /// True when `path` has not fired within the window before `now`.
    pub fn admit(&mut self, path: &Path, now: Instant) -> bool {
        if let Some(last) = self.last.get(path) {
            if now.saturating_duration_since(*last) < self.window {
                return false;
            }
        }
        self.last.insert(path.to_path_buf(), now);
        true
    }

    pub fn forget(&mut self, path: &Path) {
        self.last.remove(path);
    }
}

/// Handle to the watcher thread. Dropping it stops and joins the thread.
pub struct HotReloader {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl HotReloader {
    pub fn spawn(options: HotReloadOptions, events: Sender<ReloadEvent>) -> io::Result<Self> {
        // Baseline on the caller's thread so edits made right after spawn
        // are reported.
        let tracker = ChangeTracker::with_baseline(scan(&options));
        let (stop_tx, stop_rx) = bounded::<()>(1);

        info!(roots = ?options.roots, "hot reload watcher starting");
        let handle = thread::Builder::new()
            .name("hot-reload".into())
            .spawn(move || {
                let mut tracker = tracker;
                let mut debouncer = Debouncer::new(options.debounce);
                loop {
                    match stop_rx.recv_timeout(options.poll_interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }

                    let files = scan(&options);
                    for (path, modified) in tracker.changed(&files) {
                        // Held back changes stay unrecorded and are
                        // reported once the window has passed.
                        if !debouncer.admit(&path, Instant::now()) {
                            continue;
                        }
                        tracker.record(path.clone(), modified);
                        debug!(path = %path.display(), "file changed");
                        let event = ReloadEvent {
                            path,
                            kind: ChangeKind::Modified,
                        };
                        if events.send(event).is_err() {
                            debug!("reload listener gone; watcher exiting");
                            return;
                        }
                    }
                    for path in tracker.removed(&files) {
                        tracker.forget(&path);
                        debouncer.forget(&path);
                        debug!(path = %path.display(), "file removed");
                        let event = ReloadEvent {
                            path,
                            kind: ChangeKind::Removed,
                        };
                        if events.send(event).is_err() {
                            debug!("reload listener gone; watcher exiting");
                            return;
                        }
                    }
                }
                debug!("hot reload watcher stopped");
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("hot reload watcher panicked");
            }
        }
    }
}

impl Drop for HotReloader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn scan(options: &HotReloadOptions) -> Vec<(PathBuf, SystemTime)> {
    let mut files = Vec::new();
    for root in &options.roots {
        collect(root, options, &mut files);
    }
    files
}

fn collect(path: &Path, options: &HotReloadOptions, files: &mut Vec<(PathBuf, SystemTime)>) {
    let Ok(metadata) = fs::metadata(path) else {
        return;
    };

    if metadata.is_file() {
        if options.watches(path) {
            if let Ok(modified) = metadata.modified() {
                files.push((path.to_path_buf(), modified));
            }
        }
        return;
    }

    let Ok(entries) = fs::read_dir(path) else {
        return;
    };
    for entry in entries.filter_map(Result::ok) {
        let child = entry.path();
        let hidden = child
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with('.') || name == "target");
        if !hidden {
            collect(&child, options, files);
        }
    }
}

#[cfg(test)]
#[path = "tests/hot_reload_tests.rs"]
mod tests;
