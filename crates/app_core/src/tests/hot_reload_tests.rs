use super::*;

use crossbeam_channel::unbounded;
use tempfile::TempDir;

fn options_for(dir: &TempDir) -> HotReloadOptions {
    HotReloadOptions {
        poll_interval: Duration::from_millis(20),
        debounce: Duration::ZERO,
        ..HotReloadOptions::new(vec![dir.path().to_path_buf()], &["json"])
    }
}

#[test]
fn enabled_in_development_or_debug_mode() {
    assert!(enabled(Some("development"), false));
    assert!(enabled(None, true));
    assert!(!enabled(Some("production"), false));
    assert!(!enabled(None, false));
}

#[test]
fn extension_filter_is_case_insensitive() {
    let options = HotReloadOptions::new(Vec::new(), &["JSON"]);
    assert!(options.watches(Path::new("config.json")));
    assert!(options.watches(Path::new("locales/app_en.Json")));
    assert!(!options.watches(Path::new("main.rs")));

    let everything = HotReloadOptions::new(Vec::new(), &[]);
    assert!(everything.watches(Path::new("main.rs")));
}

#[test]
fn tracker_reports_new_and_modified_files_only() {
    let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
    let t1 = t0 + Duration::from_secs(1);
    let mut tracker = ChangeTracker::with_baseline([(PathBuf::from("a.json"), t0)]);

    assert!(tracker.changed(&[(PathBuf::from("a.json"), t0)]).is_empty());

    let changed = tracker.changed(&[
        (PathBuf::from("a.json"), t1),
        (PathBuf::from("b.json"), t0),
    ]);
    assert_eq!(changed.len(), 2);

    tracker.record(PathBuf::from("a.json"), t1);
    assert!(tracker.changed(&[(PathBuf::from("a.json"), t1)]).is_empty());
}

#[test]
fn debouncer_limits_each_path_separately() {
    let mut debouncer = Debouncer::new(Duration::from_secs(1));
    let start = Instant::now();
    let a = Path::new("a.json");
    let b = Path::new("b.json");

    assert!(debouncer.admit(a, start));
    assert!(!debouncer.admit(a, start + Duration::from_millis(500)));
    assert!(debouncer.admit(b, start + Duration::from_millis(500)));
    assert!(debouncer.admit(a, start + Duration::from_millis(1000)));
}

#[test]
fn reports_files_created_after_spawn() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("config.json"), "{}").expect("seed");
    let (tx, rx) = unbounded();

    let watcher = HotReloader::spawn(options_for(&dir), tx).expect("spawn");
    let created = dir.path().join("app_de.json");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write txt");
    fs::write(&created, "{}").expect("write json");

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(event.path, created);
    assert_eq!(event.kind, ChangeKind::Modified);

    watcher.stop();
}

#[test]
fn tracker_reports_and_forgets_removed_files() {
    let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
    let mut tracker = ChangeTracker::with_baseline([
        (PathBuf::from("a.json"), t0),
        (PathBuf::from("b.json"), t0),
    ]);

    let removed = tracker.removed(&[(PathBuf::from("a.json"), t0)]);
    assert_eq!(removed, vec![PathBuf::from("b.json")]);

    tracker.forget(&removed[0]);
    assert_eq!(tracker.len(), 1);
    assert!(tracker.removed(&[(PathBuf::from("a.json"), t0)]).is_empty());
}

#[test]
fn reports_deleted_files_once() {
    let dir = TempDir::new().expect("tempdir");
    let doomed = dir.path().join("app_fr.json");
    fs::write(&doomed, "{}").expect("seed");
    let (tx, rx) = unbounded();

    let watcher = HotReloader::spawn(options_for(&dir), tx).expect("spawn");
    fs::remove_file(&doomed).expect("remove");

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    assert_eq!(
        event,
        ReloadEvent {
            path: doomed,
            kind: ChangeKind::Removed,
        }
    );
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());

    watcher.stop();
}

#[test]
fn dropping_the_handle_stops_the_thread() {
    let dir = TempDir::new().expect("tempdir");
    let (tx, rx) = unbounded();

    let watcher = HotReloader::spawn(options_for(&dir), tx).expect("spawn");
    drop(watcher);

    assert_eq!(
        rx.recv_timeout(Duration::from_secs(5)),
        Err(crossbeam_channel::RecvTimeoutError::Disconnected)
    );
}
