//! Eager filesystem loading with atomic snapshot swapping.
//!
//! [`load_dir`] walks a content root once at startup and returns an
//! immutable [`ContentStore`]. [`StoreLoader`] wraps that in a process-wide
//! snapshot holder: readers get an `Arc<ContentStore>` without locking the
//! loader, and hot reloads replace the whole snapshot atomically so no
//! traversal ever observes a torn state.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::store::{ContentStore, DEFAULT_MOUNT};

/// Error loading a content root.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The content root directory does not exist.
    #[error("content root does not exist: {0}")]
    MissingRoot(PathBuf),
    /// The content root could not be read.
    #[error("failed to read content root {path}: {source}")]
    Io {
        /// Directory that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Walk a content root and load every markdown file into a store.
///
/// Hidden entries (leading `.`) are skipped. Files that cannot be read as
/// UTF-8 text, and entries whose names are not UTF-8, are logged and
/// skipped rather than failing the whole load.
/// Virtual paths are the file paths relative to `root`, prefixed with the
/// default mount (`/content`).
///
/// # Errors
///
/// Returns [`LoadError`] when the root is missing or unreadable.
pub fn load_dir(root: &Path) -> Result<ContentStore, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::MissingRoot(root.to_path_buf()));
    }

    let mut entries: Vec<(String, String)> = Vec::new();
    walk(root, DEFAULT_MOUNT, true, &mut entries)?;

    tracing::debug!(document_count = entries.len(), root = %root.display(), "Content root loaded");

    Ok(ContentStore::from_entries(entries))
}

fn walk(
    dir: &Path,
    prefix: &str,
    is_root: bool,
    entries: &mut Vec<(String, String)>,
) -> Result<(), LoadError> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        // Only the root is load-fatal; a vanished subdirectory degrades.
        Err(source) if is_root => {
            return Err(LoadError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Skipping unreadable directory");
            return Ok(());
        }
    };

    for entry in read.filter_map(Result::ok) {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            tracing::warn!(path = %entry.path().display(), "Skipping entry with non-UTF-8 name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let virtual_path = format!("{prefix}/{name}");

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            walk(&path, &virtual_path, false, entries)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            match fs::read_to_string(&path) {
                Ok(text) => entries.push((virtual_path, text)),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                }
            }
        }
    }

    Ok(())
}

/// Process-wide holder for the current content snapshot.
///
/// Designed for concurrent access without external locking:
/// - `get()` returns `Arc<ContentStore>` with only an `Arc` clone
/// - `reload_if_needed()` uses double-checked locking around the reload
/// - `invalidate()` is lock-free (atomic flag)
///
/// A reload always builds a fresh store and swaps it in wholesale; the
/// previous snapshot stays valid for readers that already hold it.
pub struct StoreLoader {
    root: PathBuf,
    /// Serializes reload operations.
    reload_lock: Mutex<()>,
    /// Current snapshot (atomically swappable).
    current: RwLock<Arc<ContentStore>>,
    snapshot_valid: AtomicBool,
}

impl StoreLoader {
    /// Create a loader for a content root. No I/O happens until the first
    /// `reload_if_needed()`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let empty = Arc::new(ContentStore::from_entries::<String, String>([]));
        Self {
            root: root.into(),
            reload_lock: Mutex::new(()),
            current: RwLock::new(empty),
            snapshot_valid: AtomicBool::new(false),
        }
    }

    /// Current snapshot, without checking validity.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn get(&self) -> Arc<ContentStore> {
        self.current.read().unwrap().clone()
    }

    /// Reload from disk if the snapshot has been invalidated.
    ///
    /// A failed load is logged and leaves an empty store in place rather
    /// than propagating; content problems must not take the caller down.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn reload_if_needed(&self) -> Arc<ContentStore> {
        if self.snapshot_valid.load(Ordering::Acquire) {
            return self.get();
        }

        let _guard = self.reload_lock.lock().unwrap();
        if self.snapshot_valid.load(Ordering::Acquire) {
            return self.get();
        }

        let store = match load_dir(&self.root) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(root = %self.root.display(), error = %e, "Content load failed");
                ContentStore::from_entries::<String, String>([])
            }
        };

        tracing::info!(document_count = store.len(), "Content snapshot reloaded");

        let store = Arc::new(store);
        *self.current.write().unwrap() = store.clone();
        self.snapshot_valid.store(true, Ordering::Release);
        store
    }

    /// Mark the snapshot stale. The next `reload_if_needed()` reloads;
    /// current readers keep their existing `Arc<ContentStore>`.
    pub fn invalidate(&self) {
        self.snapshot_valid.store(false, Ordering::Release);
    }

    /// Content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    static_assertions::assert_impl_all!(super::StoreLoader: Send, Sync);

    use std::fs;
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;

    fn create_test_root() -> (tempfile::TempDir, PathBuf) {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("content");
        fs::create_dir(&root).unwrap();
        (temp, root)
    }

    #[test]
    fn test_load_dir_missing_root_is_error() {
        let temp = tempfile::tempdir().unwrap();

        let result = load_dir(&temp.path().join("nonexistent"));

        assert!(matches!(result, Err(LoadError::MissingRoot(_))));
    }

    #[test]
    fn test_load_dir_empty_root_is_empty_store() {
        let (_temp, root) = create_test_root();

        let store = load_dir(&root).unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn test_load_dir_maps_relative_paths_under_mount() {
        let (_temp, root) = create_test_root();
        let section = root.join("1.start");
        fs::create_dir(&section).unwrap();
        fs::write(section.join("1.index.md"), "# Start").unwrap();
        fs::write(root.join("2.guide.md"), "# Guide").unwrap();

        let store = load_dir(&root).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.get("/content/1.start/1.index.md").is_some());
        assert!(store.get("/content/2.guide.md").is_some());
    }

    #[test]
    fn test_load_dir_skips_hidden_and_non_markdown() {
        let (_temp, root) = create_test_root();
        fs::write(root.join(".hidden.md"), "# Hidden").unwrap();
        fs::write(root.join("notes.txt"), "not markdown").unwrap();
        fs::write(root.join("1.visible.md"), "# Visible").unwrap();

        let store = load_dir(&root).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get("/content/1.visible.md").is_some());
    }

    #[test]
    fn test_load_dir_skips_non_utf8_file() {
        let (_temp, root) = create_test_root();
        fs::write(root.join("1.bad.md"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(root.join("2.good.md"), "# Good").unwrap();

        let store = load_dir(&root).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get("/content/2.good.md").is_some());
    }

    #[test]
    #[cfg(unix)]
    fn test_load_dir_skips_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (_temp, root) = create_test_root();
        fs::write(root.join(OsStr::from_bytes(b"1.bad\xff.md")), "# Bad").unwrap();
        fs::write(root.join("2.good.md"), "# Good").unwrap();

        let store = load_dir(&root).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get("/content/2.good.md").is_some());
    }

    #[test]
    fn test_reload_if_needed_caches_snapshot() {
        let (_temp, root) = create_test_root();
        fs::write(root.join("1.guide.md"), "# Guide").unwrap();
        let loader = StoreLoader::new(&root);

        let first = loader.reload_if_needed();
        let second = loader.reload_if_needed();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_invalidate_swaps_whole_snapshot() {
        let (_temp, root) = create_test_root();
        fs::write(root.join("1.guide.md"), "# Guide").unwrap();
        let loader = StoreLoader::new(&root);

        let before = loader.reload_if_needed();
        fs::write(root.join("2.new.md"), "# New").unwrap();
        loader.invalidate();
        let after = loader.reload_if_needed();

        assert!(!Arc::ptr_eq(&before, &after));
        assert!(before.get("/content/2.new.md").is_none());
        assert!(after.get("/content/2.new.md").is_some());
    }

    #[test]
    fn test_reload_missing_root_degrades_to_empty_store() {
        let temp = tempfile::tempdir().unwrap();
        let loader = StoreLoader::new(temp.path().join("nonexistent"));

        let store = loader.reload_if_needed();

        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_reads_and_reloads() {
        use std::thread;

        let (_temp, root) = create_test_root();
        fs::write(root.join("1.guide.md"), "# Guide").unwrap();
        let loader = Arc::new(StoreLoader::new(&root));

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let loader = Arc::clone(&loader);
                thread::spawn(move || {
                    if i % 2 == 0 {
                        loader.invalidate();
                    } else {
                        let store = loader.reload_if_needed();
                        assert!(store.len() <= 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let store = loader.reload_if_needed();
        assert!(store.get("/content/1.guide.md").is_some());
    }
}
