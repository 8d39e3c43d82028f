//! Persistence of recently chosen values.
//!
//! Each namespace is a JSON array of at most `MAX_HISTORY_COUNT` unique
//! strings, most recent first, stored at `<cache>/rofi/<namespace>.json`.
//! History is a best-effort cache: failures are logged, never surfaced to the
//! caller's primary action.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, MAX_HISTORY_COUNT};
use crate::error::{ResultExt, RofiError};
use crate::history::reorder;
use crate::option::MenuOption;

/// Reads and writes per-namespace history files under a cache root
#[derive(Debug, Clone)]
pub struct HistoryStore {
    /// `<user-cache-dir>/rofi`, or None when no cache dir could be resolved
    root: Option<PathBuf>,
}

impl HistoryStore {
    /// Create a store rooted at the configured (or platform) cache directory
    pub fn from_config(config: &Config) -> Self {
        let root = config.history_root();
        if root.is_none() {
            warn!("No user cache directory available, history disabled");
        }
        HistoryStore { root }
    }

    /// Create a store with an explicit root directory (for testing)
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        HistoryStore {
            root: Some(root.into()),
        }
    }

    /// Path of the history file for `namespace`
    pub fn path_for(&self, namespace: &str) -> std::result::Result<PathBuf, RofiError> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{}.json", namespace)))
            .ok_or(RofiError::CacheDirUnavailable)
    }

    /// Load the history list for `namespace`.
    ///
    /// A missing file is an empty history, not an error.
    #[instrument(name = "history_load", skip(self))]
    pub fn load(&self, namespace: &str) -> Result<Vec<String>> {
        let path = self.path_for(namespace)?;
        if !path.exists() {
            debug!(path = %path.display(), "History file not found, starting fresh");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?;
        let history = parse_history(&content)
            .with_context(|| format!("Failed to parse history JSON: {}", path.display()))?;

        debug!(
            path = %path.display(),
            entry_count = history.len(),
            "Loaded history"
        );
        Ok(history)
    }

    /// Record `value` as the most recent choice in `namespace`.
    ///
    /// I/O errors are logged and the save is abandoned.
    pub fn save(&self, namespace: &str, value: &str) {
        let _ = self.try_save(namespace, value).warn_on_err();
    }

    /// Read-modify-write of the history file using a single handle.
    ///
    /// The file is truncated and rewritten in place; a crash mid-write can
    /// leave it empty or invalid. Unparseable contents are replaced by a
    /// fresh history starting with `value`.
    #[instrument(name = "history_save", skip(self))]
    pub fn try_save(&self, namespace: &str, value: &str) -> Result<Vec<String>> {
        let path = self.path_for(namespace)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .with_context(|| format!("Failed to open history file: {}", path.display()))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read history file: {}", path.display()))?;
        let history = parse_history(&content).unwrap_or_else(|e| {
            warn!(
                path = %path.display(),
                error = %e,
                "Unreadable history, starting fresh"
            );
            Vec::new()
        });

        let next = push_front(history, value);

        let json = serde_json::to_string_pretty(&next).context("Failed to serialize history")?;
        write_in_place(&mut file, json.as_bytes(), &path)?;

        info!(
            path = %path.display(),
            entry_count = next.len(),
            "Saved history"
        );
        Ok(next)
    }

    /// Load `namespace` and promote matching options.
    ///
    /// Returns `options` untouched when history is unavailable.
    pub fn sort_using_history(&self, options: Vec<MenuOption>, namespace: &str) -> Vec<MenuOption> {
        match self.load(namespace).warn_on_err() {
            Some(history) => reorder(options, &history),
            None => options,
        }
    }
}

/// Newly created (empty) files count as an empty history
fn parse_history(content: &str) -> serde_json::Result<Vec<String>> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(content)
}

/// Put `value` first, drop older copies of it, keep at most MAX_HISTORY_COUNT
fn push_front(history: Vec<String>, value: &str) -> Vec<String> {
    let mut next = Vec::with_capacity(MAX_HISTORY_COUNT);
    next.push(value.to_string());
    for entry in history {
        if next.len() >= MAX_HISTORY_COUNT {
            break;
        }
        if !next.contains(&entry) {
            next.push(entry);
        }
    }
    next
}

fn write_in_place(file: &mut fs::File, bytes: &[u8], path: &Path) -> Result<()> {
    file.set_len(0)
        .with_context(|| format!("Failed to clear history file: {}", path.display()))?;
    file.seek(SeekFrom::Start(0))
        .with_context(|| format!("Failed to rewind history file: {}", path.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write history file: {}", path.display()))?;
    file.flush()
        .with_context(|| format!("Failed to flush history file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (HistoryStore, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::with_root(dir.path().join("rofi"));
        (store, dir)
    }

    #[test]
    fn test_load_missing_namespace_is_empty() {
        let (store, _dir) = create_test_store();
        assert!(store.load("never-saved").unwrap().is_empty());
    }

    #[test]
    fn test_save_creates_directory_and_file() {
        let (store, _dir) = create_test_store();
        store.save("apps", "firefox");

        let path = store.path_for("apps").unwrap();
        assert!(path.exists());
        assert_eq!(store.load("apps").unwrap(), vec!["firefox"]);
    }

    #[test]
    fn test_save_most_recent_first() {
        let (store, _dir) = create_test_store();
        store.save("apps", "a");
        store.save("apps", "b");
        store.save("apps", "c");
        assert_eq!(store.load("apps").unwrap(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_save_moves_existing_value_to_front() {
        let (store, _dir) = create_test_store();
        for v in ["a", "b", "c"] {
            store.save("apps", v);
        }
        store.save("apps", "a");
        assert_eq!(store.load("apps").unwrap(), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_save_bounds_history_length() {
        let (store, _dir) = create_test_store();
        for i in 0..12 {
            store.save("apps", &format!("v{}", i));
        }
        let history = store.load("apps").unwrap();
        assert_eq!(history.len(), MAX_HISTORY_COUNT);
        assert_eq!(history, vec!["v11", "v10", "v9", "v8", "v7"]);
    }

    #[test]
    fn test_save_never_duplicates() {
        let (store, _dir) = create_test_store();
        for v in ["a", "b", "a", "a", "c", "b", "a"] {
            store.save("apps", v);
            let history = store.load("apps").unwrap();
            let mut deduped = history.clone();
            deduped.sort();
            deduped.dedup();
            assert_eq!(deduped.len(), history.len());
            assert_eq!(history[0], v);
        }
    }

    #[test]
    fn test_save_shrinks_file_contents() {
        let (store, _dir) = create_test_store();
        let path = store.path_for("apps").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        // Longer than anything we will write back
        let long: Vec<String> = (0..5).map(|i| format!("{}-{}", "x".repeat(40), i)).collect();
        fs::write(&path, serde_json::to_string_pretty(&long).unwrap()).unwrap();

        store.save("apps", "short");

        let history = store.load("apps").unwrap();
        assert_eq!(history[0], "short");
        assert_eq!(history.len(), MAX_HISTORY_COUNT);
    }

    #[test]
    fn test_save_writes_pretty_json() {
        let (store, _dir) = create_test_store();
        store.save("apps", "a");
        let content = fs::read_to_string(store.path_for("apps").unwrap()).unwrap();
        assert_eq!(content, "[\n  \"a\"\n]");
    }

    #[test]
    fn test_load_invalid_json_is_error() {
        let (store, _dir) = create_test_store();
        let path = store.path_for("apps").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not valid json").unwrap();

        assert!(store.load("apps").is_err());
    }

    #[test]
    fn test_save_replaces_invalid_json() {
        let (store, _dir) = create_test_store();
        let path = store.path_for("apps").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{broken").unwrap();

        let saved = store.try_save("apps", "a").unwrap();
        assert_eq!(saved, vec!["a"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[\n  \"a\"\n]");
    }

    #[test]
    fn test_save_recovers_from_torn_write() {
        let (store, _dir) = create_test_store();
        let path = store.path_for("apps").unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[\n  \"a\",\n  \"b").unwrap();
        assert!(store.load("apps").is_err());

        for v in ["x", "y", "z"] {
            store.save("apps", v);
        }
        assert_eq!(store.load("apps").unwrap(), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_namespaces_are_independent() {
        let (store, _dir) = create_test_store();
        store.save("apps", "a");
        store.save("ssh", "host");
        assert_eq!(store.load("apps").unwrap(), vec!["a"]);
        assert_eq!(store.load("ssh").unwrap(), vec!["host"]);
    }

    #[test]
    fn test_store_without_root_degrades() {
        let store = HistoryStore { root: None };
        assert!(store.load("apps").is_err());
        store.save("apps", "a");

        let options = vec![MenuOption::new("A", "a"), MenuOption::new("B", "b")];
        let sorted = store.sort_using_history(options.clone(), "apps");
        assert_eq!(sorted, options);
    }

    #[test]
    fn test_sort_using_history_promotes() {
        let (store, _dir) = create_test_store();
        store.save("apps", "b");

        let options = vec![
            MenuOption::new("A", "a"),
            MenuOption::new("B", "b"),
            MenuOption::new("C", "c"),
        ];
        let sorted = store.sort_using_history(options, "apps");
        let values: Vec<_> = sorted.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_push_front_with_full_history() {
        let history: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        assert_eq!(push_front(history, "c"), vec!["c", "a", "b", "d", "e"]);
    }
}
