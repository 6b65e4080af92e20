//! Key-value persistence for resolved pair lists.
//!
//! The directory only ever touches two keys per cache generation, both
//! prefixed with a version tag ([`CacheKeys`]). Bumping the tag is the sole
//! invalidation mechanism when the record shape or the backing exchange
//! changes: old entries simply become unreachable.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// String key-value store injected into the directory.
///
/// Implementations take `&self`; interior locking keeps call sites free of
/// `mut` plumbing, mirroring how the stores are shared behind `Arc`.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Version-tagged key names for one cache generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeys {
    /// Serialized `Vec<PairRecord>` payload.
    pub pairs: String,
    /// Milliseconds since the Unix epoch, stored as text.
    pub timestamp: String,
}

impl CacheKeys {
    pub fn for_version(version: &str) -> Self {
        Self {
            pairs: format!("{version}:pairs"),
            timestamp: format!("{version}:timestamp"),
        }
    }
}

/// In-process store used by tests and by hosts that want no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// File-backed store persisting a flat JSON object of key-value pairs.
///
/// The whole map is loaded on open and rewritten on every mutation; the
/// payload is two small entries, so read-modify-write is cheaper than a
/// real database here. Disk failures degrade to the in-memory map with a
/// logged warning so callers never observe an error.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at its default location, `<home>/cache/pairs.json`.
    pub fn open_default() -> Self {
        Self::open(resolve_pairdex_home().join("cache").join("pairs.json"))
    }

    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                log::warn!(
                    "cache store at {} is corrupt, starting empty: {error}",
                    path.display()
                );
                HashMap::new()
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => {
                log::warn!(
                    "cache store at {} is unreadable, starting empty: {error}",
                    path.display()
                );
                HashMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(error) = fs::create_dir_all(parent) {
                log::warn!(
                    "cache directory {} cannot be created: {error}",
                    parent.display()
                );
                return;
            }
        }

        match serde_json::to_string_pretty(entries) {
            Ok(payload) => {
                if let Err(error) = fs::write(&self.path, payload) {
                    log::warn!("cache write to {} failed: {error}", self.path.display());
                }
            }
            Err(error) => log::warn!("cache entries are not serializable: {error}"),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
            self.persist(&entries);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(key).is_some() {
                self.persist(&entries);
            }
        }
    }
}

/// Resolve the pairdex home directory.
///
/// Order: `$PAIRDEX_HOME` if set and non-empty, then `$HOME/.pairdex`,
/// then `./.pairdex` as a last resort.
pub fn resolve_pairdex_home() -> PathBuf {
    if let Some(path) = env::var_os("PAIRDEX_HOME") {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            return path;
        }
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home).join(".pairdex");
    }

    PathBuf::from(".pairdex")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_keys_carry_the_version_tag() {
        let keys = CacheKeys::for_version("v3");

        assert_eq!(keys.pairs, "v3:pairs");
        assert_eq!(keys.timestamp, "v3:timestamp");
    }

    #[test]
    fn memory_store_round_trips_and_removes() {
        let store = MemoryStore::new();

        assert_eq!(store.get("v3:pairs"), None);

        store.set("v3:pairs", "[]");
        assert_eq!(store.get("v3:pairs").as_deref(), Some("[]"));

        store.remove("v3:pairs");
        assert_eq!(store.get("v3:pairs"), None);
    }

    #[test]
    fn file_store_persists_across_reopens() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cache").join("pairs.json");

        let store = FileStore::open(path.clone());
        store.set("v3:timestamp", "1700000000000");
        drop(store);

        let reopened = FileStore::open(path);
        assert_eq!(
            reopened.get("v3:timestamp").as_deref(),
            Some("1700000000000")
        );
    }

    #[test]
    fn file_store_starts_empty_when_payload_is_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pairs.json");
        fs::write(&path, "not json at all").expect("write fixture");

        let store = FileStore::open(path);
        assert_eq!(store.get("v3:pairs"), None);

        // Still usable for writes after the corrupt load.
        store.set("v3:pairs", "[]");
        assert_eq!(store.get("v3:pairs").as_deref(), Some("[]"));
    }

    #[test]
    fn removing_a_missing_key_is_a_no_op() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("pairs.json"));

        store.remove("v3:pairs");
        assert_eq!(store.get("v3:pairs"), None);
    }
}
