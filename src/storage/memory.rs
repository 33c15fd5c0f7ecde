//! In-memory [`Storage`]: a plain map, useful for tests and demos.

use std::collections::HashMap;
use std::sync::RwLock;

use super::Storage;

/// Map-backed store. Grounded in `InMemoryStorage`
/// (`storage/inmemory_storage.cc`): `list` applies glob matching over the
/// key set instead of walking a directory. Matching is case-sensitive,
/// same as `FilesystemStorage::list` — `fnmatch`'s `FNM_CASEFOLD` is used
/// only by the Search operator in the original, never by either storage's
/// `List`.
#[derive(Default)]
pub struct InMemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// What: Insert or replace the blob stored at `key`.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.into(), value.into());
    }
}

impl Storage for InMemoryStorage {
    fn get(&self, key: &str) -> (Vec<u8>, bool) {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match entries.get(key) {
            Some(bytes) => (bytes.clone(), true),
            None => (Vec::new(), false),
        }
    }

    fn list(&self, pattern: &str) -> Vec<String> {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let Ok(pattern) = glob::Pattern::new(pattern) else {
            return Vec::new();
        };
        entries
            .keys()
            .filter(|key| pattern.matches(key))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get_round_trips() {
        let storage = InMemoryStorage::new();
        storage.put("expac-git", b"payload".to_vec());
        let (bytes, found) = storage.get("expac-git");
        assert!(found);
        assert_eq!(bytes, b"payload");
    }

    #[test]
    fn get_reports_missing_key() {
        let storage = InMemoryStorage::new();
        let (_, found) = storage.get("missing");
        assert!(!found);
    }

    #[test]
    fn list_filters_by_glob() {
        let storage = InMemoryStorage::new();
        storage.put("expac-git", Vec::new());
        storage.put("expac-i18n", Vec::new());
        storage.put("auracle-git", Vec::new());
        let mut names = storage.list("expac*");
        names.sort();
        assert_eq!(names, vec!["expac-git", "expac-i18n"]);
    }

    #[test]
    fn list_star_returns_everything() {
        let storage = InMemoryStorage::new();
        storage.put("a", Vec::new());
        storage.put("b", Vec::new());
        assert_eq!(storage.list("*").len(), 2);
    }

    #[test]
    fn list_is_case_sensitive() {
        let storage = InMemoryStorage::new();
        storage.put("Expac-git", Vec::new());
        storage.put("expac-git", Vec::new());
        assert_eq!(storage.list("Expac*"), vec!["Expac-git"]);
        assert_eq!(storage.list("expac*"), vec!["expac-git"]);
    }
}
