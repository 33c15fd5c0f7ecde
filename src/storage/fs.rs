//! Filesystem-backed [`Storage`]: one blob per file under a root directory.

use std::path::PathBuf;

use super::Storage;

/// One blob per file under `root`. Grounded in `FilesystemStorage`
/// (`storage/filesystem_storage.cc`): `get` refuses keys containing `/`
/// (no traversal out of `root`), `list` globs filenames within `root`.
#[derive(Clone, Debug)]
pub struct FilesystemStorage {
    root: PathBuf,
}

impl FilesystemStorage {
    /// What: Create a filesystem store rooted at `root`.
    ///
    /// Details: `root` need not exist yet; `list`/`get` simply return
    /// empty/not-found until it does.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Storage for FilesystemStorage {
    fn get(&self, key: &str) -> (Vec<u8>, bool) {
        if key.contains('/') {
            return (Vec::new(), false);
        }
        match std::fs::read(self.root.join(key)) {
            Ok(bytes) => (bytes, true),
            Err(err) => {
                tracing::warn!(key, error = %err, "storage read failed");
                (Vec::new(), false)
            }
        }
    }

    fn list(&self, pattern: &str) -> Vec<String> {
        let full_pattern = self.root.join(pattern);
        let Some(full_pattern) = full_pattern.to_str() else {
            return Vec::new();
        };
        match glob::glob(full_pattern) {
            Ok(paths) => paths
                .filter_map(Result::ok)
                .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .collect(),
            Err(err) => {
                tracing::warn!(pattern, error = %err, "glob pattern error");
                Vec::new()
            }
        }
    }
}
