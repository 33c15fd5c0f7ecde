//! Backing store abstraction: list and fetch package blobs.
//!
//! Grounded in `original_source`'s `aur_storage::Storage` interface
//! (`storage/storage.hh`): a read-only key/value contract with `Get` and
//! glob-patterned `List`, consumed by [`crate::snapshot::Snapshot`]
//! assembly. Out of scope per spec §6.4 is the offline JSON→blob
//! conversion tool; this module only reads.

mod fs;
mod memory;

pub use fs::FilesystemStorage;
pub use memory::InMemoryStorage;

/// Read-only key/value + glob-list contract backing a [`Snapshot`][crate::snapshot::Snapshot].
///
/// Implementations never fail `List`/`Get` with an error: a missing key is
/// `(Vec::new(), false)`, and a pattern with no matches is an empty vector
/// (spec §7 "internally recovered, never surfaced").
pub trait Storage: Send + Sync {
    /// Fetch the raw bytes for `key`.
    ///
    /// Output: `(bytes, found)`. `found` is `false` for a missing key or
    /// any I/O error reading it.
    fn get(&self, key: &str) -> (Vec<u8>, bool);

    /// List all keys matching `pattern` (POSIX glob semantics).
    fn list(&self, pattern: &str) -> Vec<String>;
}
