//! Case-insensitive POSIX glob matching shared by `Storage::list` and
//! `Search`.
//!
//! The original relies on libc's `glob(3)`/`fnmatch(3)` (see
//! `storage/filesystem_storage.cc`'s `Glob` wrapper and
//! `storage/inmemory_storage.cc`'s `fnmatch` call, as well as
//! `service_impl.cc`'s `PatternMatch`, all case-folded via `FNM_CASEFOLD`).
//! The `glob` crate (grounded via `rust-lang-cargo`'s dependency on
//! `glob = "0.3.3"`) gives the same `*`/`?`/`[...]` semantics; case folding
//! is applied ourselves since `glob::Pattern` is case-sensitive by default.

use glob::{MatchOptions, Pattern};

/// Match options used everywhere in this crate: case-insensitive, and `*`
/// is allowed to cross what would otherwise be path-separator boundaries
/// (package/blob names are flat, not nested).
const OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// What: Check whether `candidate` matches the glob `pattern`,
/// case-insensitively.
///
/// Details:
/// - A malformed pattern matches nothing (mirrors `fnmatch` returning
///   non-zero on error; spec §7 "internally recovered, never surfaced").
#[must_use]
pub fn matches(pattern: &str, candidate: &str) -> bool {
    Pattern::new(pattern).is_ok_and(|p| p.matches_with(candidate, OPTIONS))
}
