//! Inverted index over a frozen vector of [`PackageRecord`]s.
//!
//! Grounded in `original_source`'s `PackageIndex`
//! (`service/internal/package_index.{hh,cc}`): a name-to-record-reference
//! map built once from a getter closure, case-folded at insertion, looked up
//! case-folded too. The original stores raw `const Package*` pointers since
//! the backing vector never reallocates; here the [`Snapshot`][crate::snapshot::Snapshot]
//! plays that role and indexes store plain `usize` offsets into its
//! `packages` vector instead (idiomatic equivalent of the original's stable
//! pointers, per spec §9 "Stable references inside a Snapshot").

use std::collections::HashMap;

use crate::depstring::DependencyExpression;
use crate::record::PackageRecord;

/// An extractor shape for building an [`InvertedIndex`] over a field.
///
/// Mirrors the three `*IndexingAdapter` helpers in the original
/// `PackageIndex`.
pub enum Extractor {
    /// Emits exactly one key per record (possibly an empty string).
    Scalar(fn(&PackageRecord) -> &str),
    /// Emits zero or more keys per record. `include_empty` controls
    /// whether a record with no keys still gets an empty-string entry.
    Repeated {
        /// Field accessor.
        field: fn(&PackageRecord) -> &[String],
        /// When true, a record with an empty field list still contributes
        /// the synthetic key `""`.
        include_empty: bool,
    },
    /// Emits the parsed name of each depstring in a field.
    Dependency(fn(&PackageRecord) -> &[String]),
}

impl Extractor {
    /// Compute the raw (not yet case-folded) keys this extractor produces
    /// for `record`.
    fn keys_for(&self, record: &PackageRecord) -> Vec<String> {
        match self {
            Extractor::Scalar(f) => vec![f(record).to_string()],
            Extractor::Repeated {
                field,
                include_empty,
            } => {
                let values = field(record);
                if values.is_empty() && *include_empty {
                    vec![String::new()]
                } else {
                    values.to_vec()
                }
            }
            Extractor::Dependency(field) => field(record)
                .iter()
                .map(|dep| DependencyExpression::parse(dep).name)
                .collect(),
        }
    }
}

/// A case-folded key → ordered set of record-reference (by vector offset)
/// mapping, built once over a frozen `packages` slice.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    /// Human-readable name, used only for logging at build time.
    name: String,
    entries: HashMap<String, Vec<usize>>,
}

/// A shared, zero-allocation empty slice returned by [`InvertedIndex::get`]
/// for unknown keys.
const EMPTY: &[usize] = &[];

impl InvertedIndex {
    /// What: Build an index over `packages` using `extractor`.
    ///
    /// Inputs:
    /// - `name`: human-readable index name, logged on completion.
    /// - `packages`: the frozen record vector; offsets into this vector are
    ///   what gets stored.
    /// - `extractor`: determines which keys each record contributes.
    ///
    /// Details:
    /// - Keys are case-folded (ASCII lowercase) before insertion.
    /// - Duplicate keys within a single record collapse to one reference.
    #[must_use]
    pub fn build(name: &str, packages: &[PackageRecord], extractor: &Extractor) -> Self {
        let mut entries: HashMap<String, Vec<usize>> = HashMap::new();
        for (offset, record) in packages.iter().enumerate() {
            let mut seen_for_record = std::collections::HashSet::new();
            for raw_key in extractor.keys_for(record) {
                let key = raw_key.to_ascii_lowercase();
                if !seen_for_record.insert(key.clone()) {
                    continue;
                }
                entries.entry(key).or_default().push(offset);
            }
        }
        tracing::debug!(index = name, terms = entries.len(), "index built");
        Self {
            name: name.to_string(),
            entries,
        }
    }

    /// What: Look up the record offsets associated with `key`.
    ///
    /// Output: the ordered set of offsets, or an empty slice for an unknown
    /// key. Never fails.
    #[must_use]
    pub fn get(&self, key: &str) -> &[usize] {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map_or(EMPTY, Vec::as_slice)
    }

    /// The human-readable name this index was built with.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of distinct keys in this index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this index has no keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
