//! Immutable snapshot of the package corpus: a frozen records vector plus
//! the ten named indexes built over it.
//!
//! Grounded in `ServiceImpl::InMemoryDB`'s constructor
//! (`service_impl.cc`): `List("*")`, per-blob `Get` + deserialize with
//! skip-on-failure, then one `PackageIndex::Create` call per indexed
//! field.

use crate::index::{Extractor, InvertedIndex};
use crate::record::PackageRecord;
use crate::storage::Storage;

/// An immutable bundle of the full package vector and the ten indexes
/// built over it. See spec §3 "Snapshot" and §4.4 "Snapshot assembly".
#[derive(Debug)]
pub struct Snapshot {
    packages: Vec<PackageRecord>,
    pkgname: InvertedIndex,
    pkgbase: InvertedIndex,
    maintainers: InvertedIndex,
    groups: InvertedIndex,
    keywords: InvertedIndex,
    provides: InvertedIndex,
    depends: InvertedIndex,
    optdepends: InvertedIndex,
    makedepends: InvertedIndex,
    checkdepends: InvertedIndex,
}

impl Snapshot {
    /// What: Build a snapshot by fully scanning `storage`.
    ///
    /// Details:
    /// - Enumerates blob names via `storage.list("*")`.
    /// - Reads and deserializes each blob as a [`PackageRecord`]; a missing
    ///   blob or a JSON parse failure is logged and skipped (spec §4.4,
    ///   §7: partial corpus over total failure).
    /// - Builds all ten indexes over the resulting frozen vector.
    #[must_use]
    pub fn build(storage: &dyn Storage) -> Self {
        let names = storage.list("*");
        let mut packages = Vec::with_capacity(names.len());
        for name in &names {
            let (bytes, found) = storage.get(name);
            if !found {
                tracing::warn!(name, "storage read failed during snapshot build");
                continue;
            }
            match serde_json::from_slice::<PackageRecord>(&bytes) {
                Ok(record) => packages.push(record),
                Err(err) => {
                    tracing::warn!(name, error = %err, "record deserialization failed");
                }
            }
        }

        tracing::info!(count = packages.len(), "snapshot packages loaded");

        let pkgname = InvertedIndex::build("pkgname", &packages, &Extractor::Scalar(|r| &r.name));
        let pkgbase =
            InvertedIndex::build("pkgbase", &packages, &Extractor::Scalar(|r| &r.pkgbase));
        let maintainers = InvertedIndex::build(
            "maintainers",
            &packages,
            &Extractor::Repeated {
                field: |r| &r.maintainers,
                include_empty: false,
            },
        );
        let groups = InvertedIndex::build(
            "groups",
            &packages,
            &Extractor::Repeated {
                field: |r| &r.groups,
                include_empty: false,
            },
        );
        let keywords = InvertedIndex::build(
            "keywords",
            &packages,
            &Extractor::Repeated {
                field: |r| &r.keywords,
                include_empty: false,
            },
        );
        let provides = InvertedIndex::build(
            "provides",
            &packages,
            &Extractor::Dependency(|r| &r.provides),
        );
        let depends =
            InvertedIndex::build("depends", &packages, &Extractor::Dependency(|r| &r.depends));
        let optdepends = InvertedIndex::build(
            "optdepends",
            &packages,
            &Extractor::Dependency(|r| &r.optdepends),
        );
        let makedepends = InvertedIndex::build(
            "makedepends",
            &packages,
            &Extractor::Dependency(|r| &r.makedepends),
        );
        let checkdepends = InvertedIndex::build(
            "checkdepends",
            &packages,
            &Extractor::Dependency(|r| &r.checkdepends),
        );

        tracing::info!("index building complete");

        Self {
            packages,
            pkgname,
            pkgbase,
            maintainers,
            groups,
            keywords,
            provides,
            depends,
            optdepends,
            makedepends,
            checkdepends,
        }
    }

    /// The frozen package vector. Offsets into it are what the indexes
    /// store.
    #[must_use]
    pub fn packages(&self) -> &[PackageRecord] {
        &self.packages
    }

    /// Number of loaded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Whether the snapshot has no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Resolve a record offset to its record.
    #[must_use]
    pub fn record_at(&self, offset: usize) -> &PackageRecord {
        &self.packages[offset]
    }

    /// The `pkgname` index.
    #[must_use]
    pub fn pkgname(&self) -> &InvertedIndex {
        &self.pkgname
    }

    /// The `pkgbase` index.
    #[must_use]
    pub fn pkgbase(&self) -> &InvertedIndex {
        &self.pkgbase
    }

    /// The `maintainers` index.
    #[must_use]
    pub fn maintainers(&self) -> &InvertedIndex {
        &self.maintainers
    }

    /// The `groups` index.
    #[must_use]
    pub fn groups(&self) -> &InvertedIndex {
        &self.groups
    }

    /// The `keywords` index.
    #[must_use]
    pub fn keywords(&self) -> &InvertedIndex {
        &self.keywords
    }

    /// The `provides` index (keyed by parsed dependency name).
    #[must_use]
    pub fn provides(&self) -> &InvertedIndex {
        &self.provides
    }

    /// The `depends` index (keyed by parsed dependency name).
    #[must_use]
    pub fn depends(&self) -> &InvertedIndex {
        &self.depends
    }

    /// The `optdepends` index (keyed by parsed dependency name).
    #[must_use]
    pub fn optdepends(&self) -> &InvertedIndex {
        &self.optdepends
    }

    /// The `makedepends` index (keyed by parsed dependency name).
    #[must_use]
    pub fn makedepends(&self) -> &InvertedIndex {
        &self.makedepends
    }

    /// The `checkdepends` index (keyed by parsed dependency name).
    #[must_use]
    pub fn checkdepends(&self) -> &InvertedIndex {
        &self.checkdepends
    }
}
