//! The query engine: Lookup, Search, Resolve, and atomic Reload over a
//! hot-swappable [`Snapshot`].
//!
//! Grounded in `ServiceImpl` (`service_impl.cc`): `LookupByIndex` (union
//! index results, track not-found names), `SearchOneName`/`SearchOneDesc`/
//! `SearchOneNameDesc` + `PatternMatch` (full-corpus glob scan),
//! `ResolveProviders` (candidates from both `idx_pkgname` and
//! `idx_provides`, filtered by `SatisfiedBy`), and `Reload` (separate
//! `reload_mu_` serializing rebuilds, atomic publish under the concurrency
//! model in spec §5). The original's `absl::Mutex`/`ReaderMutexLock` pair
//! becomes `arc_swap::ArcSwap<Snapshot>` (lock-free reads, grounded via
//! `MystenLabs-sui`'s `arc-swap` dependency) plus a `tokio::sync::Mutex`
//! serializing concurrent `Reload` calls.

use std::collections::HashSet;
use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::Mutex as AsyncMutex;

use crate::depstring::DependencyExpression;
use crate::error::{EngineError, Result};
use crate::glob_match;
use crate::health::{EngineHealth, ReloadTracker};
use crate::index::InvertedIndex;
use crate::record::{FieldMask, PackageRecord};
use crate::snapshot::Snapshot;
use crate::storage::Storage;

/// Which index `Lookup` consults. See spec §4.5 "Lookup".
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LookupBy {
    /// Coerces to [`LookupBy::Name`].
    Unknown,
    /// `pkgname` index.
    Name,
    /// `pkgbase` index.
    Pkgbase,
    /// `maintainers` index.
    Maintainer,
    /// `groups` index.
    Group,
    /// `keywords` index.
    Keyword,
    /// `depends` index.
    Depends,
    /// `makedepends` index.
    Makedepends,
    /// `checkdepends` index.
    Checkdepends,
    /// `optdepends` index.
    Optdepends,
    /// An enum value the RPC boundary didn't recognize; carries the raw
    /// name for the `UNIMPLEMENTED` error message.
    Other(String),
}

/// Which field `Search` matches terms against. See spec §4.5 "Search".
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchBy {
    /// Coerces to [`SearchBy::NameDesc`].
    Unknown,
    /// Match only `record.name`.
    Name,
    /// Match `record.name` or `record.description`.
    NameDesc,
    /// Unrecognized enum value.
    Other(String),
}

/// How multiple search terms combine. See spec §4.5 "Search".
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchLogic {
    /// Coerces to [`SearchLogic::Disjunctive`].
    Unknown,
    /// Any term matching includes the record.
    Disjunctive,
    /// Every term must match to include the record.
    Conjunctive,
    /// Unrecognized enum value.
    Other(String),
}

/// Result of a `Lookup` call.
#[derive(Clone, Debug, Default)]
pub struct LookupResult {
    /// Matched records, projected through the requested field mask.
    pub packages: Vec<PackageRecord>,
    /// Query names (in their original case) that matched nothing.
    pub not_found_names: Vec<String>,
}

/// A single `Resolve` entry: one input depstring plus its providers.
#[derive(Clone, Debug)]
pub struct ResolvedEntry {
    /// The input depstring, unchanged.
    pub depstring: String,
    /// Records satisfying the parsed dependency expression, projected
    /// through the requested field mask.
    pub providers: Vec<PackageRecord>,
}

/// Holds the current [`Snapshot`] behind a lock-free shared reference and
/// serializes `Reload` calls through a dedicated mutex, per spec §5.
pub struct QueryEngine {
    storage: Arc<dyn Storage>,
    snapshot: ArcSwap<Snapshot>,
    reload_mutex: AsyncMutex<()>,
    reload_tracker: ReloadTracker,
}

impl QueryEngine {
    /// What: Build an engine with an initial snapshot scanned from
    /// `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let snapshot = Snapshot::build(storage.as_ref());
        let reload_tracker = ReloadTracker::new();
        reload_tracker.finish(now_unix());
        Self {
            storage,
            snapshot: ArcSwap::from_pointee(snapshot),
            reload_mutex: AsyncMutex::new(()),
            reload_tracker,
        }
    }

    /// Capture the currently published snapshot. Every operator calls this
    /// exactly once at entry, per spec §5.
    fn current(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    /// What: Look up packages by name, pkgbase, maintainer, group,
    /// keyword, or one of the four dependency kinds.
    ///
    /// Inputs:
    /// - `by`: which index to consult.
    /// - `names`: query terms, matched case-insensitively.
    /// - `mask`: field projection applied to every returned record.
    ///
    /// Output: matched records (deduplicated) plus `not_found_names` for
    /// any query term with no matches.
    ///
    /// # Errors
    /// Returns [`EngineError::Unimplemented`] for an unrecognized `by`.
    pub fn lookup(
        &self,
        by: &LookupBy,
        names: &[String],
        mask: &FieldMask,
    ) -> Result<LookupResult> {
        let snapshot = self.current();
        let index = Self::lookup_index(&snapshot, by)?;

        let mut offsets = HashSet::new();
        let mut not_found_names = Vec::new();
        for name in names {
            let hits = index.get(name);
            if hits.is_empty() {
                not_found_names.push(name.clone());
            } else {
                offsets.extend(hits.iter().copied());
            }
        }

        let packages = offsets
            .into_iter()
            .map(|offset| mask.project(snapshot.record_at(offset)))
            .collect();

        Ok(LookupResult {
            packages,
            not_found_names,
        })
    }

    fn lookup_index<'s>(snapshot: &'s Snapshot, by: &LookupBy) -> Result<&'s InvertedIndex> {
        match by {
            LookupBy::Unknown | LookupBy::Name => Ok(snapshot.pkgname()),
            LookupBy::Pkgbase => Ok(snapshot.pkgbase()),
            LookupBy::Maintainer => Ok(snapshot.maintainers()),
            LookupBy::Group => Ok(snapshot.groups()),
            LookupBy::Keyword => Ok(snapshot.keywords()),
            LookupBy::Depends => Ok(snapshot.depends()),
            LookupBy::Makedepends => Ok(snapshot.makedepends()),
            LookupBy::Checkdepends => Ok(snapshot.checkdepends()),
            LookupBy::Optdepends => Ok(snapshot.optdepends()),
            LookupBy::Other(name) => Err(EngineError::Unimplemented(format!("LookupBy::{name}"))),
        }
    }

    /// What: Search the full corpus by glob pattern terms.
    ///
    /// Inputs:
    /// - `by`: which record field(s) a term is matched against.
    /// - `logic`: how multiple terms combine.
    /// - `terms`: case-insensitive glob patterns.
    /// - `mask`: field projection applied to every returned record.
    ///
    /// # Errors
    /// Returns [`EngineError::Unimplemented`] for an unrecognized `by` or
    /// `logic`.
    pub fn search(
        &self,
        by: &SearchBy,
        logic: &SearchLogic,
        terms: &[String],
        mask: &FieldMask,
    ) -> Result<Vec<PackageRecord>> {
        let name_desc = match by {
            SearchBy::Unknown | SearchBy::NameDesc => false,
            SearchBy::Name => true,
            SearchBy::Other(name) => {
                return Err(EngineError::Unimplemented(format!("SearchBy::{name}")));
            }
        };
        // name_desc=false means "match name or description"; flip the
        // local for readability below.
        let name_only = name_desc;

        let conjunctive = match logic {
            SearchLogic::Unknown | SearchLogic::Disjunctive => false,
            SearchLogic::Conjunctive => true,
            SearchLogic::Other(name) => {
                return Err(EngineError::Unimplemented(format!("SearchLogic::{name}")));
            }
        };

        let snapshot = self.current();
        let term_matches = |record: &PackageRecord, term: &str| {
            glob_match::matches(term, &record.name)
                || (!name_only && glob_match::matches(term, &record.description))
        };

        let packages = snapshot
            .packages()
            .iter()
            .filter(|record| {
                if conjunctive {
                    terms.iter().all(|term| term_matches(record, term))
                } else {
                    terms.iter().any(|term| term_matches(record, term))
                }
            })
            .map(|record| mask.project(record))
            .collect();

        Ok(packages)
    }

    /// What: Resolve each depstring to the records that satisfy it.
    ///
    /// Inputs:
    /// - `depstrings`: one entry per dependency expression to resolve.
    /// - `mask`: field projection applied to every provider record.
    ///
    /// Output: one [`ResolvedEntry`] per input depstring, in input order.
    #[must_use]
    pub fn resolve(&self, depstrings: &[String], mask: &FieldMask) -> Vec<ResolvedEntry> {
        let snapshot = self.current();
        depstrings
            .iter()
            .map(|depstring| {
                let dep = DependencyExpression::parse(depstring);
                let mut offsets: Vec<usize> = snapshot
                    .pkgname()
                    .get(&dep.name)
                    .iter()
                    .chain(snapshot.provides().get(&dep.name))
                    .copied()
                    .collect();
                offsets.sort_unstable();
                offsets.dedup();

                let providers = offsets
                    .into_iter()
                    .map(|offset| snapshot.record_at(offset))
                    .filter(|candidate| dep.satisfied_by(candidate))
                    .map(|candidate| mask.project(candidate))
                    .collect();

                ResolvedEntry {
                    depstring: depstring.clone(),
                    providers,
                }
            })
            .collect()
    }

    /// What: Rebuild the snapshot from `storage` and publish it
    /// atomically.
    ///
    /// Details:
    /// - Serialized end-to-end by `reload_mutex`; concurrent `Reload`
    ///   calls queue rather than racing on `storage`.
    /// - In-flight queries that already captured the old snapshot run to
    ///   completion unaffected (spec §5).
    pub async fn reload(&self) {
        let _guard = self.reload_mutex.lock().await;
        self.reload_tracker.begin();
        let storage = Arc::clone(&self.storage);
        let snapshot = tokio::task::spawn_blocking(move || Snapshot::build(storage.as_ref()))
            .await
            .expect("snapshot build task panicked");
        self.snapshot.store(Arc::new(snapshot));
        self.reload_tracker.finish(now_unix());
    }

    /// The currently published snapshot, for health reporting.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current()
    }

    /// What: Compute the engine's current health (spec §4.6).
    #[must_use]
    pub fn health(&self) -> EngineHealth {
        EngineHealth::from_snapshot(&self.current(), &self.reload_tracker)
    }
}

#[allow(clippy::cast_possible_wrap)]
fn now_unix() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}
