//! In-memory query engine over AUR-shaped package metadata.
//!
//! `aur-index` loads a corpus of package records from a [`storage::Storage`]
//! backend into an immutable [`snapshot::Snapshot`] (a frozen record vector
//! plus ten case-folded inverted indexes), and serves three read-only
//! operations against it through [`engine::QueryEngine`]:
//!
//! - **Lookup** — find packages by name, pkgbase, maintainer, group,
//!   keyword, or one of the four dependency kinds.
//! - **Search** — glob-match terms against name (and optionally
//!   description) across the whole corpus.
//! - **Resolve** — find the packages that satisfy a dependency expression
//!   (depstring), honoring `provides`.
//!
//! A snapshot is immutable; [`engine::QueryEngine::reload`] builds a new one
//! and publishes it atomically behind an [`arc_swap::ArcSwap`], so queries
//! in flight never observe a half-built corpus.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use aur_index::engine::{LookupBy, QueryEngine};
//! use aur_index::record::{FieldMask, PackageRecord};
//! use aur_index::storage::InMemoryStorage;
//!
//! let storage = Arc::new(InMemoryStorage::new());
//! storage.put(
//!     "expac-git",
//!     serde_json::to_vec(&PackageRecord {
//!         name: "expac-git".into(),
//!         pkgver: "10.1".into(),
//!         ..Default::default()
//!     })
//!     .unwrap(),
//! );
//!
//! let engine = QueryEngine::new(storage);
//! let result = engine
//!     .lookup(&LookupBy::Name, &["expac-git".to_string()], &FieldMask::all())
//!     .unwrap();
//! assert_eq!(result.packages.len(), 1);
//! ```

pub mod depstring;
pub mod engine;
pub mod env;
pub mod error;
pub mod glob_match;
pub mod health;
pub mod index;
pub mod prelude;
pub mod record;
pub mod rpc;
pub mod snapshot;
pub mod storage;
pub mod version;

pub use engine::QueryEngine;
pub use error::{EngineError, Result};
pub use record::{FieldMask, PackageRecord};
pub use snapshot::Snapshot;
