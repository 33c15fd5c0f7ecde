//! Convenience re-exports for the common query path.
//!
//! ```
//! use aur_index::prelude::*;
//! ```

pub use crate::depstring::{DependencyExpression, DependencyOp};
pub use crate::engine::{
    LookupBy, LookupResult, QueryEngine, ResolvedEntry, SearchBy, SearchLogic,
};
pub use crate::error::{EngineError, Result};
pub use crate::record::{FieldMask, PackageRecord};
pub use crate::snapshot::Snapshot;
pub use crate::storage::{FilesystemStorage, InMemoryStorage, Storage};
pub use crate::version::vercmp;
