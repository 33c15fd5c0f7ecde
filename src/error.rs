//! Unified error type for aur-index.

use thiserror::Error;

/// Unified error type for query-engine operations.
///
/// This error type covers the single caller-visible failure mode of the
/// core (an unrecognized enum value at an operator boundary); everything
/// else (storage I/O failures, blob deserialization failures) is recovered
/// internally and surfaces only as missing records.
#[derive(Error, Debug)]
pub enum EngineError {
    /// An enum value passed to `Lookup`/`Search` was not recognized.
    #[error("unimplemented: {0}")]
    Unimplemented(String),
}

/// Result type alias for aur-index operations.
pub type Result<T> = std::result::Result<T, EngineError>;
