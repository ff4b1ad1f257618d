//! Engine error types.

use thiserror::Error;

/// Errors surfaced by the mapping engine.
///
/// Recoverable conditions (a missing schema, a failed double-bind) are
/// reported as booleans by the operations that detect them; only conditions
/// that invalidate the whole operation become errors.
#[derive(Debug, Error)]
pub enum MapperError {
    /// The resolved configuration names of a mapping unit do not agree on a
    /// stored source language. A unit is translated as a whole, so it may
    /// not span more than one source language.
    #[error("mapping unit '{id}' spans more than one source language: {found:?}")]
    LanguageConsistency {
        /// Id of the offending mapping unit.
        id: String,
        /// The distinct language codes that were found, sorted.
        found: Vec<String>,
    },

    /// A mapper id was requested that no definition is registered for.
    #[error("no mapping definition registered for id '{0}'")]
    UnknownMapper(String),
}

/// Result type alias using MapperError.
pub type MapperResult<T> = Result<T, MapperError>;
