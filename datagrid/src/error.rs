//! Error types for grid configuration mutations.

/// Error type for column registry operations.
///
/// Resolution misses and out-of-bounds navigation are not errors; they
/// resolve to `None` or clamp silently. Only configuration mutations that
/// violate the registry contract report failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A column with the same key is already registered.
    #[error("duplicate column key: {0}")]
    DuplicateColumn(String),

    /// No column with the given key is registered.
    #[error("unknown column key: {0}")]
    UnknownColumn(String),

    /// The column exists but is not configured as resizable.
    #[error("column is not resizable: {0}")]
    NotResizable(String),

    /// The column exists but is not configured as filterable.
    #[error("column is not filterable: {0}")]
    NotFilterable(String),
}
