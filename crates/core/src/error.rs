//! Error types for the core crate.

use thiserror::Error;

/// Core error type.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Document shape that cannot be flattened (excessive nesting,
    /// duplicate leaf labels).
    #[error("Invalid document: {0}")]
    Input(String),

    /// Value that has no canonical byte encoding (e.g. NaN).
    #[error("Value not canonically representable: {0}")]
    Encoding(String),
}

/// Result type alias for CoreError.
pub type Result<T> = std::result::Result<T, CoreError>;
