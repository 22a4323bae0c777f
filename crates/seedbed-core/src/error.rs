use thiserror::Error;

/// Core error type shared across Seedbed crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema directory violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// A field path is malformed.
    #[error("invalid field path: {0}")]
    InvalidPath(String),
}

/// Convenience alias for results returned by Seedbed crates.
pub type Result<T> = std::result::Result<T, Error>;
