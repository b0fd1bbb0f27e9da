#![forbid(unsafe_code)]

//! Error types shared across the engine.

use thiserror::Error;

/// Errors surfaced by overlay lifecycle operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// An operation violated a lifecycle invariant. Indicates caller
    /// misuse; never retried.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A transition carried unusable parameters. Raised at phase entry,
    /// before any animation runs.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let err = Error::InvalidState("container already holds a content");
        assert_eq!(
            err.to_string(),
            "invalid state: container already holds a content"
        );
    }
}
