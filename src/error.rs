//! Crate-wide failure taxonomy.
//!
//! Library code returns these typed variants with `?`; the CLI binary folds
//! them into `Box<dyn Error>` at its entry points.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VaultError {
    /// The remote describe-image call did not succeed. Carries no partial
    /// result.
    #[error("describe request failed: {0}")]
    Describe(String),

    /// The remote embed-text call did not succeed. Carries no partial result.
    #[error("embed request failed: {0}")]
    Embed(String),

    /// An index artifact failed to parse as the expected structure. The
    /// session's index slot is left unset; prior folder state is untouched.
    #[error("invalid index format: {0}")]
    InvalidIndexFormat(String),

    /// Search was attempted before both session halves were loaded, or with
    /// a blank query.
    #[error("session is not ready to search")]
    NotReady,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
