//! Error types for the calculator.
//!
//! All fallible operations in this crate return [`Result<T>`], which uses
//! the [`Error`] enum for error variants.

/// Errors returned by address math, the calculator pages and the output layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input has the wrong shape.
    ///
    /// Wrong number of octets, non-numeric octets, binary groups that are not
    /// exactly eight `0`/`1` characters, or a non-contiguous mask in strict mode.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Input is numeric but outside its domain (octet > 255, prefix > 32).
    #[error("Out of range: {0}")]
    Range(String),

    /// Invalid edit of a subnet plan.
    #[error("Invalid diagram: {0}")]
    Diagram(String),

    /// Invalid settings file or override.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A report or diagram could not be laid out or encoded (PDF, PNG).
    #[error("Output error: {0}")]
    Output(String),

    /// File system error while exporting or reading settings.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for the validation errors a user can fix by editing their input.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidFormat(_) | Error::Range(_) | Error::Diagram(_)
        )
    }
}

/// A specialized Result type for calculator operations.
pub type Result<T> = std::result::Result<T, Error>;
