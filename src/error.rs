use thiserror::Error;

/// Domain failures of the simulator core.
///
/// These are invariant violations which the wizard never lets through in normal use.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{kind} `{key}` is not found in the catalog")]
    NotFound { kind: &'static str, key: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0} must be selected first")]
    Precondition(&'static str),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl Error {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound { kind, key: key.into() }
    }
}
