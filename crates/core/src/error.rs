use std::fmt;
use std::sync::Arc;

/// Invalid `FingerprintBuilder` configuration: bad `fingerprint_length` or `orf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError(pub(crate) String);

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ConfigurationError {}

/// Errors a [`crate::DuplicateFinder`] can report back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinderError {
    /// `min_duplicate_length` or the requested [`crate::OverlapBackend`] is invalid.
    Configuration(String),
    /// `find_duplicates` was called twice with the same document id.
    DuplicateDocumentId(Arc<str>),
}

impl fmt::Display for FinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FinderError::Configuration(message) => write!(f, "{message}"),
            FinderError::DuplicateDocumentId(id) => {
                write!(f, "already processed document with id {id}")
            }
        }
    }
}

impl std::error::Error for FinderError {}

impl From<ConfigurationError> for FinderError {
    fn from(err: ConfigurationError) -> Self {
        FinderError::Configuration(err.0)
    }
}
