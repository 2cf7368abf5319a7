mod document;
mod duplicate;
mod error;
mod finder;
mod fingerprint;
mod overlap;
mod span;

pub use duplicate::Duplicate;
pub use error::{ConfigurationError, FinderError};
pub use finder::DuplicateFinder;
pub use fingerprint::{
    CharFingerprintBuilder, CharFingerprintConfig, FingerprintBuilder, FingerprintId,
    WordFingerprintBuilder, WordFingerprintConfig, WordPredicate,
};
pub use overlap::OverlapBackend;
pub use span::Span;
