mod char_builder;
mod table;
mod word_builder;

pub use char_builder::{CharFingerprintBuilder, CharFingerprintConfig};
pub use word_builder::{WordFingerprintBuilder, WordFingerprintConfig, WordPredicate};

use crate::error::ConfigurationError;
use crate::span::Span;

/// Id assigned to a unique chunk of text by a [`FingerprintBuilder`]. Dense,
/// sequential (0, 1, 2, …) within a single builder instance, and stable for
/// that instance's lifetime.
pub type FingerprintId = u32;

/// Splits `chars` into maximal runs of non-line-separator characters, each
/// paired with its starting offset in `chars`. Used when `allow_multiline` is
/// false so no fingerprint spans a `\n`/`\r\n` boundary.
pub(crate) fn split_lines(chars: &[char]) -> Vec<(usize, &[char])> {
    let mut out = Vec::new();
    let mut i = 0;
    let len = chars.len();
    while i < len {
        if chars[i] == '\n' || chars[i] == '\r' {
            i += 1;
            continue;
        }
        let start = i;
        while i < len && chars[i] != '\n' && chars[i] != '\r' {
            i += 1;
        }
        out.push((start, &chars[start..i]));
    }
    out
}

/// Turns text into a deterministic stream of `(Span, FingerprintId)` chunks.
///
/// Two variants share one contract: [`FingerprintBuilder::Char`] groups a
/// fixed number of characters per chunk, [`FingerprintBuilder::Word`] groups
/// a fixed number of words. A `DuplicateFinder` only ever depends on
/// [`FingerprintBuilder::build_fingerprints`]; the variant behind it is
/// otherwise opaque.
#[derive(Debug, Clone)]
pub enum FingerprintBuilder {
    Char(CharFingerprintBuilder),
    Word(WordFingerprintBuilder),
}

impl FingerprintBuilder {
    pub fn char(config: CharFingerprintConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::Char(CharFingerprintBuilder::new(config)?))
    }

    pub fn word(config: WordFingerprintConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::Word(WordFingerprintBuilder::new(config)?))
    }

    /// Fingerprints `text`, returning spans sorted ascending by
    /// `(start, end)`. Calling this again with the same text yields an
    /// equivalent sequence; ids are stable once assigned.
    pub fn build_fingerprints(&mut self, text: &str) -> Vec<(Span, FingerprintId)> {
        match self {
            Self::Char(builder) => builder.build_fingerprints(text),
            Self::Word(builder) => builder.build_fingerprints(text),
        }
    }
}
