use crate::error::ConfigurationError;
use crate::span::Span;

use super::table::ChunkTable;
use super::{FingerprintId, split_lines};

fn default_is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// A predicate deciding which characters belong to a "word" for the purposes
/// of [`WordFingerprintBuilder`]. Rust-native stand-in for a configurable
/// word regexp: the core crate carries no regex dependency, and a function
/// pointer covers the same need (maximal runs of word/digit characters by
/// default) without one.
pub type WordPredicate = fn(char) -> bool;

/// Configuration for a [`WordFingerprintBuilder`].
#[derive(Debug, Clone)]
pub struct WordFingerprintConfig {
    /// Number of words per fingerprinted chunk. Must be at least 2 — a
    /// single-word window degenerates into per-word char matching, for which
    /// [`super::CharFingerprintBuilder`] is the right tool.
    pub fingerprint_length: usize,
    /// Shift, in words, between successive chunk start positions.
    pub orf: usize,
    pub case_sensitive: bool,
    pub allow_multiline: bool,
    pub is_word_char: WordPredicate,
}

impl Default for WordFingerprintConfig {
    fn default() -> Self {
        Self {
            fingerprint_length: 4,
            orf: 1,
            case_sensitive: true,
            allow_multiline: true,
            is_word_char: default_is_word_char,
        }
    }
}

/// Fingerprints text by sliding a `fingerprint_length`-word window over it
/// with an `orf`-word shift.
///
/// `"How are you? How are things?"`, fingerprinted with `fingerprint_length =
/// 2` and `orf = 1`, yields `"How are"`, `"are you"`, `"you? How"`,
/// `"How are"` (repeat), `"are things"` — note the trailing `?` is never
/// included because it sits outside any word-to-word span, and a chunk
/// covers *all* characters between its first and last word, not just the
/// words themselves.
#[derive(Debug, Clone)]
pub struct WordFingerprintBuilder {
    config: WordFingerprintConfig,
    table: ChunkTable,
}

impl WordFingerprintBuilder {
    pub fn new(config: WordFingerprintConfig) -> Result<Self, ConfigurationError> {
        if config.fingerprint_length < 2 {
            return Err(ConfigurationError(
                "word fingerprint length must be at least 2".to_owned(),
            ));
        }
        if config.orf < 1 {
            return Err(ConfigurationError("orf must be at least 1".to_owned()));
        }
        if config.orf > 1 {
            log::warn!("using an orf bigger than 1 will probably lead to duplicates being missed");
        }

        Ok(Self {
            config,
            table: ChunkTable::default(),
        })
    }

    pub fn build_fingerprints(&mut self, text: &str) -> Vec<(Span, FingerprintId)> {
        let lowered;
        let text: &str = if self.config.case_sensitive {
            text
        } else {
            lowered = text.to_lowercase();
            &lowered
        };
        let chars: Vec<char> = text.chars().collect();

        if self.config.allow_multiline {
            self.fingerprint_chars(&chars, 0)
        } else {
            let mut out = Vec::new();
            for (line_start, line) in split_lines(&chars) {
                out.extend(self.fingerprint_chars(line, line_start));
            }
            out
        }
    }

    fn word_spans(&self, chars: &[char]) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let len = chars.len();
        let mut i = 0;
        while i < len {
            if !(self.config.is_word_char)(chars[i]) {
                i += 1;
                continue;
            }
            let start = i;
            while i < len && (self.config.is_word_char)(chars[i]) {
                i += 1;
            }
            spans.push((start, i));
        }
        spans
    }

    fn fingerprint_chars(&mut self, chars: &[char], text_start: usize) -> Vec<(Span, FingerprintId)> {
        let mut out = Vec::new();
        let word_spans = self.word_spans(chars);
        let n = word_spans.len();
        if n == 0 {
            return out;
        }

        let mut i = 0usize;
        while i < n {
            let j = (i + self.config.fingerprint_length).min(n);
            let chunk_start = word_spans[i].0;
            let chunk_end = word_spans[j - 1].1;
            let chunk: String = chars[chunk_start..chunk_end].iter().collect();
            let id = self.table.id_for(&chunk);
            out.push((
                Span::new((text_start + chunk_start) as u32, (text_start + chunk_end) as u32),
                id,
            ));

            if j == n {
                break;
            }
            i += self.config.orf;
        }

        out
    }
}
