use crate::error::ConfigurationError;
use crate::span::Span;

use super::table::ChunkTable;
use super::{FingerprintId, split_lines};

const LINE_SEPARATORS: [&str; 2] = ["\n", "\r\n"];

/// Configuration for a [`CharFingerprintBuilder`].
#[derive(Debug, Clone)]
pub struct CharFingerprintConfig {
    /// Number of characters per fingerprinted chunk. The shorter is never
    /// detected as a duplicate.
    pub fingerprint_length: usize,
    /// Shift, in characters, between successive chunk start positions.
    pub orf: usize,
    pub case_sensitive: bool,
    /// When false, fingerprinting restarts at every line break so no chunk
    /// spans a `\n`/`\r\n` boundary.
    pub allow_multiline: bool,
}

impl Default for CharFingerprintConfig {
    fn default() -> Self {
        Self {
            fingerprint_length: 10,
            orf: 1,
            case_sensitive: true,
            allow_multiline: true,
        }
    }
}

/// Fingerprints text by sliding a `fingerprint_length`-character window over
/// it with an `orf`-character shift.
///
/// For instance `"Alice is nice"`, fingerprinted with `fingerprint_length = 3`
/// and `orf = 1`, emits one chunk per character offset (`"Ali"`, `"lic"`,
/// `"ice"`, `"ce "`, …) until the window reaches the end of the text; the
/// chunk `"ice"` recurs (`"Al[ice]"` and `"n[ice]"`) and reuses its
/// previously assigned id rather than minting a new one. Remembering
/// previously seen chunks across calls is the whole point: comparing
/// documents chunk-by-chunk is what lets `DuplicateFinder` run faster than a
/// char-by-char diff.
#[derive(Debug, Clone)]
pub struct CharFingerprintBuilder {
    config: CharFingerprintConfig,
    table: ChunkTable,
}

impl CharFingerprintBuilder {
    pub fn new(config: CharFingerprintConfig) -> Result<Self, ConfigurationError> {
        if config.fingerprint_length < 1 {
            return Err(ConfigurationError(
                "fingerprint length must be at least 1".to_owned(),
            ));
        }
        if config.fingerprint_length < 2 {
            log::warn!(
                "using a fingerprint length smaller than 2 defeats the purpose of \
                 fingerprinting since there will be one fingerprint per character; \
                 duplicate finding is going to be very slow"
            );
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

    fn fingerprint_chars(&mut self, chars: &[char], text_start: usize) -> Vec<(Span, FingerprintId)> {
        let mut out = Vec::new();
        let len = chars.len();
        if len == 0 {
            return out;
        }

        let mut start = 0usize;
        while start < len {
            let end = (start + self.config.fingerprint_length).min(len);
            let chunk: String = chars[start..end].iter().collect();

            if !LINE_SEPARATORS.contains(&chunk.as_str()) {
                let id = self.table.id_for(&chunk);
                out.push((
                    Span::new((text_start + start) as u32, (text_start + end) as u32),
                    id,
                ));
            }

            if end == len {
                break;
            }
            start += self.config.orf;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(out: &[(Span, FingerprintId)]) -> Vec<(u32, u32)> {
        out.iter().map(|(span, _)| (span.start, span.end)).collect()
    }

    #[test]
    fn rejects_zero_length() {
        let err = CharFingerprintBuilder::new(CharFingerprintConfig {
            fingerprint_length: 0,
            ..CharFingerprintConfig::default()
        });
        assert!(err.is_err());
    }

    #[test]
    fn rejects_zero_orf() {
        let err = CharFingerprintBuilder::new(CharFingerprintConfig {
            orf: 0,
            ..CharFingerprintConfig::default()
        });
        assert!(err.is_err());
    }

    #[test]
    fn repeated_chunk_reuses_id() {
        let mut builder = CharFingerprintBuilder::new(CharFingerprintConfig {
            fingerprint_length: 3,
            orf: 1,
            case_sensitive: true,
            allow_multiline: true,
        })
        .unwrap();

        let out = builder.build_fingerprints("Alice is nice");
        let ids: Vec<FingerprintId> = out.iter().map(|(_, id)| *id).collect();
        let last = ids.len() - 1;
        assert_eq!(ids[2], ids[last], "both \"ice\" chunks should share an id");
        assert_eq!(
            ids.iter().collect::<std::collections::HashSet<_>>().len(),
            ids.len() - 1,
            "exactly one id should repeat"
        );
    }

    #[test]
    fn tail_chunk_shorter_than_fingerprint_length_is_emitted_once() {
        let mut builder = CharFingerprintBuilder::new(CharFingerprintConfig {
            fingerprint_length: 5,
            orf: 1,
            case_sensitive: true,
            allow_multiline: true,
        })
        .unwrap();

        let out = builder.build_fingerprints("hi");
        assert_eq!(spans(&out), vec![(0, 2)]);
    }

    #[test]
    fn empty_text_yields_no_fingerprints() {
        let mut builder = CharFingerprintBuilder::new(CharFingerprintConfig::default()).unwrap();
        assert!(builder.build_fingerprints("").is_empty());
    }

    #[test]
    fn skips_line_separator_chunks_but_continues() {
        let mut builder = CharFingerprintBuilder::new(CharFingerprintConfig {
            fingerprint_length: 1,
            orf: 1,
            case_sensitive: true,
            allow_multiline: true,
        })
        .unwrap();

        let out = builder.build_fingerprints("a\nb");
        // the lone "\n" chunk is skipped, but "a" and "b" are still emitted
        assert_eq!(spans(&out), vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn disallowing_multiline_restarts_fingerprinting_per_line() {
        let mut builder = CharFingerprintBuilder::new(CharFingerprintConfig {
            fingerprint_length: 4,
            orf: 1,
            case_sensitive: true,
            allow_multiline: false,
        })
        .unwrap();

        let out = builder.build_fingerprints("ab\ncd");
        // neither line is long enough to reach the line boundary anyway, but
        // each line is fingerprinted independently starting at its own offset
        assert_eq!(spans(&out), vec![(0, 2), (3, 5)]);
    }

    #[test]
    fn case_insensitive_chunks_share_an_id() {
        let mut builder = CharFingerprintBuilder::new(CharFingerprintConfig {
            fingerprint_length: 2,
            orf: 2,
            case_sensitive: false,
            allow_multiline: true,
        })
        .unwrap();

        let out = builder.build_fingerprints("AbAb");
        let ids: Vec<FingerprintId> = out.iter().map(|(_, id)| *id).collect();
        assert_eq!(ids, vec![0, 0]);
    }
}
