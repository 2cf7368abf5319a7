use std::path::PathBuf;

use docdup_core::OverlapBackend;

const HELP_TEXT: &str = concat!(
    "docdup (streaming character-duplicate detection)\n",
    "\n",
    "Usage:\n",
    "  docdup [options] <file> [file ...]\n",
    "  docdup --test-case <path.json>\n",
    "\n",
    "Each plain-text file is treated as a document, compared against every file\n",
    "before it on the command line, in the order given.\n",
    "\n",
    "Options:\n",
    "  --test-case <path>          Run a JSON test-case file instead of plain-text files\n",
    "  --fingerprint-type <t>      char | word (default: char)\n",
    "  --fingerprint-length <n>    Chunk size (default: 10 char, 4 word)\n",
    "  --orf <n>                  Window shift (default: 1)\n",
    "  --min-duplicate-length <n>  Minimum reported duplicate length (default: fingerprint length)\n",
    "  --case-insensitive          Fold case before fingerprinting\n",
    "  --no-multiline              Restart fingerprinting at every line break\n",
    "  --overlap-backend <b>       none | interval-tree | ncls (default: ncls)\n",
    "  --json                      Output JSON instead of text\n",
    "  -V, --version               Show version\n",
    "  -h, --help                  Show help\n",
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FingerprintType {
    Char,
    Word,
}

impl FingerprintType {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "char" => Some(Self::Char),
            "word" => Some(Self::Word),
            _ => None,
        }
    }
}

fn parse_overlap_backend(raw: &str) -> Option<OverlapBackend> {
    match raw {
        "none" => Some(OverlapBackend::None),
        "interval-tree" => Some(OverlapBackend::IntervalTree),
        "ncls" => Some(OverlapBackend::Ncls),
        _ => None,
    }
}

pub(crate) fn print_help() {
    print!("{HELP_TEXT}");
}

#[derive(Debug, Clone)]
pub(crate) struct ParsedArgs {
    pub(crate) test_case: Option<PathBuf>,
    pub(crate) fingerprint_type: FingerprintType,
    pub(crate) fingerprint_length: Option<usize>,
    pub(crate) orf: usize,
    pub(crate) min_duplicate_length: Option<u32>,
    pub(crate) case_sensitive: bool,
    pub(crate) allow_multiline: bool,
    pub(crate) overlap_backend: OverlapBackend,
    pub(crate) json: bool,
    pub(crate) doc_paths: Vec<PathBuf>,
}

fn parse_usize(name: &str, raw: &str) -> Result<usize, String> {
    raw.parse::<usize>().map_err(|_| format!("{name} must be a non-negative integer"))
}

fn parse_u32(name: &str, raw: &str) -> Result<u32, String> {
    raw.parse::<u32>().map_err(|_| format!("{name} must be a non-negative integer"))
}

pub(crate) fn parse_args(argv: &[String]) -> Result<ParsedArgs, String> {
    let mut test_case: Option<PathBuf> = None;
    let mut fingerprint_type = FingerprintType::Char;
    let mut fingerprint_length: Option<usize> = None;
    let mut orf = 1usize;
    let mut min_duplicate_length: Option<u32> = None;
    let mut case_sensitive = true;
    let mut allow_multiline = true;
    let mut overlap_backend = OverlapBackend::Ncls;
    let mut json = false;
    let mut doc_paths: Vec<PathBuf> = Vec::new();

    let mut i = 0;
    while i < argv.len() {
        let arg = &argv[i];
        match arg.as_str() {
            "--" => {
                doc_paths.extend(argv[(i + 1)..].iter().map(PathBuf::from));
                break;
            }
            "--test-case" => {
                let raw = argv.get(i + 1).ok_or("--test-case requires a value")?;
                test_case = Some(PathBuf::from(raw));
                i += 2;
            }
            "--fingerprint-type" => {
                let raw = argv.get(i + 1).ok_or("--fingerprint-type requires a value")?;
                fingerprint_type = FingerprintType::parse(raw)
                    .ok_or("--fingerprint-type must be one of: char, word")?;
                i += 2;
            }
            "--fingerprint-length" => {
                let raw = argv.get(i + 1).ok_or("--fingerprint-length requires a value")?;
                fingerprint_length = Some(parse_usize("--fingerprint-length", raw)?);
                i += 2;
            }
            "--orf" => {
                let raw = argv.get(i + 1).ok_or("--orf requires a value")?;
                orf = parse_usize("--orf", raw)?;
                i += 2;
            }
            "--min-duplicate-length" => {
                let raw = argv.get(i + 1).ok_or("--min-duplicate-length requires a value")?;
                min_duplicate_length = Some(parse_u32("--min-duplicate-length", raw)?);
                i += 2;
            }
            "--case-insensitive" => {
                case_sensitive = false;
                i += 1;
            }
            "--no-multiline" => {
                allow_multiline = false;
                i += 1;
            }
            "--overlap-backend" => {
                let raw = argv.get(i + 1).ok_or("--overlap-backend requires a value")?;
                overlap_backend = parse_overlap_backend(raw)
                    .ok_or("--overlap-backend must be one of: none, interval-tree, ncls")?;
                i += 2;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "-h" | "--help" | "-V" | "--version" => {
                i += 1;
            }
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {other}"));
            }
            other => {
                doc_paths.push(PathBuf::from(other));
                i += 1;
            }
        }
    }

    if test_case.is_none() && doc_paths.is_empty() {
        return Err("no input: pass one or more document files, or --test-case <path>".to_string());
    }
    if test_case.is_some() && !doc_paths.is_empty() {
        return Err("--test-case conflicts with plain-text document arguments".to_string());
    }

    Ok(ParsedArgs {
        test_case,
        fingerprint_type,
        fingerprint_length,
        orf,
        min_duplicate_length,
        case_sensitive,
        allow_multiline,
        overlap_backend,
        json,
        doc_paths,
    })
}
