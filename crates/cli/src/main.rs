mod args;
mod json;

use std::env;
use std::io;
use std::path::Path;

use docdup_core::{CharFingerprintConfig, DuplicateFinder, FingerprintBuilder, WordFingerprintConfig};

use crate::args::{FingerprintType, ParsedArgs, parse_args, print_help};
use crate::json::{TestCaseDuplicate, read_test_case, to_test_case_duplicate, write_json};

fn main() {
    let argv: Vec<String> = env::args().skip(1).collect();

    if argv.iter().any(|a| a == "-V" || a == "--version") {
        println!("docdup {}", env!("CARGO_PKG_VERSION"));
        return;
    }
    if argv.iter().any(|a| a == "-h" || a == "--help") {
        print_help();
        return;
    }

    let parsed = match parse_args(&argv) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("Error: {message}\n");
            print_help();
            std::process::exit(2);
        }
    };

    match run(&parsed) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn build_finder(parsed: &ParsedArgs, fingerprint_length: usize, min_duplicate_length: u32) -> io::Result<DuplicateFinder> {
    let builder = match parsed.fingerprint_type {
        FingerprintType::Char => FingerprintBuilder::char(CharFingerprintConfig {
            fingerprint_length,
            orf: parsed.orf,
            case_sensitive: parsed.case_sensitive,
            allow_multiline: parsed.allow_multiline,
        }),
        FingerprintType::Word => FingerprintBuilder::word(WordFingerprintConfig {
            fingerprint_length,
            orf: parsed.orf,
            case_sensitive: parsed.case_sensitive,
            allow_multiline: parsed.allow_multiline,
            ..WordFingerprintConfig::default()
        }),
    }
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;

    DuplicateFinder::new(builder, min_duplicate_length, parsed.overlap_backend)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))
}

fn run(parsed: &ParsedArgs) -> io::Result<i32> {
    if let Some(path) = &parsed.test_case {
        return run_test_case(parsed, path);
    }
    run_documents(parsed)
}

fn run_documents(parsed: &ParsedArgs) -> io::Result<i32> {
    let default_fingerprint_length = match parsed.fingerprint_type {
        FingerprintType::Char => 10,
        FingerprintType::Word => 4,
    };
    let fingerprint_length = parsed.fingerprint_length.unwrap_or(default_fingerprint_length);
    let min_duplicate_length = parsed
        .min_duplicate_length
        .unwrap_or(fingerprint_length as u32);

    let mut finder = build_finder(parsed, fingerprint_length, min_duplicate_length)?;

    let mut all_dups: Vec<TestCaseDuplicate> = Vec::new();
    let mut any_dups = false;
    for path in &parsed.doc_paths {
        let text = std::fs::read_to_string(path)?;
        let doc_id = path.to_string_lossy().into_owned();
        let dups = finder
            .find_duplicates(doc_id.clone(), &text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
        any_dups = any_dups || !dups.is_empty();
        for dup in &dups {
            all_dups.push(to_test_case_duplicate(&doc_id, &text, dup));
        }
    }

    if parsed.json {
        write_json(&all_dups)?;
    } else {
        print_duplicates_text(&all_dups);
    }

    Ok(if any_dups { 1 } else { 0 })
}

fn print_duplicates_text(dups: &[TestCaseDuplicate]) {
    if dups.is_empty() {
        println!("no duplicates found");
        return;
    }
    for dup in dups {
        println!(
            "{} [{}, {}) duplicates {} [{}, {}): {:?}",
            dup.target_doc_id,
            dup.target_start,
            dup.target_end,
            dup.source_doc_id,
            dup.source_start,
            dup.source_end,
            dup.text
        );
    }
}

fn run_test_case(parsed: &ParsedArgs, path: &Path) -> io::Result<i32> {
    let case = read_test_case(path)?;

    let fingerprint_type = match case.settings.fingerprint_type.as_str() {
        "char" => FingerprintType::Char,
        "word" => FingerprintType::Word,
        other => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unknown fingerprint_type {other:?} in {path:?}"),
            ));
        }
    };
    let effective_args = ParsedArgs {
        fingerprint_type,
        ..parsed.clone()
    };

    let mut finder = build_finder(
        &effective_args,
        case.settings.fingerprint_length,
        case.settings.min_duplicate_length,
    )?;

    let mut found: Vec<TestCaseDuplicate> = Vec::new();
    for doc in &case.docs {
        let dups = finder
            .find_duplicates(doc.id.clone(), &doc.text)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
        for dup in &dups {
            found.push(to_test_case_duplicate(&doc.id, &doc.text, dup));
        }
    }

    let passed = found == case.duplicates;

    if parsed.json {
        write_json(&serde_json::json!({
            "passed": passed,
            "expected": case.duplicates,
            "found": found,
        }))?;
    } else if passed {
        println!("PASS ({} duplicates)", found.len());
    } else {
        println!("FAIL");
        println!("expected: {:#?}", case.duplicates);
        println!("found:    {found:#?}");
    }

    Ok(if passed { 0 } else { 1 })
}
