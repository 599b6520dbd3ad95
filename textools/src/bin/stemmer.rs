//! Standalone suffix-stripping stemmer. Not wired into the index
//! pipeline; it shares only the token normalization rules with it.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "stemmer")]
#[command(about = "Suffix-stripping stemmer; runs a demo when no files are given", long_about = None)]
struct Args {
    /// Input file of whitespace-separated tokens
    #[arg(requires = "output")]
    input: Option<String>,
    /// Output file for stemmed, space-separated tokens
    output: Option<String>,
}

const SUFFIXES: [&str; 6] = ["ing", "ed", "ly", "es", "s", "'s"];

// (suffix, replacement, minimum length of the word it applies to)
const SUBSTITUTIONS: [(&str, &str, usize); 9] = [
    ("ies", "y", 6),
    ("ied", "y", 6),
    ("iness", "y", 7),
    ("ization", "ize", 9),
    ("ational", "ate", 9),
    ("tional", "tion", 8),
    ("biliti", "ble", 8),
    ("fulness", "ful", 9),
    ("ousness", "ous", 9),
];

/// Heuristic stem: strip one plain suffix when the stem stays longer than
/// the minimum, apply one compound substitution, then collapse a trailing
/// doubled consonant. ASCII only; non-ASCII words pass through unchanged.
pub fn stem(word: &str) -> String {
    if !word.is_ascii() {
        return word.to_string();
    }
    let mut result = word.to_string();

    for suffix in SUFFIXES {
        if result.len() > suffix.len() + 2 && result.ends_with(suffix) {
            result.truncate(result.len() - suffix.len());
            break;
        }
    }

    for (suffix, replacement, min_len) in SUBSTITUTIONS {
        if result.ends_with(suffix) && result.len() >= min_len {
            result.truncate(result.len() - suffix.len());
            result.push_str(replacement);
            break;
        }
    }

    let bytes = result.as_bytes();
    if bytes.len() > 3 {
        let last = bytes[bytes.len() - 1];
        if last == bytes[bytes.len() - 2] && !is_vowel(last) {
            result.truncate(result.len() - 1);
        }
    }

    result
}

fn is_vowel(b: u8) -> bool {
    matches!(b.to_ascii_lowercase(), b'a' | b'e' | b'i' | b'o' | b'u')
}

/// Batch mode: keep only alphanumeric characters per token, lowercase,
/// drop tokens shorter than 2 characters, stem, write space-separated.
fn process_file(input: &str, output: &str) -> Result<()> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {input}"))?;
    let mut out = String::new();
    for word in text.split_whitespace() {
        let clean: String = word
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if clean.len() >= 2 {
            out.push_str(&stem(&clean));
            out.push(' ');
        }
    }
    fs::write(output, out).with_context(|| format!("failed to write {output}"))?;
    tracing::info!(input, output, "stemming complete");
    Ok(())
}

fn demo() {
    let samples = [
        "running", "runner", "runs", "ran", "happily", "happiness", "happier",
        "cats", "computing", "computer", "computation", "jumping", "jumped",
    ];
    println!("word -> stem");
    println!("============");
    for word in samples {
        println!("{word} -> {}", stem(word));
    }
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    match (args.input, args.output) {
        (Some(input), Some(output)) => {
            if let Err(e) = process_file(&input, &output) {
                tracing::error!(error = %format!("{e:#}"), "stemming failed");
                return ExitCode::from(1);
            }
            ExitCode::SUCCESS
        }
        _ => {
            demo();
            ExitCode::SUCCESS
        }
    }
}
