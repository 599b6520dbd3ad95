//! Corpus frequency counter: tokenizes raw bytes into lowercase
//! alphanumeric runs, counts occurrences and writes a frequency CSV plus
//! a statistics report. Standalone; not wired into the index pipeline.

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "wordfreq")]
#[command(about = "Count word frequencies in a corpus", long_about = None)]
struct Args {
    /// Input corpus file
    #[arg(default_value = "data/corpus.txt")]
    input: PathBuf,
    /// Output CSV (Rank,Frequency,Word, descending frequency)
    #[arg(default_value = "results/frequencies.csv")]
    output: PathBuf,
    /// Statistics report path
    #[arg(long, default_value = "results/stats.txt")]
    stats: PathBuf,
}

#[derive(Default)]
struct FrequencyTable {
    counts: HashMap<String, u64>,
    total_tokens: u64,
    total_chars: u64,
}

impl FrequencyTable {
    fn add(&mut self, token: &str) {
        self.total_tokens += 1;
        self.total_chars += token.len() as u64;
        *self.counts.entry(token.to_string()).or_insert(0) += 1;
    }

    fn unique_words(&self) -> usize {
        self.counts.len()
    }

    fn avg_token_length(&self) -> f64 {
        if self.total_tokens > 0 {
            self.total_chars as f64 / self.total_tokens as f64
        } else {
            0.0
        }
    }
}

/// Scan raw bytes into lowercase ASCII alphanumeric runs of length >= 2
/// and count them.
fn count_tokens(data: &[u8]) -> FrequencyTable {
    let mut table = FrequencyTable::default();
    let mut current = String::new();
    for &b in data {
        if b.is_ascii_alphanumeric() {
            current.push(b.to_ascii_lowercase() as char);
        } else if !current.is_empty() {
            if current.len() >= 2 {
                table.add(&current);
            }
            current.clear();
        }
    }
    if current.len() >= 2 {
        table.add(&current);
    }
    table
}

fn write_csv(path: &Path, table: &FrequencyTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut entries: Vec<(&str, u64)> = table
        .counts
        .iter()
        .map(|(w, &f)| (w.as_str(), f))
        .collect();
    // Descending frequency; tie order is unspecified.
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = String::from("Rank,Frequency,Word\n");
    for (rank, (word, freq)) in entries.iter().enumerate() {
        out.push_str(&format!("{},{freq},{word}\n", rank + 1));
    }
    fs::write(path, out).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn write_stats(
    path: &Path,
    table: &FrequencyTable,
    input_bytes: u64,
    elapsed_ms: f64,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let bytes_per_ms = if elapsed_ms > 0.0 {
        input_bytes as f64 / elapsed_ms
    } else {
        0.0
    };
    let tokens_per_sec = if elapsed_ms > 0.0 {
        table.total_tokens as f64 / elapsed_ms * 1000.0
    } else {
        0.0
    };
    writeln!(f, "======= TOKENIZATION STATISTICS =======")?;
    writeln!(f, "Input size: {input_bytes} bytes ({} KB)", input_bytes / 1024)?;
    writeln!(f, "Total tokens: {}", table.total_tokens)?;
    writeln!(f, "Unique words: {}", table.unique_words())?;
    writeln!(f, "Average token length: {:.2} chars", table.avg_token_length())?;
    writeln!(f, "Elapsed: {elapsed_ms:.2} ms")?;
    writeln!(f, "Throughput: {bytes_per_ms:.2} bytes/ms")?;
    writeln!(f, "Tokenization rate: {tokens_per_sec:.2} tokens/sec")?;
    writeln!(f, "=======================================")?;
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let data = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let start = Instant::now();
    let table = count_tokens(&data);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    write_csv(&args.output, &table)?;
    write_stats(&args.stats, &table, data.len() as u64, elapsed_ms)?;
    tracing::info!(
        tokens = table.total_tokens,
        unique = table.unique_words(),
        output = %args.output.display(),
        "frequency analysis complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        tracing::error!(error = %format!("{e:#}"), "frequency analysis failed");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
