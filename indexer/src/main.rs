use anyhow::{Context, Result};
use clap::Parser;
use engine::persist::save_index;
use engine::IndexBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build a boolean inverted index from a document dump", long_about = None)]
struct Args {
    /// Input dump file
    dump: PathBuf,
    /// Output index file, e.g. data/boolean_index.idx
    output: PathBuf,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Exit code contract: 1 for usage errors, 2 for build failures.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    match build(&args.dump, &args.output) {
        Ok(committed) => {
            tracing::info!(
                committed,
                output = %args.output.display(),
                "index built"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "index build failed");
            ExitCode::from(2)
        }
    }
}

fn build(dump: &Path, output: &Path) -> Result<usize> {
    let file = File::open(dump)
        .with_context(|| format!("failed to open dump file {}", dump.display()))?;
    let mut builder = IndexBuilder::new();
    let committed = builder.ingest_dump(BufReader::new(file))?;
    tracing::info!(committed, "documents ingested");
    let (terms, docs) = builder.into_parts();
    save_index(output, &terms, &docs)?;
    Ok(committed)
}
