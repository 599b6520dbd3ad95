use clap::Parser;
use searcher::{Searcher, RESULT_LIMIT};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "searcher")]
#[command(about = "Boolean search over a prebuilt index", long_about = None)]
struct Args {
    /// Index file path
    #[arg(long, default_value = "data/boolean_index.idx")]
    index: PathBuf,
    /// One-shot query; without it an interactive loop is started
    query: Option<String>,
}

fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let searcher = match Searcher::open(&args.index) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(
                index = %args.index.display(),
                error = %format!("{e:#}"),
                "failed to load index"
            );
            return ExitCode::from(1);
        }
    };

    if let Some(query) = args.query {
        let results = searcher.execute(&query);
        print!("{}", searcher.format_results(&results, RESULT_LIMIT));
        return ExitCode::SUCCESS;
    }

    interactive_loop(&searcher);
    ExitCode::SUCCESS
}

fn interactive_loop(searcher: &Searcher) {
    println!("=== BOOLEAN SEARCH ===");
    println!("Supported query shapes:");
    println!("  - word1 word2 (implicit AND)");
    println!("  - word1 AND word2");
    println!("  - word1 OR word2");
    println!("  - NOT word");
    println!("Type 'quit' to exit");

    let stdin = io::stdin();
    loop {
        print!("\n>> ");
        let _ = io::stdout().flush();
        let mut query = String::new();
        match stdin.lock().read_line(&mut query) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let query = query.trim_end_matches(['\r', '\n']);
        if matches!(query, "quit" | "exit" | "q") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let start = Instant::now();
        let results = searcher.execute(query);
        let elapsed = start.elapsed();
        print!("{}", searcher.format_results(&results, RESULT_LIMIT));
        println!("Search time: {} ms", elapsed.as_millis());
    }
}
