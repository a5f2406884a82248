//! # askgate CLI
//!
//! Command-line interface for the askgate guideline QA service.
//!
//! ## Usage
//!
//! ```bash
//! askgate --config ./config/askgate.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `askgate ask "<question>"` | Answer a single question |
//! | `askgate check "<question>"` | Run the input guard only and print the verdict |
//! | `askgate corpus` | Print corpus statistics |
//! | `askgate serve` | Start the HTTP server |

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use askgate::answer::run_ask;
use askgate::config::{load_config, Config};
use askgate::corpus::load_corpus;
use askgate::guard::{validate, GuardSet};
use askgate::server::run_server;

/// askgate — a guarded question-answering service over policy guideline text.
#[derive(Parser)]
#[command(
    name = "askgate",
    about = "askgate — guarded question answering over policy guideline text",
    version,
    long_about = "askgate answers natural-language questions against a static corpus of \
    guideline lines, optionally forwarding a grounded prompt to a generation provider, \
    with prompt-injection validation on the way in and leak redaction on the way out."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/askgate.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Answer a single question.
    ///
    /// Validates the question, scores every corpus line, and prints the
    /// answer with its references. Uses the configured generation provider
    /// when one is enabled, falling back to the top-ranked guideline lines.
    Ask {
        /// The question text.
        question: String,
    },

    /// Run only the input guard against a question.
    ///
    /// Prints `accepted`, or the rejection message, and exits nonzero on
    /// rejection. Useful for testing attack-pattern coverage.
    Check {
        /// The question text.
        question: String,
    },

    /// Load the corpus and print line statistics.
    Corpus,

    /// Start the HTTP server.
    ///
    /// Serves `POST /ask` and `GET /health` on the configured bind address.
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Ask { question } => run_ask(&config, &question).await,
        Commands::Check { question } => run_check(&config, &question),
        Commands::Corpus => run_corpus(&config),
        Commands::Serve => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();
            run_server(&config).await
        }
    }
}

fn run_check(config: &Config, question: &str) -> Result<()> {
    let guards = GuardSet::new()?;
    match validate(question, &guards.attack, config.limits.max_question_chars) {
        Some(message) => {
            println!("rejected: {}", message);
            std::process::exit(1);
        }
        None => {
            println!("accepted");
            Ok(())
        }
    }
}

fn run_corpus(config: &Config) -> Result<()> {
    let lines = load_corpus(&config.corpus.path)?;
    let chars: usize = lines.iter().map(|line| line.chars().count()).sum();

    println!("corpus: {}", config.corpus.path.display());
    println!("lines:  {}", lines.len());
    println!("chars:  {}", chars);

    Ok(())
}
