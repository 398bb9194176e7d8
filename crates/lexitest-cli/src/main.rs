//! lexitest CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "lexitest", version, about = "Vocabulary quiz in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz session
    Play {
        /// Path to a .toml word bank
        #[arg(long)]
        bank: PathBuf,

        /// Questions in the initial batch
        #[arg(long, default_value = "10")]
        count: usize,

        /// Options per question
        #[arg(long, default_value = "4")]
        choices: usize,

        /// Streak required before the quiz may finish
        #[arg(long, default_value = "3")]
        required_streak: u32,

        /// Seed for a reproducible session
        #[arg(long)]
        seed: Option<u64>,

        /// Write the session report JSON here when the quiz finishes
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate word bank TOML files
    Validate {
        /// Path to a word bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Render a saved session report
    Report {
        /// Report JSON produced by `play --output`
        #[arg(long)]
        file: PathBuf,

        /// Output format: text, markdown, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter word bank
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lexitest=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            bank,
            count,
            choices,
            required_streak,
            seed,
            output,
        } => commands::play::execute(bank, count, choices, required_streak, seed, output),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Report { file, format } => commands::report::execute(file, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
