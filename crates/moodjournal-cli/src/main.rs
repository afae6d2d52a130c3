//! Mood Journal CLI
//!
//! Adds classified entries to the journal, prints recent entries and
//! evaluates the classifier against labeled samples.

use anyhow::Result;
use clap::Parser;
use moodjournal_classifiers::MoodAnalyzer;
use moodjournal_storage::JournalStore;
use std::io::Write;

mod cli;
mod commands;
mod config;

use cli::{Cli, Commands};
use config::CliConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CliConfig::load(&cli.config, &cli)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Add { text } => {
            let analyzer = MoodAnalyzer::from_config(&config.analyzer)?;
            let store = JournalStore::from_config(&config.storage);
            commands::add(&analyzer, &store, &text.join(" "), &mut out)?;
        }
        Commands::Summary { count } => {
            let store = JournalStore::from_config(&config.storage);
            commands::summary(&store, *count, &mut out)?;
        }
        Commands::Classify { text, explain } => {
            let analyzer = MoodAnalyzer::from_config(&config.analyzer)?;
            commands::classify(&analyzer, &text.join(" "), *explain, &mut out)?;
        }
        Commands::Evaluate {
            files,
            max_mismatches,
        } => {
            let analyzer = MoodAnalyzer::from_config(&config.analyzer)?;
            commands::evaluate_files(&analyzer, files, *max_mismatches, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Logs go to stderr so command output stays clean
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("moodjournal=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("moodjournal=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
