use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "moodjournal")]
#[command(author, version, about = "Mood and energy journal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "config.yaml")]
    pub config: String,

    /// Journal file (overrides the configured path)
    #[arg(short, long, global = true)]
    pub journal: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify an entry and save it to the journal
    Add {
        /// Entry text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Show the most recent entries
    Summary {
        /// Number of entries
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
    },

    /// Classify text without saving it
    Classify {
        /// Text to classify
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Also print scores, decision path and overrides
        #[arg(short, long)]
        explain: bool,
    },

    /// Measure accuracy against labeled sample files
    Evaluate {
        /// JSON sample files
        #[arg(required = true, num_args = 1..)]
        files: Vec<PathBuf>,

        /// Fail when more samples than this are misclassified
        #[arg(long)]
        max_mismatches: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::parse_from(["moodjournal", "add", "Had", "a", "great", "day"]);
        match cli.command {
            Commands::Add { text } => assert_eq!(text.join(" "), "Had a great day"),
            other => panic!("unexpected command {:?}", other),
        }
        assert_eq!(cli.config, "config.yaml");
    }

    #[test]
    fn test_parse_summary_and_globals() {
        let cli = Cli::parse_from(["moodjournal", "summary", "-n", "5", "--verbose", "-j", "/tmp/j.json"]);
        assert!(cli.verbose);
        assert_eq!(cli.journal, Some(PathBuf::from("/tmp/j.json")));
        assert!(matches!(cli.command, Commands::Summary { count: 5 }));

        let cli = Cli::parse_from(["moodjournal", "summary"]);
        assert!(matches!(cli.command, Commands::Summary { count: 3 }));
    }

    #[test]
    fn test_parse_evaluate() {
        let cli = Cli::parse_from(["moodjournal", "evaluate", "a.json", "b.json", "--max-mismatches", "2"]);
        match cli.command {
            Commands::Evaluate { files, max_mismatches } => {
                assert_eq!(files.len(), 2);
                assert_eq!(max_mismatches, Some(2));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_add_requires_text() {
        assert!(Cli::try_parse_from(["moodjournal", "add"]).is_err());
    }
}
