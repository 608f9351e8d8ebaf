use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "rule-pilot",
    about = "Context-aware rule selection for AI assistant sessions",
    version
)]
pub struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Path to the loader configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the selection pipeline for a request and print the injectable document.
    Load {
        /// The request text.
        prompt: String,
        /// Project directory to detect context in.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Detect the technology profile of a project directory.
    Detect {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Classify a prompt and show the extracted intent.
    Classify {
        /// The request text.
        prompt: String,
    },
    /// Load and validate the rules catalog.
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
