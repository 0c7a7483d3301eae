use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sentilyze")]
#[command(
    author,
    version,
    about = "Classify short texts as positive or negative sentiment"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SENTILYZE_CONFIG", default_value = "sentilyze.yaml")]
    pub config: String,

    /// Vectorizer artifact path
    #[arg(long, global = true, env = "SENTILYZE_VECTORIZER")]
    pub vectorizer: Option<PathBuf>,

    /// Classifier artifact path
    #[arg(long, global = true, env = "SENTILYZE_MODEL")]
    pub model: Option<PathBuf>,

    /// Newline-delimited stopword file (defaults to the built-in English list)
    #[arg(long, global = true)]
    pub stopwords: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a single text
    Analyze {
        /// Text to analyze (read from stdin when omitted)
        #[arg(short, long)]
        text: Option<String>,
    },

    /// Classify each line read from stdin until EOF
    Interactive,

    /// Fetch a user's most recent posts and classify each one
    User {
        /// Username whose posts to fetch
        username: String,

        /// URL template with {username} and {count} placeholders
        #[arg(long, env = "SENTILYZE_SOURCE_URL", conflicts_with = "source_file")]
        source_url: Option<String>,

        /// JSON file mapping usernames to posts
        #[arg(long)]
        source_file: Option<PathBuf>,

        /// Print cards as HTML instead of plain text
        #[arg(long)]
        html: bool,
    },
}
