use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional command to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Gemini model to use (overrides GEMINI_MODEL)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a one-off message and print the reply
    Ask {
        /// The message to send
        #[arg(required = true)]
        message: Vec<String>,

        /// Also write the reply as a MathJax HTML page
        #[arg(long)]
        html: Option<PathBuf>,

        /// Print the reply without stripping bold markup
        #[arg(long)]
        raw: bool,

        /// Use light text for a dark page background
        #[arg(long, requires = "html")]
        dark: bool,
    },

    /// Show how a piece of text is split into text and math blocks
    Segment {
        /// The text to inspect
        #[arg(required = true)]
        text: Vec<String>,

        /// Also write the blocks as a MathJax HTML page
        #[arg(long)]
        html: Option<PathBuf>,

        /// Use light text for a dark page background
        #[arg(long, requires = "html")]
        dark: bool,
    },
}
