use std::path::PathBuf;

use clap::{Parser, Subcommand};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "studylog", version = VERSION)]
#[command(about = "Track study sessions: topic, notes, attached files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a new study session
    #[command(alias = "a")]
    Add {
        /// Topic of the session
        #[arg(required = false)]
        topic: Vec<String>,

        /// Study notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Attach a file (repeatable)
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
    },

    /// List recorded sessions, newest first
    #[command(alias = "ls")]
    List,

    /// Show one session in full
    #[command(alias = "v")]
    View {
        /// Position in the list (1 = newest)
        index: usize,
    },

    /// Edit a session in place
    #[command(alias = "e")]
    Edit {
        /// Position in the list (1 = newest)
        index: usize,

        /// Replacement topic
        #[arg(short, long)]
        topic: Option<String>,

        /// Replacement notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Attach a file (repeatable; prior attachments are replaced)
        #[arg(short, long = "file", value_name = "PATH")]
        files: Vec<PathBuf>,
    },

    /// Delete a session
    #[command(alias = "rm")]
    Delete {
        /// Position in the list (1 = newest)
        index: usize,
    },
}
