use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `summary-seal` - sign and verify chat summary tokens.
#[derive(Parser, Debug)]
#[command(name = "summary-seal")]
#[command(version)]
#[command(about = "Seal, verify and cache HMAC-signed chat summaries.", long_about = None)]
pub struct Cli {
    /// Enable debug logging (token rejection reasons are logged at debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Seal a summary into a token
    Seal {
        /// Owning user id
        #[arg(short, long)]
        user: String,

        /// Task id ([A-Za-z0-9._:-], up to 64 characters)
        #[arg(short, long)]
        task: String,

        /// Summary text
        #[arg(short, long, required_unless_present = "summary_file")]
        summary: Option<String>,

        /// Read the summary text from a file
        #[arg(long, conflicts_with = "summary")]
        summary_file: Option<PathBuf>,

        /// Also store the token in the summary cache
        #[arg(long)]
        save: bool,
    },

    /// Verify a token and print its payload
    Unseal {
        /// Token to verify
        token: String,

        /// Refuse tokens older than this many seconds (overrides config)
        #[arg(long)]
        max_age_secs: Option<u64>,

        /// Require the token to belong to this user
        #[arg(long)]
        user: Option<String>,

        /// Require the token to belong to this task
        #[arg(long)]
        task: Option<String>,
    },

    /// Check whether a task id is acceptable for sealing
    TaskId {
        /// Task id to check
        task_id: String,
    },

    /// Generate a random sealing secret
    Keygen {
        /// Secret length in bytes (16-1024)
        #[arg(long, default_value = "32")]
        bytes: usize,
    },

    /// Manage the local summary cache
    Cache {
        #[command(subcommand)]
        cache_command: CacheCommands,
    },
}

/// Summary cache subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CacheCommands {
    /// List task ids with a stored summary
    List,
    /// Store a token for a task, replacing any previous one
    Save {
        /// Task id
        task: String,
        /// Sealed summary token
        token: String,
    },
    /// Verify and print the summary stored for a task
    Show {
        /// Task id
        task: String,
    },
    /// Remove the summary stored for a task
    Remove {
        /// Task id
        task: String,
    },
    /// Remove every stored summary
    Clear,
}
