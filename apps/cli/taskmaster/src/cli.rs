use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Environment variable read for `--password` when the flag is omitted.
pub const PASSWORD_ENV: &str = "TASKMASTER_PASSWORD";

#[derive(Debug, Parser)]
#[command(
    name = "taskmaster",
    version,
    about = "Command line client for the TaskMaster task API"
)]
pub struct Cli {
    /// Server base URL (overrides config and TASKMASTER_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding config.json (default: platform config dir)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Output as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Mirror debug logging on the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Account email
        email: String,
        /// Account password
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
    /// Create a new account
    Register {
        /// Account email
        email: String,
        /// Account password
        #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show whether a session token is stored
    Status,
    /// List tasks
    List {
        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Tasks per page
        #[arg(long, default_value_t = 10)]
        limit: u32,
        /// Search by title
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Create a task
    Create {
        /// Task title
        title: String,
        /// Task description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a task by ID
    Delete {
        /// Task ID
        id: String,
    },
}
