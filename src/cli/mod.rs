//! CLI module for rolegate
//!
//! Provides command-line interface parsing and handling for the rolegate-server binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// rolegate - Role-based authentication server
///
/// Registers users, issues day-long session tokens at login, and gates
/// routes by token validity and role.
#[derive(Parser, Debug)]
#[command(
    name = "rolegate-server",
    version,
    about = "rolegate - Role-based authentication server",
    long_about = "Registers users with hashed credentials, issues signed session tokens at login,\n\
                  and gates API routes by token validity and role membership.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a new project.",
    after_help = "EXAMPLES:\n    \
                  rolegate-server init                                   # Scaffold rolegate.toml and .env.example\n    \
                  rolegate-server                                        # Start the server (requires rolegate.toml)\n    \
                  rolegate-server --config my.toml                       # Use a custom config file\n    \
                  rolegate-server user create -u root -p s3cret --role admin\n    \
                  rolegate-server token inspect <token>"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "rolegate.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit server logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new rolegate project with configuration files
    ///
    /// Creates rolegate.toml, .env.example, the data/ directory and a
    /// .gitignore.
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file and the signing secret
        #[arg(long)]
        validate: bool,
    },

    /// Manage users directly in the store
    #[command(subcommand)]
    User(UserCommands),

    /// Work with session tokens
    #[command(subcommand)]
    Token(TokenCommands),
}

/// User management subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create a user. Unlike the register endpoint, any role is allowed here,
    /// including `admin`.
    Create {
        /// Username (must be unique)
        #[arg(short, long)]
        username: String,

        /// Plaintext password; stored hashed
        #[arg(short, long)]
        password: String,

        /// Role name
        #[arg(short, long, default_value = "student")]
        role: String,
    },
}

/// Token subcommands
#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Verify a token with the configured secret and print its claims
    Inspect {
        /// The token, with or without a `Bearer ` prefix
        token: String,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
