//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Kit Fundador - migrations, seeds and credential tooling
#[derive(Parser, Debug)]
#[command(name = "kit-fundador")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run database migrations
    Migrate(MigrateArgs),

    /// Insert base seed data
    Seed,

    /// Hash and verify passwords
    Password(PasswordArgs),
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Defaults to `up`
    #[command(subcommand)]
    pub action: Option<MigrateAction>,
}

/// Migration actions
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up,
    /// Revert the most recently applied migration
    Down,
    /// Show applied, pending and orphaned migrations
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create an empty migration file
    Create {
        /// Migration name (e.g., "add users table")
        name: Option<String>,
    },
    #[command(external_subcommand)]
    Other(Vec<String>),
}

/// Arguments for the password command
#[derive(Parser, Debug)]
pub struct PasswordArgs {
    #[command(subcommand)]
    pub action: PasswordAction,
}

/// Password actions
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum PasswordAction {
    /// Print the bcrypt digest of a plaintext password
    Hash {
        /// Plaintext password
        #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
        plaintext: Option<String>,

        /// Read the plaintext from standard input
        #[arg(long)]
        stdin: bool,
    },
    /// Check a candidate password against a digest
    Verify {
        /// bcrypt digest
        digest: String,
        /// Candidate plaintext
        candidate: String,
    },
}
