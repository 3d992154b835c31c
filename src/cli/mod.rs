//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations (up, down, status, create)
//! - `seed` - Base seed data
//! - `password` - Password hashing and verification

pub mod args;

pub use args::{Cli, Commands};
