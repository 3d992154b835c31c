//! Kit Fundador - starter-kit core
//!
//! This crate provides the building blocks a new project starts from:
//! a bcrypt password value object, a file-based SQL migration ledger
//! and an idempotent seed runner, following DDD and SOLID principles.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and value objects
//! - **services**: Application use cases (registration, seeding)
//! - **infra**: Infrastructure concerns (database, migration ledger, repositories)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Apply pending migrations
//! cargo run -- migrate up
//!
//! # Create a new migration file
//! cargo run -- migrate create "add users table"
//!
//! # Hash a password
//! cargo run -- password hash "correct horse battery"
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{HasherConfig, Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::{Database, MigrationLedger};
