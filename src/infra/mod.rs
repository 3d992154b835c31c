//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections
//! - The SQL migration ledger
//! - Repositories
//! - Domain event dispatch

pub mod db;
pub mod dispatcher;
pub mod repositories;

pub use db::{Database, MigrationLedger, PostgresMigrationStore};
pub use dispatcher::DomainEventDispatcher;
pub use repositories::UserAccountRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use dispatcher::MockDomainEventDispatcher;
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{InMemoryUserAccountRepository, MockUserAccountRepository};
