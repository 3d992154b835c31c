//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod user_account_repository;

#[cfg(any(test, feature = "test-utils"))]
mod in_memory;

pub use user_account_repository::UserAccountRepository;

// Test doubles (both unit and integration tests)
#[cfg(any(test, feature = "test-utils"))]
pub use in_memory::InMemoryUserAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_account_repository::MockUserAccountRepository;
