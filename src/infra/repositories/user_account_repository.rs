//! User account repository port.

use async_trait::async_trait;

use crate::domain::{Email, User};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence port used by the registration use case.
///
/// Real adapters live with the consuming application.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    /// Find a user by email (case-insensitive)
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>>;

    /// Insert or replace a user
    async fn save(&self, user: &User) -> AppResult<()>;
}
