//! In-memory user account repository, for tests only.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::UserAccountRepository;
use crate::domain::{Email, User};
use crate::errors::{AppError, AppResult};

/// Test double keyed by the trimmed, lowercased email.
#[derive(Default)]
pub struct InMemoryUserAccountRepository {
    store: Mutex<HashMap<String, User>>,
}

impl InMemoryUserAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with users
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        for user in users {
            repo.seed(user);
        }
        repo
    }

    pub fn seed(&self, user: User) {
        if let Ok(mut store) = self.store.lock() {
            store.insert(normalize(user.email().as_str()), user);
        }
    }

    pub fn list(&self) -> Vec<User> {
        self.store
            .lock()
            .map(|store| store.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut store) = self.store.lock() {
            store.clear();
        }
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait]
impl UserAccountRepository for InMemoryUserAccountRepository {
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let store = self
            .store
            .lock()
            .map_err(|_| AppError::internal("user store lock poisoned"))?;
        Ok(store.get(&normalize(email.as_str())).cloned())
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| AppError::internal("user store lock poisoned"))?;
        store.insert(normalize(user.email().as_str()), user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Password, UserRole};

    const DIGEST: &str = "$2b$04$abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0";

    fn user(email: &str) -> User {
        User::create(
            Email::new(email).unwrap(),
            "Test User".to_string(),
            Password::from_digest(DIGEST).unwrap(),
            UserRole::User,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let repo = InMemoryUserAccountRepository::with_users([user("Jane@Example.com")]);

        let found = repo
            .find_by_email(&Email::new("jane@example.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_save_list_clear() {
        let repo = InMemoryUserAccountRepository::new();
        repo.save(&user("a@example.com")).await.unwrap();
        repo.save(&user("b@example.com")).await.unwrap();
        assert_eq!(repo.list().len(), 2);

        repo.clear();
        assert!(repo.list().is_empty());
    }
}
