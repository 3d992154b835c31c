//! Registration service - Registers new user accounts.
//!
//! SOLID (SRP): Handles the sign-up use case only.
//! DDD: Orchestrates the Email/Password value objects and the User aggregate
//! through the `UserAccountRepository` port.

use std::sync::Arc;

use crate::config::MAX_NAME_LENGTH;
use crate::domain::{DomainEvent, Email, HasherConfig, Password, User, UserRole, UserSnapshot};
use crate::errors::{AppError, AppResult};
use crate::infra::{DomainEventDispatcher, UserAccountRepository};

/// Normalized registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterUserAccountCommand {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
}

impl RegisterUserAccountCommand {
    /// Trim and validate raw input. Role defaults to `user`.
    pub fn new(email: &str, name: &str, password: &str, role: Option<&str>) -> AppResult<Self> {
        let email = ensure_non_empty(email, "email")?.to_lowercase();

        let name = ensure_non_empty(name, "name")?;
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "name is too long (max {} characters)",
                MAX_NAME_LENGTH
            )));
        }

        let password = ensure_non_empty(password, "password")?;
        let role = match role {
            Some(role) => role.parse()?,
            None => UserRole::default(),
        };

        Ok(Self {
            email,
            name,
            password,
            role,
        })
    }
}

fn ensure_non_empty(value: &str, field: &str) -> AppResult<String> {
    if value.is_empty() {
        return Err(AppError::validation(format!("{} cannot be empty", field)));
    }
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{} cannot be blank", field)));
    }
    Ok(trimmed.to_string())
}

/// Outcome of a successful registration
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    pub user: UserSnapshot,
    pub events: Vec<DomainEvent>,
}

/// Registers accounts through a `UserAccountRepository`.
///
/// Events are always returned to the caller; with a dispatcher attached
/// they are also published once the user is saved.
pub struct RegisterUserAccountHandler {
    users: Arc<dyn UserAccountRepository>,
    hasher: HasherConfig,
    dispatcher: Option<Arc<dyn DomainEventDispatcher>>,
}

impl RegisterUserAccountHandler {
    pub fn new(users: Arc<dyn UserAccountRepository>, hasher: HasherConfig) -> Self {
        Self {
            users,
            hasher,
            dispatcher: None,
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn DomainEventDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    pub async fn execute(&self, command: RegisterUserAccountCommand) -> AppResult<RegistrationResult> {
        let email = Email::new(command.email)?;
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(format!("UserAccount with email {}", email)));
        }

        let password = Password::hash(&command.password, &self.hasher).await?;
        let mut user = User::create(email, command.name, password, command.role)?;

        self.users.save(&user).await?;
        tracing::info!(user_id = %user.id(), "User account registered");

        let events = user.take_events();
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.publish(&events).await?;
        }

        Ok(RegistrationResult {
            user: UserSnapshot::from(&user),
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::{InMemoryUserAccountRepository, MockUserAccountRepository};
    use crate::infra::MockDomainEventDispatcher;

    fn fast() -> HasherConfig {
        HasherConfig::new(4).unwrap()
    }

    fn command(email: &str) -> RegisterUserAccountCommand {
        RegisterUserAccountCommand::new(email, "Jane Doe", "correct horse battery", None).unwrap()
    }

    #[tokio::test]
    async fn test_register_persists_user_and_returns_event() {
        let repo = Arc::new(InMemoryUserAccountRepository::new());
        let handler = RegisterUserAccountHandler::new(repo.clone(), fast());

        let result = handler.execute(command("Jane@Example.com")).await.unwrap();

        assert_eq!(result.user.email, "jane@example.com");
        assert_eq!(result.user.role, UserRole::User);
        assert!(!result.user.email_verified);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].event_type(), "UserCreated");

        let stored = repo.list();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].password().verify("correct horse battery"));
    }

    #[tokio::test]
    async fn test_register_publishes_events_after_save() {
        let repo = Arc::new(InMemoryUserAccountRepository::new());
        let mut dispatcher = MockDomainEventDispatcher::new();
        dispatcher
            .expect_publish()
            .withf(|events| events.len() == 1 && events[0].event_type() == "UserCreated")
            .times(1)
            .returning(|_| Ok(()));

        let handler = RegisterUserAccountHandler::new(repo.clone(), fast())
            .with_dispatcher(Arc::new(dispatcher));
        let result = handler.execute(command("jane@example.com")).await.unwrap();

        assert_eq!(result.events.len(), 1);
        assert_eq!(repo.list().len(), 1);
    }

    #[tokio::test]
    async fn test_register_surfaces_dispatch_failure() {
        let mut dispatcher = MockDomainEventDispatcher::new();
        dispatcher
            .expect_publish()
            .returning(|_| Err(AppError::internal("bus down")));

        let handler =
            RegisterUserAccountHandler::new(Arc::new(InMemoryUserAccountRepository::new()), fast())
                .with_dispatcher(Arc::new(dispatcher));

        let err = handler.execute(command("jane@example.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Internal(ref msg) if msg == "bus down"));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let repo = Arc::new(InMemoryUserAccountRepository::new());
        let handler = RegisterUserAccountHandler::new(repo.clone(), fast());

        handler.execute(command("jane@example.com")).await.unwrap();
        let err = handler
            .execute(command("JANE@example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.list().len(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_weak_password_before_saving() {
        let mut mock = MockUserAccountRepository::new();
        mock.expect_find_by_email().returning(|_| Ok(None));
        mock.expect_save().never();

        let handler = RegisterUserAccountHandler::new(Arc::new(mock), fast());
        let weak = RegisterUserAccountCommand::new("jane@example.com", "Jane", "short", None).unwrap();

        let err = handler.execute(weak).await.unwrap_err();
        assert!(matches!(err, AppError::WeakSecret { min_length: 12 }));
    }

    #[tokio::test]
    async fn test_register_propagates_save_failure() {
        let mut mock = MockUserAccountRepository::new();
        mock.expect_find_by_email().returning(|_| Ok(None));
        mock.expect_save()
            .times(1)
            .returning(|_| Err(AppError::internal("disk full")));

        let handler = RegisterUserAccountHandler::new(Arc::new(mock), fast());
        let err = handler.execute(command("jane@example.com")).await.unwrap_err();

        assert!(matches!(err, AppError::Internal(ref msg) if msg == "disk full"));
    }

    #[test]
    fn test_command_normalizes_input() {
        let command =
            RegisterUserAccountCommand::new("  Jane@Example.COM ", " Jane ", " pw ", None).unwrap();

        assert_eq!(command.email, "jane@example.com");
        assert_eq!(command.name, "Jane");
        assert_eq!(command.password, "pw");
        assert_eq!(command.role, UserRole::User);
    }

    #[test]
    fn test_command_rejects_empty_and_blank() {
        let empty = RegisterUserAccountCommand::new("", "Jane", "pw", None).unwrap_err();
        assert_eq!(empty.to_string(), "email cannot be empty");

        let blank = RegisterUserAccountCommand::new("a@b.co", "  ", "pw", None).unwrap_err();
        assert_eq!(blank.to_string(), "name cannot be blank");
    }

    #[test]
    fn test_command_rejects_long_name_and_bad_role() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(RegisterUserAccountCommand::new("a@b.co", &long, "pw", None).is_err());
        assert!(RegisterUserAccountCommand::new("a@b.co", "Jane", "pw", Some("root")).is_err());
        assert_eq!(
            RegisterUserAccountCommand::new("a@b.co", "Jane", "pw", Some("admin"))
                .unwrap()
                .role,
            UserRole::Admin
        );
    }
}
