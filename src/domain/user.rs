//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{DomainEvent, Email, Password};
use crate::config::{MAX_NAME_LENGTH, ROLE_ADMIN, ROLE_GUEST, ROLE_USER};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
    Guest,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl std::str::FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(UserRole::Admin),
            ROLE_USER => Ok(UserRole::User),
            ROLE_GUEST => Ok(UserRole::Guest),
            _ => Err(AppError::validation(format!(
                "role must be one of: \"{}\", \"{}\", \"{}\"",
                ROLE_ADMIN, ROLE_USER, ROLE_GUEST
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
            UserRole::Guest => write!(f, "{}", ROLE_GUEST),
        }
    }
}

/// Stored state of a user, as loaded by a repository adapter.
#[derive(Debug, Clone)]
pub struct PersistedUser {
    pub id: Uuid,
    pub email: Email,
    pub name: String,
    pub password: Password,
    pub role: UserRole,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User aggregate root
#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    email: Email,
    name: String,
    password: Password,
    role: UserRole,
    email_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl User {
    /// Create a new user and record a `UserCreated` event.
    pub fn create(email: Email, name: String, password: Password, role: UserRole) -> AppResult<Self> {
        validate_name(&name)?;

        let now = Utc::now();
        let id = Uuid::new_v4();
        let event = DomainEvent::user_created(id, email.as_str(), now);

        Ok(Self {
            id,
            email,
            name,
            password,
            role,
            email_verified: false,
            created_at: now,
            updated_at: now,
            events: vec![event],
        })
    }

    /// Rebuild a user from storage. Name rules are re-checked; no event is raised.
    pub fn from_persistence(stored: PersistedUser) -> AppResult<Self> {
        validate_name(&stored.name)?;

        Ok(Self {
            id: stored.id,
            email: stored.email,
            name: stored.name,
            password: stored.password,
            role: stored.role,
            email_verified: stored.email_verified,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            events: Vec::new(),
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn email_verified(&self) -> bool {
        self.email_verified
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Mark the email as verified
    pub fn verify_email(&mut self) -> AppResult<()> {
        if self.email_verified {
            return Err(AppError::validation("Email already verified"));
        }
        self.email_verified = true;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Update user's name
    pub fn change_name(&mut self, name: String) -> AppResult<()> {
        validate_name(&name)?;
        self.name = name;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Replace the stored password
    pub fn change_password(&mut self, password: Password) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    /// Pending domain events
    pub fn events(&self) -> &[DomainEvent] {
        &self.events
    }

    /// Drain pending domain events
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("User name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::validation("User name too long"));
    }
    Ok(())
}

/// Snapshot of a user safe to hand out (no password)
#[derive(Debug, Clone, Serialize)]
pub struct UserSnapshot {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            role: user.role,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}
