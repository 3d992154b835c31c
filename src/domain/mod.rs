//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.
//!
//! DDD: Domain layer has NO infrastructure dependencies (except error types).
//! Contains: Entities, Value Objects, Domain Events.

pub mod email;
pub mod events;
pub mod password;
pub mod user;

pub use email::Email;
pub use events::DomainEvent;
pub use password::{HasherConfig, Password};
pub use user::{PersistedUser, User, UserRole, UserSnapshot};
