//! Domain events raised by aggregates.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Events accumulated by aggregates for the caller to dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    UserCreated {
        event_id: Uuid,
        user_id: Uuid,
        email: String,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent {
    pub fn user_created(user_id: Uuid, email: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        DomainEvent::UserCreated {
            event_id: Uuid::new_v4(),
            user_id,
            email: email.into(),
            occurred_at,
        }
    }

    /// Event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::UserCreated { .. } => "UserCreated",
        }
    }
}
