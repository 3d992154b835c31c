//! Domain event dispatch port.
//!
//! Adapters (message bus, outbox, webhooks) implement this; use cases call
//! it after draining events from an aggregate.

use async_trait::async_trait;

use crate::domain::DomainEvent;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DomainEventDispatcher: Send + Sync {
    /// Publish events in the order they were raised
    async fn publish(&self, events: &[DomainEvent]) -> AppResult<()>;
}
