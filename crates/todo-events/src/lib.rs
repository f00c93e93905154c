//! Mutation notifications for the todo service.
//!
//! Delivery is at-most-once and best-effort: a publish is attempted once,
//! never retried, and callers log failures instead of propagating them.

pub mod kafka;
pub mod noop;
pub mod error;

use async_trait::async_trait;
use todo_core::TodoEvent;

// Re-exports
pub use kafka::{KafkaConfig, KafkaPublisher, DEFAULT_TOPIC};
pub use noop::NoopPublisher;
pub use error::{Error, Result};

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Send one event to the configured topic.
    async fn publish(&self, event: &TodoEvent) -> Result<()>;
}

/// Serialize an event into its wire payload.
pub fn encode(event: &TodoEvent) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(event)?)
}
