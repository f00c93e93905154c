use async_trait::async_trait;
use todo_core::TodoEvent;

use crate::{EventPublisher, Result};

/// Publisher used when no bus is configured or reachable. Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPublisher;

#[async_trait]
impl EventPublisher for NoopPublisher {
    async fn publish(&self, event: &TodoEvent) -> Result<()> {
        tracing::trace!(
            event_type = event.event_type.as_str(),
            todo_id = event.todo.id,
            "No event bus connected, skipping publish"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_core::Todo;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_noop_publish_succeeds() {
        let publisher = NoopPublisher;
        let event = TodoEvent::created(Todo::new(1, "anything"));
        assert_ok!(publisher.publish(&event).await);
    }
}
