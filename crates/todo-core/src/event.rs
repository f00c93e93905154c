use serde::{Deserialize, Serialize};

use crate::Todo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Created,
    Updated,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Created => "created",
            EventType::Updated => "updated",
        }
    }
}

/// Notification emitted after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoEvent {
    pub event_type: EventType,
    pub todo: Todo,
}

impl TodoEvent {
    pub fn created(todo: Todo) -> Self {
        Self {
            event_type: EventType::Created,
            todo,
        }
    }

    pub fn updated(todo: Todo) -> Self {
        Self {
            event_type: EventType::Updated,
            todo,
        }
    }

    /// Message key used for partitioning; events for one todo stay ordered.
    pub fn key(&self) -> String {
        self.todo.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_payload_shape() {
        let mut todo = Todo::new(7, "Water plants");
        todo.done = true;
        let event = TodoEvent::updated(todo);

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "eventType": "updated",
                "todo": {"id": 7, "task": "Water plants", "done": true}
            })
        );
        assert_eq!(event.key(), "7");
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(EventType::Created.as_str(), "created");
        assert_eq!(
            serde_json::to_value(EventType::Created).unwrap(),
            json!("created")
        );
    }
}
