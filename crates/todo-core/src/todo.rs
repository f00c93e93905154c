use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Maximum task length, counted in characters after trimming.
pub const MAX_TASK_LEN: usize = 140;

/// Rows inserted by the bootstrapper into an empty table, in id order.
pub const DEFAULT_TODOS: [&str; 3] = [
    "Set up the development environment",
    "Write the first todo",
    "Mark a todo as done",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    pub task: String,
    pub done: bool,
}

impl Todo {
    pub fn new(id: i32, task: impl Into<String>) -> Self {
        Self {
            id,
            task: task.into(),
            done: false,
        }
    }
}

/// A task string that has been trimmed and length-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskText(String);

impl TaskText {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyTask);
        }

        let len = trimmed.chars().count();
        if len > MAX_TASK_LEN {
            return Err(Error::TaskTooLong {
                len,
                max: MAX_TASK_LEN,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validate a create payload of the form `{ "todo": string }`.
pub fn parse_new_task(body: &Value) -> Result<TaskText> {
    let obj = body.as_object().ok_or(Error::InvalidBody)?;

    match obj.get("todo") {
        None | Some(Value::Null) => Err(Error::MissingField("todo")),
        Some(Value::String(raw)) => TaskText::parse(raw),
        Some(_) => Err(Error::InvalidType {
            field: "todo",
            expected: "string",
        }),
    }
}

/// Validate an update payload of the form `{ "done": boolean }`.
pub fn parse_done(body: &Value) -> Result<bool> {
    let obj = body.as_object().ok_or(Error::InvalidBody)?;

    match obj.get("done") {
        None => Err(Error::MissingField("done")),
        Some(Value::Bool(done)) => Ok(*done),
        Some(_) => Err(Error::InvalidType {
            field: "done",
            expected: "boolean",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_text_trims() {
        let task = TaskText::parse("  Buy milk \n").unwrap();
        assert_eq!(task.as_str(), "Buy milk");
    }

    #[test]
    fn test_task_text_rejects_blank() {
        assert_eq!(TaskText::parse(""), Err(Error::EmptyTask));
        assert_eq!(TaskText::parse(" \t\n "), Err(Error::EmptyTask));
    }

    #[test]
    fn test_task_text_length_limit() {
        let exact = "a".repeat(MAX_TASK_LEN);
        assert!(TaskText::parse(&exact).is_ok());

        // Surrounding whitespace does not count towards the limit
        let padded = format!("   {}   ", exact);
        assert!(TaskText::parse(&padded).is_ok());

        let too_long = "a".repeat(MAX_TASK_LEN + 1);
        assert_eq!(
            TaskText::parse(&too_long),
            Err(Error::TaskTooLong {
                len: MAX_TASK_LEN + 1,
                max: MAX_TASK_LEN
            })
        );
    }

    #[test]
    fn test_task_text_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_TASK_LEN);
        assert!(accented.len() > MAX_TASK_LEN);
        assert!(TaskText::parse(&accented).is_ok());
    }

    #[test]
    fn test_parse_new_task() {
        assert_eq!(
            parse_new_task(&json!({"todo": "Buy milk"})).unwrap().as_str(),
            "Buy milk"
        );
        assert_eq!(parse_new_task(&json!({})), Err(Error::MissingField("todo")));
        assert_eq!(
            parse_new_task(&json!({"todo": null})),
            Err(Error::MissingField("todo"))
        );
        assert!(matches!(
            parse_new_task(&json!({"todo": 42})),
            Err(Error::InvalidType { field: "todo", .. })
        ));
        assert_eq!(parse_new_task(&json!(["todo"])), Err(Error::InvalidBody));
    }

    #[test]
    fn test_parse_done() {
        assert_eq!(parse_done(&json!({"done": true})), Ok(true));
        assert_eq!(parse_done(&json!({"done": false})), Ok(false));
        assert_eq!(parse_done(&json!({})), Err(Error::MissingField("done")));

        for value in [json!("true"), json!(1), json!(null), json!([true])] {
            assert!(matches!(
                parse_done(&json!({ "done": value })),
                Err(Error::InvalidType { field: "done", .. })
            ));
        }
    }

    #[test]
    fn test_todo_serialization() {
        let todo = Todo::new(4, "Buy milk");
        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            json!({"id": 4, "task": "Buy milk", "done": false})
        );
    }
}
