use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::Todo;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TodoRecord {
    pub id: i32,
    pub task: String,
    pub done: bool,
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Todo {
            id: record.id,
            task: record.task,
            done: record.done,
        }
    }
}
