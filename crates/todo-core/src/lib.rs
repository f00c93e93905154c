pub mod todo;
pub mod event;
pub mod error;

// Re-exports
pub use todo::{parse_done, parse_new_task, TaskText, Todo, DEFAULT_TODOS, MAX_TASK_LEN};
pub use event::{EventType, TodoEvent};
pub use error::{Error, Result};
