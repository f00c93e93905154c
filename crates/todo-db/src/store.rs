use async_trait::async_trait;
use todo_core::{TaskText, Todo};

use crate::Result;

/// Outcome of a create: the inserted row plus the refreshed full list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTodo {
    pub todo: Todo,
    pub todos: Vec<Todo>,
}

/// Persistence operations backing the HTTP handlers.
///
/// Every method maps to one statement (create is an insert followed by a
/// read-only list). Implementations never retry; errors surface as-is.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos, ascending by id.
    async fn list(&self) -> Result<Vec<Todo>>;

    /// Insert a new todo with `done = false` and return it with the refreshed list.
    async fn create(&self, task: &TaskText) -> Result<CreatedTodo>;

    /// Set the `done` flag. `None` when no row has this id.
    async fn set_done(&self, id: i32, done: bool) -> Result<Option<Todo>>;

    async fn exists(&self, id: i32) -> Result<bool>;

    /// Round-trip to the backing store.
    async fn ping(&self) -> Result<()>;
}
