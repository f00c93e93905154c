use crate::{
    store::{CreatedTodo, TodoStore},
    Error, Result,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use todo_core::{TaskText, Todo, DEFAULT_TODOS};
use tokio::sync::RwLock;

#[derive(Default)]
struct Rows {
    todos: BTreeMap<i32, Todo>,
    last_id: i32,
}

impl Rows {
    fn insert(&mut self, task: &str) -> Todo {
        self.last_id += 1;
        let todo = Todo::new(self.last_id, task);
        self.todos.insert(todo.id, todo.clone());
        todo
    }

    fn ordered(&self) -> Vec<Todo> {
        self.todos.values().cloned().collect()
    }
}

/// In-process store with the same semantics as [`crate::Database`].
///
/// Ids are assigned from a monotonically increasing counter, like `SERIAL`.
/// Availability can be toggled to simulate an unreachable database.
pub struct MemoryStore {
    rows: RwLock<Rows>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows::default()),
            available: AtomicBool::new(true),
        }
    }

    /// A store that has already been bootstrapped with the default rows.
    pub fn seeded() -> Self {
        let mut rows = Rows::default();
        for task in DEFAULT_TODOS {
            rows.insert(task);
        }

        Self {
            rows: RwLock::new(rows),
            available: AtomicBool::new(true),
        }
    }

    /// Seed the default rows if the store is empty. Returns the number inserted.
    pub async fn bootstrap(&self) -> Result<u64> {
        self.check_available()?;

        let mut rows = self.rows.write().await;
        if !rows.todos.is_empty() {
            return Ok(0);
        }

        for task in DEFAULT_TODOS {
            rows.insert(task);
        }

        Ok(DEFAULT_TODOS.len() as u64)
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::Unavailable)
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Todo>> {
        self.check_available()?;
        Ok(self.rows.read().await.ordered())
    }

    async fn create(&self, task: &TaskText) -> Result<CreatedTodo> {
        self.check_available()?;

        let mut rows = self.rows.write().await;
        let todo = rows.insert(task.as_str());
        let todos = rows.ordered();

        Ok(CreatedTodo { todo, todos })
    }

    async fn set_done(&self, id: i32, done: bool) -> Result<Option<Todo>> {
        self.check_available()?;

        let mut rows = self.rows.write().await;
        Ok(rows.todos.get_mut(&id).map(|todo| {
            todo.done = done;
            todo.clone()
        }))
    }

    async fn exists(&self, id: i32) -> Result<bool> {
        self.check_available()?;
        Ok(self.rows.read().await.todos.contains_key(&id))
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}
