use crate::{
    models::TodoRecord,
    store::{CreatedTodo, TodoStore},
    Error, Result,
};
use async_trait::async_trait;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    Pool, Postgres,
};
use std::time::Duration;
use todo_core::{TaskText, Todo, DEFAULT_TODOS};

/// Connection settings for the PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
}

impl DbConfig {
    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .options([(
                "statement_timeout",
                self.statement_timeout.as_millis().to_string(),
            )])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Number of default rows inserted; zero when the table already had data.
    pub seeded: u64,
}

#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    /// Create new database connection
    pub async fn new(config: &DbConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| {
                Error::Connection(format!(
                    "{}@{}:{}/{}: {}",
                    config.user, config.host, config.port, config.database, e
                ))
            })?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Ensure the `todos` table has the expected shape and seed it when empty.
    ///
    /// Safe to run on every startup. Existing rows are never touched; a table
    /// created before `done` existed gets the column added with its default.
    pub async fn bootstrap(&self) -> Result<BootstrapReport> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id SERIAL PRIMARY KEY,
                task TEXT NOT NULL,
                done BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Bootstrap(format!("creating todos table: {}", e)))?;

        sqlx::query("ALTER TABLE todos ADD COLUMN IF NOT EXISTS done BOOLEAN NOT NULL DEFAULT FALSE")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Bootstrap(format!("adding done column: {}", e)))?;

        let seeded = self
            .seed_defaults()
            .await
            .map_err(|e| Error::Bootstrap(format!("seeding default todos: {}", e)))?;

        if seeded > 0 {
            tracing::info!(seeded, "Seeded empty todos table with default rows");
        } else {
            tracing::debug!("todos table already populated, skipping seed");
        }

        Ok(BootstrapReport { seeded })
    }

    async fn seed_defaults(&self) -> Result<u64> {
        let tasks: Vec<String> = DEFAULT_TODOS.iter().map(|t| t.to_string()).collect();

        // The table lock serializes concurrent bootstraps so only one of them
        // can observe the table as empty.
        let mut tx = self.pool.begin().await?;

        sqlx::query("LOCK TABLE todos IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            r#"
            INSERT INTO todos (task)
            SELECT seed.task
            FROM UNNEST($1::TEXT[]) WITH ORDINALITY AS seed(task, ord)
            WHERE NOT EXISTS (SELECT 1 FROM todos)
            ORDER BY seed.ord
            "#,
        )
        .bind(&tasks)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(result.rows_affected())
    }

    // ========================================================================
    // Todo Operations
    // ========================================================================

    /// List all todos in id order
    pub async fn list_todos(&self) -> Result<Vec<Todo>> {
        let records =
            sqlx::query_as::<_, TodoRecord>("SELECT id, task, done FROM todos ORDER BY id ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(records.into_iter().map(Todo::from).collect())
    }

    /// Insert a todo and return the stored row
    pub async fn insert_todo(&self, task: &TaskText) -> Result<Todo> {
        let record = sqlx::query_as::<_, TodoRecord>(
            "INSERT INTO todos (task, done) VALUES ($1, FALSE) RETURNING id, task, done",
        )
        .bind(task.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(record.into())
    }

    /// Update the done flag
    pub async fn update_done(&self, id: i32, done: bool) -> Result<Option<Todo>> {
        let record = sqlx::query_as::<_, TodoRecord>(
            "UPDATE todos SET done = $1 WHERE id = $2 RETURNING id, task, done",
        )
        .bind(done)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Todo::from))
    }

    pub async fn todo_exists(&self, id: i32) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM todos WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    pub async fn count_todos(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl TodoStore for Database {
    async fn list(&self) -> Result<Vec<Todo>> {
        self.list_todos().await
    }

    async fn create(&self, task: &TaskText) -> Result<CreatedTodo> {
        let todo = self.insert_todo(task).await?;
        tracing::debug!(id = todo.id, "Inserted todo");

        let todos = self.list_todos().await?;

        Ok(CreatedTodo { todo, todos })
    }

    async fn set_done(&self, id: i32, done: bool) -> Result<Option<Todo>> {
        self.update_done(id, done).await
    }

    async fn exists(&self, id: i32) -> Result<bool> {
        self.todo_exists(id).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
