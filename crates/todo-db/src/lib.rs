pub mod models;
pub mod store;
pub mod repository;
pub mod memory;
pub mod error;

// Re-exports
pub use models::TodoRecord;
pub use store::{CreatedTodo, TodoStore};
pub use repository::{BootstrapReport, Database, DbConfig};
pub use memory::MemoryStore;
pub use error::{Error, Result};
