pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-exports
pub use config::Config;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
