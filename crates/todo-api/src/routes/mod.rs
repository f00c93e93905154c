use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health checks
        .route("/", get(handlers::health::liveness))
        .route("/healthz", get(handlers::health::readiness))

        // Todo endpoints
        .route(
            "/todos",
            get(handlers::todo::list_todos).post(handlers::todo::create_todo),
        )
        .route("/todos/:id", put(handlers::todo::update_todo))

        // Add state
        .with_state(state)

        // Request tracing and CORS
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
