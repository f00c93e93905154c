use std::sync::Arc;
use todo_db::TodoStore;
use todo_events::EventPublisher;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub publisher: Arc<dyn EventPublisher>,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { store, publisher }
    }
}
